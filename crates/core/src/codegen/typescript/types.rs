//! Declaration IR between normalization and emission.

/// A type expression.
#[derive(Debug, Clone, PartialEq)]
pub enum TsType {
    Primitive(TsPrimitive),
    /// `T[]`
    Array(Box<TsType>),
    /// `A | B`
    Union(Vec<TsType>),
    /// `A & B`
    Intersection(Vec<TsType>),
    /// Inline object literal type.
    Object(Vec<TsProp>),
    /// `Record<K, V>`
    Record {
        key: Box<TsType>,
        value: Box<TsType>,
    },
    Literal(TsLiteral),
    /// A declared definition or a global such as `Date` or `Blob`.
    Ref(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TsPrimitive {
    String,
    Number,
    Boolean,
    Null,
    Undefined,
    Unknown,
}

/// One member of an interface, class or object literal type.
#[derive(Debug, Clone, PartialEq)]
pub struct TsProp {
    pub name: String,
    pub ty: TsType,
    /// Absent from the schema's `required` list.
    pub optional: bool,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TsLiteral {
    String(String),
    Number(f64),
    Int(i64),
    Bool(bool),
    Null,
}

/// Shape of one exported declaration.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeDefKind {
    Interface {
        extends: Vec<String>,
        properties: Vec<TsProp>,
    },
    /// Classes extend at most one base.
    Class {
        extends: Option<String>,
        properties: Vec<TsProp>,
        constructor_interface: bool,
        clone_method: bool,
    },
    TypeAlias {
        ty: TsType,
    },
    /// A `const` object of the members plus a type alias of its values.
    ConstEnum {
        values: Vec<(String, TsLiteral)>,
    },
}

/// One exported declaration, generated from one definition.
#[derive(Debug, Clone, PartialEq)]
pub struct TsTypeDef {
    pub name: String,
    pub description: Option<String>,
    pub kind: TypeDefKind,
}

/// The contents of one generated file.
#[derive(Debug, Clone)]
pub struct TsModule {
    /// Comment lines written before any declaration.
    pub header: Vec<String>,
    pub types: Vec<TsTypeDef>,
}
