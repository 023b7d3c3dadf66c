//! TypeScript emission settings.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

/// How object definitions are declared.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeStyle {
    /// `export interface Foo { ... }`
    #[default]
    Interface,
    /// `export class Foo { ... }`
    Class,
}

/// The value written for nullable types.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NullValue {
    /// `T | null`
    #[default]
    Null,
    /// `T | undefined`
    Undefined,
}

/// The type used for `date` and `date-time` strings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateTimeType {
    /// `Date`
    #[default]
    Date,
    /// `string`
    String,
}

/// Settings for [`TypeScriptGenerator`](super::TypeScriptGenerator).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TypeScriptSettings {
    /// Interfaces or classes.
    pub type_style: TypeStyle,
    /// Null or undefined for nullable types.
    pub null_value: NullValue,
    /// Date or string for dates.
    pub date_time_type: DateTimeType,
    /// For classes: also emit an `I<Name>` interface and a constructor taking it.
    pub generate_constructor_interface: bool,
    /// For classes: emit a `clone()` method.
    pub generate_clone_method: bool,
    /// Appended to the file name to form the client name in the file header.
    pub client_class_suffix: String,
}

impl Default for TypeScriptSettings {
    fn default() -> Self {
        Self {
            type_style: TypeStyle::Interface,
            null_value: NullValue::Null,
            date_time_type: DateTimeType::Date,
            generate_constructor_interface: false,
            generate_clone_method: false,
            client_class_suffix: "Client".to_string(),
        }
    }
}

impl TypeScriptSettings {
    /// Client name recorded in the header of `file_name`'s artifact.
    pub fn client_class_name(&self, file_name: &str) -> String {
        format!("{file_name}{}", self.client_class_suffix)
    }
}

macro_rules! keyword_enum {
    ($ty:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        impl $ty {
            /// The keyword as written on the command line and in config files.
            pub fn as_str(self) -> &'static str {
                match self {
                    $($ty::$variant => $text,)+
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.to_ascii_lowercase().as_str() {
                    $($text => Ok($ty::$variant),)+
                    other => Err(format!(
                        "unknown {} '{other}', expected one of: {}",
                        stringify!($ty),
                        [$($text),+].join(", ")
                    )),
                }
            }
        }
    };
}

keyword_enum!(TypeStyle { Interface => "interface", Class => "class" });
keyword_enum!(NullValue { Null => "null", Undefined => "undefined" });
keyword_enum!(DateTimeType { Date => "date", String => "string" });
