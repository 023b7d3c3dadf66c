//! Namespace-partitioned splitting of API descriptions.
//!
//! One Swagger 2 / OpenAPI 3 document goes in. Its named definitions are
//! grouped by namespace, each group is closed under reference so it is
//! self-contained, and every resulting document is handed to a [`Codegen`]
//! and written as one artifact.
//!
//! ```text
//! source ─► SchemaDocument ─► group_by_key ─► build_closure ─► Codegen ─► <group>.<ext>
//! ```

pub mod closure;
pub mod codegen;
pub mod document;
pub mod error;
pub mod partition;
pub mod pipeline;
pub mod references;
pub mod sanitize;
pub mod source;

pub use closure::{IsolatedDocument, build_closure, resolve_closure};
pub use codegen::{Codegen, JsonDocumentGenerator, TypeScriptGenerator, TypeScriptSettings};
pub use document::{DefinitionUniverse, DocumentInfo, Schema, SchemaDialect, SchemaDocument};
pub use error::{CodegenError, PipelineError, RetrievalError};
pub use partition::{GLOBAL_NAMESPACE, Group, group_by_key, namespace_key, namespace_key_with};
pub use pipeline::{
    Artifact, FailurePolicy, GroupPlan, Pipeline, PipelineOptions, RunSummary, plan_groups,
};
pub use references::{NodeId, collect_references, extract_reference_name};
pub use sanitize::sanitize_file_name;
pub use source::{RetrievalOptions, SourceLocator, load_document};
