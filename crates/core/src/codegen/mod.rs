//! Code emission for isolated documents.
//!
//! The split pipeline is format-agnostic: it hands every isolated document to
//! a [`Codegen`] and writes whatever text comes back. Two emitters ship:
//!
//! - [`TypeScriptGenerator`]: TypeScript type declarations
//! - [`JsonDocumentGenerator`]: the isolated document as a standalone JSON schema document

mod json;
pub mod typescript;

pub use json::JsonDocumentGenerator;
pub use typescript::{DateTimeType, NullValue, TypeScriptGenerator, TypeScriptSettings, TypeStyle};

use std::fmt;

use crate::closure::IsolatedDocument;
use crate::error::CodegenError;

/// Turns one isolated document into the text of one artifact.
pub trait Codegen: fmt::Debug + Send + Sync {
    /// File extension of the produced artifacts, without the dot.
    fn extension(&self) -> &'static str;

    /// Generate the artifact text for `document`.
    ///
    /// `file_name` is the sanitized artifact identifier, without extension.
    fn generate(&self, document: &IsolatedDocument, file_name: &str) -> Result<String, CodegenError>;
}
