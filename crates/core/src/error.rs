//! Error types for retrieval, code generation and the split pipeline.
//!
//! Dangling references and empty universes are not errors. They are logged
//! and processing continues.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// The source document could not be obtained or parsed. Always fatal.
#[derive(Debug, Error)]
pub enum RetrievalError {
    /// The HTTP request failed or returned a non-success status.
    #[error("Failed to fetch {url}: {source}")]
    Http {
        /// The requested URL.
        url: String,
        /// Underlying client error.
        #[source]
        source: reqwest::Error,
    },

    /// A local file could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        /// The file that was read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The retrieved text is not a readable API description.
    #[error("Failed to parse {locator}: {message}")]
    Parse {
        /// Where the text came from.
        locator: String,
        /// Parser message.
        message: String,
    },

    /// An `http://` or `https://` locator is not a valid URL.
    #[error("Invalid URL '{input}': {source}")]
    InvalidUrl {
        /// The locator as given.
        input: String,
        /// Parser error.
        #[source]
        source: url::ParseError,
    },

    /// The HTTP client could not be constructed.
    #[error("Failed to create HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

/// The code-emission collaborator rejected an isolated document.
#[derive(Debug, Error)]
pub enum CodegenError {
    /// A reference names a definition the isolated document does not contain.
    #[error(
        "Unresolved reference '{reference}' in definition '{definition}' of group '{document}'"
    )]
    UnresolvedReference {
        /// Grouping key of the isolated document.
        document: String,
        /// Definition containing the reference.
        definition: String,
        /// The raw `$ref` value.
        reference: String,
    },

    /// A reference points outside the document's definitions.
    #[error("Unsupported reference '{reference}' in definition '{definition}'")]
    UnsupportedReference {
        /// Definition containing the reference.
        definition: String,
        /// The raw `$ref` value.
        reference: String,
    },

    /// The document could not be serialized.
    #[error("Failed to serialize group '{document}': {source}")]
    Serialize {
        /// Grouping key of the isolated document.
        document: String,
        /// Underlying serializer error.
        #[source]
        source: serde_json::Error,
    },
}

/// A single group failed during a pipeline run.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Code emission failed for the group.
    #[error("Code generation failed for group '{group}': {source}")]
    Codegen {
        /// Grouping key.
        group: String,
        /// The collaborator's error.
        #[source]
        source: CodegenError,
    },

    /// The output directory or artifact could not be written.
    #[error("Failed to write {}: {source}", path.display())]
    Write {
        /// Target path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
}
