use std::path::PathBuf;
use std::time::Duration;

use clap::Args;
use nsplit_core::partition::DEFAULT_SEPARATOR;
use nsplit_core::source::DEFAULT_TIMEOUT_SECS;
use nsplit_core::{RetrievalOptions, SchemaDocument, SourceLocator, load_document};

use crate::config::FileConfig;

/// Arguments shared by every command that reads a source document.
#[derive(Args, Debug, Clone)]
pub struct SourceArgs {
    #[arg(
        value_name = "SOURCE",
        help = "URL (http:// or https://) or path of the Swagger/OpenAPI document"
    )]
    pub source: String,
    #[arg(
        long = "separator",
        value_name = "CHAR",
        help = "Namespace separator used to derive group keys [default: .]"
    )]
    pub separator: Option<char>,
    #[arg(
        long = "timeout",
        value_name = "SECS",
        help = "Timeout for fetching a remote document [default: 60]"
    )]
    pub timeout: Option<u64>,
    #[arg(long = "config", value_name = "FILE", help = "Path to an nsplit TOML config file")]
    pub config: Option<PathBuf>,
}

impl SourceArgs {
    pub fn separator(&self, file: &FileConfig) -> char {
        self.separator
            .or(file.separator)
            .unwrap_or(DEFAULT_SEPARATOR)
    }

    pub fn retrieval_options(&self, file: &FileConfig) -> RetrievalOptions {
        let secs = self
            .timeout
            .or(file.timeout_secs)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        RetrievalOptions {
            timeout: Duration::from_secs(secs),
        }
    }

    pub async fn load(&self, file: &FileConfig) -> Result<SchemaDocument, String> {
        let locator = SourceLocator::parse(&self.source).map_err(|err| err.to_string())?;
        load_document(&locator, &self.retrieval_options(file))
            .await
            .map_err(|err| err.to_string())
    }
}
