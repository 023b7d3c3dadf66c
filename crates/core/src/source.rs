//! Retrieval of the source API description.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::{debug, info, warn};
use url::Url;

use crate::document::SchemaDocument;
use crate::error::RetrievalError;

/// Overall timeout for fetching a remote document.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Where the source document lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceLocator {
    /// Fetched with a single HTTP GET.
    Url(Url),
    /// Read from the local file system.
    Path(PathBuf),
}

impl SourceLocator {
    /// Classify `input`: `http://` and `https://` are URLs, anything else is a path.
    pub fn parse(input: &str) -> Result<Self, RetrievalError> {
        let lower = input.trim_start().to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            Url::parse(input.trim())
                .map(SourceLocator::Url)
                .map_err(|source| RetrievalError::InvalidUrl {
                    input: input.to_string(),
                    source,
                })
        } else {
            Ok(SourceLocator::Path(PathBuf::from(input)))
        }
    }
}

impl fmt::Display for SourceLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceLocator::Url(url) => write!(f, "{url}"),
            SourceLocator::Path(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Options for [`load_document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetrievalOptions {
    /// Overall timeout of the HTTP request. Ignored for files.
    pub timeout: Duration,
}

impl Default for RetrievalOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

/// Fetch or read the document at `locator` and parse it.
///
/// One attempt, no retries. Non-success HTTP statuses are errors.
pub async fn load_document(
    locator: &SourceLocator,
    options: &RetrievalOptions,
) -> Result<SchemaDocument, RetrievalError> {
    let text = match locator {
        SourceLocator::Url(url) => fetch_text(url, options).await?,
        SourceLocator::Path(path) => read_text(path).await?,
    };

    let document = SchemaDocument::parse(&text).map_err(|message| {
        warn!(source = %locator, error = %message, "Failed to parse API description.");
        RetrievalError::Parse {
            locator: locator.to_string(),
            message,
        }
    })?;

    info!(
        source = %locator,
        title = %document.info.title,
        definitions = document.definitions.len(),
        "Loaded API description."
    );
    Ok(document)
}

fn build_client(options: &RetrievalOptions) -> Result<reqwest::Client, RetrievalError> {
    reqwest::Client::builder()
        .timeout(options.timeout)
        .build()
        .map_err(|err| {
            warn!(error = %err, "Failed to build HTTP client.");
            RetrievalError::Client(err)
        })
}

async fn fetch_text(url: &Url, options: &RetrievalOptions) -> Result<String, RetrievalError> {
    let client = build_client(options)?;
    let http_error = |source| RetrievalError::Http {
        url: url.to_string(),
        source,
    };

    debug!(%url, timeout_secs = options.timeout.as_secs(), "Fetching API description.");
    let response = client
        .get(url.clone())
        .send()
        .await
        .and_then(reqwest::Response::error_for_status)
        .map_err(|err| {
            warn!(error = %err, %url, "API description request failed.");
            http_error(err)
        })?;

    debug!(status = %response.status(), "Received API description response.");
    response.text().await.map_err(http_error)
}

async fn read_text(path: &Path) -> Result<String, RetrievalError> {
    debug!(path = %path.display(), "Reading API description.");
    tokio::fs::read_to_string(path)
        .await
        .map_err(|source| RetrievalError::Io {
            path: path.to_path_buf(),
            source,
        })
}
