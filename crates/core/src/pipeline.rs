//! The split driver: group, close, emit, write.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::{debug, error, info, warn};

use crate::closure::build_closure;
use crate::codegen::Codegen;
use crate::document::SchemaDocument;
use crate::error::PipelineError;
use crate::partition::{DEFAULT_SEPARATOR, Group, group_by_key, namespace_key_with};
use crate::sanitize::sanitize_file_name;

/// What to do when one group cannot be generated or written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Log the failure, record it, and continue with the next group.
    #[default]
    Isolate,
    /// Stop at the first failure. Artifacts already written stay on disk.
    FailFast,
}

/// Options for a [`Pipeline`].
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    /// Directory receiving one artifact per group. Created if absent.
    pub output_dir: PathBuf,
    /// Namespace separator used to derive grouping keys.
    pub separator: char,
    /// Per-group failure handling.
    pub failure_policy: FailurePolicy,
}

impl PipelineOptions {
    /// Options writing to `output_dir` with the default separator and policy.
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            separator: DEFAULT_SEPARATOR,
            failure_policy: FailurePolicy::default(),
        }
    }
}

/// One planned group: its key, artifact name, and sizes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupPlan {
    /// Grouping key.
    pub key: String,
    /// Sanitized artifact name, without extension.
    pub file_name: String,
    /// Number of definitions whose key is this group's.
    pub members: usize,
    /// Number of definitions in the isolated document.
    pub definitions: usize,
}

/// One written artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    /// Grouping key.
    pub group: String,
    /// Where the artifact was written.
    pub path: PathBuf,
    /// Number of definitions in the isolated document.
    pub definitions: usize,
}

/// Outcome of a pipeline run.
#[derive(Debug, Default)]
pub struct RunSummary {
    /// Artifacts written, in group order.
    pub written: Vec<Artifact>,
    /// Groups that failed under [`FailurePolicy::Isolate`].
    pub failed: Vec<PipelineError>,
}

impl RunSummary {
    /// Whether every group was written.
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Splits a document into one artifact per group.
#[derive(Debug)]
pub struct Pipeline {
    codegen: Box<dyn Codegen>,
    options: PipelineOptions,
}

impl Pipeline {
    /// Create a pipeline emitting with `codegen`.
    pub fn new(codegen: Box<dyn Codegen>, options: PipelineOptions) -> Self {
        Self { codegen, options }
    }

    /// The options in effect.
    pub fn options(&self) -> &PipelineOptions {
        &self.options
    }

    /// Generate and write one artifact per group.
    ///
    /// Under [`FailurePolicy::FailFast`] the first failing group is returned as
    /// the error. Under [`FailurePolicy::Isolate`] failures are collected in
    /// [`RunSummary::failed`] and the run continues.
    pub async fn run(&self, document: &SchemaDocument) -> Result<RunSummary, PipelineError> {
        let groups = split_groups(document, self.options.separator);
        let mut summary = RunSummary::default();
        if groups.is_empty() {
            return Ok(summary);
        }

        let output_dir = &self.options.output_dir;
        tokio::fs::create_dir_all(output_dir)
            .await
            .map_err(|source| PipelineError::Write {
                path: output_dir.clone(),
                source,
            })?;

        let mut claimed: HashMap<PathBuf, String> = HashMap::new();
        for group in &groups {
            match self.emit_group(group, document, &mut claimed).await {
                Ok(artifact) => summary.written.push(artifact),
                Err(err) => match self.options.failure_policy {
                    FailurePolicy::FailFast => {
                        error!(group = %group.key, error = %err, "Group failed, stopping.");
                        return Err(err);
                    }
                    FailurePolicy::Isolate => {
                        error!(group = %group.key, error = %err, "Group failed, continuing.");
                        summary.failed.push(err);
                    }
                },
            }
        }

        debug!(
            written = summary.written.len(),
            failed = summary.failed.len(),
            "Split run finished."
        );
        Ok(summary)
    }

    async fn emit_group(
        &self,
        group: &Group<'_>,
        document: &SchemaDocument,
        claimed: &mut HashMap<PathBuf, String>,
    ) -> Result<Artifact, PipelineError> {
        let isolated = build_closure(group, document);
        let file_name = sanitize_file_name(&group.key);

        let text = self
            .codegen
            .generate(&isolated, &file_name)
            .map_err(|source| PipelineError::Codegen {
                group: group.key.clone(),
                source,
            })?;

        let path = artifact_path(&self.options.output_dir, &file_name, self.codegen.extension());
        if let Some(previous) = claimed.insert(path.clone(), group.key.clone()) {
            warn!(
                path = %path.display(),
                previous = %previous,
                group = %group.key,
                "Two groups map to the same artifact; the later one overwrites it."
            );
        }

        tokio::fs::write(&path, text)
            .await
            .map_err(|source| PipelineError::Write {
                path: path.clone(),
                source,
            })?;

        info!(
            group = %group.key,
            path = %path.display(),
            definitions = isolated.definitions.len(),
            "Generated artifact."
        );

        Ok(Artifact {
            group: group.key.clone(),
            path,
            definitions: isolated.definitions.len(),
        })
    }
}

fn artifact_path(output_dir: &Path, file_name: &str, extension: &str) -> PathBuf {
    output_dir.join(format!("{file_name}.{extension}"))
}

fn split_groups(document: &SchemaDocument, separator: char) -> Vec<Group<'_>> {
    group_by_key(&document.definitions, |name| namespace_key_with(name, separator))
}

/// Compute every group and its closure without generating or writing anything.
pub fn plan_groups(document: &SchemaDocument, separator: char) -> Vec<GroupPlan> {
    split_groups(document, separator)
        .iter()
        .map(|group| GroupPlan {
            key: group.key.clone(),
            file_name: sanitize_file_name(&group.key),
            members: group.members.len(),
            definitions: build_closure(group, document).definitions.len(),
        })
        .collect()
}
