//! Optional TOML configuration for `nsplit generate`.
//!
//! ```toml
//! separator = "."
//! format = "ts"
//! fail_fast = false
//! timeout_secs = 60
//!
//! [typescript]
//! type_style = "class"
//! null_value = "undefined"
//! date_time_type = "string"
//! generate_constructor_interface = true
//! generate_clone_method = true
//! client_class_suffix = "Api"
//! ```
//!
//! Explicit command-line flags take precedence over the file.

use std::fmt;
use std::path::Path;

use clap::ValueEnum;
use nsplit_core::codegen::{DateTimeType, NullValue, TypeStyle};
use serde::Deserialize;

/// Emission format of the artifacts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// TypeScript type declarations (`.ts`).
    #[default]
    Ts,
    /// Standalone JSON schema documents (`.json`).
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Ts => f.write_str("ts"),
            OutputFormat::Json => f.write_str("json"),
        }
    }
}

#[derive(Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub separator: Option<char>,
    pub format: Option<OutputFormat>,
    pub fail_fast: Option<bool>,
    pub timeout_secs: Option<u64>,
    pub typescript: TypeScriptConfig,
}

#[derive(Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TypeScriptConfig {
    pub type_style: Option<TypeStyle>,
    pub null_value: Option<NullValue>,
    pub date_time_type: Option<DateTimeType>,
    pub generate_constructor_interface: Option<bool>,
    pub generate_clone_method: Option<bool>,
    pub client_class_suffix: Option<String>,
}

impl FileConfig {
    fn parse(text: &str, path: &Path) -> Result<Self, String> {
        toml::from_str(text)
            .map_err(|err| format!("Failed to parse config {}: {err}", path.display()))
    }
}

/// Read `path`, or return the empty configuration when no file was given.
pub async fn load_config(path: Option<&Path>) -> Result<FileConfig, String> {
    let Some(path) = path else {
        return Ok(FileConfig::default());
    };
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|err| format!("Failed to read config {}: {err}", path.display()))?;
    FileConfig::parse(&text, path)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let config = FileConfig::parse(
            r#"
separator = "/"
format = "json"
fail_fast = true
timeout_secs = 5

[typescript]
type_style = "class"
null_value = "undefined"
date_time_type = "string"
generate_clone_method = true
client_class_suffix = "Api"
"#,
            Path::new("nsplit.toml"),
        )
        .unwrap();

        assert_eq!(config.separator, Some('/'));
        assert_eq!(config.format, Some(OutputFormat::Json));
        assert_eq!(config.fail_fast, Some(true));
        assert_eq!(config.timeout_secs, Some(5));
        assert_eq!(config.typescript.type_style, Some(TypeStyle::Class));
        assert_eq!(config.typescript.null_value, Some(NullValue::Undefined));
        assert_eq!(config.typescript.date_time_type, Some(DateTimeType::String));
        assert_eq!(config.typescript.generate_constructor_interface, None);
        assert_eq!(config.typescript.generate_clone_method, Some(true));
        assert_eq!(config.typescript.client_class_suffix.as_deref(), Some("Api"));
    }

    #[test]
    fn test_empty_config_sets_nothing() {
        let config = FileConfig::parse("", Path::new("nsplit.toml")).unwrap();
        assert_eq!(config, FileConfig::default());
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        let err = FileConfig::parse("separatr = \".\"", Path::new("nsplit.toml")).unwrap_err();
        assert!(err.starts_with("Failed to parse config nsplit.toml"), "{err}");
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let err = load_config(Some(Path::new("/nonexistent/nsplit.toml")))
            .await
            .unwrap_err();
        assert!(err.contains("/nonexistent/nsplit.toml"));
    }

    #[tokio::test]
    async fn test_load_without_path() {
        assert_eq!(load_config(None).await.unwrap(), FileConfig::default());
    }

    #[test]
    fn test_output_format_display() {
        assert_eq!(OutputFormat::Ts.to_string(), "ts");
        assert_eq!(OutputFormat::Json.to_string(), "json");
    }
}
