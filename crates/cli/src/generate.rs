use std::path::PathBuf;

use clap::Args;
use nsplit_core::codegen::{DateTimeType, NullValue, TypeStyle};
use nsplit_core::{
    Codegen, FailurePolicy, JsonDocumentGenerator, Pipeline, PipelineOptions, TypeScriptGenerator,
    TypeScriptSettings,
};
use tracing::debug;

use crate::config::{FileConfig, OutputFormat, load_config};
use crate::run_cli_async;
use crate::source::SourceArgs;

#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub source: SourceArgs,
    #[arg(
        long = "out",
        short = 'o',
        value_name = "DIR",
        help = "Directory receiving one artifact per group"
    )]
    pub out: PathBuf,
    #[arg(long = "format", value_enum, help = "Artifact format [default: ts]")]
    pub format: Option<OutputFormat>,
    #[arg(
        long = "type-style",
        value_name = "STYLE",
        help = "Declare objects as `interface` or `class` [default: interface]"
    )]
    pub type_style: Option<TypeStyle>,
    #[arg(
        long = "null-value",
        value_name = "VALUE",
        help = "Value of nullable types: `null` or `undefined` [default: null]"
    )]
    pub null_value: Option<NullValue>,
    #[arg(
        long = "date-time",
        value_name = "TYPE",
        help = "Type of date and date-time strings: `date` or `string` [default: date]"
    )]
    pub date_time: Option<DateTimeType>,
    #[arg(
        long = "constructor-interface",
        help = "For classes, also emit an I<Name> interface and a constructor taking it"
    )]
    pub constructor_interface: bool,
    #[arg(long = "clone-method", help = "For classes, emit a clone() method")]
    pub clone_method: bool,
    #[arg(long = "fail-fast", help = "Stop at the first group that fails")]
    pub fail_fast: bool,
}

/// Everything `generate` needs once flags and config file are merged.
#[derive(Debug, Clone, PartialEq, Eq)]
struct GenerateSettings {
    format: OutputFormat,
    failure_policy: FailurePolicy,
    typescript: TypeScriptSettings,
}

impl GenerateSettings {
    fn resolve(args: &GenerateArgs, file: FileConfig) -> Self {
        let fail_fast = args.fail_fast || file.fail_fast.unwrap_or(false);
        let ts = file.typescript;
        let defaults = TypeScriptSettings::default();

        let typescript = TypeScriptSettings {
            type_style: args
                .type_style
                .or(ts.type_style)
                .unwrap_or(defaults.type_style),
            null_value: args
                .null_value
                .or(ts.null_value)
                .unwrap_or(defaults.null_value),
            date_time_type: args
                .date_time
                .or(ts.date_time_type)
                .unwrap_or(defaults.date_time_type),
            generate_constructor_interface: args.constructor_interface
                || ts.generate_constructor_interface.unwrap_or(false),
            generate_clone_method: args.clone_method || ts.generate_clone_method.unwrap_or(false),
            client_class_suffix: ts
                .client_class_suffix
                .unwrap_or(defaults.client_class_suffix),
        };

        Self {
            format: args.format.or(file.format).unwrap_or_default(),
            failure_policy: if fail_fast {
                FailurePolicy::FailFast
            } else {
                FailurePolicy::Isolate
            },
            typescript,
        }
    }

    fn codegen(&self) -> Box<dyn Codegen> {
        match self.format {
            OutputFormat::Ts => Box::new(TypeScriptGenerator::new(self.typescript.clone())),
            OutputFormat::Json => Box::new(JsonDocumentGenerator),
        }
    }
}

pub async fn run(args: GenerateArgs) -> i32 {
    run_cli_async(|| run_inner(args)).await
}

async fn run_inner(args: GenerateArgs) -> Result<(), String> {
    let file = load_config(args.source.config.as_deref()).await?;
    let separator = args.source.separator(&file);
    let document = args.source.load(&file).await?;
    let settings = GenerateSettings::resolve(&args, file);
    debug!(?settings, %separator, "Resolved generate settings.");

    let options = PipelineOptions {
        separator,
        failure_policy: settings.failure_policy,
        ..PipelineOptions::new(&args.out)
    };
    let pipeline = Pipeline::new(settings.codegen(), options);
    let summary = pipeline.run(&document).await.map_err(|err| err.to_string())?;

    if summary.written.is_empty() && summary.failed.is_empty() {
        println!("No definitions found in {}", args.source.source);
        return Ok(());
    }

    for artifact in &summary.written {
        println!(
            "  {} ({} definitions)",
            artifact.path.display(),
            artifact.definitions
        );
    }

    if summary.is_success() {
        println!(
            "Generated {} {} file(s) in {}",
            summary.written.len(),
            settings.format,
            args.out.display()
        );
        Ok(())
    } else {
        let failures: Vec<String> = summary
            .failed
            .iter()
            .map(|err| format!("  {err}"))
            .collect();
        Err(format!(
            "{} of {} groups failed:\n{}",
            summary.failed.len(),
            summary.failed.len() + summary.written.len(),
            failures.join("\n")
        ))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::config::TypeScriptConfig;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        args: GenerateArgs,
    }

    fn parse(args: &[&str]) -> GenerateArgs {
        let argv = std::iter::once("generate").chain(args.iter().copied());
        TestCli::try_parse_from(argv).unwrap().args
    }

    const SWAGGER: &str = r##"{
      "swagger": "2.0",
      "info": { "title": "Shop", "version": "3" },
      "definitions": {
        "Shop.Orders.Order": {
          "type": "object",
          "properties": { "lines": { "type": "array", "items": { "$ref": "#/definitions/Shop.Orders.Line" } } }
        },
        "Shop.Orders.Line": { "type": "object", "properties": { "sku": { "type": "string" } } },
        "Shop.Billing.Invoice": {
          "type": "object",
          "properties": { "order": { "$ref": "#/definitions/Shop.Orders.Order" } }
        },
        "Shop.Billing.Broken": {
          "type": "object",
          "properties": { "gone": { "$ref": "#/definitions/Shop.Removed" } }
        }
      }
    }"##;

    #[test]
    fn test_defaults() {
        let args = parse(&["swagger.json", "--out", "out"]);
        let settings = GenerateSettings::resolve(&args, FileConfig::default());

        assert_eq!(settings.format, OutputFormat::Ts);
        assert_eq!(settings.failure_policy, FailurePolicy::Isolate);
        assert_eq!(settings.typescript, TypeScriptSettings::default());
        assert_eq!(settings.codegen().extension(), "ts");
    }

    #[test]
    fn test_flags_override_config_file() {
        let args = parse(&[
            "swagger.json",
            "-o",
            "out",
            "--format",
            "json",
            "--type-style",
            "interface",
            "--date-time",
            "string",
            "--clone-method",
        ]);
        let file = FileConfig {
            format: Some(OutputFormat::Ts),
            fail_fast: Some(true),
            typescript: TypeScriptConfig {
                type_style: Some(TypeStyle::Class),
                null_value: Some(NullValue::Undefined),
                client_class_suffix: Some("Api".to_string()),
                ..TypeScriptConfig::default()
            },
            ..FileConfig::default()
        };

        let settings = GenerateSettings::resolve(&args, file);

        assert_eq!(settings.format, OutputFormat::Json);
        assert_eq!(settings.failure_policy, FailurePolicy::FailFast);
        assert_eq!(settings.typescript.type_style, TypeStyle::Interface);
        assert_eq!(settings.typescript.null_value, NullValue::Undefined);
        assert_eq!(settings.typescript.date_time_type, DateTimeType::String);
        assert!(settings.typescript.generate_clone_method);
        assert!(!settings.typescript.generate_constructor_interface);
        assert_eq!(settings.typescript.client_class_suffix, "Api");
        assert_eq!(settings.codegen().extension(), "json");
    }

    #[test]
    fn test_rejects_unknown_type_style() {
        let argv = ["generate", "swagger.json", "--out", "out", "--type-style", "struct"];
        assert!(TestCli::try_parse_from(argv).is_err());
    }

    #[tokio::test]
    async fn test_generate_json_writes_every_group() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("swagger.json");
        std::fs::write(&source, SWAGGER).unwrap();
        let out = dir.path().join("out");

        let args = parse(&[
            source.to_str().unwrap(),
            "--out",
            out.to_str().unwrap(),
            "--format",
            "json",
        ]);
        run_inner(args).await.unwrap();

        assert!(out.join("Shop.Orders.json").is_file());
        let billing = std::fs::read_to_string(out.join("Shop.Billing.json")).unwrap();
        assert!(billing.contains("\"Shop.Orders.Line\""));
    }

    #[tokio::test]
    async fn test_generate_typescript_reports_failed_groups() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("swagger.json");
        std::fs::write(&source, SWAGGER).unwrap();
        let out = dir.path().join("out");

        let args = parse(&[source.to_str().unwrap(), "--out", out.to_str().unwrap()]);
        let err = run_inner(args).await.unwrap_err();

        assert!(err.starts_with("1 of 2 groups failed:"), "{err}");
        assert!(err.contains("Shop.Billing"), "{err}");
        assert!(out.join("Shop.Orders.ts").is_file());
        assert!(!out.join("Shop.Billing.ts").exists());
    }

    #[tokio::test]
    async fn test_generate_reads_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("swagger.json");
        std::fs::write(
            &source,
            r#"{ "swagger": "2.0", "definitions": { "Shop/Orders/Order": { "type": "object" } } }"#,
        )
        .unwrap();
        let config = dir.path().join("nsplit.toml");
        std::fs::write(&config, "separator = \"/\"\n\n[typescript]\ntype_style = \"class\"\n")
            .unwrap();
        let out = dir.path().join("out");

        let args = parse(&[
            source.to_str().unwrap(),
            "--out",
            out.to_str().unwrap(),
            "--config",
            config.to_str().unwrap(),
        ]);
        run_inner(args).await.unwrap();

        let text = std::fs::read_to_string(out.join("Shop_Orders.ts")).unwrap();
        assert!(text.contains("export class Shop_Orders_Order {"), "{text}");
    }
}
