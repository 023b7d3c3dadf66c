use std::fmt::Write as _;

use clap::Args;
use nsplit_core::{GroupPlan, plan_groups};

use crate::config::load_config;
use crate::run_cli_async;
use crate::source::SourceArgs;

#[derive(Args, Debug, Clone)]
pub struct GroupsArgs {
    #[command(flatten)]
    pub source: SourceArgs,
}

pub async fn run(args: GroupsArgs) -> i32 {
    run_cli_async(|| run_inner(args)).await
}

async fn run_inner(args: GroupsArgs) -> Result<(), String> {
    let file = load_config(args.source.config.as_deref()).await?;
    let document = args.source.load(&file).await?;

    let plan = plan_groups(&document, args.source.separator(&file));
    print!("{}", render_plan(&plan));
    Ok(())
}

fn render_plan(plan: &[GroupPlan]) -> String {
    if plan.is_empty() {
        return "No definitions found\n".to_string();
    }

    let width = plan.iter().map(|group| group.key.len()).max().unwrap_or(0);
    let mut output = String::new();
    for group in plan {
        let _ = write!(
            output,
            "{:<width$}  {:>4} members  {:>4} definitions",
            group.key, group.members, group.definitions
        );
        if group.file_name != group.key {
            let _ = write!(output, "  -> {}", group.file_name);
        }
        output.push('\n');
    }
    output
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::config::FileConfig;

    fn plan(key: &str, file_name: &str, members: usize, definitions: usize) -> GroupPlan {
        GroupPlan {
            key: key.to_string(),
            file_name: file_name.to_string(),
            members,
            definitions,
        }
    }

    #[test]
    fn test_render_plan_aligns_columns() {
        let rendered = render_plan(&[
            plan("Corax.Core.Inbound", "Corax.Core.Inbound", 3, 5),
            plan("Global", "Global", 1, 1),
            plan("Corax/Units", "Corax_Units", 2, 2),
        ]);

        assert_eq!(
            rendered,
            "Corax.Core.Inbound     3 members     5 definitions\n\
             Global                 1 members     1 definitions\n\
             Corax/Units            2 members     2 definitions  -> Corax_Units\n"
        );
    }

    #[test]
    fn test_render_empty_plan() {
        assert_eq!(render_plan(&[]), "No definitions found\n");
    }

    #[tokio::test]
    async fn test_groups_reads_the_source() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("swagger.yaml");
        std::fs::write(
            &source,
            "swagger: '2.0'\ndefinitions:\n  NS.A:\n    type: object\n",
        )
        .unwrap();

        let args = GroupsArgs {
            source: SourceArgs {
                source: source.to_str().unwrap().to_string(),
                separator: None,
                timeout: None,
                config: None,
            },
        };
        assert!(run_inner(args.clone()).await.is_ok());
        assert_eq!(args.source.separator(&FileConfig::default()), '.');
    }

    #[tokio::test]
    async fn test_groups_uses_configured_separator() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("swagger.json");
        std::fs::write(
            &source,
            r#"{"swagger":"2.0","definitions":{"billing/Invoice":{"type":"object"}}}"#,
        )
        .unwrap();

        let args = SourceArgs {
            source: source.to_str().unwrap().to_string(),
            separator: Some('/'),
            timeout: None,
            config: None,
        };
        let file = FileConfig::default();
        let document = args.load(&file).await.unwrap();

        let plan = plan_groups(&document, args.separator(&file));
        assert_eq!(plan[0].key, "billing");
        assert_eq!(plan[0].definitions, 1);
    }
}
