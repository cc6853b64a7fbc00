use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use crate::context::Context;
use crate::state::StateParser;

/// List the resources recorded in a state file
#[derive(Debug, Args)]
pub struct StateCommand {
    /// Path to the state file
    #[arg(default_value = "terraform.tfstate")]
    path: PathBuf,
}

impl StateCommand {
    pub fn execute(self, ctx: &Context) -> Result<()> {
        ctx.output.section("State Resources");

        let state = StateParser::parse(&*ctx.fs, &self.path)?;

        if state.resources.is_empty() {
            ctx.output.dimmed("No resources found.");
            return Ok(());
        }

        for resource in &state.resources {
            ctx.output.list_item(&format!(
                "{} ({} instance(s))",
                resource.address(),
                resource.instance_count()
            ));
        }

        ctx.output.blank();
        ctx.output
            .key_value("Total resources", &state.resources.len().to_string());

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::{FileSystem, MockFileSystem, MockOutput, OutputMessage};
    use std::path::Path;
    use std::sync::Arc;

    #[test]
    fn test_lists_resources() {
        let fs = Arc::new(MockFileSystem::new());
        let output = Arc::new(MockOutput::new());
        fs.write(
            Path::new("/work/terraform.tfstate"),
            r#"{"resources": [{"type": "onelogin_apps", "name": "app1", "provider": "onelogin", "instances": [{"attributes": {"visible": true}}]}]}"#,
        )
        .unwrap();
        let ctx = Context::test_with(fs, output.clone());

        StateCommand {
            path: PathBuf::from("/work/terraform.tfstate"),
        }
        .execute(&ctx)
        .unwrap();

        assert!(output.contains_message(&OutputMessage::ListItem(
            "onelogin_apps.app1 (1 instance(s))".to_string()
        )));
        assert!(output.contains_message(&OutputMessage::KeyValue(
            "Total resources".to_string(),
            "1".to_string()
        )));
    }

    #[test]
    fn test_empty_state() {
        let fs = Arc::new(MockFileSystem::new());
        let output = Arc::new(MockOutput::new());
        fs.write(Path::new("/work/terraform.tfstate"), "{}").unwrap();
        let ctx = Context::test_with(fs, output.clone());

        StateCommand {
            path: PathBuf::from("/work/terraform.tfstate"),
        }
        .execute(&ctx)
        .unwrap();

        assert!(output.contains_message(&OutputMessage::Dimmed("No resources found.".to_string())));
    }
}
