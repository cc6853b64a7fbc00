use anyhow::{Context as AnyhowContext, Result};
use clap::Args;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::context::Context;
use crate::import::{
    FilterOutcome, ResourceManifest, filter_existing_definitions, render_definition_headers,
    write_definition_headers,
};

/// Declare remote resources missing from a configuration file
#[derive(Debug, Args)]
pub struct ReconcileCommand {
    /// Configuration file to scan and extend
    #[arg(short, long, env = "TFIMPORT_CONFIG", default_value = "main.tf")]
    config: PathBuf,

    /// Resource manifest (JSON or YAML) listing the remote resources
    #[arg(short, long)]
    resources: PathBuf,

    /// Write the configuration plus new declarations here instead of appending
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print the declarations without writing anything
    #[arg(long)]
    dry_run: bool,
}

impl ReconcileCommand {
    pub fn execute(self, ctx: &Context) -> Result<()> {
        ctx.output.section("Import Reconciliation");

        let manifest = Self::load_manifest(ctx, &self.resources)?;
        ctx.output
            .key_value("Configuration", &self.config.display().to_string());
        ctx.output
            .key_value("Remote resources", &manifest.resources.len().to_string());

        let existing = if ctx.fs.exists(&self.config) {
            ctx.fs.read(&self.config)?
        } else {
            ctx.output
                .warning("Configuration file not found, treating it as empty");
            Vec::new()
        };

        let outcome = filter_existing_definitions(existing.as_slice(), manifest.resources);
        Self::display_outcome(ctx, &outcome);

        if outcome.is_empty() {
            ctx.output
                .success("Configuration already declares every remote resource");
            return Ok(());
        }

        if self.dry_run {
            ctx.output.info("Dry run, no files were changed");
            ctx.output.blank();
            ctx.output.raw(&render_definition_headers(
                &outcome.resources_to_import,
                &outcome.unspecified_providers,
            ));
            return Ok(());
        }

        // A staging file starts as a byte-for-byte copy of the configuration
        let (destination, copy_existing) = match &self.output {
            Some(staging) => {
                ctx.fs.write(staging, "")?;
                (staging.as_path(), true)
            }
            None => (self.config.as_path(), false),
        };

        Self::append_declarations(ctx, destination, &existing, copy_existing, &outcome)?;

        ctx.output.success(&format!(
            "Declared {} resource(s) in {}",
            outcome.resources_to_import.len(),
            destination.display()
        ));
        Self::display_next_steps(ctx, &outcome);

        Ok(())
    }

    fn load_manifest(ctx: &Context, path: &Path) -> Result<ResourceManifest> {
        let content = ctx.fs.read_to_string(path)?;

        ResourceManifest::parse(path, &content)
            .with_context(|| format!("Failed to load resource manifest: {}", path.display()))
    }

    fn display_outcome(ctx: &Context, outcome: &FilterOutcome) {
        ctx.output.key_value(
            "Resources to declare",
            &outcome.resources_to_import.len().to_string(),
        );
        for resource in &outcome.resources_to_import {
            ctx.output.list_item(&resource.address());
        }

        ctx.output.key_value(
            "Providers to declare",
            &outcome.unspecified_providers.len().to_string(),
        );
        for provider in &outcome.unspecified_providers {
            ctx.output.list_item(provider);
        }
    }

    fn append_declarations(
        ctx: &Context,
        destination: &Path,
        existing: &[u8],
        copy_existing: bool,
        outcome: &FilterOutcome,
    ) -> Result<()> {
        let mut writer = ctx.fs.open_append(destination)?;

        if copy_existing {
            writer
                .write_all(existing)
                .with_context(|| format!("Failed to write to {}", destination.display()))?;
        }

        // Keep the last existing line intact
        if !existing.is_empty() && !existing.ends_with(b"\n") {
            writer
                .write_all(b"\n")
                .with_context(|| format!("Failed to write to {}", destination.display()))?;
        }

        write_definition_headers(
            &outcome.resources_to_import,
            &outcome.unspecified_providers,
            &mut writer,
        )
        .with_context(|| format!("Failed to write declarations to {}", destination.display()))?;

        writer
            .flush()
            .with_context(|| format!("Failed to flush {}", destination.display()))?;

        Ok(())
    }

    fn display_next_steps(ctx: &Context, outcome: &FilterOutcome) {
        ctx.output.blank();
        ctx.output.dimmed("Next, bind each declaration to its remote object:");
        for resource in &outcome.resources_to_import {
            ctx.output
                .dimmed(&format!("  terraform import {} <id>", resource.address()));
        }
    }
}
