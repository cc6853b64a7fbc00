use anyhow::{Context, Result};
use std::path::Path;

use super::types::State;
use crate::import::ImportResult;
use crate::traits::FileSystem;

/// Parses Terraform/OpenTofu state files into [`State`]
pub struct StateParser;

impl StateParser {
    /// Parse state JSON
    pub fn parse_str(content: &str) -> ImportResult<State> {
        let state: State = serde_json::from_str(content)?;

        log::debug!("Parsed state with {} resource(s)", state.resources.len());

        Ok(state)
    }

    /// Read and parse the state file at `path`
    pub fn parse(fs: &dyn FileSystem, path: &Path) -> Result<State> {
        let content = fs.read_to_string(path)?;

        Self::parse_str(&content)
            .with_context(|| format!("Failed to parse state file: {}", path.display()))
    }
}
