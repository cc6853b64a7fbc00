//! Remote resource definitions and the manifest they are loaded from
//!
//! A manifest is produced by an inventory tool that lists what exists in the
//! remote system. It is either a bare list of definitions or an object with a
//! `resources` list, in JSON or YAML.

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::error::{ImportError, ImportResult};

/// One remote resource that should be declared in the configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceDefinition {
    /// Resource kind, e.g. `onelogin_apps`
    #[serde(rename = "type")]
    pub resource_type: String,

    /// Name unique within the resource kind
    pub name: String,

    /// Provider source in `namespace/name` form
    pub provider: String,
}

impl ResourceDefinition {
    pub fn new(resource_type: &str, name: &str, provider: &str) -> Self {
        Self {
            resource_type: resource_type.to_string(),
            name: name.to_string(),
            provider: provider.to_string(),
        }
    }

    /// Declaration key used to detect existing headers: `<type>.<name>`
    pub fn address(&self) -> String {
        format!("{}.{}", self.resource_type, self.name)
    }

    /// Reject definitions that could never produce a valid header
    pub fn validate(&self) -> ImportResult<()> {
        if self.resource_type.trim().is_empty() {
            return Err(ImportError::InvalidInput(format!(
                "resource '{}' has an empty type",
                self.name
            )));
        }

        if self.name.trim().is_empty() {
            return Err(ImportError::InvalidInput(format!(
                "resource of type '{}' has an empty name",
                self.resource_type
            )));
        }

        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ManifestDocument {
    List(Vec<ResourceDefinition>),
    Wrapped { resources: Vec<ResourceDefinition> },
}

impl ManifestDocument {
    fn into_resources(self) -> Vec<ResourceDefinition> {
        match self {
            ManifestDocument::List(resources) => resources,
            ManifestDocument::Wrapped { resources } => resources,
        }
    }
}

/// Ordered list of remote resources loaded from a manifest file
#[derive(Debug, Clone, Default)]
pub struct ResourceManifest {
    pub resources: Vec<ResourceDefinition>,
}

impl ResourceManifest {
    /// Parse manifest text; `.json` paths use JSON, everything else YAML
    pub fn parse(path: &Path, content: &str) -> ImportResult<Self> {
        let is_json = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        let document: ManifestDocument = if is_json {
            serde_json::from_str(content)?
        } else {
            serde_yaml::from_str(content)?
        };

        let resources = document.into_resources();
        for resource in &resources {
            resource.validate()?;
        }

        log::debug!(
            "Loaded {} resource definition(s) from {}",
            resources.len(),
            path.display()
        );

        Ok(Self { resources })
    }
}
