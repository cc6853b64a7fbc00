//! Line classifier for existing HCL configuration
//!
//! Recognizes provider `source` assignments and resource headers on a single
//! line. Nothing here understands HCL structure; a header split across lines
//! is not recognized.

use lazy_static::lazy_static;
use regex::Regex;

// Whitespace and word classes are ASCII only: `[\t\n\f\r ]` and `[0-9A-Za-z_]`
lazy_static! {
    // source = "namespace/name"   (closing quote optional)
    static ref PROVIDER_SOURCE_PATTERN: Regex =
        Regex::new(r#"^[\t\n\f\r ]*?source[\t\n\f\r ]?=[\t\n\f\r ]?"[a-zA-Z]+/[a-zA-Z]+"?"#)
            .expect("Invalid provider source pattern regex");

    // resource onelogin_apps app1 {
    static ref RESOURCE_HEADER_PATTERN: Regex = Regex::new(
        r"([0-9A-Za-z_]*resource[0-9A-Za-z_]*)[\t\n\f\r ]([a-zA-Z_-]*)[\t\n\f\r ]([a-zA-Z_-]*[0-9]*)[\t\n\f\r ]?\{",
    )
    .expect("Invalid resource header pattern regex");
}

/// A declaration found on one line of configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Declaration {
    /// `source = "namespace/name"` inside a provider requirement
    ProviderSource(String),

    /// `resource <type> <name> {`
    ResourceHeader { resource_type: String, name: String },
}

impl Declaration {
    /// Key under which the declaration is indexed
    pub fn key(&self) -> String {
        match self {
            Declaration::ProviderSource(source) => source.clone(),
            Declaration::ResourceHeader {
                resource_type,
                name,
            } => format!("{}.{}", resource_type, name),
        }
    }
}

/// Classifies configuration lines into declarations
#[derive(Debug, Default, Clone, Copy)]
pub struct LineClassifier;

impl LineClassifier {
    pub fn new() -> Self {
        Self
    }

    /// All declarations on the line; empty when the line is unrecognized.
    /// Both patterns are tried independently.
    pub fn classify(&self, line: &str) -> Vec<Declaration> {
        let mut declarations = Vec::new();

        if let Some(source) = self.provider_source(line) {
            declarations.push(Declaration::ProviderSource(source));
        }

        if let Some((resource_type, name)) = self.resource_header(line) {
            declarations.push(Declaration::ResourceHeader {
                resource_type,
                name,
            });
        }

        declarations
    }

    /// Extract the provider source from a `source = "ns/name"` line
    pub fn provider_source(&self, line: &str) -> Option<String> {
        if !PROVIDER_SOURCE_PATTERN.is_match(line) {
            return None;
        }

        // The value is whatever follows the first `=`, minus quotes and blanks
        let value = line.split('=').nth(1)?;
        let source: String = value
            .chars()
            .filter(|c| *c != '"' && !c.is_ascii_whitespace())
            .collect();

        Some(source)
    }

    /// Extract `(type, name)` from a `resource <type> <name> {` line
    pub fn resource_header(&self, line: &str) -> Option<(String, String)> {
        let caps = RESOURCE_HEADER_PATTERN.captures(line)?;

        let resource_type = caps.get(2).map(|m| m.as_str()).unwrap_or("");
        let name = caps.get(3).map(|m| m.as_str()).unwrap_or("");

        Some((resource_type.to_string(), name.to_string()))
    }
}
