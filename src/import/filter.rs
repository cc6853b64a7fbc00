//! Diffs remote resources against declarations already present in a
//! configuration document, so an import only adds what is missing.

use std::collections::HashMap;
use std::io::BufRead;

use super::classifier::{Declaration, LineClassifier};
use super::definition::ResourceDefinition;

/// Declarations seen while scanning one document.
///
/// Counts are only used as presence flags.
#[derive(Debug, Default)]
pub struct DeclarationIndex {
    providers: HashMap<String, usize>,
    resources: HashMap<String, usize>,
}

impl DeclarationIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scan a document line by line.
    ///
    /// Bytes that are not valid UTF-8 are replaced, so such a line can still
    /// match. Only an I/O error ends the scan before end of input.
    pub fn scan<R: BufRead>(mut reader: R) -> Self {
        let classifier = LineClassifier::new();
        let mut index = Self::new();
        let mut buf = Vec::new();
        let mut number = 0;

        loop {
            buf.clear();
            match reader.read_until(b'\n', &mut buf) {
                Ok(0) => break,
                Ok(_) => number += 1,
                Err(err) => {
                    log::warn!(
                        "Stopped scanning configuration at line {}: {}",
                        number + 1,
                        err
                    );
                    break;
                }
            }

            let line = String::from_utf8_lossy(trim_line_ending(&buf));
            for declaration in classifier.classify(&line) {
                log::trace!("line {}: {:?}", number, declaration);
                index.record(&declaration);
            }
        }

        log::debug!(
            "Indexed {} provider source(s) and {} resource header(s)",
            index.providers.len(),
            index.resources.len()
        );

        index
    }

    pub fn record(&mut self, declaration: &Declaration) {
        let counter = match declaration {
            Declaration::ProviderSource(_) => &mut self.providers,
            Declaration::ResourceHeader { .. } => &mut self.resources,
        };

        *counter.entry(declaration.key()).or_insert(0) += 1;
    }

    pub fn has_provider(&self, source: &str) -> bool {
        self.providers.get(source).copied().unwrap_or(0) > 0
    }

    pub fn has_resource(&self, address: &str) -> bool {
        self.resources.get(address).copied().unwrap_or(0) > 0
    }

    /// Flag a provider as declared so it is only reported once
    pub fn mark_provider(&mut self, source: &str) {
        self.providers.insert(source.to_string(), 1);
    }
}

fn trim_line_ending(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

/// What still has to be declared before an import can run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterOutcome {
    /// Definitions with no matching header, in input order
    pub resources_to_import: Vec<ResourceDefinition>,

    /// Provider sources with no `source` line, first-seen order
    pub unspecified_providers: Vec<String>,
}

impl FilterOutcome {
    pub fn is_empty(&self) -> bool {
        self.resources_to_import.is_empty() && self.unspecified_providers.is_empty()
    }
}

/// Compare remote resources to the declarations in `existing`.
///
/// Providers are reported once each. Resources are not deduplicated: a key
/// repeated in `resources` shows up once per occurrence if undeclared.
pub fn filter_existing_definitions<R: BufRead>(
    existing: R,
    resources: Vec<ResourceDefinition>,
) -> FilterOutcome {
    let mut index = DeclarationIndex::scan(existing);
    let mut outcome = FilterOutcome::default();

    for resource in resources {
        if !index.has_provider(&resource.provider) {
            index.mark_provider(&resource.provider);
            outcome.unspecified_providers.push(resource.provider.clone());
        }

        if !index.has_resource(&resource.address()) {
            outcome.resources_to_import.push(resource);
        }
    }

    log::debug!(
        "{} resource(s) and {} provider(s) need declarations",
        outcome.resources_to_import.len(),
        outcome.unspecified_providers.len()
    );

    outcome
}
