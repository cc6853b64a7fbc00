//! Emits the declarations an import needs: one provider requirements block
//! and an empty resource block per resource.

use std::io::Write;

use super::definition::ResourceDefinition;
use super::error::ImportResult;

/// Build the declaration text without writing it anywhere.
///
/// Providers carry no version constraint so the newest release is resolved.
pub fn render_definition_headers(
    resources: &[ResourceDefinition],
    providers: &[String],
) -> String {
    let mut builder = String::new();

    // terraform {
    //     required_providers {
    //         onelogin = {
    //             source = "onelogin/onelogin"
    //         }
    //     }
    // }
    builder.push_str("terraform {\n\trequired_providers {\n");
    for provider in providers {
        let local_name = provider.split('/').next().unwrap_or(provider);
        builder.push_str(&format!(
            "\t\t{} = {{\n\t\t\tsource = \"{}\"\n\t\t}}\n",
            local_name, provider
        ));
    }
    builder.push_str("\t}\n}\n");

    // resource onelogin_apps app1 {}
    for resource in resources {
        builder.push_str(&format!(
            "resource {} {} {{}}\n",
            resource.resource_type, resource.name
        ));
    }

    builder
}

/// Write the declaration text to `destination` in a single write.
///
/// Write failures are returned as-is; nothing is retried or rolled back.
pub fn write_definition_headers<W: Write>(
    resources: &[ResourceDefinition],
    providers: &[String],
    destination: &mut W,
) -> ImportResult<()> {
    let text = render_definition_headers(resources, providers);
    destination.write_all(text.as_bytes())?;

    log::debug!(
        "Wrote {} provider requirement(s) and {} resource header(s)",
        providers.len(),
        resources.len()
    );

    Ok(())
}
