pub mod classifier;
pub mod definition;
pub mod error;
pub mod filter;
pub mod writer;

pub use definition::ResourceManifest;
pub use error::ImportResult;
pub use filter::{FilterOutcome, filter_existing_definitions};
pub use writer::{render_definition_headers, write_definition_headers};
