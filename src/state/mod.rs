pub mod parser;
pub mod types;

pub use parser::StateParser;
