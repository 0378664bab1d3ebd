pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;

mod app;

pub use app::run;
pub use domain::csv::{OutlineImport, Row};
pub use domain::error::{AppError, Result};
pub use domain::outline::{OutlineField, OutlinePage};
pub use infrastructure::csv::{DelimitedTextParser, OutlineMapper};

/// Tokenize delimited text with the default comma/double-quote settings.
pub fn tokenize(text: &str) -> Vec<Row> {
    DelimitedTextParser::default().tokenize(text)
}

/// Map tokenized rows to outline pages; an empty outline is `MalformedInput`.
pub fn build_outline(rows: &[Row]) -> Result<Vec<OutlinePage>> {
    OutlineMapper::build_outline(rows).map(OutlineImport::into_pages)
}
