// ============================================================
// DELIMITED TEXT DOMAIN LAYER
// ============================================================
// Core types for turning delimited text into an outline
// No I/O, no async, no external dependencies

mod import_summary;
mod row;

pub use import_summary::OutlineImport;
pub use row::Row;
