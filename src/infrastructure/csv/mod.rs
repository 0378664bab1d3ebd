// ============================================================
// DELIMITED TEXT INFRASTRUCTURE LAYER
// ============================================================
// Byte decoding, tokenization, outline mapping, and export

mod delimited_parser;
mod encoding;
mod outline_exporter;
mod outline_mapper;

pub use delimited_parser::{DelimitedTextParser, Delimiter};
pub use encoding::{decode_text, DecodedText};
pub use outline_exporter::{OutlineExporter, EXPORT_HEADER};
pub use outline_mapper::{parse_page_number, OutlineMapper, EMPTY_OUTLINE_MESSAGE};
