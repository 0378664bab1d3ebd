// ============================================================
// OUTLINE EXPORTER
// ============================================================
// Render an outline back to delimited text for editing in a spreadsheet

use csv::{QuoteStyle, Terminator, WriterBuilder};

use crate::domain::error::{AppError, Result};
use crate::domain::outline::OutlinePage;

pub const EXPORT_HEADER: [&str; 3] = ["No", "Title", "Content"];

pub struct OutlineExporter {
    delimiter: u8,
}

impl Default for OutlineExporter {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

impl OutlineExporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Header row plus one `number,title,content` row per page.
    pub fn to_csv(&self, pages: &[OutlinePage]) -> Result<String> {
        let mut writer = WriterBuilder::new()
            .delimiter(self.delimiter)
            .quote_style(QuoteStyle::Necessary)
            .terminator(Terminator::Any(b'\n'))
            .from_writer(Vec::new());

        writer
            .write_record(EXPORT_HEADER)
            .map_err(|e| AppError::Internal(format!("Failed to write CSV header: {}", e)))?;

        for page in pages {
            writer
                .write_record([
                    page.page_number.to_string().as_str(),
                    page.title.as_str(),
                    page.content.as_str(),
                ])
                .map_err(|e| {
                    AppError::Internal(format!(
                        "Failed to write CSV row for page {}: {}",
                        page.page_number, e
                    ))
                })?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| AppError::Internal(format!("Failed to flush CSV: {}", e)))?;

        String::from_utf8(bytes)
            .map_err(|e| AppError::Internal(format!("CSV output is not UTF-8: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::csv::{DelimitedTextParser, OutlineMapper};

    #[test]
    fn test_export_quotes_special_characters() {
        let pages = vec![OutlinePage::new(1, "Hello, world", "He said \"go\"\nthen left")];
        let text = OutlineExporter::new().to_csv(&pages).unwrap();

        assert!(text.starts_with("No,Title,Content\n"));
        assert!(text.contains("\"Hello, world\""));
        assert!(text.contains("\"He said \"\"go\"\"\nthen left\""));
    }

    #[test]
    fn test_export_reimports_to_same_pages() {
        let pages = vec![
            OutlinePage::new(1, "Intro", "Welcome, everyone"),
            OutlinePage::new(4, "", "Quoted \"body\""),
        ];
        let text = OutlineExporter::new().to_csv(&pages).unwrap();

        let rows = DelimitedTextParser::new().tokenize(&text);
        let import = OutlineMapper::build_outline(&rows).unwrap();

        assert!(import.header_detected);
        assert_eq!(import.pages, pages);
    }

    #[test]
    fn test_tab_export_reimports_with_detection() {
        let pages = vec![
            OutlinePage::new(1, "Intro", "a, b, c"),
            OutlinePage::new(2, "Plan", "steps"),
        ];
        let text = OutlineExporter::new().with_delimiter(b'\t').to_csv(&pages).unwrap();
        assert!(text.starts_with("No\tTitle\tContent\n"));

        let delimiter = DelimitedTextParser::detect_delimiter(&text);
        assert_eq!(delimiter, '\t');
        let rows = DelimitedTextParser::new().with_delimiter(delimiter).tokenize(&text);
        assert_eq!(OutlineMapper::build_outline(&rows).unwrap().pages, pages);
    }
}
