// ============================================================
// OUTLINE IMPORT USE CASE
// ============================================================
// Orchestrate decoding, tokenization, and outline mapping

use std::path::Path;
use std::time::Instant;

use crate::domain::csv::OutlineImport;
use crate::domain::error::{AppError, Result};
use crate::infrastructure::csv::{decode_text, DelimitedTextParser, Delimiter, OutlineMapper};

/// Builds an outline from delimited text. Either the whole outline is
/// returned or an error is; there is no partial result.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutlineImportUseCase {
    delimiter: Delimiter,
}

impl OutlineImportUseCase {
    pub fn new(delimiter: Delimiter) -> Self {
        Self { delimiter }
    }

    /// Import already-decoded text
    pub fn import_text(&self, text: &str) -> Result<OutlineImport> {
        let start = Instant::now();

        let delimiter = self.delimiter.resolve(text);
        let rows = DelimitedTextParser::new()
            .with_delimiter(delimiter)
            .tokenize(text);
        let result = OutlineMapper::build_outline(&rows);

        match &result {
            Ok(import) => tracing::info!(
                delimiter = ?delimiter,
                rows = import.row_count,
                pages = import.pages.len(),
                header = import.header_detected,
                skipped = import.skipped_rows,
                elapsed_ms = start.elapsed().as_millis() as u64,
                "Imported outline"
            ),
            Err(err) => tracing::warn!(rows = rows.len(), error = %err, "Outline import rejected"),
        }

        result
    }

    /// Import a byte blob of unknown encoding
    pub fn import_bytes(&self, bytes: &[u8]) -> Result<OutlineImport> {
        let decoded = decode_text(bytes);
        tracing::debug!(
            encoding = decoded.encoding,
            lossy = decoded.lossy,
            bytes = bytes.len(),
            "Decoded outline input"
        );
        self.import_text(&decoded.text)
    }

    /// Import from a file on disk
    pub fn import_file(&self, path: &Path) -> Result<OutlineImport> {
        let bytes = std::fs::read(path).map_err(|e| {
            AppError::IoError(format!("Failed to read {}: {}", path.display(), e))
        })?;
        self.import_bytes(&bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::outline::OutlinePage;
    use crate::infrastructure::csv::EMPTY_OUTLINE_MESSAGE;

    #[test]
    fn test_import_with_header_and_quotes() {
        let text = "スライド番号,タイトル,本文\r\n1,Intro,\"Welcome, all\"\r\n2,\"Plan\",\"Step one\nStep two\"\r\n";
        let import = OutlineImportUseCase::default().import_text(text).unwrap();

        assert!(import.header_detected);
        assert_eq!(import.row_count, 3);
        assert_eq!(
            import.pages,
            vec![
                OutlinePage::new(1, "Intro", "Welcome, all"),
                OutlinePage::new(2, "Plan", "Step one\nStep two"),
            ]
        );
    }

    #[test]
    fn test_blank_input_is_malformed() {
        let err = OutlineImportUseCase::default().import_text("\n").unwrap_err();
        match err {
            AppError::MalformedInput(msg) => assert_eq!(msg, EMPTY_OUTLINE_MESSAGE),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_import_bytes_with_bom() {
        let mut bytes = vec![0xEF, 0xBB, 0xBF];
        bytes.extend_from_slice("A,B\nC,D\n".as_bytes());
        let import = OutlineImportUseCase::default().import_bytes(&bytes).unwrap();
        assert_eq!(import.pages.len(), 2);
        assert_eq!(import.pages[0].title, "A");
    }

    #[test]
    fn test_import_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("outline.csv");
        std::fs::write(&path, "5,Foo,Bar\n").unwrap();

        let import = OutlineImportUseCase::default().import_file(&path).unwrap();
        assert_eq!(import.pages, vec![OutlinePage::new(5, "Foo", "Bar")]);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = OutlineImportUseCase::default().import_file(Path::new("/nonexistent/outline.csv"));
        assert!(matches!(result, Err(AppError::IoError(_))));
    }

    #[test]
    fn test_detected_delimiter() {
        let text = "No;Title;Content\n1;Intro;Hello, world\n2;Plan;Steps";
        let import = OutlineImportUseCase::new(Delimiter::Detect)
            .import_text(text)
            .unwrap();

        assert!(import.header_detected);
        assert_eq!(import.pages[0], OutlinePage::new(1, "Intro", "Hello, world"));
        assert_eq!(import.pages.len(), 2);
    }

    #[test]
    fn test_default_delimiter_is_comma() {
        let import = OutlineImportUseCase::default()
            .import_text("Intro;Hello")
            .unwrap();
        assert_eq!(import.pages, vec![OutlinePage::new(1, "", "Intro;Hello")]);
    }

    #[test]
    fn test_reimport_is_idempotent() {
        let use_case = OutlineImportUseCase::default();
        let text = "A,B\nC,D";
        assert_eq!(use_case.import_text(text).unwrap(), use_case.import_text(text).unwrap());
    }
}
