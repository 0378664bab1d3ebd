// ============================================================
// OUTLINE MAPPER
// ============================================================
// Project tokenized rows onto outline pages

use crate::domain::csv::{OutlineImport, Row};
use crate::domain::error::{AppError, Result};
use crate::domain::outline::OutlinePage;

/// Substrings in the first header cell that mark it as a page-number column.
const PAGE_HEADER_MARKERS: [&str; 3] = ["スライド", "slide", "no"];

/// Substrings in the second header cell that mark it as a title column.
const TITLE_HEADER_MARKERS: [&str; 2] = ["タイトル", "title"];

pub const EMPTY_OUTLINE_MESSAGE: &str =
    "No slides could be read from the file. Expected rows of \"number,title,content\", \"title,content\" or \"content\".";

/// Maps rows into `OutlinePage`s:
///
/// - 3+ fields: page number, title, content (extra fields ignored)
/// - 2 fields: title, content
/// - 1 field: content
///
/// Missing or unusable page numbers are replaced by the page's position
/// among accepted pages. Rows without title or content are dropped.
pub struct OutlineMapper;

impl OutlineMapper {
    /// Header detection looks only at the first two cells of the first row.
    pub fn is_header(row: &Row) -> bool {
        let first = row.first().map(|f| f.to_lowercase()).unwrap_or_default();
        let second = row.get(1).map(|f| f.to_lowercase()).unwrap_or_default();

        PAGE_HEADER_MARKERS.iter().any(|m| first.contains(m))
            || TITLE_HEADER_MARKERS.iter().any(|m| second.contains(m))
    }

    /// Build the outline, failing with `MalformedInput` when no page survives.
    pub fn build_outline(rows: &[Row]) -> Result<OutlineImport> {
        let import = Self::map_rows(rows);
        if import.is_empty() {
            return Err(AppError::MalformedInput(EMPTY_OUTLINE_MESSAGE.to_string()));
        }
        Ok(import)
    }

    /// Map rows without judging the result.
    pub fn map_rows(rows: &[Row]) -> OutlineImport {
        let header_detected = rows.first().map(Self::is_header).unwrap_or(false);
        let data_rows = if header_detected { &rows[1..] } else { rows };

        let mut pages: Vec<OutlinePage> = Vec::with_capacity(data_rows.len());
        let mut skipped_rows = 0usize;

        for row in data_rows {
            let position = pages.len() as u32 + 1;
            let page = match row.as_slice() {
                [] => None,
                [content] => Some(OutlinePage::new(position, "", content.trim())),
                [title, content] => Some(OutlinePage::new(position, title.trim(), content.trim())),
                [number, title, content, ..] => Some(OutlinePage::new(
                    page_number_or_position(number, position),
                    title.trim(),
                    content.trim(),
                )),
            };

            match page {
                Some(page) if page.has_text() => pages.push(page),
                _ => skipped_rows += 1,
            }
        }

        tracing::debug!(
            row_count = rows.len(),
            header_detected,
            accepted = pages.len(),
            skipped_rows,
            "Mapped delimited rows to outline"
        );

        OutlineImport {
            pages,
            row_count: rows.len(),
            header_detected,
            skipped_rows,
        }
    }
}

/// Explicit page number when usable, otherwise `position`. A cell that
/// starts with digits but is still rejected (zero, or too large for `u32`)
/// is logged so the renumbering can be traced.
fn page_number_or_position(raw: &str, position: u32) -> u32 {
    match parse_page_number(raw) {
        Some(number) => number,
        None => {
            if raw.trim().trim_start_matches('+').starts_with(|c: char| c.is_ascii_digit()) {
                tracing::debug!(cell = raw, position, "Unusable page number, using position");
            }
            position
        }
    }
}

/// Integer-prefix parse: surrounding whitespace and trailing junk are
/// ignored, so `" 7 "` and `"7."` both give 7. Zero and negatives are rejected.
pub fn parse_page_number(raw: &str) -> Option<u32> {
    let trimmed = raw.trim();
    let (negative, unsigned) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };

    let digits: String = unsigned.chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() || negative {
        return None;
    }

    digits.parse::<u32>().ok().filter(|n| *n > 0)
}
