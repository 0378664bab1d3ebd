// ============================================================
// DELIMITED TEXT PARSER
// ============================================================
// Split quote-escaped, newline-tolerant delimited text into rows

use std::str::FromStr;

use crate::domain::csv::Row;

/// Field delimiter choice for an import: a fixed character, or detection
/// from the first lines of the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    Fixed(char),
    Detect,
}

impl Default for Delimiter {
    fn default() -> Self {
        Delimiter::Fixed(',')
    }
}

impl Delimiter {
    pub fn resolve(self, text: &str) -> char {
        match self {
            Delimiter::Fixed(c) => c,
            Delimiter::Detect => DelimitedTextParser::detect_delimiter(text),
        }
    }
}

impl FromStr for Delimiter {
    type Err = String;

    /// `auto`, `tab` / `\t`, or any single character other than a quote or line break.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "auto" => return Ok(Delimiter::Detect),
            "tab" | "\\t" => return Ok(Delimiter::Fixed('\t')),
            _ => {}
        }

        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if !matches!(c, '"' | '\r' | '\n') => Ok(Delimiter::Fixed(c)),
            _ => Err(format!(
                "invalid delimiter '{}': use a single character, 'tab' or 'auto'",
                s
            )),
        }
    }
}

/// Tokenizer for comma-separated text with `"`-quoting.
///
/// Accepts `\n`, `\r\n` and bare `\r` record delimiters, even mixed in one
/// input. Inside a quoted span delimiters and line breaks are literal and
/// `""` stands for one `"`. Tokenizing never fails: an unterminated quoted
/// span swallows the rest of the input into the last field.
#[derive(Debug, Clone, Copy)]
pub struct DelimitedTextParser {
    /// Field delimiter (default: comma)
    delimiter: char,

    /// Quote character (default: double quote)
    quote: char,
}

impl Default for DelimitedTextParser {
    fn default() -> Self {
        Self {
            delimiter: ',',
            quote: '"',
        }
    }
}

impl DelimitedTextParser {
    /// Create a new parser with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set custom field delimiter
    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Split `text` into rows of untrimmed fields, preserving input order.
    pub fn tokenize(&self, text: &str) -> Vec<Row> {
        let mut rows: Vec<Row> = Vec::new();
        let mut row: Row = Vec::new();
        let mut field = String::new();
        let mut in_quotes = false;
        let mut chars = text.chars().peekable();

        while let Some(c) = chars.next() {
            if c == self.quote {
                if in_quotes && chars.peek() == Some(&self.quote) {
                    field.push(self.quote);
                    chars.next();
                } else {
                    in_quotes = !in_quotes;
                }
            } else if in_quotes {
                field.push(c);
            } else if c == self.delimiter {
                row.push(std::mem::take(&mut field));
            } else if c == '\r' || c == '\n' {
                if c == '\r' && chars.peek() == Some(&'\n') {
                    chars.next();
                }
                Self::finish_row(&mut rows, &mut row, &mut field);
            } else {
                field.push(c);
            }
        }

        Self::finish_row(&mut rows, &mut row, &mut field);
        rows
    }

    /// Flush the pending row. A line with no delimiter and no text yields nothing.
    fn finish_row(rows: &mut Vec<Row>, row: &mut Row, field: &mut String) {
        if !row.is_empty() || !field.is_empty() {
            row.push(std::mem::take(field));
            rows.push(std::mem::take(row));
        } else {
            field.clear();
        }
    }

    /// Detect delimiter from content (comma, semicolon, tab)
    pub fn detect_delimiter(content: &str) -> char {
        let candidates = [',', ';', '\t'];

        let mut best_delimiter = ',';
        let mut best_score = 0.0f32;

        let sample_lines: Vec<_> = content
            .lines()
            .filter(|line| !line.trim().is_empty())
            .take(10)
            .collect();

        if sample_lines.is_empty() {
            return best_delimiter;
        }

        for &delimiter in &candidates {
            let field_counts: Vec<usize> = sample_lines
                .iter()
                .map(|line| line.chars().filter(|&c| c == delimiter).count())
                .collect();

            // Score by consistency (low standard deviation) and frequency
            let avg = field_counts.iter().sum::<usize>() as f32 / field_counts.len() as f32;
            let variance = field_counts
                .iter()
                .map(|&x| (x as f32 - avg).powi(2))
                .sum::<f32>()
                / field_counts.len() as f32;

            let score = avg / (1.0 + variance.sqrt());

            if score > best_score {
                best_score = score;
                best_delimiter = delimiter;
            }
        }

        best_delimiter
    }
}
