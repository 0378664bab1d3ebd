use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::error::{AppError, Result};

/// One slide's planned content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutlinePage {
    pub page_number: u32,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub visual_cue: String,
    #[serde(default)]
    pub emphasis: String,
    #[serde(default)]
    pub mood: String,
}

impl OutlinePage {
    pub fn new(page_number: u32, title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            page_number,
            title: title.into(),
            content: content.into(),
            visual_cue: String::new(),
            emphasis: String::new(),
            mood: String::new(),
        }
    }

    /// A page is worth keeping only if it has a title or body text.
    pub fn has_text(&self) -> bool {
        !self.title.trim().is_empty() || !self.content.trim().is_empty()
    }

    pub fn field(&self, field: OutlineField) -> &str {
        match field {
            OutlineField::Title => &self.title,
            OutlineField::Content => &self.content,
            OutlineField::VisualCue => &self.visual_cue,
            OutlineField::Emphasis => &self.emphasis,
            OutlineField::Mood => &self.mood,
        }
    }

    pub fn set_field(&mut self, field: OutlineField, value: impl Into<String>) {
        let value = value.into();
        match field {
            OutlineField::Title => self.title = value,
            OutlineField::Content => self.content = value,
            OutlineField::VisualCue => self.visual_cue = value,
            OutlineField::Emphasis => self.emphasis = value,
            OutlineField::Mood => self.mood = value,
        }
    }
}

/// Fields of an `OutlinePage` that may be edited after import or generation.
/// `pageNumber` is deliberately absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OutlineField {
    Title,
    Content,
    VisualCue,
    Emphasis,
    Mood,
}

impl OutlineField {
    pub const ALL: [OutlineField; 5] = [
        OutlineField::Title,
        OutlineField::Content,
        OutlineField::VisualCue,
        OutlineField::Emphasis,
        OutlineField::Mood,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OutlineField::Title => "title",
            OutlineField::Content => "content",
            OutlineField::VisualCue => "visualCue",
            OutlineField::Emphasis => "emphasis",
            OutlineField::Mood => "mood",
        }
    }
}

impl fmt::Display for OutlineField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutlineField {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "title" => Ok(OutlineField::Title),
            "content" => Ok(OutlineField::Content),
            "visualCue" | "visual_cue" => Ok(OutlineField::VisualCue),
            "emphasis" => Ok(OutlineField::Emphasis),
            "mood" => Ok(OutlineField::Mood),
            "pageNumber" | "page_number" => Err(AppError::ValidationError(
                "pageNumber is read-only".to_string(),
            )),
            other => Err(AppError::ValidationError(format!(
                "Unknown outline field: {}",
                other
            ))),
        }
    }
}

/// Applies a field edit addressed by page index and field name.
pub fn edit_page(pages: &mut [OutlinePage], index: usize, field: &str, value: &str) -> Result<()> {
    let field = OutlineField::from_str(field)?;
    let page = pages
        .get_mut(index)
        .ok_or_else(|| AppError::NotFound(format!("Outline page at index {}", index)))?;
    page.set_field(field, value);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_each_field() {
        let mut page = OutlinePage::new(1, "Intro", "Welcome");
        for field in OutlineField::ALL {
            page.set_field(field, format!("new {}", field));
            assert_eq!(page.field(field), format!("new {}", field));
        }
        assert_eq!(page.page_number, 1);
    }

    #[test]
    fn test_page_number_is_read_only() {
        let err = OutlineField::from_str("pageNumber").unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }

    #[test]
    fn test_edit_page_out_of_range() {
        let mut pages = vec![OutlinePage::new(1, "A", "B")];
        assert!(edit_page(&mut pages, 0, "visualCue", "sunrise").is_ok());
        assert_eq!(pages[0].visual_cue, "sunrise");
        assert!(matches!(
            edit_page(&mut pages, 3, "title", "x"),
            Err(AppError::NotFound(_))
        ));
    }

    #[test]
    fn test_has_text_ignores_whitespace() {
        assert!(!OutlinePage::new(1, "  ", "\t").has_text());
        assert!(OutlinePage::new(1, "", "body").has_text());
    }

    #[test]
    fn test_serializes_camel_case() {
        let page = OutlinePage::new(2, "T", "C");
        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json["pageNumber"], 2);
        assert_eq!(json["visualCue"], "");
    }
}
