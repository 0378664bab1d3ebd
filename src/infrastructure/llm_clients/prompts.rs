use crate::domain::image::{ComplexityLevel, StyleConfig};
use crate::domain::outline::OutlinePage;

pub(crate) fn build_outline_system_prompt(page_count: u32, complexity: ComplexityLevel) -> String {
    format!(
        "You are a presentation designer. Plan a slide deck of exactly {pages} pages.\n\
         {detail}\n\
         Respond with ONLY a JSON array of {pages} objects, no prose. Each object has the keys \
         \"pageNumber\" (integer starting at 1), \"title\", \"content\", \"visualCue\" \
         (what the slide image should show), \"emphasis\" (the key message) and \"mood\".",
        pages = page_count,
        detail = complexity.instruction(),
    )
}

pub(crate) fn build_outline_user_prompt(topic: &str) -> String {
    format!("Presentation topic:\n{}", topic.trim())
}

/// Image prompt for one outline page. Empty optional fields are left out.
pub fn build_page_image_prompt(page: &OutlinePage, style: &StyleConfig) -> String {
    let mut lines = vec![format!("Create a presentation slide image for page {}.", page.page_number)];

    if !page.title.trim().is_empty() {
        lines.push(format!("Title: {}", page.title.trim()));
    }
    if !page.content.trim().is_empty() {
        lines.push(format!("Content: {}", page.content.trim()));
    }
    if !page.visual_cue.trim().is_empty() {
        lines.push(format!("Visual: {}", page.visual_cue.trim()));
    }
    if !page.emphasis.trim().is_empty() {
        lines.push(format!("Emphasize: {}", page.emphasis.trim()));
    }
    if !page.mood.trim().is_empty() {
        lines.push(format!("Mood: {}", page.mood.trim()));
    }

    lines.push(style.describe());
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_prompt_skips_empty_fields() {
        let page = OutlinePage::new(3, "", "Quarterly results");
        let prompt = build_page_image_prompt(&page, &StyleConfig::default());

        assert!(prompt.starts_with("Create a presentation slide image for page 3."));
        assert!(prompt.contains("Content: Quarterly results"));
        assert!(!prompt.contains("Title:"));
        assert!(!prompt.contains("Mood:"));
    }

    #[test]
    fn test_page_prompt_includes_cues() {
        let mut page = OutlinePage::new(1, "Intro", "Welcome");
        page.mood = "calm".to_string();
        let prompt = build_page_image_prompt(&page, &StyleConfig::default());
        assert!(prompt.contains("Mood: calm"));
    }

    #[test]
    fn test_outline_system_prompt_mentions_count() {
        let prompt = build_outline_system_prompt(7, ComplexityLevel::Simple);
        assert!(prompt.contains("exactly 7 pages"));
        assert!(prompt.contains(ComplexityLevel::Simple.instruction()));
    }
}
