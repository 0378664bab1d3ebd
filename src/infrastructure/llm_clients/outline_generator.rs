use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;

use super::prompts::{build_outline_system_prompt, build_outline_user_prompt};
use super::{LLMClient, OutlineGenerationService};
use crate::domain::error::{AppError, Result};
use crate::domain::generation_config::GenerationConfig;
use crate::domain::image::OutlineRequest;
use crate::domain::outline::OutlinePage;
use crate::infrastructure::response::extract_json_payload;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlannedPage {
    #[serde(default)]
    page_number: Option<u32>,
    #[serde(default)]
    title: String,
    #[serde(default)]
    content: String,
    #[serde(default)]
    visual_cue: String,
    #[serde(default)]
    emphasis: String,
    #[serde(default)]
    mood: String,
}

/// Outline planning on top of any text completion client.
pub struct TextOutlineGenerator {
    llm_client: Arc<dyn LLMClient + Send + Sync>,
}

impl TextOutlineGenerator {
    pub fn new(llm_client: Arc<dyn LLMClient + Send + Sync>) -> Self {
        Self { llm_client }
    }
}

/// Turn the model's JSON array into pages. Pages without a usable number
/// are numbered by position; pages without text are dropped.
pub(crate) fn parse_planned_pages(raw: &str) -> Result<Vec<OutlinePage>> {
    let payload = extract_json_payload(raw);
    let planned: Vec<PlannedPage> = serde_json::from_str(&payload).map_err(|e| {
        AppError::GenerationError(format!("Outline response is not a JSON array of pages: {}", e))
    })?;

    let mut pages: Vec<OutlinePage> = Vec::with_capacity(planned.len());
    for item in planned {
        let position = pages.len() as u32 + 1;
        let page = OutlinePage {
            page_number: item.page_number.filter(|n| *n > 0).unwrap_or(position),
            title: item.title.trim().to_string(),
            content: item.content.trim().to_string(),
            visual_cue: item.visual_cue.trim().to_string(),
            emphasis: item.emphasis.trim().to_string(),
            mood: item.mood.trim().to_string(),
        };
        if page.has_text() {
            pages.push(page);
        }
    }

    if pages.is_empty() {
        return Err(AppError::GenerationError(
            "Outline response contained no pages".to_string(),
        ));
    }
    Ok(pages)
}

#[async_trait]
impl OutlineGenerationService for TextOutlineGenerator {
    async fn generate_outline(
        &self,
        config: &GenerationConfig,
        request: &OutlineRequest,
    ) -> Result<Vec<OutlinePage>> {
        let system_prompt = build_outline_system_prompt(request.page_count, request.complexity);
        let user_prompt = build_outline_user_prompt(&request.prompt);

        let raw = self
            .llm_client
            .generate(config, &system_prompt, &user_prompt)
            .await?;

        let pages = parse_planned_pages(&raw)?;
        if pages.len() as u32 != request.page_count {
            tracing::warn!(
                requested = request.page_count,
                received = pages.len(),
                "Outline page count differs from request"
            );
        }
        Ok(pages)
    }
}
