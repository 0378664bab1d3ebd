use std::sync::Arc;

use validator::Validate;

use crate::domain::error::Result;
use crate::domain::generation_config::GenerationConfig;
use crate::domain::image::OutlineRequest;
use crate::domain::outline::OutlinePage;
use crate::infrastructure::llm_clients::OutlineGenerationService;

pub struct OutlineGenerationUseCase {
    outline_service: Arc<dyn OutlineGenerationService + Send + Sync>,
}

impl OutlineGenerationUseCase {
    pub fn new(outline_service: Arc<dyn OutlineGenerationService + Send + Sync>) -> Self {
        Self { outline_service }
    }

    /// Plan an outline for a topic. Service errors are returned unchanged.
    pub async fn execute(
        &self,
        config: &GenerationConfig,
        request: &OutlineRequest,
    ) -> Result<Vec<OutlinePage>> {
        request.validate()?;

        tracing::info!(
            pages = request.page_count,
            complexity = ?request.complexity,
            "Generating outline"
        );

        let pages = self
            .outline_service
            .generate_outline(config, request)
            .await
            .map_err(|err| {
                tracing::error!(error = %err, "Outline generation failed");
                err
            })?;

        tracing::info!(pages = pages.len(), "Outline generated");
        Ok(pages)
    }
}
