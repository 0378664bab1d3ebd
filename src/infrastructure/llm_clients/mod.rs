pub mod gemini;
pub mod outline_generator;
pub mod prompts;

use crate::domain::error::Result;
use crate::domain::generation_config::GenerationConfig;
use crate::domain::image::{GeneratedImage, ImageRequest, OutlineRequest};
use crate::domain::outline::OutlinePage;
use async_trait::async_trait;

pub use gemini::GeminiClient;
pub use outline_generator::TextOutlineGenerator;

/// Plain text completion.
#[async_trait]
pub trait LLMClient {
    async fn generate(&self, config: &GenerationConfig, system: &str, user: &str) -> Result<String>;
}

/// Image generation. Each of the `request.count` attempts may fail on its
/// own; failed attempts are left out of the result instead of failing the call.
#[async_trait]
pub trait ImageGenerationService {
    async fn generate_images(
        &self,
        config: &GenerationConfig,
        request: &ImageRequest,
    ) -> Result<Vec<GeneratedImage>>;
}

/// Outline planning. Any failure fails the whole call.
#[async_trait]
pub trait OutlineGenerationService {
    async fn generate_outline(
        &self,
        config: &GenerationConfig,
        request: &OutlineRequest,
    ) -> Result<Vec<OutlinePage>>;
}
