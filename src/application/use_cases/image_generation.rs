use std::sync::Arc;

use futures::future::join_all;
use validator::Validate;

use crate::domain::error::{AppError, Result};
use crate::domain::generation_config::GenerationConfig;
use crate::domain::image::{
    GeneratedImage, ImageRequest, OutlineImageBatch, PageImage, StyleConfig,
    MAX_IMAGES_PER_REQUEST,
};
use crate::domain::outline::OutlinePage;
use crate::infrastructure::llm_clients::prompts::build_page_image_prompt;
use crate::infrastructure::llm_clients::ImageGenerationService;

pub struct ImageGenerationUseCase {
    image_service: Arc<dyn ImageGenerationService + Send + Sync>,
    max_images: u32,
}

impl ImageGenerationUseCase {
    pub fn new(image_service: Arc<dyn ImageGenerationService + Send + Sync>) -> Self {
        Self {
            image_service,
            max_images: MAX_IMAGES_PER_REQUEST,
        }
    }

    /// Lower the per-request image cap (clamped to 1..=`MAX_IMAGES_PER_REQUEST`).
    pub fn with_max_images(mut self, max_images: u32) -> Self {
        self.max_images = max_images.clamp(1, MAX_IMAGES_PER_REQUEST);
        self
    }

    /// Variations of a single free-form prompt, optionally guided by a
    /// reference image. Fewer than `count` images may come back.
    pub async fn generate_variations(
        &self,
        config: &GenerationConfig,
        request: &ImageRequest,
    ) -> Result<Vec<GeneratedImage>> {
        request.validate()?;
        if request.count > self.max_images {
            return Err(AppError::ValidationError(format!(
                "At most {} images can be requested at once, got {}",
                self.max_images, request.count
            )));
        }

        tracing::info!(
            count = request.count,
            with_reference = request.reference_image.is_some(),
            "Generating image variations"
        );
        self.image_service.generate_images(config, request).await
    }

    /// One image per outline page, requested concurrently. A page whose
    /// request fails is recorded in `failed_pages` and does not affect others.
    pub async fn generate_for_outline(
        &self,
        config: &GenerationConfig,
        pages: &[OutlinePage],
        style: &StyleConfig,
    ) -> Result<OutlineImageBatch> {
        if pages.is_empty() {
            return Err(AppError::ValidationError(
                "Outline has no pages to illustrate".to_string(),
            ));
        }

        let requests: Vec<(u32, ImageRequest)> = pages
            .iter()
            .map(|page| {
                let prompt = build_page_image_prompt(page, style);
                (page.page_number, ImageRequest::new(prompt, style.clone(), 1))
            })
            .collect();

        let attempts = requests.iter().map(|(page_number, request)| async move {
            let outcome = match request.validate() {
                Ok(()) => self.image_service.generate_images(config, request).await,
                Err(err) => Err(AppError::from(err)),
            };
            match outcome {
                Ok(mut images) if !images.is_empty() => Some(images.swap_remove(0)),
                Ok(_) => {
                    tracing::warn!(page = page_number, "Image service returned no image");
                    None
                }
                Err(err) => {
                    tracing::warn!(page = page_number, error = %err, "Page image generation failed");
                    None
                }
            }
        });
        let results = join_all(attempts).await;

        let mut batch = OutlineImageBatch::default();
        for ((page_number, _), result) in requests.iter().zip(results) {
            match result {
                Some(image) => batch.images.push(PageImage {
                    page_number: *page_number,
                    image,
                }),
                None => batch.failed_pages.push(*page_number),
            }
        }

        tracing::info!(
            pages = pages.len(),
            generated = batch.images.len(),
            failed = batch.failed_pages.len(),
            "Outline image generation finished"
        );
        Ok(batch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Fails any prompt containing "FAIL", otherwise returns `count` images.
    struct ScriptedImageService {
        calls: AtomicUsize,
    }

    impl ScriptedImageService {
        fn new() -> Self {
            Self {
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl ImageGenerationService for ScriptedImageService {
        async fn generate_images(
            &self,
            _config: &GenerationConfig,
            request: &ImageRequest,
        ) -> Result<Vec<GeneratedImage>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if request.prompt.contains("FAIL") {
                return Err(AppError::GenerationError("quota exceeded".to_string()));
            }
            Ok((0..request.count)
                .map(|_| GeneratedImage::new(vec![0x89], "image/png", request.prompt.clone()))
                .collect())
        }
    }

    #[tokio::test]
    async fn test_outline_failures_do_not_affect_siblings() {
        let service = Arc::new(ScriptedImageService::new());
        let use_case = ImageGenerationUseCase::new(service.clone());
        let pages = vec![
            OutlinePage::new(1, "Intro", "Welcome"),
            OutlinePage::new(2, "FAIL", "Broken"),
            OutlinePage::new(3, "Close", "Thanks"),
        ];

        let batch = use_case
            .generate_for_outline(&GenerationConfig::default(), &pages, &StyleConfig::default())
            .await
            .unwrap();

        assert_eq!(service.calls.load(Ordering::SeqCst), 3);
        let numbers: Vec<u32> = batch.images.iter().map(|i| i.page_number).collect();
        assert_eq!(numbers, vec![1, 3]);
        assert_eq!(batch.failed_pages, vec![2]);
        assert!(!batch.is_complete());
        assert!(batch.images[0].image.prompt_used.contains("Title: Intro"));
    }

    #[tokio::test]
    async fn test_all_failures_still_succeed_empty() {
        let use_case = ImageGenerationUseCase::new(Arc::new(ScriptedImageService::new()));
        let pages = vec![OutlinePage::new(1, "FAIL", "x")];

        let batch = use_case
            .generate_for_outline(&GenerationConfig::default(), &pages, &StyleConfig::default())
            .await
            .unwrap();
        assert!(batch.images.is_empty());
        assert_eq!(batch.failed_pages, vec![1]);
    }

    #[tokio::test]
    async fn test_empty_outline_rejected() {
        let use_case = ImageGenerationUseCase::new(Arc::new(ScriptedImageService::new()));
        let result = use_case
            .generate_for_outline(&GenerationConfig::default(), &[], &StyleConfig::default())
            .await;
        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }

    #[tokio::test]
    async fn test_variations_respect_configured_cap() {
        let service = Arc::new(ScriptedImageService::new());
        let use_case = ImageGenerationUseCase::new(service.clone()).with_max_images(2);

        let over = ImageRequest::new("sunrise", StyleConfig::default(), 3);
        assert!(matches!(
            use_case.generate_variations(&GenerationConfig::default(), &over).await,
            Err(AppError::ValidationError(_))
        ));
        assert_eq!(service.calls.load(Ordering::SeqCst), 0);

        let at_cap = ImageRequest::new("sunrise", StyleConfig::default(), 2);
        let images = use_case
            .generate_variations(&GenerationConfig::default(), &at_cap)
            .await
            .unwrap();
        assert_eq!(images.len(), 2);
    }

    #[tokio::test]
    async fn test_variations_validate_count() {
        let service = Arc::new(ScriptedImageService::new());
        let use_case = ImageGenerationUseCase::new(service.clone());

        let bad = ImageRequest::new("sunrise", StyleConfig::default(), 0);
        assert!(matches!(
            use_case.generate_variations(&GenerationConfig::default(), &bad).await,
            Err(AppError::ValidationError(_))
        ));
        assert_eq!(service.calls.load(Ordering::SeqCst), 0);

        let good = ImageRequest::new("sunrise", StyleConfig::default(), 3)
            .with_reference_image(vec![0xFF, 0xD8, 0xFF]);
        let images = use_case
            .generate_variations(&GenerationConfig::default(), &good)
            .await
            .unwrap();
        assert_eq!(images.len(), 3);
    }
}
