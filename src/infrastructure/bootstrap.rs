use std::sync::Arc;

use tracing::warn;

use crate::application::{
    DriveExportUseCase, ImageGenerationUseCase, OutlineGenerationUseCase, OutlineImportUseCase,
};
use crate::domain::error::Result;
use crate::infrastructure::cloud::DriveClient;
use crate::infrastructure::config::{AppConfig, ConfigService};
use crate::infrastructure::llm_clients::{GeminiClient, TextOutlineGenerator};
use crate::interfaces::cli::state::AppState;

pub const GOOGLE_PROVIDER: &str = "google";

pub fn setup(config: AppConfig) -> Result<AppState> {
    config.validate()?;

    let config_service = ConfigService::new();
    let api_key = config_service.resolve_api_key(&config, GOOGLE_PROVIDER);
    if api_key.is_none() {
        warn!("No Gemini API key configured; generation commands will fail");
    }
    let generation_config = config.generation_config(api_key);

    let gemini = Arc::new(GeminiClient::new(config.gemini.timeout_secs));
    let outline_generator = Arc::new(TextOutlineGenerator::new(gemini.clone()));
    let drive = Arc::new(DriveClient::new(config.drive.clone()));

    Ok(AppState {
        generation_config,
        outline_import_use_case: OutlineImportUseCase::default(),
        outline_generation_use_case: OutlineGenerationUseCase::new(outline_generator),
        image_generation_use_case: ImageGenerationUseCase::new(gemini)
            .with_max_images(config.gemini.max_images_per_request),
        drive_export_use_case: DriveExportUseCase::new(drive),
        config,
        config_service,
    })
}
