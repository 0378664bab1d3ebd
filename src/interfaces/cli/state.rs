use crate::application::{
    DriveExportUseCase, ImageGenerationUseCase, OutlineGenerationUseCase, OutlineImportUseCase,
};
use crate::domain::generation_config::GenerationConfig;
use crate::infrastructure::config::{AppConfig, ConfigService};

/// Everything a command needs, wired once at start-up.
pub struct AppState {
    pub config: AppConfig,
    pub config_service: ConfigService,
    pub generation_config: GenerationConfig,
    pub outline_import_use_case: OutlineImportUseCase,
    pub outline_generation_use_case: OutlineGenerationUseCase,
    pub image_generation_use_case: ImageGenerationUseCase,
    pub drive_export_use_case: DriveExportUseCase,
}
