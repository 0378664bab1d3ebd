pub mod use_cases;

pub use use_cases::drive_export::DriveExportUseCase;
pub use use_cases::image_generation::ImageGenerationUseCase;
pub use use_cases::outline_generation::OutlineGenerationUseCase;
pub use use_cases::outline_import::OutlineImportUseCase;
