pub mod drive_export;
pub mod image_generation;
pub mod outline_generation;
pub mod outline_import;
