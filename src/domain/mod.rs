pub mod error;
pub mod generation_config;
pub mod image;
pub mod outline;
pub mod upload;

// Delimited text ingestion
pub mod csv;
