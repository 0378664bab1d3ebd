use std::sync::Arc;

use chrono::Utc;

use crate::domain::error::{AppError, Result};
use crate::domain::image::PageImage;
use crate::domain::upload::{UploadFile, UploadReport, UploadedFile};
use crate::infrastructure::cloud::CloudUploadService;

pub struct DriveExportUseCase {
    upload_service: Arc<dyn CloudUploadService + Send + Sync>,
}

impl DriveExportUseCase {
    pub fn new(upload_service: Arc<dyn CloudUploadService + Send + Sync>) -> Self {
        Self { upload_service }
    }

    /// Upload `files` one at a time into a new folder. The first failed
    /// upload ends the export; files already uploaded are left in place.
    pub async fn export(
        &self,
        folder_name: Option<&str>,
        parent_id: Option<&str>,
        files: Vec<UploadFile>,
    ) -> Result<UploadReport> {
        if files.is_empty() {
            return Err(AppError::ValidationError("Nothing to upload".to_string()));
        }

        if !self.upload_service.is_authenticated() && !self.upload_service.authenticate().await? {
            return Err(AppError::Unauthenticated(
                "Sign in to cloud storage before uploading".to_string(),
            ));
        }

        let folder_name = folder_name
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .unwrap_or_else(default_folder_name);

        let folder_id = self
            .upload_service
            .create_folder(&folder_name, parent_id)
            .await?;

        let total = files.len();
        let mut uploaded = Vec::with_capacity(total);
        for (index, file) in files.iter().enumerate() {
            let url = self
                .upload_service
                .upload_file(file, &folder_id)
                .await
                .map_err(|err| {
                    tracing::error!(
                        file = %file.name,
                        uploaded = index,
                        remaining = total - index,
                        error = %err,
                        "Upload aborted"
                    );
                    err
                })?;
            uploaded.push(UploadedFile {
                name: file.name.clone(),
                url,
            });
        }

        tracing::info!(folder_id = %folder_id, files = uploaded.len(), "Export finished");
        Ok(UploadReport {
            folder_id,
            folder_name,
            files: uploaded,
        })
    }
}

fn default_folder_name() -> String {
    format!("SlideCanvas {}", Utc::now().format("%Y-%m-%d %H%M%S"))
}

/// Upload payloads for page images, named `slide_<page>.<ext>`.
pub fn files_from_page_images(images: &[PageImage]) -> Vec<UploadFile> {
    images
        .iter()
        .map(|page| {
            UploadFile::new(
                format!("slide_{:02}.{}", page.page_number, page.image.extension()),
                page.image.mime_type.clone(),
                page.image.image_bytes.clone(),
            )
        })
        .collect()
}
