use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::CloudUploadService;
use crate::domain::error::{AppError, Result};
use crate::domain::upload::UploadFile;

const FOLDER_MIME_TYPE: &str = "application/vnd.google-apps.folder";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DriveSettings {
    pub api_url: String,
    pub upload_url: String,
    pub access_token: Option<String>,
    pub parent_folder_id: Option<String>,
    pub timeout_secs: u64,
}

impl Default for DriveSettings {
    fn default() -> Self {
        Self {
            api_url: "https://www.googleapis.com/drive/v3".to_string(),
            upload_url: "https://www.googleapis.com/upload/drive/v3/files".to_string(),
            access_token: None,
            parent_folder_id: None,
            timeout_secs: 60,
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DriveFile {
    id: String,
    #[serde(default)]
    web_view_link: Option<String>,
}

/// Google Drive v3 client authenticated by a bearer token obtained elsewhere.
pub struct DriveClient {
    client: reqwest::Client,
    settings: DriveSettings,
    authenticated: AtomicBool,
}

impl DriveClient {
    pub fn new(settings: DriveSettings) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(settings.timeout_secs))
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
            settings,
            authenticated: AtomicBool::new(false),
        }
    }

    fn token(&self) -> Result<&str> {
        self.settings
            .access_token
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| AppError::Unauthenticated("No Drive access token configured".to_string()))
    }

    async fn check(response: reqwest::Response, action: &str) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let text = response.text().await.unwrap_or_default();
        Err(AppError::from_status(
            status.as_u16(),
            format!("{} failed: {}", action, text),
        ))
    }
}

pub(crate) fn folder_metadata(name: &str, parent_id: Option<&str>) -> serde_json::Value {
    match parent_id {
        Some(parent) => json!({ "name": name, "mimeType": FOLDER_MIME_TYPE, "parents": [parent] }),
        None => json!({ "name": name, "mimeType": FOLDER_MIME_TYPE }),
    }
}

const UPLOAD_QUERY: [(&str, &str); 2] = [("uploadType", "multipart"), ("fields", "id,webViewLink")];

/// Metadata part of an upload: the file is created directly inside `folder_id`.
pub(crate) fn upload_metadata(name: &str, folder_id: &str) -> serde_json::Value {
    json!({ "name": name, "parents": [folder_id] })
}

/// `multipart/related` body carrying JSON metadata followed by the media.
pub(crate) fn multipart_related_body(
    boundary: &str,
    metadata: &serde_json::Value,
    file: &UploadFile,
) -> Vec<u8> {
    let mut body = Vec::with_capacity(file.bytes.len() + 256);
    body.extend_from_slice(
        format!(
            "--{b}\r\nContent-Type: application/json; charset=UTF-8\r\n\r\n{meta}\r\n--{b}\r\nContent-Type: {mime}\r\n\r\n",
            b = boundary,
            meta = metadata,
            mime = file.mime_type
        )
        .as_bytes(),
    );
    body.extend_from_slice(&file.bytes);
    body.extend_from_slice(format!("\r\n--{}--\r\n", boundary).as_bytes());
    body
}

pub(crate) fn file_view_url(file_id: &str) -> String {
    format!("https://drive.google.com/file/d/{}/view", file_id)
}

#[async_trait]
impl CloudUploadService for DriveClient {
    async fn authenticate(&self) -> Result<bool> {
        let token = match self.token() {
            Ok(token) => token,
            Err(_) => {
                self.authenticated.store(false, Ordering::SeqCst);
                return Ok(false);
            }
        };

        let response = self
            .client
            .get(format!("{}/about", self.settings.api_url.trim_end_matches('/')))
            .query(&[("fields", "user")])
            .bearer_auth(token)
            .send()
            .await?;

        let signed_in = match Self::check(response, "Session check").await {
            Ok(_) => true,
            Err(AppError::Unauthenticated(msg)) => {
                tracing::info!(reason = %msg, "Drive session is not authenticated");
                false
            }
            Err(err) => return Err(err),
        };

        self.authenticated.store(signed_in, Ordering::SeqCst);
        Ok(signed_in)
    }

    fn is_authenticated(&self) -> bool {
        self.authenticated.load(Ordering::SeqCst)
    }

    async fn create_folder(&self, name: &str, parent_id: Option<&str>) -> Result<String> {
        let token = self.token()?;
        let parent = parent_id.or(self.settings.parent_folder_id.as_deref());

        let response = self
            .client
            .post(format!("{}/files", self.settings.api_url.trim_end_matches('/')))
            .query(&[("fields", "id")])
            .bearer_auth(token)
            .json(&folder_metadata(name, parent))
            .send()
            .await?;

        let folder: DriveFile = Self::check(response, "Folder creation")
            .await?
            .json()
            .await?;

        tracing::info!(folder_id = %folder.id, name, "Created Drive folder");
        Ok(folder.id)
    }

    async fn upload_file(&self, file: &UploadFile, folder_id: &str) -> Result<String> {
        let token = self.token()?;
        let boundary = format!("slidecanvas-{}", uuid::Uuid::new_v4().simple());
        let body = multipart_related_body(&boundary, &upload_metadata(&file.name, folder_id), file);

        let response = self
            .client
            .post(&self.settings.upload_url)
            .query(&UPLOAD_QUERY)
            .bearer_auth(token)
            .header(
                "Content-Type",
                format!("multipart/related; boundary={}", boundary),
            )
            .body(body)
            .send()
            .await?;
        let uploaded: DriveFile = Self::check(response, "Upload").await?.json().await?;

        tracing::debug!(file_id = %uploaded.id, name = %file.name, bytes = file.bytes.len(), "Uploaded file");
        Ok(uploaded
            .web_view_link
            .unwrap_or_else(|| file_view_url(&uploaded.id)))
    }
}
