use serde::{Deserialize, Serialize};

/// A named blob waiting to be uploaded.
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            bytes,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedFile {
    pub name: String,
    pub url: String,
}

/// Outcome of exporting a batch of files into a new folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadReport {
    pub folder_id: String,
    pub folder_name: String,
    pub files: Vec<UploadedFile>,
}

impl UploadReport {
    pub fn urls(&self) -> Vec<&str> {
        self.files.iter().map(|f| f.url.as_str()).collect()
    }
}
