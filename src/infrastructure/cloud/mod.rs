pub mod drive;

use crate::domain::error::Result;
use crate::domain::upload::UploadFile;
use async_trait::async_trait;

pub use drive::DriveClient;

/// Remote folder storage. Failures surface as `Unauthenticated`,
/// `Forbidden`, `NotFound` or `Http`.
#[async_trait]
pub trait CloudUploadService {
    /// Establish a session. `Ok(false)` means the user is not signed in.
    async fn authenticate(&self) -> Result<bool>;

    /// Whether the last `authenticate` call succeeded.
    fn is_authenticated(&self) -> bool;

    /// Create a folder and return its id.
    async fn create_folder(&self, name: &str, parent_id: Option<&str>) -> Result<String>;

    /// Upload one file into `folder_id` and return a URL for it.
    async fn upload_file(&self, file: &UploadFile, folder_id: &str) -> Result<String>;
}
