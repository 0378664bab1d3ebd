use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::domain::error::Result;
use crate::domain::image::GeneratedImage;

/// Per-run directory under the output root, named by UTC timestamp.
pub fn ensure_run_dir(output_dir: &Path, started_at: DateTime<Utc>) -> std::io::Result<PathBuf> {
    let run_dir = output_dir.join(started_at.format("%Y%m%d-%H%M%S").to_string());
    ensure_dir(&run_dir)?;
    Ok(run_dir)
}

/// File name for the image at `index` (1-based), e.g. `01_<id>.png`.
pub fn image_file_name(index: usize, image: &GeneratedImage) -> String {
    format!("{:02}_{}.{}", index, image.id, image.extension())
}

/// Write images into `dir` in order and return their paths.
pub fn save_images(dir: &Path, images: &[GeneratedImage]) -> Result<Vec<PathBuf>> {
    ensure_dir(dir)?;

    let mut paths = Vec::with_capacity(images.len());
    for (i, image) in images.iter().enumerate() {
        let path = dir.join(image_file_name(i + 1, image));
        fs::write(&path, &image.image_bytes)?;
        tracing::debug!(path = %path.display(), bytes = image.size(), "Saved image");
        paths.push(path);
    }
    Ok(paths)
}

fn ensure_dir(path: &Path) -> std::io::Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_save_images_writes_in_order() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("nested");
        let images = vec![
            GeneratedImage::new(vec![1, 2, 3], "image/png", "a"),
            GeneratedImage::new(vec![4], "image/jpeg", "b"),
        ];

        let paths = save_images(&dir, &images).unwrap();

        assert_eq!(paths.len(), 2);
        assert!(paths[0].file_name().unwrap().to_string_lossy().starts_with("01_"));
        assert!(paths[1].to_string_lossy().ends_with(".jpg"));
        assert_eq!(fs::read(&paths[0]).unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn test_run_dir_uses_timestamp() {
        let tmp = tempfile::tempdir().unwrap();
        let at = Utc.with_ymd_and_hms(2026, 3, 4, 5, 6, 7).unwrap();
        let dir = ensure_run_dir(tmp.path(), at).unwrap();
        assert!(dir.ends_with("20260304-050607"));
        assert!(dir.is_dir());
    }
}
