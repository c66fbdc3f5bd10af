//! Image files attached with `--image`

use crate::error::{AdminError, Result};
use image::ImageFormat;
use sonrisas_common::Upload;
use std::path::Path;

/// Read an image from disk, sniffing its real format from the content
pub fn read_image(path: &Path) -> Result<Upload> {
    if !path.is_file() {
        return Err(AdminError::FileNotFound(path.display().to_string()));
    }
    let bytes = std::fs::read(path)?;
    let content_type = match image::guess_format(&bytes) {
        Ok(ImageFormat::Jpeg) => "image/jpeg",
        Ok(ImageFormat::Png) => "image/png",
        Ok(other) => {
            return Err(AdminError::InvalidImage(format!(
                "{}: formato {:?} no admitido",
                path.display(),
                other
            )))
        }
        Err(e) => return Err(AdminError::InvalidImage(format!("{}: {}", path.display(), e))),
    };

    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| "imagen".into());
    let upload = Upload::new(file_name, content_type, bytes);
    upload.validate_image()?;
    tracing::debug!(file = %upload.file_name, size = upload.bytes.len(), "image loaded");
    Ok(upload)
}
