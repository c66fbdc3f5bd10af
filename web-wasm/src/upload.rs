//! Image files picked in the browser
//!
//! Files are read as data URLs so the same string serves as the preview;
//! the base64 payload is decoded back into bytes for the multipart upload.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use sonrisas_common::Upload;

/// Base64 payload of a `data:<mime>;base64,<data>` URL
pub fn extract_base64_from_data_url(data_url: &str) -> Option<&str> {
    data_url.split_once(',').map(|(_, data)| data)
}

/// MIME type of a data URL, `None` when it has none
pub fn extract_mime_type_from_data_url(data_url: &str) -> Option<&str> {
    data_url
        .strip_prefix("data:")
        .and_then(|rest| rest.split(';').next())
        .filter(|mime| !mime.is_empty())
}

/// Build an upload from a picked file; the file's own type wins over the data URL
pub fn upload_from_data_url(
    file_name: &str,
    file_type: &str,
    data_url: &str,
) -> Result<Upload, String> {
    let data = extract_base64_from_data_url(data_url)
        .ok_or_else(|| format!("{}: no se pudo leer el archivo", file_name))?;
    let bytes = STANDARD
        .decode(data)
        .map_err(|e| format!("{}: {}", file_name, e))?;
    let content_type = if file_type.is_empty() {
        extract_mime_type_from_data_url(data_url).unwrap_or_default()
    } else {
        file_type
    };
    Ok(Upload::new(file_name, content_type, bytes))
}
