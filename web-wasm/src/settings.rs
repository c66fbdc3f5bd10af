//! Backend URL persisted in `localStorage`

use gloo::console;
use gloo::storage::{LocalStorage, Storage};
use sonrisas_common::{validate_base_url, DEFAULT_API_BASE_URL};

const STORAGE_KEY: &str = "sonrisas.api_base_url";

/// Build-time default, falling back to the public backend
pub fn default_base_url() -> &'static str {
    option_env!("SONRISAS_API_URL").unwrap_or(DEFAULT_API_BASE_URL)
}

/// Stored URL if it is still valid, otherwise the default
pub fn load_base_url() -> String {
    LocalStorage::get::<String>(STORAGE_KEY)
        .ok()
        .and_then(|url| validate_base_url(&url).ok())
        .unwrap_or_else(|| default_base_url().trim_end_matches('/').to_string())
}

/// Validate and store; returns the normalized URL
pub fn save_base_url(url: &str) -> Result<String, String> {
    let url = validate_base_url(url).map_err(|e| e.to_string())?;
    LocalStorage::set(STORAGE_KEY, &url).map_err(|e| {
        console::error!(format!("localStorage: {}", e));
        format!("No se pudo guardar la configuración: {}", e)
    })?;
    Ok(url)
}

pub fn clear_base_url() -> String {
    LocalStorage::delete(STORAGE_KEY);
    default_base_url().trim_end_matches('/').to_string()
}
