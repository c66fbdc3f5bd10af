//! Error types

use thiserror::Error;

/// Shared error type for forms, uploads and configuration
#[derive(Error, Debug)]
pub enum Error {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Campo desconocido: {0}")]
    UnknownField(String),

    #[error("Valor inválido para {field}: '{value}'")]
    InvalidValue { field: String, value: String },

    #[error("Por favor, complete el campo: {0}")]
    MissingField(String),

    #[error("Imagen no válida: {0}")]
    InvalidUpload(String),

    #[error("Operación no soportada: {0}")]
    Unsupported(String),
}

impl Error {
    pub fn invalid_value(field: &str, value: &str) -> Self {
        Error::InvalidValue {
            field: field.to_string(),
            value: value.to_string(),
        }
    }
}

/// Result alias
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_json() {
        let json_error = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let error = Error::Json(json_error);
        assert!(format!("{}", error).contains("JSON error"));
    }

    #[test]
    fn test_error_display_config() {
        let error = Error::Config("URL base vacía".to_string());
        assert_eq!(format!("{}", error), "Config error: URL base vacía");
    }

    #[test]
    fn test_error_display_invalid_value() {
        let error = Error::invalid_value("edad", "abc");
        assert_eq!(format!("{}", error), "Valor inválido para edad: 'abc'");
    }

    #[test]
    fn test_error_display_missing_field() {
        let error = Error::MissingField("Descripción".to_string());
        assert_eq!(format!("{}", error), "Por favor, complete el campo: Descripción");
    }

    #[test]
    fn test_error_from_json() {
        let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error: Error = json_error.into();
        assert!(matches!(error, Error::Json(_)));
    }

    #[test]
    fn test_error_debug() {
        let error = Error::Unsupported("actualizar radiografía".to_string());
        let debug = format!("{:?}", error);
        assert!(debug.contains("Unsupported"));
    }
}
