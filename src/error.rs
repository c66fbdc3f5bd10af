use thiserror::Error;

#[derive(Error, Debug)]
pub enum AdminError {
    #[error("Error de configuración: {0}")]
    Config(String),

    #[error("Archivo no encontrado: {0}")]
    FileNotFound(String),

    #[error("Imagen no válida: {0}")]
    InvalidImage(String),

    #[error("Argumento no válido: {0}")]
    InvalidArgument(String),

    #[error("Registro no encontrado: {0}")]
    NotFound(String),

    #[error("{0}")]
    Api(#[from] sonrisas_common::ApiError),

    /// An error notice left by a page operation
    #[error("{0}")]
    Notice(String),

    #[error(transparent)]
    Common(#[from] sonrisas_common::Error),

    #[error("Error HTTP: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Error al leer JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Error de E/S: {0}")]
    Io(#[from] std::io::Error),

    #[error("Error de terminal: {0}")]
    Prompt(String),
}

pub type Result<T> = std::result::Result<T, AdminError>;
