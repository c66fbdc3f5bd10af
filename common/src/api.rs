//! Request/response types for the clinic backend
//!
//! Every resource client goes through [`parse_response`] / [`check_response`],
//! which turn a raw HTTP response into either the decoded body or a tagged
//! [`ApiError`] carrying the one message shown to the user.

use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

use crate::error::{Error, Result};

/// Message shown when the backend cannot be reached at all
pub const NETWORK_ERROR_MESSAGE: &str =
    "No se pudo conectar con el servidor. Por favor, intente nuevamente más tarde.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

/// An image file attached to a multipart form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl Upload {
    /// 5 MiB
    pub const MAX_BYTES: usize = 5 * 1024 * 1024;

    const ACCEPTED_EXTENSIONS: [&'static str; 3] = ["jpg", "jpeg", "png"];
    const ACCEPTED_TYPES: [&'static str; 2] = ["image/jpeg", "image/png"];

    pub fn new(file_name: impl Into<String>, content_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    /// Only .jpg/.jpeg/.png images up to 5 MiB are accepted
    pub fn validate_image(&self) -> Result<()> {
        let extension = self
            .file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_lowercase())
            .unwrap_or_default();

        if !Self::ACCEPTED_EXTENSIONS.contains(&extension.as_str())
            || !Self::ACCEPTED_TYPES.contains(&self.content_type.as_str())
        {
            return Err(Error::InvalidUpload(format!(
                "{}: solo se permiten imágenes .jpg, .jpeg o .png",
                self.file_name
            )));
        }
        if self.bytes.is_empty() {
            return Err(Error::InvalidUpload(format!("{}: archivo vacío", self.file_name)));
        }
        if self.bytes.len() > Self::MAX_BYTES {
            return Err(Error::InvalidUpload(format!(
                "{}: máximo 5MB ({} bytes)",
                self.file_name,
                self.bytes.len()
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PartValue {
    Text(String),
    File(Upload),
}

/// One field of a multipart body
#[derive(Debug, Clone, PartialEq)]
pub struct FormPart {
    pub name: String,
    pub value: PartValue,
}

impl FormPart {
    pub fn text(name: &str, value: impl Into<String>) -> Self {
        Self {
            name: name.to_string(),
            value: PartValue::Text(value.into()),
        }
    }

    pub fn file(name: &str, upload: Upload) -> Self {
        Self {
            name: name.to_string(),
            value: PartValue::File(upload),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Empty,
    Json(Value),
    Multipart(Vec<FormPart>),
}

/// A transport-independent request against `{base}/api/{path}`
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: RequestBody,
}

impl ApiRequest {
    fn new(method: Method, path: impl Into<String>, body: RequestBody) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path, RequestBody::Empty)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path, RequestBody::Empty)
    }

    pub fn post_json(path: impl Into<String>, body: Value) -> Self {
        Self::new(Method::Post, path, RequestBody::Json(body))
    }

    pub fn put_json(path: impl Into<String>, body: Value) -> Self {
        Self::new(Method::Put, path, RequestBody::Json(body))
    }

    pub fn post_multipart(path: impl Into<String>, parts: Vec<FormPart>) -> Self {
        Self::new(Method::Post, path, RequestBody::Multipart(parts))
    }

    pub fn with_query(mut self, key: &str, value: impl Into<String>) -> Self {
        self.query.push((key.to_string(), value.into()));
        self
    }

    /// Absolute endpoint URL without the query string (transports encode the query)
    pub fn endpoint_url(&self, base_url: &str) -> String {
        format!(
            "{}/api/{}",
            base_url.trim_end_matches('/'),
            self.path.trim_start_matches('/')
        )
    }
}

/// What a transport hands back: status, content type and the body as text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: String,
}

impl RawResponse {
    pub fn json(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            content_type: Some("application/json; charset=utf-8".to_string()),
            body: body.into(),
        }
    }

    pub fn text(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            content_type: Some("text/plain; charset=utf-8".to_string()),
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn is_json(&self) -> bool {
        self.content_type
            .as_deref()
            .map(|ct| {
                let ct = ct.to_ascii_lowercase();
                ct.contains("application/json") || ct.contains("+json")
            })
            .unwrap_or(false)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Connection refused, DNS, CORS, aborted body
    Network,
    /// Non-2xx response
    Status(u16),
    /// 2xx response whose body did not decode
    Decode,
    /// Rejected before sending (form validation, unsupported operation)
    Invalid,
}

/// A failed operation, collapsed to the one message the user sees
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ApiError {
    pub kind: ErrorKind,
    pub message: String,
}

impl ApiError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn network() -> Self {
        Self::new(ErrorKind::Network, NETWORK_ERROR_MESSAGE)
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        ApiError::new(ErrorKind::Invalid, err.to_string())
    }
}

/// Decode a successful response body, or build the error message for a failed one
pub fn parse_response<T: DeserializeOwned>(
    response: &RawResponse,
    fallback: &str,
) -> std::result::Result<T, ApiError> {
    check_response(response, fallback)?;
    serde_json::from_str(&response.body).map_err(|e| {
        tracing::warn!(status = response.status, "undecodable response body: {}", e);
        ApiError::new(ErrorKind::Decode, fallback)
    })
}

/// Accept any 2xx response, ignoring its body
pub fn check_response(response: &RawResponse, fallback: &str) -> std::result::Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    let message = error_message(response, fallback);
    tracing::warn!(status = response.status, "request failed: {}", message);
    Err(ApiError::new(ErrorKind::Status(response.status), message))
}

/// Message extraction order: JSON `message`, JSON validation `errors`/`detail`,
/// raw text, fallback
pub fn error_message(response: &RawResponse, fallback: &str) -> String {
    if response.is_json() {
        if let Ok(value) = serde_json::from_str::<Value>(&response.body) {
            if let Some(message) = structured_message(&value) {
                return message;
            }
            if let Value::String(text) = value {
                if !text.trim().is_empty() {
                    return text;
                }
            }
        }
        return fallback.to_string();
    }

    let text = response.body.trim();
    if text.is_empty() {
        fallback.to_string()
    } else {
        text.to_string()
    }
}

fn structured_message(value: &Value) -> Option<String> {
    let non_empty = |v: Option<&Value>| {
        v.and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    };

    if let Some(message) = non_empty(value.get("message")) {
        return Some(message);
    }

    // ASP.NET validation problem details: {"errors": {"Nombre": ["..."]}}
    if let Some(Value::Object(errors)) = value.get("errors") {
        let lines: Vec<String> = errors
            .iter()
            .flat_map(|(field, messages)| {
                let messages = match messages {
                    Value::Array(items) => items
                        .iter()
                        .filter_map(Value::as_str)
                        .map(str::to_string)
                        .collect(),
                    Value::String(s) => vec![s.clone()],
                    _ => Vec::new(),
                };
                messages.into_iter().map(move |m| format!("{}: {}", field, m))
            })
            .collect();
        if !lines.is_empty() {
            return Some(lines.join("\n"));
        }
    }

    non_empty(value.get("detail"))
}

/// Resolve a server-relative asset path (`/uploads/x.png`) against the base URL
pub fn resolve_asset_url(base_url: &str, path: &str) -> Option<String> {
    let path = path.trim();
    if path.is_empty() {
        return None;
    }
    if path.starts_with("http://") || path.starts_with("https://") || path.starts_with("data:") {
        return Some(path.to_string());
    }
    Some(format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Item {
        id: u64,
    }

    #[test]
    fn test_endpoint_url_joins_slashes() {
        let request = ApiRequest::get("citas");
        assert_eq!(
            request.endpoint_url("https://clinic.example.com/"),
            "https://clinic.example.com/api/citas"
        );
        let request = ApiRequest::delete("/paciente/7");
        assert_eq!(
            request.endpoint_url("http://localhost:5000"),
            "http://localhost:5000/api/paciente/7"
        );
    }

    #[test]
    fn test_with_query_keeps_order() {
        let request = ApiRequest::get("radiografias/recientes").with_query("cantidad", "10");
        assert_eq!(request.query, vec![("cantidad".to_string(), "10".to_string())]);
        assert_eq!(request.method, Method::Get);
    }

    #[test]
    fn test_parse_response_success() {
        let response = RawResponse::json(200, r#"[{"id": 1}, {"id": 2}]"#);
        let items: Vec<Item> = parse_response(&response, "fallback").unwrap();
        assert_eq!(items, vec![Item { id: 1 }, Item { id: 2 }]);
    }

    #[test]
    fn test_parse_response_json_message() {
        let response = RawResponse::json(400, r#"{"message": "La cédula ya existe"}"#);
        let err = parse_response::<Vec<Item>>(&response, "fallback").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Status(400));
        assert_eq!(err.message, "La cédula ya existe");
    }

    #[test]
    fn test_parse_response_validation_errors() {
        let response = RawResponse::json(
            400,
            r#"{"title": "One or more validation errors occurred.",
                "errors": {"Nombre": ["El nombre es obligatorio."], "Edad": ["Fuera de rango."]}}"#,
        );
        let err = check_response(&response, "fallback").unwrap_err();
        assert!(err.message.contains("Nombre: El nombre es obligatorio."));
        assert!(err.message.contains("Edad: Fuera de rango."));
    }

    #[test]
    fn test_parse_response_detail() {
        let response = RawResponse::json(500, r#"{"detail": "Error interno"}"#);
        let err = check_response(&response, "fallback").unwrap_err();
        assert_eq!(err.message, "Error interno");
    }

    #[test]
    fn test_parse_response_plain_text() {
        let response = RawResponse::text(404, "Paciente no encontrado");
        let err = check_response(&response, "fallback").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Status(404));
        assert_eq!(err.message, "Paciente no encontrado");
    }

    #[test]
    fn test_parse_response_empty_body_uses_fallback() {
        let response = RawResponse::text(500, "   ");
        let err = check_response(&response, "No se pudo guardar").unwrap_err();
        assert_eq!(err.message, "No se pudo guardar");

        let response = RawResponse::json(500, "{}");
        let err = check_response(&response, "No se pudo guardar").unwrap_err();
        assert_eq!(err.message, "No se pudo guardar");
    }

    #[test]
    fn test_parse_response_malformed_json_on_success() {
        let response = RawResponse::json(200, "<html>");
        let err = parse_response::<Vec<Item>>(&response, "No se pudo cargar").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Decode);
        assert_eq!(err.message, "No se pudo cargar");
    }

    #[test]
    fn test_parse_response_missing_content_type() {
        let response = RawResponse {
            status: 200,
            content_type: None,
            body: r#"[{"id": 3}]"#.to_string(),
        };
        let items: Vec<Item> = parse_response(&response, "fallback").unwrap();
        assert_eq!(items.len(), 1);
    }

    #[test]
    fn test_upload_validation() {
        let ok = Upload::new("rx.PNG", "image/png", vec![1, 2, 3]);
        assert!(ok.validate_image().is_ok());

        let wrong_ext = Upload::new("rx.gif", "image/gif", vec![1]);
        assert!(matches!(wrong_ext.validate_image(), Err(Error::InvalidUpload(_))));

        let empty = Upload::new("rx.jpg", "image/jpeg", Vec::new());
        assert!(empty.validate_image().is_err());

        let too_big = Upload::new("rx.jpeg", "image/jpeg", vec![0; Upload::MAX_BYTES + 1]);
        assert!(too_big.validate_image().is_err());
    }

    #[test]
    fn test_resolve_asset_url() {
        assert_eq!(
            resolve_asset_url("https://clinic.example.com/", "/uploads/a.png").as_deref(),
            Some("https://clinic.example.com/uploads/a.png")
        );
        assert_eq!(
            resolve_asset_url("https://clinic.example.com", "https://cdn.example.com/b.png").as_deref(),
            Some("https://cdn.example.com/b.png")
        );
        assert_eq!(resolve_asset_url("https://clinic.example.com", " "), None);
    }

    #[test]
    fn test_api_error_from_form_error() {
        let err: ApiError = Error::MissingField("Nombre".into()).into();
        assert_eq!(err.kind, ErrorKind::Invalid);
        assert!(err.to_string().contains("Nombre"));
    }
}
