//! `reqwest` implementation of the shared transport

use crate::error::Result;
use reqwest::header::CONTENT_TYPE;
use reqwest::multipart::{Form, Part};
use sonrisas_common::api::{FormPart, PartValue};
use sonrisas_common::{ApiError, ApiRequest, ErrorKind, Method, RawResponse, RequestBody, Transport};
use std::time::Duration;

pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> std::result::Result<RawResponse, ApiError> {
        let url = request.endpoint_url(&self.base_url);
        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        };
        tracing::debug!(method = request.method.as_str(), url = %url, "sending request");

        let mut builder = self.client.request(method, &url);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(body) => builder.json(&body),
            RequestBody::Multipart(parts) => builder.multipart(multipart_form(parts)?),
        };

        let response = builder.send().await.map_err(|e| {
            tracing::warn!(url = %url, "request failed: {}", e);
            ApiError::network()
        })?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let body = response.text().await.map_err(|e| {
            tracing::warn!(url = %url, status, "response body unreadable: {}", e);
            ApiError::network()
        })?;
        tracing::debug!(url = %url, status, "response received");

        Ok(RawResponse {
            status,
            content_type,
            body,
        })
    }
}

fn multipart_form(parts: Vec<FormPart>) -> std::result::Result<Form, ApiError> {
    let mut form = Form::new();
    for part in parts {
        form = match part.value {
            PartValue::Text(text) => form.text(part.name, text),
            PartValue::File(upload) => {
                let file = Part::bytes(upload.bytes)
                    .file_name(upload.file_name)
                    .mime_str(&upload.content_type)
                    .map_err(|e| ApiError::new(ErrorKind::Invalid, e.to_string()))?;
                form.part(part.name, file)
            }
        };
    }
    Ok(form)
}
