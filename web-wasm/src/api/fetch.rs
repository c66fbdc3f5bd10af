//! Browser `fetch` implementation of the shared transport

use gloo::console;
use js_sys::{Array, Uint8Array};
use sonrisas_common::api::{FormPart, PartValue};
use sonrisas_common::{ApiError, ApiRequest, Method, RawResponse, RequestBody, ResourceClient, Transport};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Blob, BlobPropertyBag, FormData, Request, RequestInit, RequestMode, Response, UrlSearchParams};

pub struct FetchTransport {
    base_url: String,
}

impl FetchTransport {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

/// Client for one call; the base URL may change between calls
pub fn client(base_url: &str) -> ResourceClient<FetchTransport> {
    ResourceClient::new(FetchTransport::new(base_url))
}

impl Transport for FetchTransport {
    async fn send(&self, request: ApiRequest) -> Result<RawResponse, ApiError> {
        let method = request.method.as_str();
        let url = request_url(&self.base_url, &request);
        send_request(&url, request).await.map_err(|e| {
            console::warn!(format!("{} {} falló: {:?}", method, url, e));
            ApiError::network()
        })
    }
}

fn request_url(base_url: &str, request: &ApiRequest) -> String {
    let url = request.endpoint_url(base_url);
    if request.query.is_empty() {
        return url;
    }
    match UrlSearchParams::new() {
        Ok(params) => {
            for (key, value) in &request.query {
                params.append(key, value);
            }
            format!("{}?{}", url, String::from(params.to_string()))
        }
        Err(_) => url,
    }
}

async fn send_request(url: &str, request: ApiRequest) -> Result<RawResponse, JsValue> {
    let opts = RequestInit::new();
    opts.set_method(match request.method {
        Method::Get => "GET",
        Method::Post => "POST",
        Method::Put => "PUT",
        Method::Delete => "DELETE",
    });
    opts.set_mode(RequestMode::Cors);

    let is_json = matches!(request.body, RequestBody::Json(_));
    match request.body {
        RequestBody::Empty => {}
        RequestBody::Json(body) => opts.set_body(&JsValue::from_str(&body.to_string())),
        RequestBody::Multipart(parts) => opts.set_body(&form_data(parts)?.into()),
    }

    let fetch_request = Request::new_with_str_and_init(url, &opts)?;
    if is_json {
        fetch_request.headers().set("Content-Type", "application/json")?;
    }

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("window no disponible"))?;
    let resp_value = JsFuture::from(window.fetch_with_request(&fetch_request)).await?;
    let resp: Response = resp_value.dyn_into()?;

    let status = resp.status();
    let content_type = resp.headers().get("content-type")?;
    let body = JsFuture::from(resp.text()?)
        .await?
        .as_string()
        .unwrap_or_default();

    Ok(RawResponse {
        status,
        content_type,
        body,
    })
}

/// The browser sets the multipart boundary itself
fn form_data(parts: Vec<FormPart>) -> Result<FormData, JsValue> {
    let form = FormData::new()?;
    for part in parts {
        match part.value {
            PartValue::Text(text) => form.append_with_str(&part.name, &text)?,
            PartValue::File(upload) => {
                let chunks = Array::new();
                chunks.push(&Uint8Array::from(upload.bytes.as_slice()));
                let options = BlobPropertyBag::new();
                options.set_type(&upload.content_type);
                let blob = Blob::new_with_u8_array_sequence_and_options(&chunks, &options)?;
                form.append_with_blob_and_filename(&part.name, &blob, &upload.file_name)?;
            }
        }
    }
    Ok(form)
}
