//! Transport seam between the resource client and an HTTP stack
//!
//! The CLI implements it over `reqwest`, the web front-end over the browser
//! `fetch` API.

use crate::api::{ApiError, ApiRequest, RawResponse};

/// Sends one request and returns the raw response.
///
/// Implementations return `Err` only when no response arrived at all
/// (`ErrorKind::Network`); non-2xx statuses are handed back as a
/// [`RawResponse`] so the message extraction stays in one place.
#[allow(async_fn_in_trait)]
pub trait Transport {
    async fn send(&self, request: ApiRequest) -> Result<RawResponse, ApiError>;
}

impl<T: Transport> Transport for &T {
    async fn send(&self, request: ApiRequest) -> Result<RawResponse, ApiError> {
        (**self).send(request).await
    }
}
