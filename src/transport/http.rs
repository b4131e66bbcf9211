use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{HeaderMap, HeaderName};
use tracing::debug;

use crate::error::{AppError, AppResult, HttpError};
use crate::request::{HttpMethod, RequestBody, SerializedRequest, SerializedResponse};

use super::RequestSender;

/// Reqwest-backed sender. One instance carries one connection pool; clone it
/// freely, clones share the pool.
#[derive(Debug, Clone)]
pub struct HttpSender {
    client: Client,
}

impl HttpSender {
    /// Builds a sender with the given per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the underlying HTTP client cannot be built.
    pub fn new(timeout: Duration) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| AppError::http(HttpError::BuildClientFailed { source: err }))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl RequestSender for HttpSender {
    async fn send(&self, request: &SerializedRequest) -> Result<SerializedResponse, HttpError> {
        let url = prepare_url(request);
        let headers = build_headers(request)?;

        let mut builder = self
            .client
            .request(method_for(request.method), &url)
            .headers(headers);
        builder = match &request.body {
            Some(RequestBody::Text(text)) => builder.body(text.clone()),
            Some(RequestBody::Json(value)) => builder.json(value),
            None => builder,
        };

        debug!("Sending request {} {}", request.method, url);
        let response = builder.send().await.map_err(|err| HttpError::SendFailed {
            url: url.clone(),
            source: err,
        })?;
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|err| HttpError::ReadBodyFailed {
                url: url.clone(),
                source: err,
            })?;
        if !status.is_success() {
            return Err(HttpError::UnexpectedStatus {
                url,
                status: status.as_u16(),
                body: text,
            });
        }
        Ok(SerializedResponse {
            code: status.as_u16(),
            body: Some(text),
        })
    }
}

pub(super) fn prepare_url(request: &SerializedRequest) -> String {
    format!("{}://{}{}", request.protocol, request.host, request.path)
}

/// Builds the wire header map. Multi-valued headers are joined with commas
/// here, at transport-preparation time.
pub(super) fn build_headers(request: &SerializedRequest) -> Result<HeaderMap, HttpError> {
    let mut headers = HeaderMap::new();
    for (key, value) in &request.headers {
        let name = HeaderName::from_bytes(key.as_bytes()).map_err(|err| {
            HttpError::InvalidHeaderName {
                header: key.clone(),
                source: err,
            }
        })?;
        let joined = value.joined();
        let header_value = reqwest::header::HeaderValue::from_str(&joined).map_err(|err| {
            HttpError::InvalidHeaderValue {
                header: key.clone(),
                source: err,
            }
        })?;
        headers.insert(name, header_value);
    }
    Ok(headers)
}

fn method_for(method: HttpMethod) -> reqwest::Method {
    match method {
        HttpMethod::Get => reqwest::Method::GET,
        HttpMethod::Post => reqwest::Method::POST,
        HttpMethod::Put => reqwest::Method::PUT,
        HttpMethod::Patch => reqwest::Method::PATCH,
        HttpMethod::Delete => reqwest::Method::DELETE,
        HttpMethod::Head => reqwest::Method::HEAD,
        HttpMethod::Options => reqwest::Method::OPTIONS,
    }
}
