//! Uniform HTTP request execution against the backend base URL.
//!
//! Every backend call goes through [`ApiClient::request`]: JSON headers
//! always, bearer Authorization only when a token is supplied, and a
//! single normalized failure shape for non-2xx responses and bodies
//! reporting `ok: false`.

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{ClientBuilder, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, instrument};

use folio_common::error::{ApiFailure, FolioError, Result};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    client: reqwest::Client,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = ClientBuilder::new()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| FolioError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            base_url: base_url.into(),
            client,
        })
    }

    /// Absolute URLs pass through untouched; anything else is joined to
    /// the configured base.
    fn build_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else {
            format!("{}{}", self.base_url, path)
        }
    }

    /// Execute a request and return the response body as raw JSON.
    ///
    /// Callers get the body as-is so they can handle both bare
    /// entity/array responses and `{ok: true, data}` envelopes (see
    /// [`crate::envelope`]). An unparsable body is treated as absent.
    #[instrument(skip(self, body, token, extra_headers), fields(path = %path))]
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
        extra_headers: Option<&HeaderMap>,
    ) -> Result<Value> {
        let url = self.build_url(path);

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(token) = token {
            let bearer = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|e| FolioError::Config(format!("Invalid bearer token: {}", e)))?;
            headers.insert(AUTHORIZATION, bearer);
        }
        if let Some(extra) = extra_headers {
            for (name, value) in extra {
                headers.insert(name, value.clone());
            }
        }

        let mut request = self.client.request(method.clone(), &url).headers(headers);
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request.send().await?;
        let status = response.status();
        let payload: Option<Value> = response.json().await.ok();

        if !status.is_success() || reports_failure(payload.as_ref()) {
            let failure = normalize_failure(payload.as_ref(), Some(status));
            debug!(%method, status = status.as_u16(), error = %failure.error, "backend request failed");
            return Err(FolioError::Api(failure));
        }

        Ok(payload.unwrap_or(Value::Null))
    }

    pub async fn get(&self, path: &str, token: Option<&str>) -> Result<Value> {
        self.request(Method::GET, path, None, token, None).await
    }

    pub async fn post(
        &self,
        path: &str,
        body: &impl serde::Serialize,
        token: Option<&str>,
    ) -> Result<Value> {
        let body = serde_json::to_value(body)?;
        self.request(Method::POST, path, Some(body), token, None).await
    }

    pub async fn put(
        &self,
        path: &str,
        body: &impl serde::Serialize,
        token: Option<&str>,
    ) -> Result<Value> {
        let body = serde_json::to_value(body)?;
        self.request(Method::PUT, path, Some(body), token, None).await
    }

    pub async fn delete(&self, path: &str, token: Option<&str>) -> Result<Value> {
        self.request(Method::DELETE, path, None, token, None).await
    }

    /// Typed convenience over [`ApiClient::request`].
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str, token: Option<&str>) -> Result<T> {
        let value = self.get(path, token).await?;
        Ok(serde_json::from_value(value)?)
    }
}

/// A 2xx body can still report failure via `{ok: false, ...}`.
fn reports_failure(payload: Option<&Value>) -> bool {
    payload
        .and_then(|value| value.get("ok"))
        .and_then(Value::as_bool)
        == Some(false)
}

/// Collapse whatever the backend sent into the one failure shape the
/// rest of the client handles: error code, optional message, HTTP
/// status, optional request id.
pub(crate) fn normalize_failure(payload: Option<&Value>, status: Option<StatusCode>) -> ApiFailure {
    let status = status.map(|s| s.as_u16());

    if let Some(object) = payload.and_then(Value::as_object) {
        if object.contains_key("error") {
            let error = object
                .get("error")
                .and_then(Value::as_str)
                .filter(|code| !code.is_empty())
                .unwrap_or("RequestError");
            return ApiFailure {
                error: error.to_string(),
                message: object.get("message").and_then(Value::as_str).map(String::from),
                status,
                request_id: object
                    .get("requestId")
                    .and_then(Value::as_str)
                    .map(String::from),
            };
        }
    }

    ApiFailure {
        error: "RequestError".to_string(),
        message: Some("Request failed.".to_string()),
        status,
        request_id: None,
    }
}
