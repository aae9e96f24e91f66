//! File upload to the dedicated upload endpoint.
//!
//! Uploads are a multipart POST with a `file` part and a `dir` hint
//! naming the target directory. The response URL may appear under any
//! of several keys; [`extract_upload_url`] holds the documented
//! priority order.

use reqwest::header::{HeaderValue, AUTHORIZATION};
use reqwest::multipart::{Form, Part};
use reqwest::ClientBuilder;
use serde_json::Value;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, instrument};

use folio_common::error::{FolioError, Result};

const UPLOAD_TIMEOUT: Duration = Duration::from_secs(120);

/// Which form field the uploaded URL is destined for. Drives the `dir`
/// hint sent alongside the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadTarget {
    ProjectCover,
    LiveCover,
    LiveFile,
    MindmapFile,
    BlogCover,
}

impl UploadTarget {
    pub fn dir(&self) -> &'static str {
        match self {
            UploadTarget::ProjectCover => "projects",
            UploadTarget::LiveCover => "projects",
            UploadTarget::LiveFile => "live",
            UploadTarget::MindmapFile => "mindmaps",
            UploadTarget::BlogCover => "blog",
        }
    }
}

#[derive(Debug, Clone)]
pub struct UploadClient {
    endpoint: String,
    client: reqwest::Client,
}

impl UploadClient {
    pub fn new(endpoint: impl Into<String>) -> Result<Self> {
        let client = ClientBuilder::new()
            .timeout(UPLOAD_TIMEOUT)
            .build()
            .map_err(|e| FolioError::Config(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { endpoint: endpoint.into(), client })
    }

    /// Upload raw bytes and return the URL the backend stored them at.
    #[instrument(skip(self, bytes, token), fields(name = %file_name, size = bytes.len()))]
    pub async fn upload(
        &self,
        target: UploadTarget,
        file_name: &str,
        bytes: Vec<u8>,
        token: Option<&str>,
    ) -> Result<String> {
        let form = Form::new()
            .part("file", Part::bytes(bytes).file_name(file_name.to_string()))
            .text("dir", target.dir());

        let mut request = self.client.post(&self.endpoint).multipart(form);
        if let Some(token) = token {
            let bearer = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|e| FolioError::Config(format!("Invalid bearer token: {}", e)))?;
            request = request.header(AUTHORIZATION, bearer);
        }

        let response = request.send().await?;
        let status = response.status();
        let payload: Option<Value> = response.json().await.ok();

        let reported_failure = payload
            .as_ref()
            .and_then(|value| value.get("ok"))
            .and_then(Value::as_bool)
            == Some(false);
        if !status.is_success() || reported_failure {
            return Err(FolioError::Upload("Upload failed.".to_string()));
        }

        let url = payload
            .as_ref()
            .and_then(extract_upload_url)
            .ok_or_else(|| {
                FolioError::Upload(
                    "Upload succeeded but response does not contain URL.".to_string(),
                )
            })?;
        debug!(%url, "upload stored");
        Ok(url)
    }

    /// Read a local file and upload it, using its file name for the
    /// multipart part.
    pub async fn upload_path(
        &self,
        target: UploadTarget,
        path: &Path,
        token: Option<&str>,
    ) -> Result<String> {
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| FolioError::Upload(format!("Invalid file name: {}", path.display())))?
            .to_string();
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| FolioError::Upload(format!("Cannot read {}: {}", path.display(), e)))?;
        self.upload(target, &file_name, bytes, token).await
    }
}

/// Pull the stored URL out of an upload response.
///
/// Priority order: top-level `url`, `fileUrl`, `path`, `location`, then
/// the same four keys under `data`. The first non-empty string wins;
/// none present means the upload is reported failed.
pub fn extract_upload_url(payload: &Value) -> Option<String> {
    const KEYS: [&str; 4] = ["url", "fileUrl", "path", "location"];

    let roots = [Some(payload), payload.get("data")];
    for root in roots.into_iter().flatten() {
        for key in KEYS {
            if let Some(url) = root.get(key).and_then(Value::as_str) {
                let url = url.trim();
                if !url.is_empty() {
                    return Some(url.to_string());
                }
            }
        }
    }
    None
}
