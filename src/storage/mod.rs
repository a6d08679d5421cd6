// Object storage wrapper - uploads and deletes card images in a hosted bucket
//
// Talks to the Supabase Storage REST API:
// - POST   {base}/storage/v1/object/{bucket}/{path}     upload
// - DELETE {base}/storage/v1/object/{bucket}            remove (body: {"prefixes": [...]})
// - public objects are served from {base}/storage/v1/object/public/{bucket}/{path}
//
// Validation and URL parsing happen before any request is made. Every failure
// is logged and handed back to the caller.

mod upload;

#[cfg(test)]
mod tests;

pub use upload::{content_type_for, object_name, UploadFile, MAX_UPLOAD_BYTES};

use crate::config::StorageConfig;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

const OBJECT_PATH: &str = "/storage/v1/object";

#[derive(Debug, Error)]
pub enum StorageError {
    /// SUPABASE_URL / SUPABASE_ANON_KEY (or [storage]) are unset
    #[error("object storage is not configured")]
    NotConfigured,

    #[error("file must be an image (got {content_type})")]
    NotAnImage { content_type: String },

    #[error("file size must be less than 5MB ({size} bytes, limit {limit})")]
    TooLarge { size: usize, limit: usize },

    #[error("invalid storage URL: {0}")]
    InvalidUrl(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("storage API error ({status}): {message}")]
    Api { status: u16, message: String },
}

impl StorageError {
    /// Short user-facing title for notifications
    pub fn title(&self) -> &'static str {
        match self {
            StorageError::NotConfigured => "Configuration error",
            StorageError::NotAnImage { .. }
            | StorageError::TooLarge { .. }
            | StorageError::InvalidUrl(_) => "Invalid file",
            StorageError::Io(_) | StorageError::Http(_) | StorageError::Api { .. } => {
                "Storage error"
            }
        }
    }
}

/// Error body returned by the storage API
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: Option<String>,
    error: Option<String>,
}

/// Pull the object path (folders included) out of a public object URL
///
/// `https://x.supabase.co/storage/v1/object/public/card-images/uploads/a.png`
/// with bucket `card-images` gives `uploads/a.png`.
pub fn object_path_from_public_url<'a>(url: &'a str, bucket: &str) -> Result<&'a str, StorageError> {
    let prefix = format!("{}/public/{}/", OBJECT_PATH, bucket);
    let start = url
        .find(&prefix)
        .ok_or_else(|| StorageError::InvalidUrl(url.to_string()))?;
    let path = &url[start + prefix.len()..];
    if path.is_empty() {
        return Err(StorageError::InvalidUrl(url.to_string()));
    }
    Ok(path)
}

/// Client for one storage project
#[derive(Debug, Clone)]
pub struct StorageClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl StorageClient {
    /// Build a client from configuration
    ///
    /// # Errors
    /// `NotConfigured` when the project URL or key is missing.
    pub fn new(config: &StorageConfig) -> Result<Self, StorageError> {
        let (Some(base_url), Some(api_key)) = (
            config.url.as_deref().filter(|s| !s.is_empty()),
            config.api_key.as_deref().filter(|s| !s.is_empty()),
        ) else {
            return Err(StorageError::NotConfigured);
        };

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    /// Public URL for an object
    pub fn public_url(&self, bucket: &str, path: &str) -> String {
        format!("{}{}/public/{}/{}", self.base_url, OBJECT_PATH, bucket, path)
    }

    /// Upload an image under `folder` and return its public URL
    pub async fn upload(
        &self,
        file: &UploadFile,
        bucket: &str,
        folder: &str,
    ) -> Result<String, StorageError> {
        let result = self.try_upload(file, bucket, folder).await;
        if let Err(ref e) = result {
            tracing::error!("Error uploading image: {}", e);
        }
        result
    }

    async fn try_upload(
        &self,
        file: &UploadFile,
        bucket: &str,
        folder: &str,
    ) -> Result<String, StorageError> {
        file.validate()?;

        let path = object_name(folder, file.extension());
        let url = format!("{}{}/{}/{}", self.base_url, OBJECT_PATH, bucket, path);
        tracing::debug!(bucket, path = %path, bytes = file.data.len(), "uploading object");

        let response = self
            .authorized(self.client.post(&url))
            .header("content-type", &file.content_type)
            .header("cache-control", "max-age=3600")
            .header("x-upsert", "false")
            .body(file.data.clone())
            .send()
            .await?;
        check_status(response).await?;

        let public_url = self.public_url(bucket, &path);
        tracing::info!(url = %public_url, "image uploaded");
        Ok(public_url)
    }

    /// Delete the object behind a public URL
    pub async fn delete(&self, url: &str, bucket: &str) -> Result<(), StorageError> {
        let result = self.try_delete(url, bucket).await;
        if let Err(ref e) = result {
            tracing::error!("Error deleting image: {}", e);
        }
        result
    }

    async fn try_delete(&self, url: &str, bucket: &str) -> Result<(), StorageError> {
        let path = object_path_from_public_url(url, bucket)?;
        let endpoint = format!("{}{}/{}", self.base_url, OBJECT_PATH, bucket);
        tracing::debug!(bucket, path, "deleting object");

        let response = self
            .authorized(self.client.delete(&endpoint))
            .json(&serde_json::json!({ "prefixes": [path] }))
            .send()
            .await?;
        check_status(response).await?;

        tracing::info!(path, "image deleted");
        Ok(())
    }

    fn authorized(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        req.header("Authorization", format!("Bearer {}", self.api_key))
            .header("apikey", &self.api_key)
    }
}

/// Turn a non-2xx response into `StorageError::Api`
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, StorageError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let text = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());
    let message = serde_json::from_str::<ApiErrorBody>(&text)
        .ok()
        .and_then(|body| body.message.or(body.error))
        .unwrap_or(text);

    Err(StorageError::Api {
        status: status.as_u16(),
        message,
    })
}
