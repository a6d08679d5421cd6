// Upload payloads: validation, content type inference, object naming

use super::StorageError;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

/// Largest accepted upload (5 MiB)
pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// A file ready to be sent to the bucket
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub file_name: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

impl UploadFile {
    pub fn new(file_name: impl Into<String>, content_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            data,
        }
    }

    /// Read a file from disk, inferring its content type from the extension
    ///
    /// Files over the upload limit are rejected from their metadata, before
    /// any bytes are read.
    pub async fn from_path(path: &Path) -> Result<Self, StorageError> {
        let size = tokio::fs::metadata(path).await?.len();
        let size = usize::try_from(size).unwrap_or(usize::MAX);
        if size > MAX_UPLOAD_BYTES {
            return Err(StorageError::TooLarge {
                size,
                limit: MAX_UPLOAD_BYTES,
            });
        }

        let data = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        let content_type = content_type_for(&file_name).to_string();
        Ok(Self {
            file_name,
            content_type,
            data,
        })
    }

    /// Reject non-images and oversized files
    pub fn validate(&self) -> Result<(), StorageError> {
        if !self.content_type.starts_with("image/") {
            return Err(StorageError::NotAnImage {
                content_type: self.content_type.clone(),
            });
        }
        if self.data.len() > MAX_UPLOAD_BYTES {
            return Err(StorageError::TooLarge {
                size: self.data.len(),
                limit: MAX_UPLOAD_BYTES,
            });
        }
        Ok(())
    }

    /// Text after the last dot; the whole name when there is none
    pub fn extension(&self) -> &str {
        self.file_name.rsplit('.').next().unwrap_or(&self.file_name)
    }
}

/// Content type for a file name, by extension
pub fn content_type_for(file_name: &str) -> &'static str {
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "bmp" => "image/bmp",
        "avif" => "image/avif",
        "ico" => "image/x-icon",
        "tif" | "tiff" => "image/tiff",
        "pdf" => "application/pdf",
        "txt" => "text/plain",
        "json" => "application/json",
        _ => "application/octet-stream",
    }
}

/// Unique object name: `{folder}/{epoch_millis}-{random}.{ext}`
pub fn object_name(folder: &str, extension: &str) -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default();
    let folder = folder.trim_matches('/');
    let name = format!("{}-{}.{}", millis, random_suffix(), extension);
    if folder.is_empty() {
        name
    } else {
        format!("{}/{}", folder, name)
    }
}

/// Short lowercase base36 token
fn random_suffix() -> String {
    use std::collections::hash_map::RandomState;
    use std::hash::{BuildHasher, Hasher};

    // Use RandomState to get a random value without adding a dependency
    let mut value = RandomState::new().build_hasher().finish();
    let mut out = Vec::with_capacity(13);
    while value > 0 {
        let digit = (value % 36) as u8;
        out.push(match digit {
            0..=9 => b'0' + digit,
            _ => b'a' + digit - 10,
        });
        value /= 36;
    }
    if out.is_empty() {
        out.push(b'0');
    }
    out.reverse();
    String::from_utf8_lossy(&out).into_owned()
}
