//! Storage client tests against a local mock of the storage REST API

use super::*;
use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    routing::{delete, post},
    Json, Router,
};
use std::sync::{Arc, Mutex};

const PUBLIC_URL: &str = "https://x.supabase.co/storage/v1/object/public/card-images/uploads/123-abc.png";

#[derive(Debug, Clone)]
struct Recorded {
    method: &'static str,
    bucket: String,
    path: Option<String>,
    headers: HeaderMap,
    body: Vec<u8>,
}

#[derive(Clone)]
struct MockState {
    log: Arc<Mutex<Vec<Recorded>>>,
    status: StatusCode,
}

fn reply(status: StatusCode) -> (StatusCode, String) {
    if status.is_success() {
        (status, r#"{"Key":"ok"}"#.to_string())
    } else {
        (
            status,
            r#"{"statusCode":"409","error":"Duplicate","message":"The resource already exists"}"#
                .to_string(),
        )
    }
}

async fn upload_handler(
    State(state): State<MockState>,
    Path((bucket, path)): Path<(String, String)>,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, String) {
    state.log.lock().unwrap().push(Recorded {
        method: "POST",
        bucket,
        path: Some(path),
        headers,
        body: body.to_vec(),
    });
    reply(state.status)
}

async fn delete_handler(
    State(state): State<MockState>,
    Path(bucket): Path<String>,
    headers: HeaderMap,
    Json(body): Json<serde_json::Value>,
) -> (StatusCode, String) {
    state.log.lock().unwrap().push(Recorded {
        method: "DELETE",
        bucket,
        path: None,
        headers,
        body: serde_json::to_vec(&body).unwrap(),
    });
    reply(state.status)
}

/// Start a mock server; returns a client pointed at it and the request log
async fn mock_storage(status: StatusCode) -> (StorageClient, Arc<Mutex<Vec<Recorded>>>) {
    let log = Arc::new(Mutex::new(Vec::new()));
    let app = Router::new()
        .route("/storage/v1/object/:bucket/*path", post(upload_handler))
        .route("/storage/v1/object/:bucket", delete(delete_handler))
        .with_state(MockState {
            log: log.clone(),
            status,
        });

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let config = StorageConfig {
        url: Some(format!("http://{}/", addr)),
        api_key: Some("anon-key".to_string()),
        ..StorageConfig::default()
    };
    (StorageClient::new(&config).unwrap(), log)
}

fn png(size: usize) -> UploadFile {
    UploadFile::new("card.png", "image/png", vec![7; size])
}

// ─────────────────────────────────────────────────────────────────────────────
// URL parsing
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_path_extracted_after_bucket_segment() {
    assert_eq!(
        object_path_from_public_url(PUBLIC_URL, "card-images").unwrap(),
        "uploads/123-abc.png"
    );
}

#[test]
fn test_nested_folders_are_kept() {
    let url = "https://x.supabase.co/storage/v1/object/public/card-images/a/b/c.webp";
    assert_eq!(object_path_from_public_url(url, "card-images").unwrap(), "a/b/c.webp");
}

#[test]
fn test_missing_bucket_segment_is_rejected() {
    let err = object_path_from_public_url(PUBLIC_URL, "avatars").unwrap_err();
    assert!(matches!(err, StorageError::InvalidUrl(_)));

    let err = object_path_from_public_url("https://example.com/uploads/a.png", "card-images")
        .unwrap_err();
    assert!(matches!(err, StorageError::InvalidUrl(_)));
}

#[test]
fn test_client_requires_configuration() {
    let err = StorageClient::new(&StorageConfig::default()).unwrap_err();
    assert!(matches!(err, StorageError::NotConfigured));
}

// ─────────────────────────────────────────────────────────────────────────────
// Upload
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_upload_posts_object_and_returns_public_url() {
    let (client, log) = mock_storage(StatusCode::OK).await;

    let url = client.upload(&png(512), "card-images", "uploads").await.unwrap();

    let log = log.lock().unwrap();
    assert_eq!(log.len(), 1);
    let req = &log[0];
    assert_eq!(req.method, "POST");
    assert_eq!(req.bucket, "card-images");
    let path = req.path.clone().unwrap();
    assert!(path.starts_with("uploads/"));
    assert!(path.ends_with(".png"));
    assert_eq!(req.body.len(), 512);
    assert_eq!(req.headers["authorization"], "Bearer anon-key");
    assert_eq!(req.headers["apikey"], "anon-key");
    assert_eq!(req.headers["content-type"], "image/png");
    assert_eq!(req.headers["x-upsert"], "false");
    assert_eq!(req.headers["cache-control"], "max-age=3600");

    assert_eq!(url, client.public_url("card-images", &path));
    assert!(url.contains("/storage/v1/object/public/card-images/uploads/"));
}

#[tokio::test]
async fn test_oversized_upload_rejected_before_request() {
    let (client, log) = mock_storage(StatusCode::OK).await;

    let err = client
        .upload(&png(6 * 1024 * 1024), "card-images", "uploads")
        .await
        .unwrap_err();

    assert!(matches!(err, StorageError::TooLarge { .. }));
    assert!(log.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_non_image_rejected_before_request() {
    let (client, log) = mock_storage(StatusCode::OK).await;
    let file = UploadFile::new("notes.txt", "text/plain", b"hello".to_vec());

    let err = client.upload(&file, "card-images", "uploads").await.unwrap_err();

    assert!(matches!(err, StorageError::NotAnImage { .. }));
    assert!(log.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_upload_api_error_is_propagated() {
    let (client, _log) = mock_storage(StatusCode::CONFLICT).await;

    let err = client.upload(&png(16), "card-images", "uploads").await.unwrap_err();

    match err {
        StorageError::Api { status, message } => {
            assert_eq!(status, 409);
            assert_eq!(message, "The resource already exists");
        }
        other => panic!("expected Api error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_upload_from_path_infers_content_type() {
    let (client, log) = mock_storage(StatusCode::OK).await;
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("banner.jpg");
    std::fs::write(&path, [0xFF, 0xD8, 0xFF]).unwrap();

    let file = UploadFile::from_path(&path).await.unwrap();
    assert_eq!(file.content_type, "image/jpeg");

    client.upload(&file, "card-images", "uploads").await.unwrap();
    let log = log.lock().unwrap();
    assert_eq!(log[0].headers["content-type"], "image/jpeg");
    assert!(log[0].path.as_deref().unwrap().ends_with(".jpg"));
}

#[tokio::test]
async fn test_oversized_file_rejected_from_metadata() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("poster.png");
    let file = std::fs::File::create(&path).unwrap();
    file.set_len((MAX_UPLOAD_BYTES + 1) as u64).unwrap();

    let err = UploadFile::from_path(&path).await.unwrap_err();
    match err {
        StorageError::TooLarge { size, limit } => {
            assert_eq!(size, MAX_UPLOAD_BYTES + 1);
            assert_eq!(limit, MAX_UPLOAD_BYTES);
        }
        other => panic!("expected TooLarge, got {:?}", other),
    }
}

#[tokio::test]
async fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = UploadFile::from_path(&dir.path().join("missing.png"))
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::Io(_)));
}

// ─────────────────────────────────────────────────────────────────────────────
// Delete
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_delete_sends_extracted_prefix() {
    let (client, log) = mock_storage(StatusCode::OK).await;

    client.delete(PUBLIC_URL, "card-images").await.unwrap();

    let log = log.lock().unwrap();
    assert_eq!(log.len(), 1);
    assert_eq!(log[0].method, "DELETE");
    assert_eq!(log[0].bucket, "card-images");
    let body: serde_json::Value = serde_json::from_slice(&log[0].body).unwrap();
    assert_eq!(body, serde_json::json!({ "prefixes": ["uploads/123-abc.png"] }));
}

#[tokio::test]
async fn test_delete_with_bad_url_makes_no_request() {
    let (client, log) = mock_storage(StatusCode::OK).await;

    let err = client
        .delete("https://x.supabase.co/somewhere/else.png", "card-images")
        .await
        .unwrap_err();

    assert!(matches!(err, StorageError::InvalidUrl(_)));
    assert!(log.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_delete_api_error_is_propagated() {
    let (client, _log) = mock_storage(StatusCode::CONFLICT).await;

    let err = client.delete(PUBLIC_URL, "card-images").await.unwrap_err();
    assert!(matches!(err, StorageError::Api { status: 409, .. }));
}
