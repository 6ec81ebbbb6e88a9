//! Recognition Service Contract
//!
//! The remote collaborator is reached through [`OcrService`]; the HTTP
//! implementation lives in [`client`]. Credentials are passed explicitly on
//! every authenticated call.

pub mod client;
pub mod types;

use async_trait::async_trait;
use tracing::info;

pub use client::ApiClient;
pub use types::{EngineConfig, HistoryRecord, RecognizeResponse};

use crate::error::ClientResult;
use crate::recognition::{normalize_with, CoordinateMode, RecognitionResult, UploadedImage};

/// Operations the client needs from the recognition service
#[async_trait]
pub trait OcrService: Send + Sync {
    /// Submit a base64 image (no `data:` prefix)
    async fn recognize(&self, token: &str, image_base64: &str) -> ClientResult<RecognizeResponse>;

    /// Server-persisted history, most recent first
    async fn fetch_history(&self, token: &str) -> ClientResult<Vec<HistoryRecord>>;

    /// Delete every persisted history record
    async fn clear_history(&self, token: &str) -> ClientResult<()>;

    /// Exchange credentials for a bearer token
    async fn login(&self, username: &str, password: &str) -> ClientResult<String>;

    /// Administrator-only read of the engine configuration
    async fn engine_config(&self, token: &str) -> ClientResult<EngineConfig>;
}

/// Submit an upload and normalize the engine's boxes
pub async fn recognize_upload(
    service: &dyn OcrService,
    token: &str,
    upload: &UploadedImage,
    mode: CoordinateMode,
) -> ClientResult<RecognitionResult> {
    let response = service.recognize(token, &upload.to_base64()).await?;
    let blocks = normalize_with(&response.boxes, response.width, response.height, mode)?;

    info!(
        "Recognized {} blocks in {}x{} image",
        blocks.len(),
        response.width,
        response.height
    );

    Ok(RecognitionResult::new(response.text, blocks))
}
