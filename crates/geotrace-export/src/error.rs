#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("GPX serialization failed: {0}")]
    Gpx(#[from] ::gpx::errors::GpxError),
    #[error("Serialized document is not valid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
    #[error("Writing export failed: {0}")]
    Io(#[from] std::io::Error),
}
