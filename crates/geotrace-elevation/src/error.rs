#[derive(Debug, thiserror::Error)]
pub enum ElevationError {
    #[error("Elevation request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Malformed elevation response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("Elevation response contained no results")]
    EmptyResponse,
    #[error("Elevation lookup could not be started: {0}")]
    Spawn(String),
}
