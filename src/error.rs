//! Error types for host-facing operations
//!
//! The simulation itself never fails; everything here comes from the browser,
//! the GPU, or JSON encoding.

/// Main error type for Star Blaster
#[derive(thiserror::Error, Debug)]
pub enum GameError {
    #[error("DOM element not found: #{0}")]
    MissingElement(&'static str),

    #[error("Browser API error: {0}")]
    Platform(String),

    #[error("Failed to create surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),

    #[error("No compatible graphics adapter: {0}")]
    Adapter(#[from] wgpu::RequestAdapterError),

    #[error("Failed to create device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),

    #[error("Graphics error: {0}")]
    Graphics(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, GameError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_element_message() {
        let err = GameError::MissingElement("score");
        assert_eq!(err.to_string(), "DOM element not found: #score");
    }

    #[test]
    fn test_json_error_converts() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: GameError = json_err.into();
        assert!(matches!(err, GameError::Json(_)));
    }
}
