use thiserror::Error;

/// Failures on the gesture path. None of them stop the render loop; they
/// degrade the app to manual control.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GestureError {
    #[error("failed to load gesture model: {0}")]
    ModelLoad(String),
    #[error("{0} delegate unavailable: {1}")]
    DelegateUnavailable(&'static str, String),
    #[error("camera permission denied: {0}")]
    CameraDenied(String),
    #[error("no camera available: {0}")]
    CameraUnavailable(String),
    #[error("inference failed: {0}")]
    Inference(String),
}

impl GestureError {
    /// Errors after which gesture control stays off for the session.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, GestureError::Inference(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
    #[error("settings storage unavailable")]
    Unavailable,
    #[error("failed to write setting {key}: {reason}")]
    Write { key: String, reason: String },
}
