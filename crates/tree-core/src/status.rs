use crate::error::GestureError;
use std::fmt;

/// Human-readable gesture pipeline status shown in the UI.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Status {
    Initializing,
    DownloadingModel,
    RequestingCamera,
    Ready,
    Detected(String),
    Error(String),
    /// Gesture control is off; buttons and keys still work.
    ManualOnly,
}

impl Status {
    pub fn is_error(&self) -> bool {
        matches!(self, Status::Error(_))
    }
}

impl From<&GestureError> for Status {
    fn from(e: &GestureError) -> Self {
        Status::Error(e.to_string())
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Initializing => f.write_str("Initializing..."),
            Status::DownloadingModel => f.write_str("Downloading gesture model..."),
            Status::RequestingCamera => f.write_str("Requesting camera..."),
            Status::Ready => f.write_str("Ready: show your hand"),
            Status::Detected(label) => write!(f, "Detected: {}", label),
            Status::Error(msg) => write!(f, "Error: {}", msg),
            Status::ManualOnly => f.write_str("Manual control only"),
        }
    }
}
