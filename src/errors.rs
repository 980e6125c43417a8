// SPDX-License-Identifier: MPL-2.0

//! Error types for the QR monitor

use std::fmt;

/// Result type alias using AppError
pub type AppResult<T> = Result<T, AppError>;

/// Result type alias using CameraError
pub type CameraResult<T> = Result<T, CameraError>;

/// Main application error type
#[derive(Debug, Clone)]
pub enum AppError {
    /// Camera-related errors
    Camera(CameraError),
    /// Preview window or terminal errors
    Display(String),
    /// Configuration errors
    Config(String),
    /// I/O errors (console output, config file)
    Io(String),
    /// Generic error with message
    Other(String),
}

/// Camera-specific errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CameraError {
    /// Device node could not be opened
    OpenFailed { index: u32, reason: String },
    /// Device refused the capture format and its current one could not be read
    FormatRejected { index: u32, reason: String },
    /// Device delivers a pixel format we cannot convert
    UnsupportedPixelFormat { index: u32, fourcc: String },
    /// Frame read failed
    ReadFailed { index: u32, reason: String },
    /// Frame bytes could not be converted to RGB
    DecodeFailed { index: u32, reason: String },
    /// None of the configured devices could be opened
    NoCameraAvailable,
}

impl CameraError {
    /// Device index the error refers to, if any
    pub fn index(&self) -> Option<u32> {
        match self {
            CameraError::OpenFailed { index, .. }
            | CameraError::FormatRejected { index, .. }
            | CameraError::UnsupportedPixelFormat { index, .. }
            | CameraError::ReadFailed { index, .. }
            | CameraError::DecodeFailed { index, .. } => Some(*index),
            CameraError::NoCameraAvailable => None,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Camera(e) => write!(f, "Camera error: {}", e),
            AppError::Display(msg) => write!(f, "Display error: {}", msg),
            AppError::Config(msg) => write!(f, "Configuration error: {}", msg),
            AppError::Io(msg) => write!(f, "I/O error: {}", msg),
            AppError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl fmt::Display for CameraError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CameraError::OpenFailed { index, reason } => {
                write!(f, "Cannot open camera {}: {}", index, reason)
            }
            CameraError::FormatRejected { index, reason } => {
                write!(f, "Camera {} rejected capture format: {}", index, reason)
            }
            CameraError::UnsupportedPixelFormat { index, fourcc } => {
                write!(f, "Camera {} delivers unsupported pixel format {}", index, fourcc)
            }
            CameraError::ReadFailed { index, reason } => {
                write!(f, "Cannot read frame from camera {}: {}", index, reason)
            }
            CameraError::DecodeFailed { index, reason } => {
                write!(f, "Cannot decode frame from camera {}: {}", index, reason)
            }
            CameraError::NoCameraAvailable => write!(f, "No camera could be opened"),
        }
    }
}

impl std::error::Error for AppError {}
impl std::error::Error for CameraError {}

impl From<CameraError> for AppError {
    fn from(err: CameraError) -> Self {
        AppError::Camera(err)
    }
}

impl From<String> for AppError {
    fn from(msg: String) -> Self {
        AppError::Other(msg)
    }
}

impl From<&str> for AppError {
    fn from(msg: &str) -> Self {
        AppError::Other(msg.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Config(err.to_string())
    }
}

impl From<minifb::Error> for AppError {
    fn from(err: minifb::Error) -> Self {
        AppError::Display(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camera_error_index() {
        let err = CameraError::ReadFailed {
            index: 4,
            reason: "timeout".to_string(),
        };
        assert_eq!(err.index(), Some(4));
        assert_eq!(CameraError::NoCameraAvailable.index(), None);
    }

    #[test]
    fn test_camera_error_wraps_into_app_error() {
        let err: AppError = CameraError::NoCameraAvailable.into();
        assert_eq!(err.to_string(), "Camera error: No camera could be opened");
    }
}
