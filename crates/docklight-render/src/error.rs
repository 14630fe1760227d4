use std::fmt;

use docklight_test_utils::PresentError;

/// Errors produced by the software renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// A surface or image was requested with a zero dimension.
    InvalidDimensions { width: u32, height: u32 },
    /// Pixel data length does not match the stated dimensions.
    DataSizeMismatch { expected: usize, actual: usize },
    /// The presentation backend rejected the frame.
    Present(PresentError),
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDimensions { width, height } => {
                write!(f, "Invalid dimensions {}x{}", width, height)
            }
            Self::DataSizeMismatch { expected, actual } => {
                write!(f, "Pixel data is {} bytes, expected {}", actual, expected)
            }
            Self::Present(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for RenderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Present(err) => Some(err),
            _ => None,
        }
    }
}

impl From<PresentError> for RenderError {
    fn from(err: PresentError) -> Self {
        Self::Present(err)
    }
}

pub type RenderResult<T> = Result<T, RenderError>;
