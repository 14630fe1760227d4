//! Trait abstracting frame presentation.

use std::fmt;

/// A borrowed, fully composed frame in straight-alpha RGBA8, row-major.
#[derive(Clone, Copy)]
pub struct PixelFrame<'a> {
    pub width: u32,
    pub height: u32,
    pub data: &'a [u8],
}

impl<'a> PixelFrame<'a> {
    pub fn new(width: u32, height: u32, data: &'a [u8]) -> Self {
        debug_assert_eq!(data.len(), width as usize * height as usize * 4);
        Self {
            width,
            height,
            data,
        }
    }

    /// RGBA bytes of the pixel at `(x, y)`, if inside the frame.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let offset = (y as usize * self.width as usize + x as usize) * 4;
        let px = self.data.get(offset..offset + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }
}

impl fmt::Debug for PixelFrame<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PixelFrame")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.data.len())
            .finish()
    }
}

/// Failure reported by a presentation backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresentError(pub String);

impl fmt::Display for PresentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Present failed: {}", self.0)
    }
}

impl std::error::Error for PresentError {}

/// Receives composed frames.
///
/// Implementations must replace the visible contents with `frame` in one
/// operation (a single blit with source semantics) so a half-drawn frame is
/// never observable.
pub trait PresentTarget: Send + Sync {
    fn present(&self, frame: PixelFrame<'_>) -> Result<(), PresentError>;
}
