//! Recording implementation of [`PresentTarget`] for testing.

use crate::present_target::{PixelFrame, PresentError, PresentTarget};
use parking_lot::Mutex;

/// An owned copy of a presented frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedFrame {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl RecordedFrame {
    pub fn as_frame(&self) -> PixelFrame<'_> {
        PixelFrame::new(self.width, self.height, &self.data)
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        self.as_frame().pixel(x, y)
    }

    /// Number of pixels with non-zero alpha.
    pub fn opaque_pixel_count(&self) -> usize {
        self.data.chunks_exact(4).filter(|px| px[3] > 0).count()
    }
}

/// Mock presentation target that keeps every frame it receives.
///
/// Methods take `&self`, so recording goes through a `Mutex`.
///
/// ```rust
/// use docklight_test_utils::{PixelFrame, PresentTarget, RecordingTarget};
///
/// let target = RecordingTarget::new();
/// let pixels = [255u8, 0, 0, 255];
/// target.present(PixelFrame::new(1, 1, &pixels)).unwrap();
/// assert_eq!(target.last_frame().unwrap().pixel(0, 0), Some([255, 0, 0, 255]));
/// ```
#[derive(Default)]
pub struct RecordingTarget {
    frames: Mutex<Vec<RecordedFrame>>,
    fail_next: Mutex<Option<String>>,
}

impl RecordingTarget {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next `present` call fail with `message`.
    pub fn fail_next(&self, message: impl Into<String>) {
        *self.fail_next.lock() = Some(message.into());
    }

    pub fn present_count(&self) -> usize {
        self.frames.lock().len()
    }

    pub fn last_frame(&self) -> Option<RecordedFrame> {
        self.frames.lock().last().cloned()
    }

    pub fn frames(&self) -> Vec<RecordedFrame> {
        self.frames.lock().clone()
    }

    pub fn clear(&self) {
        self.frames.lock().clear();
    }
}

impl PresentTarget for RecordingTarget {
    fn present(&self, frame: PixelFrame<'_>) -> Result<(), PresentError> {
        if let Some(message) = self.fail_next.lock().take() {
            return Err(PresentError(message));
        }
        self.frames.lock().push(RecordedFrame {
            width: frame.width,
            height: frame.height,
            data: frame.data.to_vec(),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_each_present() {
        let target = RecordingTarget::new();
        let data = vec![0u8; 3 * 2 * 4];
        target.present(PixelFrame::new(3, 2, &data)).unwrap();
        target.present(PixelFrame::new(3, 2, &data)).unwrap();
        assert_eq!(target.present_count(), 2);
        assert_eq!(target.last_frame().unwrap().width, 3);
    }

    #[test]
    fn injected_failure_is_one_shot() {
        let target = RecordingTarget::new();
        let data = [0u8; 4];
        target.fail_next("lost surface");
        assert_eq!(
            target.present(PixelFrame::new(1, 1, &data)),
            Err(PresentError("lost surface".into()))
        );
        assert!(target.present(PixelFrame::new(1, 1, &data)).is_ok());
        assert_eq!(target.present_count(), 1);
    }
}
