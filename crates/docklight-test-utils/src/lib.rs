//! Test utilities for docklight.
//!
//! This crate owns the presentation seam between the compositor and whatever
//! puts pixels on screen, so tests can swap the real window for a recorder.
//!
//! - [`PresentTarget`]: trait receiving one finished frame at a time
//! - `RecordingTarget`: mock that keeps every presented frame (requires `mock` feature)
//!
//! # Example
//!
//! ```rust
//! # #[cfg(feature = "mock")]
//! # {
//! use docklight_test_utils::{PixelFrame, PresentTarget, RecordingTarget};
//!
//! let target = RecordingTarget::new();
//! let pixels = vec![0u8; 2 * 2 * 4];
//! target.present(PixelFrame::new(2, 2, &pixels)).unwrap();
//!
//! assert_eq!(target.present_count(), 1);
//! # }
//! ```
//!
//! Like the rest of the workspace, the trait takes `&self` and is object safe
//! so a `dyn PresentTarget` can be shared; the mock records through a
//! `parking_lot::Mutex`.

#[cfg(feature = "mock")]
pub mod mock_present;
pub mod present_target;

#[cfg(feature = "mock")]
pub use mock_present::*;
pub use present_target::*;
