//! Error types shared by the viewport, camera and frame library.

use glam::DVec2;
use thiserror::Error;

/// Errors raised by the view and playback core.
///
/// Every failure is reported to the immediate caller and leaves the state it
/// was about to change untouched.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ViewError {
    /// Viewport corners are not ordered as top-left / bottom-right (y-up).
    #[error("invalid viewport geometry: top-left {top_left} must be left of and above bottom-right {bottom_right}")]
    InvalidGeometry { top_left: DVec2, bottom_right: DVec2 },
    /// A relative frame jump larger than the library itself.
    #[error("frame delta {delta} is outside [-{len}, {len}]")]
    OutOfRange { delta: isize, len: usize },
    /// The frame to remove was never registered.
    #[error("frame is not registered in the library")]
    NotFound,
    /// Navigation was requested on an empty library.
    #[error("no frames registered")]
    NoFrames,
}
