//! Capture error types.

/// Errors surfaced by the video capture controller. All of them are
/// non-fatal to the render loop: the animation keeps running.
#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    /// The platform supports none of the preferred encodings (or lacks
    /// capture entirely). Detected up front; the host disables the control.
    #[error("video capture is not supported on this platform")]
    Unsupported,

    /// start() while a session is already running.
    #[error("a recording session is already in progress")]
    Busy,

    /// The encoder failed after recording started. Partial chunks are
    /// discarded, not saved.
    #[error("encoder failure: {0}")]
    Encoder(String),
}
