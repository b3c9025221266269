//! Video capture: the recording state machine and encoding negotiation.
//!
//! The platform-facing half (capture stream, media recorder, blob download)
//! lives in the web bridge crate; everything here is headless and testable.

mod error;
mod recorder;

pub use error::CaptureError;
pub use recorder::{file_name, negotiate_mime, RecorderController, MIME_PREFERENCES};
