use crate::api::types::RecordingState;

use super::error::CaptureError;

/// Encoding preference list, most broadly compatible first. The first entry
/// the platform reports as supported wins.
pub const MIME_PREFERENCES: [&str; 5] = [
    "video/mp4; codecs=\"avc1.42E01E, mp4a.40.2\"",
    "video/mp4",
    "video/webm; codecs=vp9",
    "video/webm; codecs=vp8",
    "video/webm",
];

/// Pick the first encoding the platform supports.
pub fn negotiate_mime(supported: impl Fn(&str) -> bool) -> Option<&'static str> {
    MIME_PREFERENCES.iter().copied().find(|mime| supported(mime))
}

/// Deterministic download name for the finished clip.
pub fn file_name(mime: &str) -> &'static str {
    if mime.contains("mp4") {
        "starfield-simulation.mp4"
    } else {
        "starfield-simulation.webm"
    }
}

/// Recording session state machine.
///
/// Owns everything about a session except the platform media objects:
/// the negotiated encoding, the hard-stop deadline, and the transitions
/// Idle → Recording → Processing → Idle. The bridge drives it from the
/// platform recorder's callbacks.
pub struct RecorderController {
    state: RecordingState,
    mime: Option<&'static str>,
    deadline_ms: f64,
    max_duration_ms: f64,
}

impl RecorderController {
    pub fn new(max_recording_secs: u32) -> Self {
        Self {
            state: RecordingState::Idle,
            mime: None,
            deadline_ms: 0.0,
            max_duration_ms: max_recording_secs as f64 * 1000.0,
        }
    }

    pub fn state(&self) -> RecordingState {
        self.state
    }

    pub fn mime(&self) -> Option<&'static str> {
        self.mime
    }

    /// Begin a session: negotiate the encoding and arm the hard-stop
    /// deadline. Fails without a state change when unsupported or busy.
    pub fn start(
        &mut self,
        now_ms: f64,
        supported: impl Fn(&str) -> bool,
    ) -> Result<&'static str, CaptureError> {
        if self.state != RecordingState::Idle {
            return Err(CaptureError::Busy);
        }
        let mime = negotiate_mime(supported).ok_or(CaptureError::Unsupported)?;
        self.mime = Some(mime);
        self.deadline_ms = now_ms + self.max_duration_ms;
        self.state = RecordingState::Recording;
        Ok(mime)
    }

    /// Whether the hard stop should fire (the user never pressed stop).
    pub fn timed_out(&self, now_ms: f64) -> bool {
        self.state == RecordingState::Recording && now_ms >= self.deadline_ms
    }

    /// User (or timeout) requested stop; encoder finalization is pending.
    pub fn request_stop(&mut self) {
        if self.state == RecordingState::Recording {
            self.state = RecordingState::Processing;
        }
    }

    /// The encoder delivered its final data: the session is complete.
    /// Returns the download file name for the negotiated encoding.
    pub fn finalize(&mut self) -> Option<&'static str> {
        if self.state != RecordingState::Processing {
            return None;
        }
        self.state = RecordingState::Idle;
        self.mime.take().map(file_name)
    }

    /// The encoder died mid-session: drop everything and return to idle.
    pub fn abort(&mut self) {
        self.state = RecordingState::Idle;
        self.mime = None;
    }
}
