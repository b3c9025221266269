//! MediaRecorder glue: captures the canvas as a media stream, buffers
//! encoded chunks, and saves one downloadable file per session.
//!
//! All session policy (state machine, encoding preference, timeout budget,
//! file naming) lives in `starfield_sim::capture`; this module only touches
//! the DOM objects and wires their callbacks back into the controller.

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::Array;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::RecordingState as MediaRecorderState;
use web_sys::{
    Blob, BlobEvent, BlobPropertyBag, HtmlAnchorElement, HtmlCanvasElement, MediaRecorder,
    MediaRecorderOptions, Url,
};

use starfield_sim::{RecorderController, RecordingState};

/// DOM id of the render surface the host page provides.
const CANVAS_ID: &str = "star-canvas";

/// Whether the platform has a media recorder at all. Checked up front so an
/// unsupported browser gets a disabled control instead of an exception.
pub fn platform_supported() -> bool {
    js_sys::Reflect::has(&js_sys::global(), &JsValue::from_str("MediaRecorder")).unwrap_or(false)
}

/// One canvas-capture recording session at a time.
///
/// Closures are stored for the lifetime of the session — dropping them
/// would detach the platform callbacks mid-recording.
pub struct VideoRecorder {
    controller: RecorderController,
    capture_fps: u32,
    max_secs: u32,
    recorder: Option<MediaRecorder>,
    chunks: Rc<RefCell<Vec<Blob>>>,
    timeout_handle: Option<i32>,
    on_data: Option<Closure<dyn FnMut(BlobEvent)>>,
    on_stop: Option<Closure<dyn FnMut()>>,
    on_error: Option<Closure<dyn FnMut(web_sys::Event)>>,
    on_timeout: Option<Closure<dyn FnMut()>>,
}

impl VideoRecorder {
    pub fn new(capture_fps: u32, max_recording_secs: u32) -> Self {
        Self {
            controller: RecorderController::new(max_recording_secs),
            capture_fps,
            max_secs: max_recording_secs,
            recorder: None,
            chunks: Rc::new(RefCell::new(Vec::new())),
            timeout_handle: None,
            on_data: None,
            on_stop: None,
            on_error: None,
            on_timeout: None,
        }
    }

    pub fn state(&self) -> RecordingState {
        self.controller.state()
    }

    /// Begin a session. Unsupported platforms log and stay idle — the host
    /// should have disabled the control already.
    pub fn start(&mut self) -> Result<(), JsValue> {
        if !platform_supported() {
            log::warn!("recording not supported on this platform");
            return Ok(());
        }

        let mime = self
            .controller
            .start(js_sys::Date::now(), |mime| {
                MediaRecorder::is_type_supported(mime)
            })
            .map_err(|err| JsValue::from_str(&err.to_string()))?;
        log::info!("recording with encoding {}", mime);

        match self.begin_session(mime) {
            Ok(()) => Ok(()),
            Err(err) => {
                // Roll the state machine back so the control returns to idle.
                self.abort_session();
                Err(err)
            }
        }
    }

    fn begin_session(&mut self, mime: &str) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;
        let canvas: HtmlCanvasElement = document
            .get_element_by_id(CANVAS_ID)
            .ok_or("render canvas not found")?
            .dyn_into()?;

        let stream = canvas.capture_stream_with_frame_request_rate(self.capture_fps as f64)?;
        let options = MediaRecorderOptions::new();
        options.set_mime_type(mime);
        let recorder = MediaRecorder::new_with_media_stream_and_media_recorder_options(
            &stream, &options,
        )?;

        self.chunks.borrow_mut().clear();

        let chunks = Rc::clone(&self.chunks);
        let on_data = Closure::wrap(Box::new(move |event: BlobEvent| {
            if let Some(data) = event.data() {
                if data.size() > 0.0 {
                    chunks.borrow_mut().push(data);
                }
            }
        }) as Box<dyn FnMut(BlobEvent)>);
        recorder.set_ondataavailable(Some(on_data.as_ref().unchecked_ref()));

        let on_stop = Closure::wrap(Box::new(crate::finish_recording) as Box<dyn FnMut()>);
        recorder.set_onstop(Some(on_stop.as_ref().unchecked_ref()));

        let on_error = Closure::wrap(Box::new(move |event: web_sys::Event| {
            log::error!("media recorder error: {:?}", event);
            crate::abort_recording();
        }) as Box<dyn FnMut(web_sys::Event)>);
        recorder.set_onerror(Some(on_error.as_ref().unchecked_ref()));

        recorder.start()?;

        let on_timeout = Closure::wrap(Box::new(move || {
            log::info!("max recording length reached, stopping");
            crate::recording_stop();
        }) as Box<dyn FnMut()>);
        let handle = window.set_timeout_with_callback_and_timeout_and_arguments_0(
            on_timeout.as_ref().unchecked_ref(),
            (self.max_secs * 1000) as i32,
        )?;

        self.recorder = Some(recorder);
        self.on_data = Some(on_data);
        self.on_stop = Some(on_stop);
        self.on_error = Some(on_error);
        self.on_timeout = Some(on_timeout);
        self.timeout_handle = Some(handle);
        Ok(())
    }

    /// Request stop (user click or timeout). Finalization continues in the
    /// recorder's stop callback.
    pub fn stop(&mut self) {
        self.clear_timeout();
        if let Some(recorder) = &self.recorder {
            if recorder.state() != MediaRecorderState::Inactive {
                if let Err(err) = recorder.stop() {
                    log::error!("recorder stop failed: {:?}", err);
                }
            }
        }
        self.controller.request_stop();
    }

    /// The platform recorder finished flushing: concatenate the chunks into
    /// one file and hand it to the user.
    pub fn finish(&mut self) {
        let mime = self.controller.mime().unwrap_or("video/webm");
        let Some(file_name) = self.controller.finalize() else {
            return;
        };

        let chunks: Vec<Blob> = self.chunks.borrow_mut().drain(..).collect();
        self.teardown_session();

        if chunks.is_empty() {
            log::warn!("recording produced no data");
            return;
        }
        match save_chunks(&chunks, mime, file_name) {
            Ok(()) => log::info!("saved {}", file_name),
            Err(err) => log::error!("failed to save recording: {:?}", err),
        }
    }

    /// Encoder failure: discard partial chunks and return to idle.
    pub fn abort_session(&mut self) {
        self.controller.abort();
        self.chunks.borrow_mut().clear();
        self.teardown_session();
    }

    fn teardown_session(&mut self) {
        self.clear_timeout();
        self.recorder = None;
        self.on_data = None;
        self.on_stop = None;
        self.on_error = None;
        self.on_timeout = None;
    }

    fn clear_timeout(&mut self) {
        if let Some(handle) = self.timeout_handle.take() {
            if let Some(window) = web_sys::window() {
                window.clear_timeout_with_handle(handle);
            }
        }
    }
}

/// Concatenate encoded chunks into one blob and trigger a client-side save.
fn save_chunks(chunks: &[Blob], mime: &str, file_name: &str) -> Result<(), JsValue> {
    let parts = Array::new();
    for chunk in chunks {
        parts.push(chunk.as_ref());
    }
    let bag = BlobPropertyBag::new();
    bag.set_type(mime);
    let blob = Blob::new_with_blob_sequence_and_options(parts.as_ref(), &bag)?;

    let url = Url::create_object_url_with_blob(&blob)?;
    let document = web_sys::window()
        .ok_or("no window")?
        .document()
        .ok_or("no document")?;
    let anchor: HtmlAnchorElement = document.create_element("a")?.dyn_into()?;
    anchor.set_href(&url);
    anchor.set_download(file_name);
    anchor.click();
    Url::revoke_object_url(&url)?;
    Ok(())
}
