//! `#[wasm_bindgen]` exports for the starfield simulator.
//!
//! The host page calls `sim_init` once, `sim_build_step` until it reports
//! 1.0, `sim_start` when the animation loop begins, then `sim_tick` every
//! animation frame, reading the shared frame buffer (and the glow sprite,
//! once) straight out of WASM memory.

pub mod recorder;
pub mod runner;

pub use runner::SimRunner;

use std::cell::RefCell;

use wasm_bindgen::prelude::*;

use starfield_sim::{ControlKey, HostEvent, SimConfig, SPRITE_SIZE};

thread_local! {
    static RUNNER: RefCell<Option<SimRunner>> = RefCell::new(None);
}

fn with_runner<R>(f: impl FnOnce(&mut SimRunner) -> R) -> R {
    RUNNER.with(|cell| {
        let mut borrow = cell.borrow_mut();
        let runner = borrow
            .as_mut()
            .expect("Simulation not initialized. Call sim_init() first.");
        f(runner)
    })
}

/// Construct the simulation. `config_json` may carry partial overrides of
/// the defaults; a malformed string is logged and ignored.
#[wasm_bindgen]
pub fn sim_init(config_json: Option<String>) {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let config = match config_json.as_deref() {
        Some(json) => match SimConfig::from_json(json) {
            Ok(config) => config,
            Err(err) => {
                log::warn!("invalid config overrides, using defaults: {}", err);
                SimConfig::default()
            }
        },
        None => SimConfig::default(),
    };

    RUNNER.with(|cell| {
        *cell.borrow_mut() = Some(SimRunner::new(config));
    });
    log::info!("starfield: initialized");
}

/// Generate one batch of the initial star population. Call once per
/// animation frame until the returned progress reaches 1.0.
#[wasm_bindgen]
pub fn sim_build_step() -> f32 {
    with_runner(|r| r.build_step())
}

#[wasm_bindgen]
pub fn sim_is_built() -> bool {
    with_runner(|r| r.is_built())
}

/// Begin the animation: arms the shooting-star spawn timer at `now_ms`
/// (wall-clock milliseconds, i.e. `Date.now()`).
#[wasm_bindgen]
pub fn sim_start(now_ms: f64) {
    with_runner(|r| r.start(now_ms));
    log::info!("starfield: ready");
}

/// Advance one frame.
#[wasm_bindgen]
pub fn sim_tick(now_ms: f64) {
    with_runner(|r| r.tick(now_ms));
}

/// Set a control value. `kind` is the ControlKey discriminant, in the same
/// order as the entries of `controls_json()`.
#[wasm_bindgen]
pub fn sim_set_control(kind: u32, value: f32) {
    match ControlKey::from_u32(kind) {
        Some(key) => with_runner(|r| r.push_event(HostEvent::SetControl { key, value })),
        None => log::warn!("unknown control kind: {}", kind),
    }
}

/// Read a control's current value.
#[wasm_bindgen]
pub fn sim_control(kind: u32) -> f32 {
    match ControlKey::from_u32(kind) {
        Some(key) => with_runner(|r| r.control(key)),
        None => {
            log::warn!("unknown control kind: {}", kind);
            0.0
        }
    }
}

/// Control metadata (labels, bounds, steps, precisions) as JSON, for the
/// host to build its panel from.
#[wasm_bindgen]
pub fn controls_json() -> String {
    match starfield_sim::controls_json() {
        Ok(json) => json,
        Err(err) => {
            log::error!("control metadata failed to serialize: {}", err);
            String::from("[]")
        }
    }
}

/// Report the natural size of the loaded background image. Never call it
/// when the asset fails to load — the simulation runs without a background.
#[wasm_bindgen]
pub fn sim_set_background_size(width: f32, height: f32) {
    with_runner(|r| r.push_event(HostEvent::SetBackgroundSize { width, height }));
}

// ---- Data accessors ----

#[wasm_bindgen]
pub fn get_frame_ptr() -> *const f32 {
    with_runner(|r| r.frame_ptr())
}

#[wasm_bindgen]
pub fn get_frame_floats() -> u32 {
    with_runner(|r| r.frame_floats())
}

#[wasm_bindgen]
pub fn get_max_instances() -> u32 {
    with_runner(|r| r.max_instances())
}

#[wasm_bindgen]
pub fn get_sprite_ptr() -> *const u8 {
    with_runner(|r| r.sprite_ptr())
}

#[wasm_bindgen]
pub fn get_sprite_len() -> u32 {
    with_runner(|r| r.sprite_len())
}

/// Pixel edge of the square glow sprite texture.
#[wasm_bindgen]
pub fn get_sprite_size() -> u32 {
    SPRITE_SIZE as u32
}

#[wasm_bindgen]
pub fn get_world_width() -> f32 {
    with_runner(|r| r.world_width())
}

#[wasm_bindgen]
pub fn get_world_height() -> f32 {
    with_runner(|r| r.world_height())
}

// ---- Recording ----

/// Whether capture + at least one preferred encoding are available. Hosts
/// disable the record control when this is false.
#[wasm_bindgen]
pub fn recording_supported() -> bool {
    recorder::platform_supported()
        && starfield_sim::negotiate_mime(|mime| web_sys::MediaRecorder::is_type_supported(mime))
            .is_some()
}

#[wasm_bindgen]
pub fn recording_start() {
    with_runner(|r| {
        if let Err(err) = r.recorder_mut().start() {
            log::error!("recording start failed: {:?}", err);
        }
    });
}

#[wasm_bindgen]
pub fn recording_stop() {
    with_runner(|r| r.recorder_mut().stop());
}

/// 0 = idle, 1 = recording, 2 = processing.
#[wasm_bindgen]
pub fn recording_state() -> u32 {
    with_runner(|r| r.recorder().state().as_u32())
}

// ---- Recorder callback re-entry points (from the platform event loop) ----

pub(crate) fn finish_recording() {
    with_runner(|r| r.recorder_mut().finish());
}

pub(crate) fn abort_recording() {
    with_runner(|r| r.recorder_mut().abort_session());
}
