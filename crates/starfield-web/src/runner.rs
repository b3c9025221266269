use starfield_sim::{glow_sprite, ControlKey, HostEvent, SimConfig, Starfield};

use crate::recorder::VideoRecorder;

/// Wires the headless simulation to the browser: owns the simulation, the
/// generated glow sprite, and the capture glue. The host page drives it via
/// the `#[wasm_bindgen]` exports and reads frames over the WASM memory.
pub struct SimRunner {
    sim: Starfield,
    sprite: Vec<u8>,
    recorder: VideoRecorder,
}

impl SimRunner {
    pub fn new(config: SimConfig) -> Self {
        let recorder = VideoRecorder::new(config.capture_fps, config.max_recording_secs);
        Self {
            sim: Starfield::new(config),
            sprite: glow_sprite(),
            recorder,
        }
    }

    /// Generate one batch of the initial population; returns progress 0..1.
    pub fn build_step(&mut self) -> f32 {
        self.sim.build_step().fraction()
    }

    pub fn is_built(&self) -> bool {
        self.sim.is_built()
    }

    /// Arm the wall-clock spawn timer once the animation loop begins.
    pub fn start(&mut self, now_ms: f64) {
        self.sim.start(now_ms);
    }

    /// Run one frame and mirror the recording state into the header.
    pub fn tick(&mut self, now_ms: f64) {
        self.sim.set_recording_state(self.recorder.state());
        self.sim.tick(now_ms);
    }

    pub fn push_event(&mut self, event: HostEvent) {
        self.sim.input_mut().push(event);
    }

    pub fn control(&self, key: ControlKey) -> f32 {
        self.sim.params().get(key)
    }

    pub fn recorder_mut(&mut self) -> &mut VideoRecorder {
        &mut self.recorder
    }

    pub fn recorder(&self) -> &VideoRecorder {
        &self.recorder
    }

    // ---- Pointer accessors for host-side buffer reads ----

    pub fn frame_ptr(&self) -> *const f32 {
        self.sim.frame_ptr()
    }

    pub fn frame_floats(&self) -> u32 {
        self.sim.layout().buffer_total_floats as u32
    }

    pub fn max_instances(&self) -> u32 {
        self.sim.layout().max_instances as u32
    }

    pub fn sprite_ptr(&self) -> *const u8 {
        self.sprite.as_ptr()
    }

    pub fn sprite_len(&self) -> u32 {
        self.sprite.len() as u32
    }

    pub fn world_width(&self) -> f32 {
        self.sim.config().width
    }

    pub fn world_height(&self) -> f32 {
        self.sim.config().height
    }
}
