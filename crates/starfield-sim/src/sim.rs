use crate::api::config::SimConfig;
use crate::api::types::{BuildProgress, RecordingState};
use crate::bridge::protocol::{self, ProtocolLayout};
use crate::camera::SceneTransform;
use crate::core::params::ParamStore;
use crate::core::rng::Rng;
use crate::input::queue::{EventQueue, HostEvent};
use crate::renderer::instance::InstanceBuffer;
use crate::stars::ambient::AmbientStar;
use crate::stars::pool::ShootingStarPool;

/// Ambient stars generated per `build_step` call. The population build is
/// chunked so the host can interleave batches with animation frames instead
/// of blocking the display thread on one long allocation.
const BUILD_BATCH: usize = 50;

/// The whole simulation: particle populations, camera, live parameters, and
/// the per-frame pipeline that rebuilds the shared frame buffer the host
/// renders from.
pub struct Starfield {
    config: SimConfig,
    params: ParamStore,
    rng: Rng,
    camera: SceneTransform,
    ambient: Vec<AmbientStar>,
    pool: ShootingStarPool,
    input: EventQueue,
    instances: InstanceBuffer,
    layout: ProtocolLayout,
    frame: Vec<f32>,
    frame_counter: u32,
    /// Natural size of the loaded background image, if any.
    background: Option<(f32, f32)>,
    /// Mirrored from the capture controller for the frame header.
    recording: RecordingState,
}

impl Starfield {
    pub fn new(config: SimConfig) -> Self {
        let layout = ProtocolLayout::from_config(&config);
        Self {
            params: ParamStore::new(),
            rng: Rng::new(config.seed),
            camera: SceneTransform::new(config.target_scale),
            ambient: Vec::with_capacity(config.ambient_stars),
            pool: ShootingStarPool::new(config.shooting_stars, config.spawn_rate),
            input: EventQueue::new(),
            instances: InstanceBuffer::with_capacity(config.max_instances()),
            frame: vec![0.0; layout.buffer_total_floats],
            layout,
            frame_counter: 0,
            background: None,
            recording: RecordingState::Idle,
            config,
        }
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn params(&self) -> &ParamStore {
        &self.params
    }

    /// Host events land here and are applied at the start of the next tick.
    pub fn input_mut(&mut self) -> &mut EventQueue {
        &mut self.input
    }

    pub fn camera(&self) -> &SceneTransform {
        &self.camera
    }

    pub fn layout(&self) -> &ProtocolLayout {
        &self.layout
    }

    pub fn set_recording_state(&mut self, state: RecordingState) {
        self.recording = state;
    }

    /// Generate one batch of the initial ambient population.
    pub fn build_step(&mut self) -> BuildProgress {
        let target = (self.ambient.len() + BUILD_BATCH).min(self.config.ambient_stars);
        while self.ambient.len() < target {
            self.ambient.push(AmbientStar::new(
                self.config.width,
                self.config.height,
                &mut self.rng,
            ));
        }
        self.build_progress()
    }

    pub fn build_progress(&self) -> BuildProgress {
        BuildProgress {
            generated: self.ambient.len(),
            total: self.config.ambient_stars,
        }
    }

    pub fn is_built(&self) -> bool {
        self.build_progress().is_done()
    }

    /// Arm the spawn timer when the animation loop starts, so the first
    /// shooting star waits a full interval from "ready" rather than from
    /// some epoch.
    pub fn start(&mut self, now_ms: f64) {
        self.pool.arm(now_ms);
    }

    /// One frame: apply pending host events, advance the camera, run the
    /// spawn scheduler, update and project every star, rebuild the shared
    /// frame buffer. `now_ms` is wall-clock milliseconds (`Date.now()`).
    pub fn tick(&mut self, now_ms: f64) {
        self.apply_events();

        self.camera.advance(&self.params);
        let width = self.config.width;
        let height = self.config.height;
        self.pool.try_spawn(now_ms, width, height, &mut self.rng);

        self.instances.clear();
        let camera_scale = self.camera.scale();

        // Ambient layer first — it always renders beneath the streaks.
        for star in &mut self.ambient {
            star.update(&self.params, width, height, now_ms, &mut self.rng);
            if let Some(instance) = star.instance(width, &self.params, camera_scale) {
                self.instances.push(instance);
            }
        }
        let split = self.instances.instance_count();
        self.instances.set_layer_split(split);

        for star in self.pool.iter_mut() {
            star.update(&self.params);
        }
        for star in self.pool.iter() {
            star.push_instances(&mut self.instances, width, &self.params, camera_scale);
        }

        self.frame_counter = self.frame_counter.wrapping_add(1);
        self.write_frame();
    }

    fn apply_events(&mut self) {
        for event in self.input.drain() {
            match event {
                HostEvent::SetControl { key, value } => self.params.set(key, value),
                HostEvent::SetBackgroundSize { width, height } => {
                    self.background = Some((width, height));
                }
            }
        }
    }

    /// Aspect-fill draw size for the background: scaled by
    /// `max(view_w / img_w, view_h / img_h)` so the image always covers the
    /// canvas, centered at the transform origin. Zero when no image loaded.
    fn background_draw_size(&self) -> (f32, f32) {
        match self.background {
            Some((img_w, img_h)) if img_w > 0.0 && img_h > 0.0 => {
                let factor = (self.config.width / img_w).max(self.config.height / img_h);
                (img_w * factor, img_h * factor)
            }
            _ => (0.0, 0.0),
        }
    }

    fn write_frame(&mut self) {
        let (bg_w, bg_h) = self.background_draw_size();
        let progress = self.build_progress().fraction();
        let instance_count = self
            .instances
            .instances
            .len()
            .min(self.layout.max_instances);

        let header = &mut self.frame[..protocol::HEADER_FLOATS];
        header[protocol::HEADER_FRAME_COUNTER] = self.frame_counter as f32;
        header[protocol::HEADER_MAX_INSTANCES] = self.layout.max_instances as f32;
        header[protocol::HEADER_INSTANCE_COUNT] = instance_count as f32;
        header[protocol::HEADER_LAYER_SPLIT] = self.instances.layer_split as f32;
        header[protocol::HEADER_WORLD_WIDTH] = self.config.width;
        header[protocol::HEADER_WORLD_HEIGHT] = self.config.height;
        header[protocol::HEADER_ROTATION] = self.camera.rotation();
        header[protocol::HEADER_SCALE] = self.camera.scale();
        header[protocol::HEADER_BACKGROUND_WIDTH] = bg_w;
        header[protocol::HEADER_BACKGROUND_HEIGHT] = bg_h;
        header[protocol::HEADER_LOAD_PROGRESS] = progress;
        header[protocol::HEADER_RECORDING_STATE] = self.recording.as_u32() as f32;
        header[protocol::HEADER_PROTOCOL_VERSION] = protocol::PROTOCOL_VERSION;

        let src: &[f32] = bytemuck::cast_slice(&self.instances.instances[..instance_count]);
        let offset = self.layout.instance_data_offset;
        self.frame[offset..offset + src.len()].copy_from_slice(src);
    }

    /// The shared frame buffer: header followed by instance data.
    pub fn frame(&self) -> &[f32] {
        &self.frame
    }

    pub fn frame_ptr(&self) -> *const f32 {
        self.frame.as_ptr()
    }

    pub fn pool(&self) -> &ShootingStarPool {
        &self.pool
    }
}
