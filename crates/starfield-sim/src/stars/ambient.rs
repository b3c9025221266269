use glam::Vec2;

use crate::core::params::{ControlKey, ParamStore};
use crate::core::rng::Rng;
use crate::renderer::instance::StarInstance;

/// Radius floor below which a star is skipped entirely — sub-pixel glow is
/// invisible and only costs fill rate.
pub(crate) const MIN_DRAW_RADIUS: f32 = 0.1;

/// Glow sprite quad edge as a multiple of the computed radius.
const SPRITE_SCALE: f32 = 8.0;

/// Slow, flickering background star.
///
/// Lateral position is fixed for a lifetime; depth shrinks every frame and
/// the star is recycled in place when it passes the camera. Between resets
/// the invariant `0 < z <= initial_z` holds, so the parallax factor
/// `1 - z / initial_z` ramps 0 → 1 as the star approaches.
#[derive(Debug, Clone)]
pub struct AmbientStar {
    pub pos: Vec2,
    pub z: f32,
    pub initial_z: f32,
    /// Current flicker brightness, resampled from wall-clock time each
    /// update. Not reproducible across runs; tests target the formula.
    pub flicker_offset: f32,
    /// Per-star flicker frequency, fixed at construction.
    pub flicker_rate: f32,
}

impl AmbientStar {
    pub fn new(width: f32, height: f32, rng: &mut Rng) -> Self {
        let mut star = AmbientStar {
            pos: Vec2::ZERO,
            z: 0.0,
            initial_z: 0.0,
            flicker_offset: rng.next_range(0.5, 1.0),
            flicker_rate: rng.next_range(0.01, 0.06),
        };
        star.reset(width, height, rng);
        star
    }

    /// Resample position and depth. Depth lands in (0, width], never zero,
    /// so the parallax invariant holds from the first frame after a reset.
    fn reset(&mut self, width: f32, height: f32, rng: &mut Rng) {
        self.pos = Vec2::new(
            (rng.next_f32() - 0.5) * width,
            (rng.next_f32() - 0.5) * height,
        );
        self.z = (1.0 - rng.next_f32()) * width;
        self.initial_z = self.z;
    }

    /// Advance depth, recycling in place on exhaustion, then resample the
    /// flicker phase from the wall clock.
    pub fn update(
        &mut self,
        params: &ParamStore,
        width: f32,
        height: f32,
        now_ms: f64,
        rng: &mut Rng,
    ) {
        self.z -= params.get(ControlKey::AmbientStarSpeed);
        if self.z <= 0.0 {
            self.reset(width, height, rng);
        }
        self.flicker_offset = 0.5 + 0.5 * (now_ms * self.flicker_rate as f64 * 0.001).sin() as f32;
    }

    /// Perspective-project to a draw instance. Returns None below the
    /// radius floor.
    pub fn instance(
        &self,
        view_width: f32,
        params: &ParamStore,
        camera_scale: f32,
    ) -> Option<StarInstance> {
        let k = view_width / self.z;
        let screen = self.pos * k;
        let parallax = 1.0 - self.z / self.initial_z;
        let radius = parallax * params.get(ControlKey::BaseStarSize) / camera_scale
            * self.flicker_offset
            * 0.5;
        if radius <= MIN_DRAW_RADIUS {
            return None;
        }
        Some(StarInstance {
            x: screen.x,
            y: screen.y,
            size: radius * SPRITE_SCALE,
            alpha: (parallax * self.flicker_offset * 2.5).min(1.0),
        })
    }
}
