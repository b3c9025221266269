use glam::Vec2;

use crate::core::params::{ControlKey, ParamStore};
use crate::core::rng::Rng;
use crate::renderer::instance::{InstanceBuffer, StarInstance};
use crate::stars::ambient::MIN_DRAW_RADIUS;

/// Number of trail segments retained behind the head.
pub const TRAIL_LENGTH: usize = 8;

/// Head speed multiplier over the shooting-speed control — streaks move
/// visibly faster than the ambient field.
const SPEED_MULTIPLIER: f32 = 7.0;

/// Depth at which the star passes the camera and goes dormant.
const DESPAWN_DEPTH: f32 = 10.0;

/// Fraction of the half-extent that spawns cluster around, so streaks
/// originate near the vanishing point.
const CENTER_SPAWN_RATIO: f32 = 0.3;

/// Sprite quad edge multiples for trail segments and the head.
const TRAIL_SPRITE_SCALE: f32 = 4.0;
const HEAD_SPRITE_SCALE: f32 = 8.0;

/// Opacity of the newest trail segment; older segments fade linearly to 0.
const TRAIL_MAX_ALPHA: f32 = 0.6;

/// A past head position retained for trail rendering.
#[derive(Debug, Clone, Copy)]
pub struct TrailPoint {
    pub pos: Vec2,
    pub z: f32,
}

/// Fast star with a fading multi-segment trail.
///
/// Lives in a fixed pool: constructed dormant, activated by the spawn
/// scheduler, deactivated when its depth passes the camera. The trail is an
/// ordered list of past positions, newest first, capped at
/// [`TRAIL_LENGTH`].
#[derive(Debug, Clone)]
pub struct ShootingStar {
    pub pos: Vec2,
    pub z: f32,
    pub initial_z: f32,
    pub active: bool,
    pub trail: Vec<TrailPoint>,
}

impl ShootingStar {
    /// Starts dormant; the spawn scheduler activates it.
    pub fn new() -> Self {
        Self {
            pos: Vec2::ZERO,
            z: 0.0,
            initial_z: 0.0,
            active: false,
            trail: Vec::with_capacity(TRAIL_LENGTH),
        }
    }

    /// Activate near the vanishing point: lateral position inside the
    /// central band, depth in the far fifth of the range.
    pub fn spawn(&mut self, width: f32, height: f32, rng: &mut Rng) {
        self.pos = Vec2::new(
            (rng.next_f32() - 0.5) * width * CENTER_SPAWN_RATIO,
            (rng.next_f32() - 0.5) * height * CENTER_SPAWN_RATIO,
        );
        self.z = width * 0.8 + rng.next_f32() * width * 0.2;
        self.initial_z = self.z;
        self.trail.clear();
        self.active = true;
    }

    /// Record the current position into the trail, then streak toward the
    /// camera. Passing [`DESPAWN_DEPTH`] deactivates the star and discards
    /// its trail.
    pub fn update(&mut self, params: &ParamStore) {
        if !self.active {
            return;
        }

        self.trail.insert(0, TrailPoint { pos: self.pos, z: self.z });
        self.trail.truncate(TRAIL_LENGTH);

        self.z -= params.get(ControlKey::ShootingStarSpeed) * SPEED_MULTIPLIER;

        if self.z <= DESPAWN_DEPTH {
            self.active = false;
            self.trail.clear();
        }
    }

    /// Append trail segments (oldest dimmest) then the full-brightness head.
    pub fn push_instances(
        &self,
        buffer: &mut InstanceBuffer,
        view_width: f32,
        params: &ParamStore,
        camera_scale: f32,
    ) {
        if !self.active {
            return;
        }

        let base_size = params.get(ControlKey::BaseStarSize);
        let compensation = 1.0 / camera_scale;
        let count = self.trail.len();

        for (i, point) in self.trail.iter().enumerate() {
            if point.z <= 0.0 {
                continue;
            }
            let k = view_width / point.z;
            let screen = point.pos * k;
            let parallax = 1.0 - point.z / self.initial_z;
            let radius = parallax * base_size * compensation * 0.25;
            if radius <= MIN_DRAW_RADIUS {
                continue;
            }
            buffer.push(StarInstance {
                x: screen.x,
                y: screen.y,
                size: radius * TRAIL_SPRITE_SCALE,
                alpha: (1.0 - i as f32 / count as f32) * TRAIL_MAX_ALPHA,
            });
        }

        if self.z > 0.0 {
            let k = view_width / self.z;
            let screen = self.pos * k;
            let parallax = 1.0 - self.z / self.initial_z;
            let radius = parallax * base_size * compensation * 0.5;
            if radius > MIN_DRAW_RADIUS {
                buffer.push(StarInstance {
                    x: screen.x,
                    y: screen.y,
                    size: radius * HEAD_SPRITE_SCALE,
                    alpha: 1.0,
                });
            }
        }
    }
}

impl Default for ShootingStar {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const W: f32 = 1080.0;
    const H: f32 = 1920.0;

    #[test]
    fn starts_dormant() {
        let star = ShootingStar::new();
        assert!(!star.active);
        assert!(star.trail.is_empty());
    }

    #[test]
    fn spawn_activates_with_empty_trail() {
        let mut rng = Rng::new(21);
        let mut star = ShootingStar::new();
        star.trail.push(TrailPoint { pos: Vec2::ZERO, z: 100.0 });
        star.spawn(W, H, &mut rng);
        assert!(star.active);
        assert!(star.trail.is_empty());
    }

    #[test]
    fn spawn_lands_in_the_central_band_and_far_depth() {
        let mut rng = Rng::new(23);
        let mut star = ShootingStar::new();
        for _ in 0..1000 {
            star.spawn(W, H, &mut rng);
            assert!(star.pos.x.abs() <= W * 0.5 * 0.3);
            assert!(star.pos.y.abs() <= H * 0.5 * 0.3);
            assert!(star.z >= W * 0.8 && star.z <= W);
            assert_eq!(star.z, star.initial_z);
        }
    }

    #[test]
    fn trail_never_exceeds_cap() {
        let mut rng = Rng::new(25);
        let mut params = ParamStore::new();
        params.set(ControlKey::ShootingStarSpeed, 0.1);
        let mut star = ShootingStar::new();
        star.spawn(W, H, &mut rng);
        for _ in 0..200 {
            star.update(&params);
            assert!(star.trail.len() <= TRAIL_LENGTH);
        }
    }

    #[test]
    fn trail_is_ordered_newest_first() {
        let mut rng = Rng::new(27);
        let params = ParamStore::new();
        let mut star = ShootingStar::new();
        star.spawn(W, H, &mut rng);
        star.update(&params);
        star.update(&params);
        assert!(star.trail[0].z < star.trail[1].z);
    }

    #[test]
    fn passing_the_camera_deactivates_and_clears() {
        let mut rng = Rng::new(29);
        let mut params = ParamStore::new();
        params.set(ControlKey::ShootingStarSpeed, 10.0);
        let mut star = ShootingStar::new();
        star.spawn(W, H, &mut rng);

        let mut frames = 0;
        while star.active {
            star.update(&params);
            frames += 1;
            assert!(frames < 100, "star never despawned");
        }
        assert!(star.trail.is_empty());
        // z stepped by 70 per frame from ~900: well past the threshold.
        assert!(star.z <= 10.0);
    }

    #[test]
    fn dormant_star_ignores_update_and_draw() {
        let params = ParamStore::new();
        let mut star = ShootingStar::new();
        star.update(&params);
        assert!(!star.active);

        let mut buffer = InstanceBuffer::with_capacity(16);
        star.push_instances(&mut buffer, W, &params, 1.0);
        assert_eq!(buffer.instance_count(), 0);
    }

    #[test]
    fn trail_fades_toward_the_tail_and_head_is_opaque() {
        let mut params = ParamStore::new();
        params.set(ControlKey::BaseStarSize, 50.0);
        let mut star = ShootingStar::new();
        star.active = true;
        star.initial_z = 1000.0;
        star.z = 200.0;
        star.pos = Vec2::new(30.0, 40.0);
        star.trail = vec![
            TrailPoint { pos: Vec2::new(30.0, 40.0), z: 250.0 },
            TrailPoint { pos: Vec2::new(30.0, 40.0), z: 300.0 },
            TrailPoint { pos: Vec2::new(30.0, 40.0), z: 350.0 },
        ];

        let mut buffer = InstanceBuffer::with_capacity(16);
        star.push_instances(&mut buffer, W, &params, 1.0);
        assert_eq!(buffer.instance_count(), 4);

        let segments = &buffer.instances;
        // Newest segment is brightest; fade is linear along the trail.
        assert!((segments[0].alpha - 0.6).abs() < 1e-6);
        assert!(segments[0].alpha > segments[1].alpha);
        assert!(segments[1].alpha > segments[2].alpha);
        // Head drawn last, fully opaque, larger sprite scale.
        let head = segments[3];
        assert_eq!(head.alpha, 1.0);
        assert!(head.size > segments[0].size);
    }

    #[test]
    fn trail_entries_behind_the_camera_are_skipped() {
        let mut params = ParamStore::new();
        params.set(ControlKey::BaseStarSize, 50.0);
        let mut star = ShootingStar::new();
        star.active = true;
        star.initial_z = 1000.0;
        star.z = 200.0;
        star.trail = vec![
            TrailPoint { pos: Vec2::ZERO, z: -5.0 },
            TrailPoint { pos: Vec2::ZERO, z: 300.0 },
        ];

        let mut buffer = InstanceBuffer::with_capacity(16);
        star.push_instances(&mut buffer, W, &params, 1.0);
        // One valid segment plus the head.
        assert_eq!(buffer.instance_count(), 2);
    }
}
