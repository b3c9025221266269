use crate::core::params::{ControlKey, ParamStore};

/// Whole-scene camera state: an unbounded rotation accumulator and a
/// sawtooth zoom that ramps toward a target scale, then snaps back to 1.0.
///
/// Accumulators are f64: the per-frame rates are on the order of 1e-4 and a
/// session runs for minutes, so f32 accumulation would visibly drift.
pub struct SceneTransform {
    rotation: f64,
    scale: f64,
    target_scale: f64,
}

impl SceneTransform {
    pub fn new(target_scale: f64) -> Self {
        Self {
            rotation: 0.0,
            scale: 1.0,
            target_scale,
        }
    }

    /// Advance one frame. Rotation accumulates forever (it feeds a periodic
    /// function downstream, so no wraparound is needed). The zoom snaps back
    /// to 1.0 on the same frame it reaches or passes the target — a visible
    /// pop, by contract a sawtooth rather than a bounce.
    pub fn advance(&mut self, params: &ParamStore) {
        self.rotation += params.get(ControlKey::RotationRate) as f64;
        if self.scale < self.target_scale {
            self.scale += params.get(ControlKey::ZoomRate) as f64;
        }
        if self.scale >= self.target_scale {
            self.scale = 1.0;
        }
    }

    pub fn rotation(&self) -> f32 {
        self.rotation as f32
    }

    pub fn scale(&self) -> f32 {
        self.scale as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params_with(rotation_rate: f32, zoom_rate: f32) -> ParamStore {
        let mut params = ParamStore::new();
        params.set(ControlKey::RotationRate, rotation_rate);
        params.set(ControlKey::ZoomRate, zoom_rate);
        params
    }

    #[test]
    fn rotation_accumulates_monotonically() {
        let params = params_with(0.0003, 0.0002);
        let mut camera = SceneTransform::new(2.5);
        let mut last = camera.rotation();
        for _ in 0..100 {
            camera.advance(&params);
            assert!(camera.rotation() > last);
            last = camera.rotation();
        }
    }

    #[test]
    fn scale_stays_below_target_or_resets() {
        let params = params_with(0.0001, 0.1);
        let mut camera = SceneTransform::new(2.5);
        for _ in 0..100 {
            camera.advance(&params);
            let s = camera.scale() as f64;
            assert!(s < 2.5 || s == 1.0, "scale escaped the sawtooth: {}", s);
        }
    }

    #[test]
    fn sawtooth_resets_on_the_crossing_frame() {
        // (2.5 - 1.0) / 0.0004 = 3750 frames analytically; accumulated
        // floating point lands within one frame of that.
        let params = params_with(0.0001, 0.0004);
        let mut camera = SceneTransform::new(2.5);

        let mut reset_frame = None;
        for frame in 1..=4000u32 {
            let before = camera.scale();
            camera.advance(&params);
            if camera.scale() < before {
                reset_frame = Some(frame);
                break;
            }
        }

        let frame = reset_frame.expect("sawtooth never reset");
        assert!(
            (frame as i64 - 3750).unsigned_abs() <= 1,
            "reset at frame {}",
            frame
        );
        assert_eq!(camera.scale(), 1.0);
    }

    #[test]
    fn zoom_rate_change_applies_mid_ramp() {
        let mut params = params_with(0.0001, 0.0004);
        let mut camera = SceneTransform::new(2.5);
        camera.advance(&params);
        let slow = camera.scale();

        params.set(ControlKey::ZoomRate, 0.1);
        camera.advance(&params);
        assert!(camera.scale() > slow + 0.05);
    }
}
