//! Generated glow sprite shared by every star draw.
//!
//! One soft white radial gradient, rasterized once at init and uploaded by
//! the host as a texture. Dense fields drawn additively with this sprite
//! bloom where stars overlap instead of clipping.

/// Pixel edge of the generated RGBA texture.
pub const SPRITE_SIZE: usize = 128;

/// Alpha ramp along the radius: (radius fraction, alpha). Bright solid core,
/// long soft falloff, fully transparent rim.
const STOPS: [(f32, f32); 5] = [
    (0.0, 1.0),
    (0.2, 1.0),
    (0.4, 0.6),
    (0.7, 0.2),
    (1.0, 0.0),
];

/// Rasterize the glow sprite as straight-alpha RGBA8, row-major,
/// `SPRITE_SIZE` × `SPRITE_SIZE`.
pub fn glow_sprite() -> Vec<u8> {
    let half = SPRITE_SIZE as f32 / 2.0;
    let mut rgba = vec![0u8; SPRITE_SIZE * SPRITE_SIZE * 4];

    for y in 0..SPRITE_SIZE {
        for x in 0..SPRITE_SIZE {
            let dx = x as f32 + 0.5 - half;
            let dy = y as f32 + 0.5 - half;
            let dist = (dx * dx + dy * dy).sqrt() / half;
            let alpha = (alpha_at(dist) * 255.0).round() as u8;
            let offset = (y * SPRITE_SIZE + x) * 4;
            rgba[offset..offset + 4].copy_from_slice(&[255, 255, 255, alpha]);
        }
    }

    rgba
}

/// Piecewise-linear alpha between gradient stops; zero past the rim.
fn alpha_at(dist: f32) -> f32 {
    if dist >= 1.0 {
        return 0.0;
    }
    for pair in STOPS.windows(2) {
        let (d0, a0) = pair[0];
        let (d1, a1) = pair[1];
        if dist <= d1 {
            let t = (dist - d0) / (d1 - d0);
            return a0 + (a1 - a0) * t;
        }
    }
    0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alpha_of(rgba: &[u8], x: usize, y: usize) -> u8 {
        rgba[(y * SPRITE_SIZE + x) * 4 + 3]
    }

    #[test]
    fn sprite_has_expected_dimensions() {
        let rgba = glow_sprite();
        assert_eq!(rgba.len(), SPRITE_SIZE * SPRITE_SIZE * 4);
    }

    #[test]
    fn sprite_is_pure_white() {
        let rgba = glow_sprite();
        for px in rgba.chunks_exact(4) {
            assert_eq!(&px[..3], &[255, 255, 255]);
        }
    }

    #[test]
    fn center_is_opaque_and_corners_are_transparent() {
        let rgba = glow_sprite();
        let mid = SPRITE_SIZE / 2;
        assert_eq!(alpha_of(&rgba, mid, mid), 255);
        assert_eq!(alpha_of(&rgba, 0, 0), 0);
        assert_eq!(alpha_of(&rgba, SPRITE_SIZE - 1, SPRITE_SIZE - 1), 0);
    }

    #[test]
    fn alpha_falls_off_monotonically_along_the_radius() {
        let rgba = glow_sprite();
        let mid = SPRITE_SIZE / 2;
        let mut last = 255u8;
        for x in mid..SPRITE_SIZE {
            let a = alpha_of(&rgba, x, mid);
            assert!(a <= last, "alpha rose at x={}: {} > {}", x, a, last);
            last = a;
        }
    }

    #[test]
    fn ramp_matches_the_gradient_stops() {
        assert_eq!(alpha_at(0.0), 1.0);
        assert_eq!(alpha_at(0.2), 1.0);
        assert!((alpha_at(0.4) - 0.6).abs() < 1e-6);
        assert!((alpha_at(0.7) - 0.2).abs() < 1e-6);
        assert_eq!(alpha_at(1.0), 0.0);
        assert!(alpha_at(0.3) < 1.0 && alpha_at(0.3) > 0.6);
    }
}
