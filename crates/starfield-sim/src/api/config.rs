use serde::Deserialize;

use crate::stars::shooting::TRAIL_LENGTH;

/// Configuration for the simulation, provided (optionally) by the host as a
/// JSON string at init. Every field falls back to its default, so partial
/// overrides are fine.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Logical render surface width in pixels. Fixed regardless of display
    /// size so exports come out at a stable resolution.
    pub width: f32,
    /// Logical render surface height in pixels.
    pub height: f32,
    /// Ambient background star population.
    pub ambient_stars: usize,
    /// Size of the shooting star pool.
    pub shooting_stars: usize,
    /// Shooting star spawn attempts per second.
    pub spawn_rate: f32,
    /// Scale the camera ramps toward before snapping back to 1.0.
    pub target_scale: f64,
    /// Hard cap on a single recording, in seconds.
    pub max_recording_secs: u32,
    /// Frame rate requested from the canvas capture stream.
    pub capture_fps: u32,
    /// Seed for the position PRNG.
    pub seed: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            width: 1080.0,
            height: 1920.0,
            ambient_stars: 1000,
            shooting_stars: 10,
            spawn_rate: 1.5,
            target_scale: 2.5,
            max_recording_secs: 30,
            capture_fps: 60,
            seed: 42,
        }
    }
}

impl SimConfig {
    /// Parse host-supplied overrides from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Worst-case instance count for one frame: every ambient star plus
    /// every shooting star's full trail and head.
    pub fn max_instances(&self) -> usize {
        self.ambient_stars + self.shooting_stars * (TRAIL_LENGTH + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_portrait_1080x1920() {
        let config = SimConfig::default();
        assert_eq!(config.width, 1080.0);
        assert_eq!(config.height, 1920.0);
        assert_eq!(config.ambient_stars, 1000);
        assert_eq!(config.shooting_stars, 10);
        assert_eq!(config.max_recording_secs, 30);
    }

    #[test]
    fn partial_json_overrides_keep_defaults() {
        let config = SimConfig::from_json(r#"{ "ambient_stars": 200, "max_recording_secs": 15 }"#).unwrap();
        assert_eq!(config.ambient_stars, 200);
        assert_eq!(config.max_recording_secs, 15);
        assert_eq!(config.width, 1080.0);
        assert_eq!(config.spawn_rate, 1.5);
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(SimConfig::from_json("{ not json").is_err());
    }

    #[test]
    fn max_instances_covers_trails_and_heads() {
        let config = SimConfig::default();
        assert_eq!(config.max_instances(), 1000 + 10 * (TRAIL_LENGTH + 1));
    }
}
