//! Live-tunable simulation parameters.
//!
//! Replaces the ad-hoc global tunables of earlier prototypes with one store
//! passed by reference to everything that reads a control each frame.

use serde::Serialize;

/// The set of host-adjustable controls. Each key has exactly one metadata
/// entry in [`CONTROLS`] and one live value in [`ParamStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlKey {
    /// Per-frame increment of the camera zoom ramp.
    ZoomRate,
    /// Per-frame increment of the scene rotation.
    RotationRate,
    /// Base depth speed of shooting stars (multiplied by the streak factor).
    ShootingStarSpeed,
    /// Depth speed of the ambient background stars.
    AmbientStarSpeed,
    /// Size multiplier applied to every star draw.
    BaseStarSize,
}

impl ControlKey {
    pub const ALL: [ControlKey; 5] = [
        ControlKey::ZoomRate,
        ControlKey::RotationRate,
        ControlKey::ShootingStarSpeed,
        ControlKey::AmbientStarSpeed,
        ControlKey::BaseStarSize,
    ];

    /// Numeric wire id used by the bridge's control exports.
    pub fn from_u32(kind: u32) -> Option<ControlKey> {
        Self::ALL.get(kind as usize).copied()
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Static UI metadata for one control. Bounds and step are affordances for
/// the host's input widgets only — the store never clamps.
#[derive(Debug, Clone, Serialize)]
pub struct ControlMeta {
    /// Stable key name, also the JSON field the host binds widgets to.
    pub key: &'static str,
    /// Human-readable label.
    pub label: &'static str,
    pub min: f32,
    pub max: f32,
    pub step: f32,
    pub initial: f32,
    /// Decimal places the host should display.
    pub precision: u32,
}

/// Metadata table, indexed by [`ControlKey`] discriminant.
pub const CONTROLS: [ControlMeta; 5] = [
    ControlMeta {
        key: "zoomRate",
        label: "Galaxy Zoom Rate",
        min: 0.0001,
        max: 0.01,
        step: 0.0001,
        initial: 0.0002,
        precision: 4,
    },
    ControlMeta {
        key: "rotationRate",
        label: "Scene Rotation Rate",
        min: 0.0001,
        max: 0.005,
        step: 0.0001,
        initial: 0.0001,
        precision: 4,
    },
    ControlMeta {
        key: "shootingStarSpeed",
        label: "Shooting Star Speed",
        min: 0.0,
        max: 10.0,
        step: 0.1,
        initial: 0.7,
        precision: 1,
    },
    ControlMeta {
        key: "ambientStarSpeed",
        label: "Ambient Star Speed",
        min: 0.1,
        max: 5.0,
        step: 0.1,
        initial: 0.8,
        precision: 1,
    },
    ControlMeta {
        key: "baseStarSize",
        label: "Base Star Size Multiplier",
        min: 1.0,
        max: 100.0,
        step: 0.5,
        initial: 10.0,
        precision: 1,
    },
];

/// Serialize the metadata table for the host's control panel.
pub fn controls_json() -> Result<String, serde_json::Error> {
    serde_json::to_string(&CONTROLS)
}

/// Current values of all controls.
///
/// `set` overwrites, `get` reads back — no buffering, no validation. Writes
/// land between frames (via the event queue), so every reader within one
/// frame sees the same value.
#[derive(Debug, Clone)]
pub struct ParamStore {
    values: [f32; 5],
}

impl ParamStore {
    /// A store populated with every control's declared initial value.
    pub fn new() -> Self {
        let mut values = [0.0; 5];
        for (slot, meta) in values.iter_mut().zip(CONTROLS.iter()) {
            *slot = meta.initial;
        }
        Self { values }
    }

    pub fn get(&self, key: ControlKey) -> f32 {
        self.values[key.index()]
    }

    pub fn set(&mut self, key: ControlKey, value: f32) {
        self.values[key.index()] = value;
    }

    pub fn metadata(key: ControlKey) -> &'static ControlMeta {
        &CONTROLS[key.index()]
    }
}

impl Default for ParamStore {
    fn default() -> Self {
        Self::new()
    }
}
