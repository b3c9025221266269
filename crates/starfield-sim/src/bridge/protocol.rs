/// Shared frame buffer layout.
/// Must stay in sync with the host renderer's `protocol.ts`.
///
/// Layout (all values in f32 / 4 bytes):
/// ```text
/// [Header: 16 floats]
/// [Star instances: max_instances × 4 floats]
/// ```
///
/// The header is rewritten every frame with camera state, counts and the
/// background draw size; the host reads capacities from it (or from the
/// bridge exports) to compute offsets.

use crate::api::config::SimConfig;

/// Number of floats in the header section.
pub const HEADER_FLOATS: usize = 16;

/// Header field indices.
pub const HEADER_FRAME_COUNTER: usize = 0;
pub const HEADER_MAX_INSTANCES: usize = 1;
pub const HEADER_INSTANCE_COUNT: usize = 2;
pub const HEADER_LAYER_SPLIT: usize = 3;
pub const HEADER_WORLD_WIDTH: usize = 4;
pub const HEADER_WORLD_HEIGHT: usize = 5;
pub const HEADER_ROTATION: usize = 6;
pub const HEADER_SCALE: usize = 7;
pub const HEADER_BACKGROUND_WIDTH: usize = 8;
pub const HEADER_BACKGROUND_HEIGHT: usize = 9;
pub const HEADER_LOAD_PROGRESS: usize = 10;
pub const HEADER_RECORDING_STATE: usize = 11;
pub const HEADER_PROTOCOL_VERSION: usize = 12;

/// Protocol version written into the header.
pub const PROTOCOL_VERSION: f32 = 1.0;

/// Floats per star instance (wire format — never changes).
pub const INSTANCE_FLOATS: usize = 4;

/// Runtime-computed buffer layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtocolLayout {
    /// Maximum star instances per frame.
    pub max_instances: usize,
    /// Size of the instance section in floats.
    pub instance_data_floats: usize,
    /// Offset (in floats) where instance data begins.
    pub instance_data_offset: usize,
    /// Total buffer size in floats.
    pub buffer_total_floats: usize,
    /// Total buffer size in bytes.
    pub buffer_total_bytes: usize,
}

impl ProtocolLayout {
    pub fn new(max_instances: usize) -> Self {
        let instance_data_floats = max_instances * INSTANCE_FLOATS;
        let instance_data_offset = HEADER_FLOATS;
        let buffer_total_floats = instance_data_offset + instance_data_floats;
        Self {
            max_instances,
            instance_data_floats,
            instance_data_offset,
            buffer_total_floats,
            buffer_total_bytes: buffer_total_floats * 4,
        }
    }

    /// Compute layout from a SimConfig's worst-case instance count.
    pub fn from_config(config: &SimConfig) -> Self {
        Self::new(config.max_instances())
    }
}
