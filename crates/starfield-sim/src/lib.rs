pub mod api;
pub mod bridge;
pub mod camera;
pub mod capture;
pub mod core;
pub mod input;
pub mod renderer;
pub mod sim;
pub mod stars;

// Re-export key types at crate root for convenience
pub use api::config::SimConfig;
pub use api::types::{BuildProgress, RecordingState};
pub use bridge::protocol::ProtocolLayout;
pub use camera::SceneTransform;
pub use capture::{file_name, negotiate_mime, CaptureError, RecorderController, MIME_PREFERENCES};
pub use crate::core::params::{controls_json, ControlKey, ControlMeta, ParamStore, CONTROLS};
pub use crate::core::rng::Rng;
pub use input::queue::{EventQueue, HostEvent};
pub use renderer::instance::{InstanceBuffer, StarInstance};
pub use renderer::sprite::{glow_sprite, SPRITE_SIZE};
pub use sim::Starfield;
pub use stars::{AmbientStar, ShootingStar, ShootingStarPool, SpawnTimer, TrailPoint, TRAIL_LENGTH};
