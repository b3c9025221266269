//! Particle models: ambient background stars and pooled shooting stars.

pub mod ambient;
pub mod pool;
pub mod shooting;

pub use ambient::AmbientStar;
pub use pool::{ShootingStarPool, SpawnTimer};
pub use shooting::{ShootingStar, TrailPoint, TRAIL_LENGTH};
