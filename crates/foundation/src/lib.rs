pub mod math;

// Foundation crate: small, well-tested primitives only.
pub use math::{LonLat, OrthographicProjection, Vec2, Vec3};
