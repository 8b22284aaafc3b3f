pub mod angles;
pub mod scalar;

pub use angles::{bounded_angle, bounded_angle_delta};
pub use scalar::{vec2, vec3, Scalar, Vector2, Vector3};
