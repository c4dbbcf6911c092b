pub mod angle;
pub mod arc_2d;
pub mod polygon_2d;
pub mod pose;

pub use angle::{normalize_angle, rotate_point, rotate_vector, sin_cos_deg};
pub use arc_2d::Turn;
pub use pose::{Pose, Port};

/// Ground-plane point. `x` is world X, `y` is world Z (depth).
pub type Point2 = nalgebra::Point2<f64>;

/// 3D point type (`y` up).
pub type Point3 = nalgebra::Point3<f64>;

/// Ground-plane vector. `x` is world X, `y` is world Z (depth).
pub type Vector2 = nalgebra::Vector2<f64>;

/// 3D vector type (`y` up).
pub type Vector3 = nalgebra::Vector3<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// Smallest length or radius a segment may have after clamping.
pub const MIN_EXTENT: f64 = 1e-3;
