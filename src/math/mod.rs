mod plane;
mod ray;

pub use plane::ClipPlane;
pub use ray::{closest_line_parameter, ray_cylinder_intersection};
