use bevy::math::{Vec3, Vec4};

/// A plane in Hessian normal form: `normal · p + constant = 0` for every
/// point `p` on the plane.
///
/// The normal is stored exactly as given. Distances are only true distances
/// when the normal has unit length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClipPlane {
    pub normal: Vec3,
    pub constant: f32,
}

impl Default for ClipPlane {
    fn default() -> Self {
        Self {
            normal: Vec3::X,
            constant: 0.0,
        }
    }
}

impl ClipPlane {
    pub fn new(normal: Vec3, constant: f32) -> Self {
        Self { normal, constant }
    }

    pub fn from_normal_and_coplanar_point(normal: Vec3, point: Vec3) -> Self {
        let mut plane = Self::default();
        plane.set_from_normal_and_coplanar_point(normal, point);
        plane
    }

    pub fn set_from_normal_and_coplanar_point(&mut self, normal: Vec3, point: Vec3) {
        self.normal = normal;
        self.constant = -point.dot(normal);
    }

    /// Signed distance, positive on the side the normal points to.
    pub fn distance_to_point(&self, point: Vec3) -> f32 {
        self.normal.dot(point) + self.constant
    }

    pub fn contains_point(&self, point: Vec3, epsilon: f32) -> bool {
        self.distance_to_point(point).abs() <= epsilon
    }

    pub fn project_point(&self, point: Vec3) -> Vec3 {
        let length_squared = self.normal.length_squared();
        if length_squared == 0.0 {
            return point;
        }
        point - self.normal * (self.distance_to_point(point) / length_squared)
    }

    /// Packed `(normal.xyz, constant)` for upload to a shader uniform.
    pub fn to_vec4(&self) -> Vec4 {
        self.normal.extend(self.constant)
    }
}
