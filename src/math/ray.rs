use bevy::math::Vec3;

const PARALLEL_EPSILON: f32 = 1e-6;

/// Parameter `s` of the point `line_origin + s * line_direction` closest to
/// the ray. Returns `None` when the ray runs parallel to the line.
pub fn closest_line_parameter(
    ray_origin: Vec3,
    ray_direction: Vec3,
    line_origin: Vec3,
    line_direction: Vec3,
) -> Option<f32> {
    let w0 = ray_origin - line_origin;
    let a = ray_direction.dot(ray_direction);
    let b = ray_direction.dot(line_direction);
    let c = line_direction.dot(line_direction);
    let d = ray_direction.dot(w0);
    let e = line_direction.dot(w0);

    let denominator = a * c - b * b;
    if denominator.abs() <= PARALLEL_EPSILON * a * c {
        return None;
    }

    Some((a * e - b * d) / denominator)
}

/// Nearest non-negative ray parameter hitting a capped cylinder centred on
/// the local origin with its axis along +Y.
pub fn ray_cylinder_intersection(
    origin: Vec3,
    direction: Vec3,
    radius: f32,
    half_height: f32,
) -> Option<f32> {
    let mut nearest: Option<f32> = None;
    let mut consider = |t: f32| {
        if t >= 0.0 && nearest.map_or(true, |n| t < n) {
            nearest = Some(t);
        }
    };

    // Side wall
    let a = direction.x * direction.x + direction.z * direction.z;
    if a > PARALLEL_EPSILON {
        let b = 2.0 * (origin.x * direction.x + origin.z * direction.z);
        let c = origin.x * origin.x + origin.z * origin.z - radius * radius;
        let discriminant = b * b - 4.0 * a * c;
        if discriminant >= 0.0 {
            let root = discriminant.sqrt();
            for t in [(-b - root) / (2.0 * a), (-b + root) / (2.0 * a)] {
                let y = origin.y + t * direction.y;
                if y.abs() <= half_height {
                    consider(t);
                }
            }
        }
    }

    // Caps
    if direction.y.abs() > PARALLEL_EPSILON {
        for cap_y in [-half_height, half_height] {
            let t = (cap_y - origin.y) / direction.y;
            let x = origin.x + t * direction.x;
            let z = origin.z + t * direction.z;
            if x * x + z * z <= radius * radius {
                consider(t);
            }
        }
    }

    nearest
}
