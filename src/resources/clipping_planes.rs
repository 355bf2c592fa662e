use bevy::prelude::*;

use crate::math::ClipPlane;

/// The active clip-plane list of the viewer
///
/// Kept in creation order. Each entry is keyed by the clipping plane entity
/// that owns it so the owner can update or deregister its equation.
#[derive(Resource, Default, Debug)]
pub struct ClippingPlanes {
    planes: Vec<(Entity, ClipPlane)>,
}

impl ClippingPlanes {
    /// Register a plane, replacing the equation if the entity is already registered
    pub fn add(&mut self, entity: Entity, plane: ClipPlane) {
        if let Some(existing) = self.planes.iter_mut().find(|(e, _)| *e == entity) {
            existing.1 = plane;
        } else {
            self.planes.push((entity, plane));
        }
    }

    /// Replace the equation of a registered plane, returns false if it is not registered
    pub fn update(&mut self, entity: Entity, plane: ClipPlane) -> bool {
        match self.planes.iter_mut().find(|(e, _)| *e == entity) {
            Some(existing) => {
                existing.1 = plane;
                true
            }
            None => false,
        }
    }

    /// Deregister a plane, returns false if it was not registered
    pub fn remove(&mut self, entity: Entity) -> bool {
        let len = self.planes.len();
        self.planes.retain(|(e, _)| *e != entity);
        self.planes.len() != len
    }

    pub fn get(&self, entity: Entity) -> Option<&ClipPlane> {
        self.planes
            .iter()
            .find(|(e, _)| *e == entity)
            .map(|(_, plane)| plane)
    }

    pub fn contains(&self, entity: Entity) -> bool {
        self.get(entity).is_some()
    }

    pub fn last(&self) -> Option<Entity> {
        self.planes.last().map(|(entity, _)| *entity)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Entity, &ClipPlane)> {
        self.planes.iter().map(|(entity, plane)| (*entity, plane))
    }

    pub fn len(&self) -> usize {
        self.planes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.planes.is_empty()
    }

    /// Plane equations packed as `(normal, constant)` in registration order
    pub fn equations(&self) -> Vec<Vec4> {
        self.planes.iter().map(|(_, plane)| plane.to_vec4()).collect()
    }

    /// True when a point is on the discarded side of any registered plane
    pub fn is_clipped(&self, point: Vec3) -> bool {
        self.planes
            .iter()
            .any(|(_, plane)| plane.distance_to_point(point) < 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_update_remove() {
        let mut world = World::new();
        let a = world.spawn_empty().id();
        let b = world.spawn_empty().id();

        let mut planes = ClippingPlanes::default();
        planes.add(a, ClipPlane::from_normal_and_coplanar_point(Vec3::Y, Vec3::ZERO));
        planes.add(b, ClipPlane::from_normal_and_coplanar_point(Vec3::X, Vec3::ZERO));
        assert_eq!(planes.len(), 2);
        assert_eq!(planes.last(), Some(b));

        assert!(planes.update(a, ClipPlane::new(Vec3::Y, -5.0)));
        assert_eq!(planes.get(a).map(|p| p.constant), Some(-5.0));
        assert_eq!(planes.equations()[0], Vec4::new(0.0, 1.0, 0.0, -5.0));

        assert!(planes.remove(a));
        assert!(!planes.remove(a));
        assert!(!planes.update(a, ClipPlane::default()));
        assert!(!planes.contains(a));
        assert_eq!(planes.len(), 1);
    }

    #[test]
    fn test_is_clipped() {
        let mut world = World::new();
        let entity = world.spawn_empty().id();

        let mut planes = ClippingPlanes::default();
        assert!(!planes.is_clipped(Vec3::NEG_Y));

        planes.add(entity, ClipPlane::from_normal_and_coplanar_point(Vec3::Y, Vec3::ZERO));
        assert!(planes.is_clipped(Vec3::NEG_Y));
        assert!(!planes.is_clipped(Vec3::Y));
    }
}
