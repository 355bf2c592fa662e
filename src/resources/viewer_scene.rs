use bevy::prelude::*;

/// Root entity of the viewer scene graph
///
/// Everything the viewer displays, including clipping plane helpers and
/// transform controls, is spawned as a descendant of this entity.
///
/// The root keeps an identity transform. Helpers and controls are its direct
/// children, so their local translation is their world position: transform
/// controls drag in world space and clipping planes are computed from the
/// helper's local translation.
#[derive(Resource, Clone, Copy, Debug)]
pub struct ViewerScene {
    pub root: Entity,
}

impl FromWorld for ViewerScene {
    fn from_world(world: &mut World) -> Self {
        let root = world
            .spawn((
                Name::new("Viewer Scene"),
                Transform::default(),
                Visibility::default(),
            ))
            .id();
        log::debug!("[ViewerScene] Spawned scene root {:?}", root);
        Self { root }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scene_root_has_identity_transform() {
        let mut world = World::new();
        let scene = ViewerScene::from_world(&mut world);

        assert_eq!(world.get::<Transform>(scene.root), Some(&Transform::IDENTITY));
        assert!(world.get::<ChildOf>(scene.root).is_none());
    }
}
