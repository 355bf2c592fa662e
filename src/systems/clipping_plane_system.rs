//! Clipping Plane Systems
//!
//! Reacts to transform control messages on behalf of every clipping plane and
//! processes the spawn/remove/visibility requests.

use bevy::prelude::*;

use crate::{
    components::{ClippingPlane, ClippingPlaneHelper, TransformControl},
    context::ViewerContext,
    events::{
        ClippingPlaneVisibilityEvent, DraggingChangedEvent, ProjectionChangedEvent,
        RemoveClippingPlaneEvent, SpawnClippingPlaneEvent, TransformControlChangeEvent,
    },
    math::ClipPlane,
    resources::{ClippingPlaneMaterials, ClippingPlanes, ViewerCameras, ViewerScene},
    ClippingConfig,
};

#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClippingPlaneSystems;

/// Plugin for clipping plane widgets
pub struct ClippingPlanePlugin;

impl Plugin for ClippingPlanePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ClippingConfig>()
            .init_resource::<ClippingPlaneMaterials>()
            .init_resource::<ClippingPlanes>()
            .init_resource::<ViewerScene>()
            .add_message::<TransformControlChangeEvent>()
            .add_message::<DraggingChangedEvent>()
            .add_message::<ProjectionChangedEvent>()
            .add_message::<SpawnClippingPlaneEvent>()
            .add_message::<RemoveClippingPlaneEvent>()
            .add_message::<ClippingPlaneVisibilityEvent>()
            .add_systems(
                Update,
                (
                    spawn_clipping_plane_system,
                    clipping_plane_visibility_system,
                    remove_clipping_plane_system,
                    clipping_plane_change_system,
                    clipping_plane_dragging_system,
                    clipping_plane_projection_system,
                )
                    .chain()
                    .in_set(ClippingPlaneSystems)
                    .run_if(resource_exists::<ViewerCameras>),
            );
    }
}

pub fn spawn_clipping_plane_system(
    mut context: ViewerContext,
    mut spawn_events: MessageReader<SpawnClippingPlaneEvent>,
) {
    for event in spawn_events.read() {
        let plane_size = event.plane_size.unwrap_or(context.settings.plane_size);
        ClippingPlane::spawn(
            &mut context,
            event.origin,
            event.normal,
            event.callbacks,
            plane_size,
        );
    }
}

pub fn clipping_plane_visibility_system(
    mut context: ViewerContext,
    mut visibility_events: MessageReader<ClippingPlaneVisibilityEvent>,
    mut query_planes: Query<(Entity, &mut ClippingPlane)>,
) {
    for event in visibility_events.read() {
        for (entity, mut plane) in query_planes.iter_mut() {
            if event.plane.map_or(true, |target| target == entity) {
                plane.set_visibility(&mut context, event.visible);
            }
        }
    }
}

pub fn remove_clipping_plane_system(
    mut context: ViewerContext,
    mut remove_events: MessageReader<RemoveClippingPlaneEvent>,
    query_planes: Query<&ClippingPlane>,
) {
    for event in remove_events.read() {
        let Ok(plane) = query_planes.get(event.plane) else {
            log::warn!(
                "[ClippingPlane] Remove requested for unknown plane {:?}",
                event.plane
            );
            continue;
        };

        plane.remove_from_scene(&mut context);
        context.commands.entity(event.plane).try_despawn();
    }
}

/// Recompute the plane from its fixed normal and the helper's new position
pub fn clipping_plane_change_system(
    mut context: ViewerContext,
    mut change_events: MessageReader<TransformControlChangeEvent>,
    query_planes: Query<&ClippingPlane>,
    query_helpers: Query<&Transform, With<ClippingPlaneHelper>>,
) {
    for event in change_events.read() {
        for plane in query_planes.iter() {
            if plane.controls != event.control {
                continue;
            }

            let Ok(helper_transform) = query_helpers.get(plane.helper) else {
                continue;
            };

            // Helpers are direct children of the identity scene root
            let equation =
                ClipPlane::from_normal_and_coplanar_point(plane.normal, helper_transform.translation);
            context.update_clipping_plane(plane.entity, equation);
        }
    }
}

/// Disable camera navigation while a plane is dragged and run the drag callbacks
pub fn clipping_plane_dragging_system(
    mut context: ViewerContext,
    mut dragging_events: MessageReader<DraggingChangedEvent>,
    mut query_planes: Query<&mut ClippingPlane>,
) {
    for event in dragging_events.read() {
        for mut plane in query_planes.iter_mut() {
            if plane.controls != event.control {
                continue;
            }

            plane.dragging = event.value;
            plane.visible = !event.value;
            context.toggle_camera_controls(plane.visible);

            let callback = if event.value {
                plane.callbacks.on_start_drag
            } else {
                plane.callbacks.on_end_drag
            };
            if let Some(callback) = callback {
                context.commands.run_system(callback);
            }

            log::debug!(
                "[ClippingPlane] Plane {:?} dragging: {}",
                plane.entity,
                event.value
            );
        }
    }
}

/// Point every plane's transform control at the newly active camera
pub fn clipping_plane_projection_system(
    mut projection_events: MessageReader<ProjectionChangedEvent>,
    query_planes: Query<&ClippingPlane>,
    mut query_controls: Query<&mut TransformControl>,
) {
    for event in projection_events.read() {
        for plane in query_planes.iter() {
            if let Ok(mut controls) = query_controls.get_mut(plane.controls) {
                controls.camera = event.camera;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use bevy::ecs::system::RunSystemOnce;

    use super::*;
    use crate::{
        components::{
            ArrowBoundingBox, CameraControls, ClippingPlaneCallbacks, ClippingPlaneMesh,
            GizmoAxis, TransformControlHandle, TransformSpace,
        },
        resources::ProjectionMode,
    };

    #[derive(Resource, Default)]
    struct DragCounts {
        start: u32,
        end: u32,
    }

    fn count_start_drag(mut counts: ResMut<DragCounts>) {
        counts.start += 1;
    }

    fn count_end_drag(mut counts: ResMut<DragCounts>) {
        counts.end += 1;
    }

    fn test_app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .init_resource::<Assets<Mesh>>()
            .init_resource::<Assets<StandardMaterial>>()
            .init_resource::<DragCounts>()
            .add_plugins(ClippingPlanePlugin);

        let perspective = app.world_mut().spawn(CameraControls::default()).id();
        let orthographic = app.world_mut().spawn(CameraControls::default()).id();
        app.insert_resource(ViewerCameras::new(perspective, orthographic));
        app
    }

    fn spawn_plane(app: &mut App, origin: Vec3, normal: Vec3) -> Entity {
        let on_start_drag = app.world_mut().register_system(count_start_drag);
        let on_end_drag = app.world_mut().register_system(count_end_drag);
        app.world_mut()
            .run_system_once(move |mut context: ViewerContext| {
                ClippingPlane::spawn(
                    &mut context,
                    origin,
                    normal,
                    ClippingPlaneCallbacks::new(on_start_drag, on_end_drag),
                    10.0,
                )
            })
            .unwrap()
    }

    fn clipping_plane(app: &App, entity: Entity) -> ClippingPlane {
        app.world().get::<ClippingPlane>(entity).unwrap().clone()
    }

    fn equation(app: &App, entity: Entity) -> ClipPlane {
        *app.world()
            .resource::<ClippingPlanes>()
            .get(entity)
            .unwrap()
    }

    fn camera_controls_enabled(app: &App) -> Vec<bool> {
        let cameras = *app.world().resource::<ViewerCameras>();
        cameras
            .iter()
            .map(|camera| app.world().get::<CameraControls>(camera).unwrap().enabled)
            .collect()
    }

    #[test]
    fn test_plane_construction() {
        let mut app = test_app();
        let entity = spawn_plane(&mut app, Vec3::ZERO, Vec3::Y);
        let plane = clipping_plane(&app, entity);
        let equation = equation(&app, entity);

        assert_eq!(equation.normal, Vec3::Y);
        assert_eq!(equation.constant, 0.0);
        assert!(equation.contains_point(plane.origin, 1e-6));
        assert!(plane.visible);
        assert!(plane.active);
        assert!(!plane.dragging);
        assert_eq!(plane.plane_size, 10.0);

        let world = app.world();
        assert_eq!(world.resource::<ClippingPlanes>().len(), 1);

        // Helper sits at the origin under the scene root, its +Z facing the normal
        let helper_transform = world.get::<Transform>(plane.helper).unwrap();
        assert_eq!(helper_transform.translation, Vec3::ZERO);
        assert!((helper_transform.rotation * Vec3::Z).abs_diff_eq(Vec3::Y, 1e-6));
        let scene = world.resource::<ViewerScene>().root;
        let scene_children = world.get::<Children>(scene).unwrap();
        assert!(scene_children.contains(&plane.helper));
        assert!(scene_children.contains(&plane.controls));

        assert!(world.get::<ClippingPlaneMesh>(plane.plane_mesh).is_some());
        assert_eq!(
            world.get::<ChildOf>(plane.plane_mesh).map(|c| c.parent()),
            Some(plane.helper)
        );

        let controls = world.get::<TransformControl>(plane.controls).unwrap();
        let cameras = world.resource::<ViewerCameras>();
        assert_eq!(controls.object, Some(plane.helper));
        assert_eq!(controls.camera, cameras.perspective);
        assert!(!controls.show_x);
        assert!(!controls.show_y);
        assert!(controls.show_z);
        assert_eq!(controls.space, TransformSpace::Local);

        // The hit volume hangs off the Z arrow and is never drawn
        let bounding_box = world
            .get::<ArrowBoundingBox>(plane.arrow_bounding_box)
            .unwrap();
        assert_eq!(bounding_box.radius, 0.18);
        assert_eq!(bounding_box.height, 1.2);
        assert_eq!(
            world.get::<Visibility>(plane.arrow_bounding_box),
            Some(&Visibility::Hidden)
        );
        let arrow = world
            .get::<ChildOf>(plane.arrow_bounding_box)
            .unwrap()
            .parent();
        assert_eq!(
            world.get::<TransformControlHandle>(arrow).map(|h| h.axis),
            Some(GizmoAxis::Z)
        );
    }

    #[test]
    fn test_change_recomputes_plane_through_helper() {
        let mut app = test_app();
        let entity = spawn_plane(&mut app, Vec3::ZERO, Vec3::Y);
        let plane = clipping_plane(&app, entity);

        app.world_mut()
            .get_mut::<Transform>(plane.helper)
            .unwrap()
            .translation = Vec3::new(0.0, 5.0, 0.0);
        app.world_mut().write_message(TransformControlChangeEvent {
            control: plane.controls,
        });
        app.update();

        let plane = clipping_plane(&app, entity);
        let equation = equation(&app, entity);
        assert_eq!(equation.normal, Vec3::Y);
        assert_eq!(equation.constant, -5.0);
        assert!(equation.contains_point(Vec3::new(3.0, 5.0, -1.0), 1e-6));
        assert_eq!(plane.normal, Vec3::Y);
        assert_eq!(plane.origin, Vec3::ZERO);
    }

    #[test]
    fn test_change_from_other_control_is_ignored() {
        let mut app = test_app();
        let first = spawn_plane(&mut app, Vec3::ZERO, Vec3::Y);
        let second = spawn_plane(&mut app, Vec3::ZERO, Vec3::X);
        let first_plane = clipping_plane(&app, first);
        let second_plane = clipping_plane(&app, second);

        app.world_mut()
            .get_mut::<Transform>(first_plane.helper)
            .unwrap()
            .translation = Vec3::new(0.0, 2.0, 0.0);
        app.world_mut()
            .get_mut::<Transform>(second_plane.helper)
            .unwrap()
            .translation = Vec3::new(4.0, 0.0, 0.0);
        app.world_mut().write_message(TransformControlChangeEvent {
            control: second_plane.controls,
        });
        app.update();

        assert_eq!(equation(&app, first).constant, 0.0);
        assert_eq!(equation(&app, second).constant, -4.0);
    }

    #[test]
    fn test_set_visibility() {
        let mut app = test_app();
        let entity = spawn_plane(&mut app, Vec3::ZERO, Vec3::Y);
        let plane = clipping_plane(&app, entity);
        let before = equation(&app, entity);

        app.world_mut().write_message(ClippingPlaneVisibilityEvent {
            plane: Some(entity),
            visible: false,
        });
        app.update();

        let hidden = clipping_plane(&app, entity);
        assert!(!hidden.visible);
        assert_eq!(
            app.world().get::<Visibility>(plane.helper),
            Some(&Visibility::Hidden)
        );
        assert_eq!(
            app.world().get::<Visibility>(plane.controls),
            Some(&Visibility::Hidden)
        );
        assert_eq!(equation(&app, entity), before);
        assert!(app.world().get_entity(plane.plane_mesh).is_ok());

        app.world_mut().write_message(ClippingPlaneVisibilityEvent {
            plane: None,
            visible: true,
        });
        app.update();

        let shown = clipping_plane(&app, entity);
        assert!(shown.visible);
        assert_eq!(
            app.world().get::<Visibility>(plane.helper),
            Some(&Visibility::Inherited)
        );
        assert_eq!(
            app.world().get::<Visibility>(plane.controls),
            Some(&Visibility::Inherited)
        );
        assert_eq!(equation(&app, entity), before);
    }

    #[test]
    fn test_dragging_changed_runs_callbacks_and_toggles_camera() {
        let mut app = test_app();
        let entity = spawn_plane(&mut app, Vec3::ZERO, Vec3::Y);
        let controls = clipping_plane(&app, entity).controls;

        app.world_mut().write_message(DraggingChangedEvent {
            control: controls,
            value: true,
        });
        app.update();

        {
            let counts = app.world().resource::<DragCounts>();
            assert_eq!(counts.start, 1);
            assert_eq!(counts.end, 0);
        }
        assert!(!clipping_plane(&app, entity).visible);
        assert_eq!(camera_controls_enabled(&app), vec![false, false]);

        app.world_mut().write_message(DraggingChangedEvent {
            control: controls,
            value: false,
        });
        app.update();

        let counts = app.world().resource::<DragCounts>();
        assert_eq!(counts.start, 1);
        assert_eq!(counts.end, 1);
        assert!(clipping_plane(&app, entity).visible);
        assert_eq!(camera_controls_enabled(&app), vec![true, true]);
    }

    #[test]
    fn test_remove_from_scene() {
        let mut app = test_app();
        let entity = spawn_plane(&mut app, Vec3::ZERO, Vec3::Y);
        let plane = clipping_plane(&app, entity);

        app.world_mut()
            .write_message(RemoveClippingPlaneEvent { plane: entity });
        app.update();

        let world = app.world();
        let scene = world.resource::<ViewerScene>().root;
        let still_in_scene = world
            .get::<Children>(scene)
            .map_or(false, |children| {
                children.contains(&plane.helper) || children.contains(&plane.controls)
            });
        assert!(!still_in_scene);
        assert!(world.get_entity(plane.helper).is_err());
        assert!(world.get_entity(plane.plane_mesh).is_err());
        assert!(world.get_entity(plane.controls).is_err());
        assert!(world.get_entity(plane.arrow_bounding_box).is_err());
        assert!(world.get_entity(entity).is_err());
        assert!(world.resource::<ClippingPlanes>().is_empty());
        assert_eq!(world.resource::<DragCounts>().end, 0);
    }

    #[test]
    fn test_remove_while_dragging_restores_camera_controls() {
        let mut app = test_app();
        let entity = spawn_plane(&mut app, Vec3::ZERO, Vec3::Y);
        let controls = clipping_plane(&app, entity).controls;

        app.world_mut().write_message(DraggingChangedEvent {
            control: controls,
            value: true,
        });
        app.update();
        assert!(clipping_plane(&app, entity).dragging);
        assert_eq!(camera_controls_enabled(&app), vec![false, false]);

        // Removed before the control reports the release
        app.world_mut()
            .write_message(RemoveClippingPlaneEvent { plane: entity });
        app.world_mut()
            .write_message(RemoveClippingPlaneEvent { plane: entity });
        for _ in 0..3 {
            app.update();
        }

        assert_eq!(camera_controls_enabled(&app), vec![true, true]);
        let counts = app.world().resource::<DragCounts>();
        assert_eq!(counts.start, 1);
        assert_eq!(counts.end, 1);
        assert!(app.world().get_entity(entity).is_err());
    }

    #[test]
    fn test_remove_twice_is_harmless() {
        let mut app = test_app();
        let keep = spawn_plane(&mut app, Vec3::ZERO, Vec3::X);
        let entity = spawn_plane(&mut app, Vec3::ZERO, Vec3::Y);

        app.world_mut()
            .write_message(RemoveClippingPlaneEvent { plane: entity });
        app.world_mut()
            .write_message(RemoveClippingPlaneEvent { plane: entity });
        app.update();
        app.world_mut()
            .write_message(RemoveClippingPlaneEvent { plane: entity });
        app.update();

        let clipping_planes = app.world().resource::<ClippingPlanes>();
        assert_eq!(clipping_planes.len(), 1);
        assert!(clipping_planes.contains(keep));
    }

    #[test]
    fn test_projection_change_repoints_controls() {
        let mut app = test_app();
        let entity = spawn_plane(&mut app, Vec3::ZERO, Vec3::Y);
        let controls = clipping_plane(&app, entity).controls;
        let orthographic = app.world().resource::<ViewerCameras>().orthographic;

        app.world_mut().write_message(ProjectionChangedEvent {
            camera: orthographic,
            mode: ProjectionMode::Orthographic,
        });
        app.update();

        assert_eq!(
            app.world().get::<TransformControl>(controls).unwrap().camera,
            orthographic
        );
    }

    #[test]
    fn test_spawn_event_uses_configured_size() {
        let mut app = test_app();
        app.world_mut()
            .write_message(SpawnClippingPlaneEvent::new(Vec3::new(1.0, 2.0, 3.0), Vec3::X));
        app.world_mut().write_message(
            SpawnClippingPlaneEvent::new(Vec3::ZERO, Vec3::Z).with_plane_size(3.0),
        );
        app.update();

        let default_size = app.world().resource::<ClippingConfig>().plane_size;
        let world = app.world_mut();
        let mut sizes: Vec<f32> = world
            .query::<&ClippingPlane>()
            .iter(world)
            .map(|plane| plane.plane_size)
            .collect();
        sizes.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert_eq!(sizes.len(), 2);
        assert!(sizes.contains(&3.0));
        assert!(sizes.contains(&default_size));

        let clipping_planes = world.resource::<ClippingPlanes>();
        assert_eq!(clipping_planes.len(), 2);
        let (_, first) = clipping_planes.iter().next().unwrap();
        assert_eq!(first.normal, Vec3::X);
        assert_eq!(first.constant, -1.0);
    }
}
