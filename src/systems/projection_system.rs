//! Projection Toggle System
//!
//! Switches the viewer between its perspective and orthographic camera. The
//! camera becoming active takes over the pose of the previous one.

use bevy::{prelude::*, window::PrimaryWindow};
use bevy_egui::EguiContexts;

use crate::{
    events::ProjectionChangedEvent,
    resources::{ProjectionMode, ViewerCameras},
    systems::OrbitCamera,
};

const DEFAULT_WINDOW_HEIGHT: f32 = 1080.0;

/// Orthographic scale (world units per pixel) matching the view height a
/// perspective camera with vertical `fov` has at `distance`
pub fn orthographic_scale(fov: f32, distance: f32, window_height: f32) -> f32 {
    2.0 * distance * (fov / 2.0).tan() / window_height.max(1.0)
}

pub fn projection_toggle_system(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut egui_ctx: EguiContexts,
    mut cameras: ResMut<ViewerCameras>,
    mut query_cameras: Query<(&mut Camera, &mut Transform, &mut OrbitCamera, &mut Projection)>,
    query_window: Query<&Window, With<PrimaryWindow>>,
    mut projection_events: MessageWriter<ProjectionChangedEvent>,
) {
    let keyboard_over_ui = egui_ctx
        .ctx_mut()
        .map_or(false, |ctx| ctx.wants_keyboard_input());
    if keyboard_over_ui || !keyboard.just_pressed(KeyCode::KeyP) {
        return;
    }

    let window_height = query_window
        .single()
        .map(|window| window.height())
        .unwrap_or(DEFAULT_WINDOW_HEIGHT);

    if let Some(camera) = switch_projection(&mut cameras, &mut query_cameras, window_height) {
        projection_events.write(ProjectionChangedEvent {
            camera,
            mode: cameras.mode,
        });
    }
}

/// Activate the other camera, returns the newly active camera entity
pub fn switch_projection(
    cameras: &mut ViewerCameras,
    query_cameras: &mut Query<(&mut Camera, &mut Transform, &mut OrbitCamera, &mut Projection)>,
    window_height: f32,
) -> Option<Entity> {
    let previous = cameras.active();
    let next_mode = cameras.mode.toggled();
    let next = cameras.camera(next_mode);

    let Ok(
        [(mut previous_camera, previous_transform, previous_orbit, previous_projection), (mut next_camera, mut next_transform, mut next_orbit, mut next_projection)],
    ) = query_cameras.get_many_mut([previous, next])
    else {
        log::warn!("[Projection] Viewer cameras are missing, projection not switched");
        return None;
    };

    let (yaw, pitch) = previous_orbit.yaw_pitch();
    next_orbit.reset(previous_orbit.focus, previous_orbit.distance, yaw, pitch);
    *next_transform = *previous_transform;

    if let (Projection::Perspective(perspective), Projection::Orthographic(orthographic)) =
        (&*previous_projection, &mut *next_projection)
    {
        orthographic.scale = orthographic_scale(perspective.fov, previous_orbit.distance, window_height);
    }

    previous_camera.is_active = false;
    next_camera.is_active = true;
    cameras.mode = next_mode;

    log::info!(
        "[Projection] Switched to {} camera {:?}",
        next_mode.display_name(),
        next
    );

    Some(next)
}

#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_PI_2;

    use bevy::ecs::system::RunSystemOnce;

    use super::*;

    #[test]
    fn test_orthographic_scale_matches_view_height() {
        // 90 degree fov at distance 5 covers 10 units vertically
        let scale = orthographic_scale(FRAC_PI_2, 5.0, 1000.0);
        assert!((scale * 1000.0 - 10.0).abs() < 1e-4);
    }

    #[test]
    fn test_switch_projection_copies_pose() {
        let mut world = World::new();
        let perspective = world
            .spawn((
                Camera::default(),
                Transform::from_xyz(1.0, 2.0, 3.0),
                OrbitCamera::new(Vec3::new(0.0, 1.0, 0.0), 12.0, 30.0, -20.0),
                Projection::Perspective(PerspectiveProjection::default()),
            ))
            .id();
        let orthographic = world
            .spawn((
                Camera {
                    is_active: false,
                    ..Default::default()
                },
                Transform::default(),
                OrbitCamera::new(Vec3::ZERO, 20.0, 0.0, 0.0),
                Projection::Orthographic(OrthographicProjection::default_3d()),
            ))
            .id();
        world.insert_resource(ViewerCameras::new(perspective, orthographic));

        let switched = world
            .run_system_once(
                |mut cameras: ResMut<ViewerCameras>,
                 mut query_cameras: Query<(
                    &mut Camera,
                    &mut Transform,
                    &mut OrbitCamera,
                    &mut Projection,
                )>| { switch_projection(&mut cameras, &mut query_cameras, 1000.0) },
            )
            .unwrap();

        assert_eq!(switched, Some(orthographic));
        assert_eq!(
            world.resource::<ViewerCameras>().mode,
            ProjectionMode::Orthographic
        );
        assert!(!world.get::<Camera>(perspective).unwrap().is_active);
        assert!(world.get::<Camera>(orthographic).unwrap().is_active);
        assert_eq!(
            world.get::<Transform>(orthographic).unwrap().translation,
            Vec3::new(1.0, 2.0, 3.0)
        );

        let orbit = world.get::<OrbitCamera>(orthographic).unwrap();
        assert_eq!(orbit.focus, Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(orbit.distance, 12.0);

        let Some(Projection::Orthographic(projection)) = world.get::<Projection>(orthographic)
        else {
            panic!("orthographic camera lost its projection");
        };
        let fov = PerspectiveProjection::default().fov;
        assert!((projection.scale - orthographic_scale(fov, 12.0, 1000.0)).abs() < 1e-6);
    }
}
