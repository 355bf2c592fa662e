//! Viewer Setup Systems
//!
//! Startup systems creating the viewer cameras, a small demo scene under the
//! scene root and the configured initial clipping planes.

use bevy::prelude::*;

use crate::{
    components::{CameraControls, ClippingPlaneCallbacks},
    events::SpawnClippingPlaneEvent,
    resources::{PlaneDragStatus, ViewerCameras, ViewerDragCallbacks, ViewerScene},
    systems::{orbit_camera_system, projection_toggle_system, OrbitCamera},
    CameraConfig, InitialClippingPlanes,
};

/// Plugin for the viewer's orbit cameras and projection toggle
pub struct ViewerCameraPlugin;

impl Plugin for ViewerCameraPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CameraConfig>().add_systems(
            Update,
            (projection_toggle_system, orbit_camera_system)
                .chain()
                .run_if(resource_exists::<ViewerCameras>),
        );
    }
}

fn orbit_camera_from_config(config: &CameraConfig) -> OrbitCamera {
    OrbitCamera::new(
        Vec3::from(config.focus),
        config.distance,
        config.yaw_degrees,
        config.pitch_degrees,
    )
    .with_limits(config.min_distance, config.max_distance)
    .with_sensitivity(config.sensitivity)
}

pub fn spawn_viewer_cameras_system(mut commands: Commands, camera_config: Res<CameraConfig>) {
    let mut perspective_orbit = orbit_camera_from_config(&camera_config);
    let perspective_transform = perspective_orbit.calculate_transform(0.0);
    let perspective = commands
        .spawn((
            Name::new("Perspective Camera"),
            Camera3d::default(),
            Camera {
                is_active: true,
                ..default()
            },
            Projection::Perspective(PerspectiveProjection {
                fov: camera_config.fov_degrees.to_radians(),
                ..default()
            }),
            perspective_transform,
            CameraControls::default(),
            perspective_orbit,
        ))
        .id();

    let mut orthographic_orbit = orbit_camera_from_config(&camera_config);
    let orthographic_transform = orthographic_orbit.calculate_transform(0.0);
    let orthographic = commands
        .spawn((
            Name::new("Orthographic Camera"),
            Camera3d::default(),
            Camera {
                is_active: false,
                ..default()
            },
            Projection::Orthographic(OrthographicProjection::default_3d()),
            orthographic_transform,
            CameraControls::default(),
            orthographic_orbit,
        ))
        .id();

    log::info!(
        "[ViewerSetup] Spawned cameras perspective {:?} orthographic {:?}",
        perspective,
        orthographic
    );
    commands.insert_resource(ViewerCameras::new(perspective, orthographic));
}

/// A few boxes and a light so there is something to cut
pub fn spawn_demo_scene_system(
    mut commands: Commands,
    scene: Res<ViewerScene>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let cube = meshes.add(Cuboid::new(2.0, 2.0, 2.0));
    let slab = meshes.add(Cuboid::new(8.0, 0.5, 8.0));

    commands.spawn((
        Name::new("Ground"),
        Mesh3d(slab),
        MeshMaterial3d(materials.add(Color::srgb(0.35, 0.35, 0.4))),
        Transform::from_xyz(0.0, -0.25, 0.0),
        ChildOf(scene.root),
    ));

    for (index, (position, color)) in [
        (Vec3::new(-2.5, 1.0, -2.5), Color::srgb(0.8, 0.2, 0.2)),
        (Vec3::new(2.5, 1.0, -2.5), Color::srgb(0.2, 0.8, 0.2)),
        (Vec3::new(0.0, 1.0, 2.5), Color::srgb(0.2, 0.3, 0.9)),
        (Vec3::new(0.0, 3.0, 0.0), Color::srgb(0.9, 0.6, 0.1)),
    ]
    .into_iter()
    .enumerate()
    {
        commands.spawn((
            Name::new(format!("Box {}", index)),
            Mesh3d(cube.clone()),
            MeshMaterial3d(materials.add(color)),
            Transform::from_translation(position),
            ChildOf(scene.root),
        ));
    }

    commands.spawn((
        Name::new("Sun"),
        DirectionalLight {
            illuminance: 8000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(4.0, 10.0, 6.0).looking_at(Vec3::ZERO, Vec3::Y),
        ChildOf(scene.root),
    ));
}

fn plane_drag_started_system(mut status: ResMut<PlaneDragStatus>) {
    status.dragging = true;
    log::debug!("[ViewerSetup] Plane drag started");
}

fn plane_drag_ended_system(mut status: ResMut<PlaneDragStatus>) {
    status.dragging = false;
    status.completed_drags += 1;
    log::debug!(
        "[ViewerSetup] Plane drag ended, {} drags so far",
        status.completed_drags
    );
}

pub fn register_drag_callbacks_system(world: &mut World) {
    world.init_resource::<PlaneDragStatus>();
    let on_start_drag = world.register_system(plane_drag_started_system);
    let on_end_drag = world.register_system(plane_drag_ended_system);
    world.insert_resource(ViewerDragCallbacks(ClippingPlaneCallbacks::new(
        on_start_drag,
        on_end_drag,
    )));
}

pub fn spawn_initial_clipping_planes_system(
    initial_planes: Option<Res<InitialClippingPlanes>>,
    drag_callbacks: Option<Res<ViewerDragCallbacks>>,
    mut spawn_events: MessageWriter<SpawnClippingPlaneEvent>,
) {
    let Some(initial_planes) = initial_planes else {
        return;
    };
    let callbacks = drag_callbacks.map(|callbacks| callbacks.0).unwrap_or_default();

    for plane in initial_planes.0.iter() {
        let mut event =
            SpawnClippingPlaneEvent::new(Vec3::from(plane.origin), Vec3::from(plane.normal))
                .with_callbacks(callbacks);
        if let Some(size) = plane.size {
            event = event.with_plane_size(size);
        }
        spawn_events.write(event);
    }

    log::info!(
        "[ViewerSetup] Requested {} initial clipping planes",
        initial_planes.0.len()
    );
}
