//! Viewer Systems

pub mod clipping_plane_system;
pub mod keyboard_shortcuts_system;
pub mod orbit_camera_system;
pub mod projection_system;
pub mod transform_control_system;
pub mod viewer_setup_system;

pub use clipping_plane_system::{
    clipping_plane_change_system, clipping_plane_dragging_system,
    clipping_plane_projection_system, clipping_plane_visibility_system,
    remove_clipping_plane_system, spawn_clipping_plane_system, ClippingPlanePlugin,
    ClippingPlaneSystems,
};
pub use keyboard_shortcuts_system::clipping_plane_shortcuts_system;
pub use orbit_camera_system::{orbit_camera_system, OrbitCamera};
pub use projection_system::{projection_toggle_system, switch_projection};
pub use transform_control_system::{
    draw_transform_control_system, transform_control_drag_system,
    transform_control_follow_system, transform_control_pick_system, TransformControlPlugin,
    TransformControlSystems,
};
pub use viewer_setup_system::{
    register_drag_callbacks_system, spawn_demo_scene_system,
    spawn_initial_clipping_planes_system, spawn_viewer_cameras_system, ViewerCameraPlugin,
};
