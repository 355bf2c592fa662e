//! Viewer Context
//!
//! The handle a viewer widget receives to reach the shared scene: the scene
//! root, the active camera, the window it takes pointer input from, the
//! camera navigation toggle and the active clip-plane list.

use bevy::{ecs::system::SystemParam, prelude::*, window::PrimaryWindow};

use crate::{
    components::CameraControls,
    math::ClipPlane,
    resources::{ClippingPlaneMaterials, ClippingPlanes, ViewerCameras, ViewerScene},
    ClippingConfig,
};

#[derive(SystemParam)]
pub struct ViewerContext<'w, 's> {
    pub commands: Commands<'w, 's>,
    pub meshes: ResMut<'w, Assets<Mesh>>,
    pub materials: Res<'w, ClippingPlaneMaterials>,
    pub settings: Res<'w, ClippingConfig>,
    scene: Res<'w, ViewerScene>,
    cameras: Res<'w, ViewerCameras>,
    clipping_planes: ResMut<'w, ClippingPlanes>,
    query_windows: Query<'w, 's, Entity, With<PrimaryWindow>>,
    query_camera_controls: Query<'w, 's, &'static mut CameraControls>,
}

impl ViewerContext<'_, '_> {
    /// Root entity of the scene graph
    pub fn scene(&self) -> Entity {
        self.scene.root
    }

    /// The active camera
    pub fn camera(&self) -> Entity {
        self.cameras.active()
    }

    /// The window pointer input is read from, if one is open
    pub fn dom_element(&self) -> Option<Entity> {
        self.query_windows.iter().next()
    }

    /// Enable or disable navigation on every viewer camera
    pub fn toggle_camera_controls(&mut self, enabled: bool) {
        for camera in self.cameras.iter() {
            if let Ok(mut controls) = self.query_camera_controls.get_mut(camera) {
                controls.enabled = enabled;
            }
        }
        log::debug!("[ViewerContext] Camera controls enabled: {}", enabled);
    }

    pub fn add_clipping_plane(&mut self, entity: Entity, plane: ClipPlane) {
        self.clipping_planes.add(entity, plane);
    }

    pub fn update_clipping_plane(&mut self, entity: Entity, plane: ClipPlane) -> bool {
        self.clipping_planes.update(entity, plane)
    }

    pub fn remove_clipping_plane(&mut self, entity: Entity) -> bool {
        self.clipping_planes.remove(entity)
    }
}
