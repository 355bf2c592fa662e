use bevy::prelude::*;

use crate::components::ClippingPlaneCallbacks;

/// Request to create a new clipping plane
#[derive(Message, Clone, Debug)]
pub struct SpawnClippingPlaneEvent {
    pub origin: Vec3,
    pub normal: Vec3,
    /// Side length of the visible quad, `None` uses the configured default
    pub plane_size: Option<f32>,
    pub callbacks: ClippingPlaneCallbacks,
}

impl SpawnClippingPlaneEvent {
    pub fn new(origin: Vec3, normal: Vec3) -> Self {
        Self {
            origin,
            normal,
            plane_size: None,
            callbacks: ClippingPlaneCallbacks::default(),
        }
    }

    pub fn with_plane_size(mut self, plane_size: f32) -> Self {
        self.plane_size = Some(plane_size);
        self
    }

    pub fn with_callbacks(mut self, callbacks: ClippingPlaneCallbacks) -> Self {
        self.callbacks = callbacks;
        self
    }
}

/// Request to remove a clipping plane from the scene and despawn it
#[derive(Message, Clone, Debug)]
pub struct RemoveClippingPlaneEvent {
    /// The clipping plane entity
    pub plane: Entity,
}

/// Request to show or hide clipping planes
#[derive(Message, Clone, Debug)]
pub struct ClippingPlaneVisibilityEvent {
    /// A single clipping plane, or every plane when `None`
    pub plane: Option<Entity>,
    pub visible: bool,
}
