use bevy::prelude::*;

use crate::components::ClippingPlaneCallbacks;

/// Drag callbacks handed to every clipping plane the viewer creates
#[derive(Resource, Clone, Copy, Debug)]
pub struct ViewerDragCallbacks(pub ClippingPlaneCallbacks);

/// Whether the user is dragging a clipping plane right now
#[derive(Resource, Default, Debug)]
pub struct PlaneDragStatus {
    pub dragging: bool,
    pub completed_drags: u32,
}
