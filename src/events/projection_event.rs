use bevy::prelude::*;

use crate::resources::ProjectionMode;

/// Sent after the viewer switched between its perspective and orthographic camera
#[derive(Message, Clone, Debug)]
pub struct ProjectionChangedEvent {
    /// The camera entity that is now active
    pub camera: Entity,
    pub mode: ProjectionMode,
}
