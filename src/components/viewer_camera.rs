use bevy::prelude::*;

/// Whether the camera's own navigation (orbit, pan, zoom) reacts to input
#[derive(Component, Clone, Copy, Debug)]
pub struct CameraControls {
    pub enabled: bool,
}

impl Default for CameraControls {
    fn default() -> Self {
        Self { enabled: true }
    }
}
