//! Viewer UI Module
//!
//! egui panels drawn over the 3D viewport.

pub mod clipping_plane_panel;

use bevy::prelude::*;
use bevy_egui::EguiPrimaryContextPass;

use crate::resources::ViewerCameras;

pub use clipping_plane_panel::{
    clipping_plane_panel, clipping_plane_panel_system, PanelAction, PanelRow,
};

/// Plugin for the viewer UI systems
pub struct ViewerUiPlugin;

impl Plugin for ViewerUiPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            EguiPrimaryContextPass,
            clipping_plane_panel_system.run_if(resource_exists::<ViewerCameras>),
        );
    }
}
