//! Keyboard Shortcuts System for clipping planes
//!
//! - Delete: Remove the most recently created clipping plane
//! - H: Hide all clipping planes, or show them all if none is visible
//! - Ctrl+X / Ctrl+Y / Ctrl+Z: Add a clipping plane facing that axis

use bevy::prelude::*;
use bevy_egui::EguiContexts;

use crate::{
    components::ClippingPlane,
    events::{ClippingPlaneVisibilityEvent, RemoveClippingPlaneEvent, SpawnClippingPlaneEvent},
    resources::{ClippingPlanes, ViewerDragCallbacks},
};

#[derive(Debug, Clone, PartialEq)]
pub enum ShortcutAction {
    Remove(Entity),
    SetAllVisible(bool),
    Add(Vec3),
}

/// Actions requested by the keys pressed this frame
pub fn shortcut_actions(
    keyboard: &ButtonInput<KeyCode>,
    clipping_planes: &ClippingPlanes,
    any_plane_visible: bool,
) -> Vec<ShortcutAction> {
    let mut actions = Vec::new();

    if keyboard.just_pressed(KeyCode::Delete) {
        if let Some(last) = clipping_planes.last() {
            actions.push(ShortcutAction::Remove(last));
        }
    }

    if keyboard.just_pressed(KeyCode::KeyH) && !clipping_planes.is_empty() {
        actions.push(ShortcutAction::SetAllVisible(!any_plane_visible));
    }

    if is_ctrl_pressed(keyboard) {
        for (key, normal) in [
            (KeyCode::KeyX, Vec3::X),
            (KeyCode::KeyY, Vec3::Y),
            (KeyCode::KeyZ, Vec3::Z),
        ] {
            if keyboard.just_pressed(key) {
                actions.push(ShortcutAction::Add(normal));
            }
        }
    }

    actions
}

/// Check if Ctrl is pressed (either left or right)
fn is_ctrl_pressed(keyboard: &ButtonInput<KeyCode>) -> bool {
    keyboard.pressed(KeyCode::ControlLeft) || keyboard.pressed(KeyCode::ControlRight)
}

pub fn clipping_plane_shortcuts_system(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut egui_contexts: EguiContexts,
    clipping_planes: Res<ClippingPlanes>,
    drag_callbacks: Option<Res<ViewerDragCallbacks>>,
    query_planes: Query<&ClippingPlane>,
    mut spawn_events: MessageWriter<SpawnClippingPlaneEvent>,
    mut remove_events: MessageWriter<RemoveClippingPlaneEvent>,
    mut visibility_events: MessageWriter<ClippingPlaneVisibilityEvent>,
) {
    let keyboard_over_ui = egui_contexts
        .ctx_mut()
        .map_or(false, |ctx| ctx.wants_keyboard_input());
    if keyboard_over_ui {
        return;
    }

    let any_plane_visible = query_planes.iter().any(|plane| plane.visible);
    for action in shortcut_actions(&keyboard, &clipping_planes, any_plane_visible) {
        log::info!("[KeyboardShortcuts] {:?}", action);
        match action {
            ShortcutAction::Remove(plane) => {
                remove_events.write(RemoveClippingPlaneEvent { plane });
            }
            ShortcutAction::SetAllVisible(visible) => {
                visibility_events.write(ClippingPlaneVisibilityEvent {
                    plane: None,
                    visible,
                });
            }
            ShortcutAction::Add(normal) => {
                let callbacks = drag_callbacks
                    .as_ref()
                    .map(|callbacks| callbacks.0)
                    .unwrap_or_default();
                spawn_events.write(
                    SpawnClippingPlaneEvent::new(Vec3::ZERO, normal).with_callbacks(callbacks),
                );
            }
        }
    }
}
