//! Clipping Plane Panel
//!
//! Lists the active clipping planes with their equation, a visibility toggle
//! and a remove button, plus buttons adding a plane facing each axis.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::{
    components::ClippingPlane,
    events::{ClippingPlaneVisibilityEvent, RemoveClippingPlaneEvent, SpawnClippingPlaneEvent},
    math::ClipPlane,
    resources::{
        ClippingPlanes, PlaneDragStatus, ProjectionMode, ViewerCameras, ViewerDragCallbacks,
    },
};

/// One line of the plane list
#[derive(Debug, Clone, Copy)]
pub struct PanelRow {
    pub entity: Entity,
    pub plane: ClipPlane,
    pub origin: Vec3,
    pub visible: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PanelAction {
    Add(Vec3),
    Remove(Entity),
    SetVisible(Entity, bool),
}

fn format_vec3(value: Vec3) -> String {
    format!("({:.2}, {:.2}, {:.2})", value.x, value.y, value.z)
}

/// Render the clipping plane window, returns what the user clicked
pub fn clipping_plane_panel(
    ctx: &egui::Context,
    rows: &[PanelRow],
    projection_mode: ProjectionMode,
    dragging: bool,
) -> Vec<PanelAction> {
    let mut actions = Vec::new();

    egui::Window::new("Clipping Planes")
        .default_pos([12.0, 12.0])
        .default_width(280.0)
        .resizable(false)
        .show(ctx, |ui| {
            ui.label(format!("Camera: {} (P to toggle)", projection_mode.display_name()));
            if dragging {
                ui.label(
                    egui::RichText::new("Dragging plane, camera locked")
                        .color(egui::Color32::YELLOW),
                );
            }
            ui.separator();

            ui.horizontal(|ui| {
                ui.label("Add plane:");
                for (label, normal) in [("X", Vec3::X), ("Y", Vec3::Y), ("Z", Vec3::Z)] {
                    if ui.button(label).clicked() {
                        actions.push(PanelAction::Add(normal));
                    }
                }
            });
            ui.separator();

            if rows.is_empty() {
                ui.label(egui::RichText::new("No clipping planes").italics());
                return;
            }

            for (index, row) in rows.iter().enumerate() {
                ui.horizontal(|ui| {
                    let mut visible = row.visible;
                    if ui.checkbox(&mut visible, format!("Plane {}", index)).changed() {
                        actions.push(PanelAction::SetVisible(row.entity, visible));
                    }
                    if ui.button("Remove").clicked() {
                        actions.push(PanelAction::Remove(row.entity));
                    }
                });
                ui.monospace(format!("origin {}", format_vec3(row.origin)));
                ui.monospace(format!(
                    "normal {} d {:.2}",
                    format_vec3(row.plane.normal),
                    row.plane.constant
                ));
            }

            ui.separator();
            ui.label(egui::RichText::new("Delete: remove last  H: hide/show all").small());
        });

    actions
}

pub fn clipping_plane_panel_system(
    mut contexts: EguiContexts,
    cameras: Res<ViewerCameras>,
    clipping_planes: Res<ClippingPlanes>,
    drag_status: Option<Res<PlaneDragStatus>>,
    drag_callbacks: Option<Res<ViewerDragCallbacks>>,
    query_planes: Query<&ClippingPlane>,
    mut spawn_events: MessageWriter<SpawnClippingPlaneEvent>,
    mut remove_events: MessageWriter<RemoveClippingPlaneEvent>,
    mut visibility_events: MessageWriter<ClippingPlaneVisibilityEvent>,
) {
    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };

    let rows: Vec<PanelRow> = clipping_planes
        .iter()
        .filter_map(|(entity, plane)| {
            let clipping_plane = query_planes.get(entity).ok()?;
            Some(PanelRow {
                entity,
                plane: *plane,
                origin: plane.project_point(clipping_plane.origin),
                visible: clipping_plane.visible,
            })
        })
        .collect();

    let dragging = drag_status.map_or(false, |status| status.dragging);
    let callbacks = drag_callbacks
        .map(|callbacks| callbacks.0)
        .unwrap_or_default();

    for action in clipping_plane_panel(ctx, &rows, cameras.mode, dragging) {
        log::info!("[ClippingPlanePanel] {:?}", action);
        match action {
            PanelAction::Add(normal) => {
                spawn_events.write(
                    SpawnClippingPlaneEvent::new(Vec3::ZERO, normal).with_callbacks(callbacks),
                );
            }
            PanelAction::Remove(plane) => {
                remove_events.write(RemoveClippingPlaneEvent { plane });
            }
            PanelAction::SetVisible(plane, visible) => {
                visibility_events.write(ClippingPlaneVisibilityEvent {
                    plane: Some(plane),
                    visible,
                });
            }
        }
    }
}
