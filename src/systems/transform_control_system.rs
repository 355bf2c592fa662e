//! Transform Control Systems
//!
//! Keeps transform controls on top of their attached object, picks handles
//! under the pointer, drags the attached object along the grabbed axis and
//! draws the handles.

use bevy::prelude::*;
use bevy_egui::EguiContexts;

use crate::{
    components::{
        ArrowBoundingBox, GizmoAxis, TransformControl, TransformControlDrag,
        TransformControlHandle, TransformSpace,
    },
    events::{DraggingChangedEvent, TransformControlChangeEvent},
    math::closest_line_parameter,
};

const HOVER_COLOR: Color = Color::srgb(1.0, 1.0, 0.0);

#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct TransformControlSystems;

/// Plugin for transform control systems
pub struct TransformControlPlugin;

impl Plugin for TransformControlPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<TransformControlChangeEvent>()
            .add_message::<DraggingChangedEvent>()
            .add_systems(
                Update,
                (
                    transform_control_follow_system,
                    transform_control_pointer_system,
                    transform_control_drag_system,
                    transform_control_pick_system,
                    draw_transform_control_system,
                )
                    .chain()
                    .in_set(TransformControlSystems),
            );
    }
}

/// Uniform scale keeping the handles at a roughly constant size on screen
pub fn handle_scale(projection: &Projection, camera_position: Vec3, position: Vec3, size: f32) -> f32 {
    let factor = match projection {
        Projection::Perspective(perspective) => {
            camera_position.distance(position) * (1.9 * (perspective.fov / 2.0).tan()).min(7.0)
        }
        Projection::Orthographic(orthographic) => orthographic.area.height(),
        _ => 1.0,
    };
    factor * size / 7.0
}

/// Ray distance to a hit volume, `hit` receives the ray in the volume's local space
fn hit_distance(
    ray: Ray3d,
    transform: &GlobalTransform,
    hit: impl Fn(Vec3, Vec3) -> Option<f32>,
) -> Option<f32> {
    let affine = transform.affine();
    let inverse = affine.inverse();
    let local_origin = inverse.transform_point3(ray.origin);
    let local_direction = inverse.transform_vector3(*ray.direction);
    let t = hit(local_origin, local_direction)?;
    let world_hit = affine.transform_point3(local_origin + local_direction * t);
    Some(ray.origin.distance(world_hit))
}

fn pointer_ray(
    control: &TransformControl,
    query_cameras: &Query<(&Camera, &GlobalTransform)>,
    query_windows: &Query<&Window>,
) -> Option<Ray3d> {
    let window = query_windows.get(control.dom_element?).ok()?;
    let cursor_position = window.cursor_position()?;
    let (camera, camera_transform) = query_cameras.get(control.camera).ok()?;
    camera
        .viewport_to_world(camera_transform, cursor_position)
        .ok()
}

/// Cast each control's pointer ray, a drag keeps its ray while over the UI
pub fn transform_control_pointer_system(
    mut query_controls: Query<&mut TransformControl>,
    query_cameras: Query<(&Camera, &GlobalTransform)>,
    query_windows: Query<&Window>,
    mut egui_contexts: EguiContexts,
) {
    let pointer_over_ui = egui_contexts
        .ctx_mut()
        .map_or(false, |ctx| ctx.wants_pointer_input() || ctx.is_pointer_over_area());

    for mut control in query_controls.iter_mut() {
        let ray = if pointer_over_ui && !control.dragging {
            None
        } else {
            pointer_ray(&control, &query_cameras, &query_windows)
        };
        if control.pointer_ray != ray {
            control.pointer_ray = ray;
        }
    }
}

pub fn transform_control_follow_system(
    mut query_controls: Query<(&TransformControl, &mut Transform)>,
    query_global_transforms: Query<&GlobalTransform>,
    query_projections: Query<&Projection>,
) {
    for (control, mut transform) in query_controls.iter_mut() {
        let Some(object) = control.object else {
            continue;
        };
        let Ok(object_transform) = query_global_transforms.get(object) else {
            continue;
        };

        let (_, rotation, translation) = object_transform.to_scale_rotation_translation();
        transform.translation = translation;
        transform.rotation = match control.space {
            TransformSpace::Local => rotation,
            TransformSpace::World => Quat::IDENTITY,
        };

        let scale = match (
            query_global_transforms.get(control.camera),
            query_projections.get(control.camera),
        ) {
            (Ok(camera_transform), Ok(projection)) => handle_scale(
                projection,
                camera_transform.translation(),
                translation,
                control.size,
            ),
            _ => control.size,
        };
        transform.scale = Vec3::splat(scale);
    }
}

pub fn transform_control_drag_system(
    mut query_controls: Query<(Entity, &mut TransformControl)>,
    mut query_objects: Query<&mut Transform, Without<TransformControl>>,
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    mut change_events: MessageWriter<TransformControlChangeEvent>,
    mut dragging_events: MessageWriter<DraggingChangedEvent>,
) {
    for (entity, mut control) in query_controls.iter_mut() {
        if !control.dragging {
            continue;
        }

        if !mouse_buttons.pressed(MouseButton::Left) {
            control.dragging = false;
            control.drag = None;
            dragging_events.write(DraggingChangedEvent {
                control: entity,
                value: false,
            });
            log::debug!("[TransformControl] {:?} drag ended", entity);
            continue;
        }

        let (Some(drag), Some(object)) = (control.drag, control.object) else {
            continue;
        };
        let Some(ray) = control.pointer_ray else {
            continue;
        };
        let Some(parameter) = closest_line_parameter(
            ray.origin,
            *ray.direction,
            drag.axis_origin,
            drag.axis_direction,
        ) else {
            continue;
        };
        let Ok(mut object_transform) = query_objects.get_mut(object) else {
            continue;
        };

        let translation = drag.translation_at(parameter);
        if object_transform.translation != translation {
            object_transform.translation = translation;
            change_events.write(TransformControlChangeEvent { control: entity });
        }
    }
}

pub fn transform_control_pick_system(
    mut query_controls: Query<(
        Entity,
        &mut TransformControl,
        &GlobalTransform,
        &Visibility,
        &Children,
    )>,
    query_handles: Query<(&TransformControlHandle, &GlobalTransform, Option<&Children>)>,
    query_bounding_boxes: Query<(&ArrowBoundingBox, &GlobalTransform)>,
    query_objects: Query<&Transform, Without<TransformControl>>,
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    mut dragging_events: MessageWriter<DraggingChangedEvent>,
) {
    let mut nearest: Option<(Entity, GizmoAxis, f32)> = None;
    for (entity, control, _, visibility, children) in query_controls.iter() {
        if control.dragging || !control.enabled || *visibility == Visibility::Hidden {
            continue;
        }
        let Some(ray) = control.pointer_ray else {
            continue;
        };

        for &child in &**children {
            let Ok((handle, handle_transform, handle_children)) = query_handles.get(child)
            else {
                continue;
            };
            if !control.shows_axis(handle.axis) {
                continue;
            }

            let mut hits = vec![hit_distance(ray, handle_transform, |origin, direction| {
                handle.hit(origin, direction)
            })];
            if let Some(handle_children) = handle_children {
                for &volume in &**handle_children {
                    if let Ok((bounding_box, volume_transform)) =
                        query_bounding_boxes.get(volume)
                    {
                        hits.push(hit_distance(ray, volume_transform, |origin, direction| {
                            bounding_box.hit(origin, direction)
                        }));
                    }
                }
            }

            for distance in hits.into_iter().flatten() {
                if nearest.map_or(true, |(_, _, nearest_distance)| distance < nearest_distance) {
                    nearest = Some((entity, handle.axis, distance));
                }
            }
        }
    }

    // Hover highlight
    for (entity, mut control, _, _, _) in query_controls.iter_mut() {
        if control.dragging {
            continue;
        }
        let hovered = nearest
            .filter(|(hit_entity, _, _)| *hit_entity == entity)
            .map(|(_, axis, _)| axis);
        if control.axis != hovered {
            control.axis = hovered;
        }
    }

    if !mouse_buttons.just_pressed(MouseButton::Left) {
        return;
    }
    let Some((entity, axis, _)) = nearest else {
        return;
    };
    let Ok((_, mut control, control_transform, _, _)) = query_controls.get_mut(entity) else {
        return;
    };
    let Some(object) = control.object else {
        return;
    };
    let Ok(object_transform) = query_objects.get(object) else {
        return;
    };
    let Some(ray) = control.pointer_ray else {
        return;
    };

    let (_, rotation, axis_origin) = control_transform.to_scale_rotation_translation();
    let axis_direction = control.world_axis(axis, rotation);
    let Some(start_parameter) =
        closest_line_parameter(ray.origin, *ray.direction, axis_origin, axis_direction)
    else {
        return;
    };

    control.drag = Some(TransformControlDrag {
        axis,
        axis_origin,
        axis_direction,
        start_parameter,
        start_translation: object_transform.translation,
    });
    control.axis = Some(axis);
    control.dragging = true;
    dragging_events.write(DraggingChangedEvent {
        control: entity,
        value: true,
    });
    log::debug!(
        "[TransformControl] {:?} drag started on {} axis",
        entity,
        axis.display_name()
    );
}

pub fn draw_transform_control_system(
    mut gizmos: Gizmos,
    query_controls: Query<(&TransformControl, &GlobalTransform, &Visibility)>,
) {
    for (control, transform, visibility) in query_controls.iter() {
        if *visibility == Visibility::Hidden || control.object.is_none() {
            continue;
        }

        let (scale, rotation, position) = transform.to_scale_rotation_translation();
        for axis in GizmoAxis::ALL {
            if !control.shows_axis(axis) {
                continue;
            }

            let tip = position
                + control.world_axis(axis, rotation) * scale.x * TransformControlHandle::LENGTH;
            let color = if control.axis == Some(axis) {
                HOVER_COLOR
            } else {
                axis.color()
            };
            gizmos.arrow(position, tip, color);
        }
    }
}
