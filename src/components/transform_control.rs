//! Transform Control Components
//!
//! A translate-only transform gizmo. The control entity follows the object it
//! is attached to and owns one handle child per axis. Handles are picked with
//! a thin cylinder along their axis, plus any extra hit volumes spawned as
//! their children.

use bevy::prelude::*;

use crate::math::ray_cylinder_intersection;

/// Axis of a transform control handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GizmoAxis {
    X,
    Y,
    Z,
}

impl GizmoAxis {
    pub const ALL: [GizmoAxis; 3] = [GizmoAxis::X, GizmoAxis::Y, GizmoAxis::Z];

    pub fn direction(self) -> Vec3 {
        match self {
            GizmoAxis::X => Vec3::X,
            GizmoAxis::Y => Vec3::Y,
            GizmoAxis::Z => Vec3::Z,
        }
    }

    pub fn color(self) -> Color {
        match self {
            GizmoAxis::X => Color::srgb(1.0, 0.0, 0.0),
            GizmoAxis::Y => Color::srgb(0.0, 1.0, 0.0),
            GizmoAxis::Z => Color::srgb(0.0, 0.0, 1.0),
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            GizmoAxis::X => "X",
            GizmoAxis::Y => "Y",
            GizmoAxis::Z => "Z",
        }
    }
}

/// Coordinate space the handles are aligned to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransformSpace {
    /// Handles follow the world axes
    #[default]
    World,
    /// Handles follow the attached object's rotation
    Local,
}

/// Drag in progress, captured when the pointer grabbed a handle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformControlDrag {
    pub axis: GizmoAxis,
    /// World space point the drag axis passes through
    pub axis_origin: Vec3,
    /// Normalized world space drag direction
    pub axis_direction: Vec3,
    /// Axis parameter under the pointer when the drag started
    pub start_parameter: f32,
    /// Translation of the attached object when the drag started
    pub start_translation: Vec3,
}

impl TransformControlDrag {
    /// Object translation for the pointer being over `parameter` on the drag axis
    pub fn translation_at(&self, parameter: f32) -> Vec3 {
        self.start_translation + self.axis_direction * (parameter - self.start_parameter)
    }
}

/// Component for transform control entities
#[derive(Component, Debug, Clone)]
pub struct TransformControl {
    /// The entity being moved by this control
    pub object: Option<Entity>,

    /// Camera used to cast pointer rays and size the handles
    pub camera: Entity,

    /// Window the control listens to for pointer input
    pub dom_element: Option<Entity>,

    pub show_x: bool,
    pub show_y: bool,
    pub show_z: bool,

    pub space: TransformSpace,

    /// Disabled controls are drawn but can not be grabbed
    pub enabled: bool,

    /// Handle size multiplier
    pub size: f32,

    /// Whether a handle is currently being dragged
    pub dragging: bool,

    /// Hovered or dragged axis
    pub axis: Option<GizmoAxis>,

    pub drag: Option<TransformControlDrag>,

    /// Pointer ray from `camera` this frame, `None` when the pointer is
    /// outside the window or over the UI
    pub pointer_ray: Option<Ray3d>,
}

impl TransformControl {
    pub fn new(camera: Entity, dom_element: Option<Entity>) -> Self {
        Self {
            object: None,
            camera,
            dom_element,
            show_x: true,
            show_y: true,
            show_z: true,
            space: TransformSpace::World,
            enabled: true,
            size: 1.0,
            dragging: false,
            axis: None,
            drag: None,
            pointer_ray: None,
        }
    }

    pub fn attach(&mut self, object: Entity) {
        self.object = Some(object);
    }

    pub fn set_space(&mut self, space: TransformSpace) {
        self.space = space;
    }

    pub fn shows_axis(&self, axis: GizmoAxis) -> bool {
        match axis {
            GizmoAxis::X => self.show_x,
            GizmoAxis::Y => self.show_y,
            GizmoAxis::Z => self.show_z,
        }
    }

    /// World space direction of a handle for a control rotated by `rotation`
    pub fn world_axis(&self, axis: GizmoAxis, rotation: Quat) -> Vec3 {
        match self.space {
            TransformSpace::World => axis.direction(),
            TransformSpace::Local => (rotation * axis.direction()).normalize_or_zero(),
        }
    }

    /// Spawn this control under `parent` together with one handle per axis
    pub fn spawn(self, commands: &mut Commands, parent: Entity) -> TransformControlEntities {
        let control = commands
            .spawn((
                Name::new("Transform Control"),
                self,
                Transform::default(),
                Visibility::default(),
                ChildOf(parent),
            ))
            .id();

        let handles = GizmoAxis::ALL.map(|axis| {
            let handle = commands
                .spawn((
                    Name::new(format!("Transform Control {} Handle", axis.display_name())),
                    TransformControlHandle { axis },
                    Transform::default(),
                    Visibility::default(),
                    ChildOf(control),
                ))
                .id();
            (axis, handle)
        });

        TransformControlEntities { control, handles }
    }
}

/// One translation arrow of a transform control
#[derive(Component, Debug, Clone, Copy)]
pub struct TransformControlHandle {
    pub axis: GizmoAxis,
}

impl TransformControlHandle {
    pub const HIT_RADIUS: f32 = 0.04;
    pub const LENGTH: f32 = 1.0;

    /// Ray parameter of the nearest hit on the arrow, ray given in handle local space
    pub fn hit(&self, local_origin: Vec3, local_direction: Vec3) -> Option<f32> {
        let direction = self.axis.direction();
        let to_y = Quat::from_rotation_arc(direction, Vec3::Y);
        let origin = to_y * (local_origin - direction * (Self::LENGTH / 2.0));
        ray_cylinder_intersection(
            origin,
            to_y * local_direction,
            Self::HIT_RADIUS,
            Self::LENGTH / 2.0,
        )
    }
}

/// Entities created by [`TransformControl::spawn`]
#[derive(Debug, Clone, Copy)]
pub struct TransformControlEntities {
    pub control: Entity,
    pub handles: [(GizmoAxis, Entity); 3],
}

impl TransformControlEntities {
    pub fn handle(&self, axis: GizmoAxis) -> Entity {
        self.handles
            .iter()
            .find(|(a, _)| *a == axis)
            .map(|(_, entity)| *entity)
            .unwrap_or(self.control)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_world_axis_follows_space() {
        let mut world = World::new();
        let camera = world.spawn_empty().id();
        let mut control = TransformControl::new(camera, None);
        let rotation = Quat::from_rotation_arc(Vec3::Z, Vec3::Y);

        assert_eq!(control.world_axis(GizmoAxis::Z, rotation), Vec3::Z);

        control.set_space(TransformSpace::Local);
        assert!(control
            .world_axis(GizmoAxis::Z, rotation)
            .abs_diff_eq(Vec3::Y, 1e-6));
    }

    #[test]
    fn test_handle_hit_along_axis() {
        let handle = TransformControlHandle { axis: GizmoAxis::Z };
        // Looking down at the middle of the Z arrow
        let t = handle.hit(Vec3::new(0.0, 10.0, 0.5), Vec3::NEG_Y).unwrap();
        assert!((t - (10.0 - TransformControlHandle::HIT_RADIUS)).abs() < 1e-4);
        // Past the arrow tip
        assert!(handle.hit(Vec3::new(0.0, 10.0, 1.5), Vec3::NEG_Y).is_none());
    }

    #[test]
    fn test_drag_translation() {
        let drag = TransformControlDrag {
            axis: GizmoAxis::Z,
            axis_origin: Vec3::ZERO,
            axis_direction: Vec3::Y,
            start_parameter: 1.0,
            start_translation: Vec3::new(2.0, 0.0, 0.0),
        };
        assert_eq!(drag.translation_at(6.0), Vec3::new(2.0, 5.0, 0.0));
    }
}
