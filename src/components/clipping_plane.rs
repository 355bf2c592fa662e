//! Clipping Plane Widget
//!
//! A clipping plane the user drags along its normal. Construction builds
//!
//! - a helper node at the plane origin whose local +Z faces the normal,
//! - the visible quad as a child of the helper,
//! - a transform control attached to the helper, showing only its Z arrow in
//!   local space, with an invisible cylinder under the arrow to make it easier
//!   to grab,
//!
//! and registers the plane equation in the active clip-plane list. The
//! reactive side lives in `systems::clipping_plane_system`.

use std::f32::consts::FRAC_PI_2;

use bevy::{ecs::system::SystemId, prelude::*};

use crate::{
    components::{GizmoAxis, TransformControl, TransformSpace},
    context::ViewerContext,
    math::{ray_cylinder_intersection, ClipPlane},
};

/// One-shot systems run when the user starts and stops dragging a plane
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClippingPlaneCallbacks {
    pub on_start_drag: Option<SystemId>,
    pub on_end_drag: Option<SystemId>,
}

impl ClippingPlaneCallbacks {
    pub fn new(on_start_drag: SystemId, on_end_drag: SystemId) -> Self {
        Self {
            on_start_drag: Some(on_start_drag),
            on_end_drag: Some(on_end_drag),
        }
    }
}

#[derive(Component, Debug, Clone)]
pub struct ClippingPlane {
    /// This clipping plane's own entity, the key in the clip-plane list
    /// holding its current equation
    pub entity: Entity,

    /// Normal given at construction, never changes
    pub normal: Vec3,

    /// Origin given at construction
    pub origin: Vec3,

    pub helper: Entity,
    pub plane_mesh: Entity,
    pub controls: Entity,
    pub arrow_bounding_box: Entity,

    pub plane_size: f32,

    pub visible: bool,
    pub active: bool,

    /// Set between the control's dragging-changed messages
    pub dragging: bool,

    pub callbacks: ClippingPlaneCallbacks,
}

impl ClippingPlane {
    pub fn spawn(
        context: &mut ViewerContext,
        origin: Vec3,
        normal: Vec3,
        callbacks: ClippingPlaneCallbacks,
        plane_size: f32,
    ) -> Entity {
        let entity = context.commands.spawn(Name::new("Clipping Plane")).id();
        let scene = context.scene();

        let plane_mesh_handle = context.meshes.add(Rectangle::new(plane_size, plane_size));
        let plane_material = context.materials.plane.clone();
        let helper = Self::create_helper(context, entity, scene, origin, normal);
        let plane_mesh = context
            .commands
            .spawn((
                Name::new("Clipping Plane Mesh"),
                ClippingPlaneMesh,
                Mesh3d(plane_mesh_handle),
                MeshMaterial3d(plane_material),
                Transform::default(),
                ChildOf(helper),
            ))
            .id();

        let (controls, arrow_bounding_box) = Self::new_transform_control(context, scene, helper);

        let equation = ClipPlane::from_normal_and_coplanar_point(normal, origin);
        context.add_clipping_plane(entity, equation);

        context.commands.entity(entity).insert(ClippingPlane {
            entity,
            normal,
            origin,
            helper,
            plane_mesh,
            controls,
            arrow_bounding_box,
            plane_size,
            visible: true,
            active: true,
            dragging: false,
            callbacks,
        });

        log::info!(
            "[ClippingPlane] Created plane {:?} at {:?} with normal {:?}",
            entity,
            origin,
            normal
        );

        entity
    }

    fn create_helper(
        context: &mut ViewerContext,
        plane: Entity,
        scene: Entity,
        origin: Vec3,
        normal: Vec3,
    ) -> Entity {
        // Local +Z faces the normal, which is also the quad's facing
        let facing = normal.try_normalize().unwrap_or(Vec3::Z);
        let rotation = Quat::from_rotation_arc(Vec3::Z, facing);

        context
            .commands
            .spawn((
                Name::new("Clipping Plane Helper"),
                ClippingPlaneHelper { plane },
                Transform::from_translation(origin).with_rotation(rotation),
                Visibility::default(),
                ChildOf(scene),
            ))
            .id()
    }

    fn new_transform_control(
        context: &mut ViewerContext,
        scene: Entity,
        helper: Entity,
    ) -> (Entity, Entity) {
        let mut controls = TransformControl::new(context.camera(), context.dom_element());
        controls.attach(helper);
        controls.show_x = false;
        controls.show_y = false;
        controls.set_space(TransformSpace::Local);
        controls.size = context.settings.gizmo_size;

        let entities = controls.spawn(&mut context.commands, scene);

        let bounding_box = ArrowBoundingBox {
            radius: context.settings.arrow_hit_radius,
            height: context.settings.arrow_hit_height,
        };
        let bounding_box_mesh = context
            .meshes
            .add(Cylinder::new(bounding_box.radius, bounding_box.height));
        let hidden_material = context.materials.hidden.clone();
        let arrow_bounding_box = context
            .commands
            .spawn((
                Name::new("Clipping Plane Arrow Bounding Box"),
                bounding_box,
                Mesh3d(bounding_box_mesh),
                MeshMaterial3d(hidden_material),
                Transform::from_rotation(Quat::from_rotation_x(FRAC_PI_2)),
                Visibility::Hidden,
                ChildOf(entities.handle(GizmoAxis::Z)),
            ))
            .id();

        (entities.control, arrow_bounding_box)
    }

    /// Show or hide the helper (and with it the plane quad) and the transform control
    pub fn set_visibility(&mut self, context: &mut ViewerContext, visible: bool) {
        self.visible = visible;
        let visibility = if visible {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
        context.commands.entity(self.helper).try_insert(visibility);
        context.commands.entity(self.controls).try_insert(visibility);
    }

    /// Despawn the helper and the transform control and deregister the plane equation
    ///
    /// A drag in progress is ended first: the control will never report the
    /// release, so camera navigation is restored and `on_end_drag` runs here.
    /// Calling this again on an already removed plane does nothing.
    pub fn remove_from_scene(&self, context: &mut ViewerContext) {
        context.commands.entity(self.helper).try_despawn();
        context.commands.entity(self.controls).try_despawn();
        if !context.remove_clipping_plane(self.entity) {
            return;
        }

        if self.dragging {
            context.toggle_camera_controls(true);
            if let Some(on_end_drag) = self.callbacks.on_end_drag {
                context.commands.run_system(on_end_drag);
            }
        }
        log::info!("[ClippingPlane] Removed plane {:?}", self.entity);
    }
}

/// Invisible anchor of a clipping plane, parent of the plane quad
#[derive(Component, Debug, Clone, Copy)]
pub struct ClippingPlaneHelper {
    /// The clipping plane entity
    pub plane: Entity,
}

/// Marker for the visible plane quad
#[derive(Component, Debug, Default)]
pub struct ClippingPlaneMesh;

/// Invisible cylinder enlarging the grab area of a transform control arrow
///
/// The cylinder runs along its local Y axis.
#[derive(Component, Debug, Clone, Copy)]
pub struct ArrowBoundingBox {
    pub radius: f32,
    pub height: f32,
}

impl ArrowBoundingBox {
    /// Ray parameter of the nearest hit, ray given in the bounding box's local space
    pub fn hit(&self, local_origin: Vec3, local_direction: Vec3) -> Option<f32> {
        ray_cylinder_intersection(local_origin, local_direction, self.radius, self.height / 2.0)
    }
}
