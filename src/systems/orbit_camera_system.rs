use bevy::{
    input::{
        mouse::{AccumulatedMouseMotion, AccumulatedMouseScroll, MouseScrollUnit},
        ButtonInput,
    },
    math::{Quat, Vec3},
    prelude::{Camera, Component, MouseButton, Projection, Query, Res, Time, Transform},
};
use bevy_egui::EguiContexts;
use dolly::prelude::{Arm, CameraRig, Position, RightHanded, Smooth, YawPitch};

use crate::components::CameraControls;

#[derive(Component)]
pub struct OrbitCamera {
    pub rig: CameraRig<RightHanded>,
    pub focus: Vec3,
    pub distance: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pub sensitivity: f32,
    pub current_distance: ExpSmoothed<f32>,
}

impl OrbitCamera {
    pub fn new(focus: Vec3, distance: f32, yaw_degrees: f32, pitch_degrees: f32) -> Self {
        Self {
            rig: Self::build_rig(focus, distance, yaw_degrees, pitch_degrees),
            focus,
            distance,
            min_distance: 1.0,
            max_distance: 1000.0,
            sensitivity: 0.1,
            current_distance: Default::default(),
        }
    }

    pub fn with_limits(mut self, min_distance: f32, max_distance: f32) -> Self {
        self.min_distance = min_distance;
        self.max_distance = max_distance;
        self.distance = self.distance.clamp(min_distance, max_distance);
        self
    }

    pub fn with_sensitivity(mut self, sensitivity: f32) -> Self {
        self.sensitivity = sensitivity;
        self
    }

    fn build_rig(
        focus: Vec3,
        distance: f32,
        yaw_degrees: f32,
        pitch_degrees: f32,
    ) -> CameraRig<RightHanded> {
        let position: mint::Point3<f32> = mint::Point3 {
            x: focus.x,
            y: focus.y,
            z: focus.z,
        };
        let arm: mint::Vector3<f32> = mint::Vector3 {
            x: 0.0,
            y: 0.0,
            z: distance,
        };
        CameraRig::builder()
            .with(Position::new(position))
            .with(YawPitch::new().yaw_degrees(yaw_degrees).pitch_degrees(pitch_degrees))
            .with(Smooth::new_position_rotation(1.0, 1.0))
            .with(Arm::new(arm))
            .build()
    }

    pub fn yaw_pitch(&self) -> (f32, f32) {
        let yaw_pitch = self.rig.driver::<YawPitch>();
        (yaw_pitch.yaw_degrees, yaw_pitch.pitch_degrees)
    }

    /// Jump to a new pose without smoothing
    pub fn reset(&mut self, focus: Vec3, distance: f32, yaw_degrees: f32, pitch_degrees: f32) {
        self.focus = focus;
        self.distance = distance.clamp(self.min_distance, self.max_distance);
        self.rig = Self::build_rig(focus, self.distance, yaw_degrees, pitch_degrees);
        self.current_distance = Default::default();
    }

    pub fn set_focus(&mut self, focus: Vec3) {
        self.focus = focus;
        self.rig.driver_mut::<Position>().position = mint::Point3 {
            x: focus.x,
            y: focus.y,
            z: focus.z,
        };
    }

    /// Advance the rig and return the resulting camera transform
    pub fn calculate_transform(&mut self, delta_seconds: f32) -> Transform {
        let calculated_transform = self.rig.update(delta_seconds);
        Transform {
            translation: Vec3::new(
                calculated_transform.position.x,
                calculated_transform.position.y,
                calculated_transform.position.z,
            ),
            rotation: Quat::from_xyzw(
                calculated_transform.rotation.v.x,
                calculated_transform.rotation.v.y,
                calculated_transform.rotation.v.z,
                calculated_transform.rotation.s,
            ),
            ..Default::default()
        }
    }
}

pub fn orbit_camera_system(
    mut query: Query<(
        &mut OrbitCamera,
        &mut Transform,
        &mut Projection,
        &Camera,
        &CameraControls,
    )>,
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    mouse_motion: Res<AccumulatedMouseMotion>,
    mouse_scroll: Res<AccumulatedMouseScroll>,
    mut egui_ctx: EguiContexts,
    time: Res<Time>,
) {
    let pointer_over_ui = egui_ctx
        .ctx_mut()
        .map_or(false, |ctx| ctx.wants_pointer_input());
    let delta_seconds = time.delta().as_secs_f32();

    for (mut orbit_camera, mut camera_transform, mut projection, camera, controls) in
        query.iter_mut()
    {
        if !camera.is_active {
            continue;
        }

        let allow_mouse_input = controls.enabled && !pointer_over_ui;
        let mut zoom_multiplier = 1.0;

        if allow_mouse_input {
            let drag_delta = mouse_motion.delta;
            let sensitivity = orbit_camera.sensitivity;

            // Rotate with right mouse drag
            if mouse_buttons.pressed(MouseButton::Right) {
                orbit_camera
                    .rig
                    .driver_mut::<YawPitch>()
                    .rotate_yaw_pitch(-sensitivity * drag_delta.x, -sensitivity * drag_delta.y);
            }

            // Pan with middle mouse drag
            if mouse_buttons.pressed(MouseButton::Middle) {
                let right = camera_transform.rotation * Vec3::X;
                let up = camera_transform.rotation * Vec3::Y;
                let pan_speed = orbit_camera.distance * 0.002;
                let focus = orbit_camera.focus
                    + (-right * drag_delta.x + up * drag_delta.y) * pan_speed;
                orbit_camera.set_focus(focus);
            }

            match mouse_scroll.unit {
                MouseScrollUnit::Line => zoom_multiplier *= 1.0 - mouse_scroll.delta.y * 0.10,
                MouseScrollUnit::Pixel => zoom_multiplier *= 1.0 - mouse_scroll.delta.y * 0.0005,
            }
        }

        // Adjust zoom with mouse wheel
        orbit_camera.distance = (orbit_camera.distance * zoom_multiplier)
            .clamp(orbit_camera.min_distance, orbit_camera.max_distance);
        if zoom_multiplier != 1.0 {
            if let Projection::Orthographic(orthographic) = &mut *projection {
                orthographic.scale *= zoom_multiplier;
            }
        }

        let target_distance = orbit_camera.distance;
        let arm_distance = orbit_camera.current_distance.exp_smooth_towards(
            &target_distance,
            ExpSmoothingParams {
                smoothness: 1.0,
                output_offset_scale: 1.0,
                delta_time_seconds: delta_seconds,
            },
        );
        orbit_camera.rig.driver_mut::<Arm>().offset.z = arm_distance;

        let calculated_transform = orbit_camera.calculate_transform(delta_seconds);
        camera_transform.translation = calculated_transform.translation;
        camera_transform.rotation = calculated_transform.rotation;
    }
}

pub trait Interpolate {
    fn interpolate(self, other: Self, t: f32) -> Self;
}

impl Interpolate for f32 {
    fn interpolate(self, other: Self, t: f32) -> Self {
        self + ((other - self) * t)
    }
}

pub struct ExpSmoothingParams {
    pub smoothness: f32,
    pub output_offset_scale: f32,
    pub delta_time_seconds: f32,
}

#[derive(Default, Debug)]
pub struct ExpSmoothed<T: Interpolate + Copy + std::fmt::Debug>(Option<T>);

impl<T: Interpolate + Copy + std::fmt::Debug> ExpSmoothed<T> {
    pub fn exp_smooth_towards(&mut self, other: &T, params: ExpSmoothingParams) -> T {
        // Tuned so the default smoothness of 1.0 settles in a few frames
        const SMOOTHNESS_MULT: f32 = 8.0;

        let interp_t = 1.0
            - (-SMOOTHNESS_MULT * params.delta_time_seconds / params.smoothness.max(1e-5)).exp();

        let prev = self.0.unwrap_or(*other);
        let smooth = prev.interpolate(*other, interp_t);

        self.0 = Some(smooth);

        #[allow(clippy::float_cmp)]
        if params.output_offset_scale != 1.0 {
            Interpolate::interpolate(*other, smooth, params.output_offset_scale)
        } else {
            smooth
        }
    }
}
