#![allow(clippy::type_complexity)]
#![allow(clippy::too_many_arguments)]

use std::path::{Path, PathBuf};

use bevy::{
    prelude::{
        App, ClearColor, Color, DefaultPlugins, IntoScheduleConfigs, Plugin, PluginGroup,
        Resource, Startup, Update, Window,
    },
    window::WindowResolution,
};
use serde::Deserialize;
use thiserror::Error;

pub mod components;
pub mod context;
pub mod events;
pub mod math;
pub mod resources;
pub mod systems;
pub mod ui;

use resources::PlaneDragStatus;
use systems::{
    clipping_plane_shortcuts_system, register_drag_callbacks_system, spawn_demo_scene_system,
    spawn_initial_clipping_planes_system, spawn_viewer_cameras_system, ClippingPlanePlugin,
    ClippingPlaneSystems, TransformControlPlugin, TransformControlSystems, ViewerCameraPlugin,
};
use ui::ViewerUiPlugin;

pub const DEFAULT_CONFIG_FILE: &str = "clip-plane-viewer.toml";

#[derive(Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: f32,
    pub height: f32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "clip-plane-viewer".to_string(),
            width: 1600.0,
            height: 900.0,
        }
    }
}

/// Appearance and grab area of clipping plane widgets
#[derive(Resource, Clone, Debug, Deserialize)]
#[serde(default)]
pub struct ClippingConfig {
    /// Side length of the visible plane quad
    pub plane_size: f32,
    pub plane_color: [f32; 3],
    pub plane_opacity: f32,
    pub arrow_hit_radius: f32,
    pub arrow_hit_height: f32,
    pub gizmo_size: f32,
}

impl Default for ClippingConfig {
    fn default() -> Self {
        Self {
            plane_size: 5.0,
            plane_color: [1.0, 1.0, 0.0],
            plane_opacity: 0.2,
            arrow_hit_radius: 0.18,
            arrow_hit_height: 1.2,
            gizmo_size: 1.0,
        }
    }
}

#[derive(Resource, Clone, Debug, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub focus: [f32; 3],
    pub distance: f32,
    pub yaw_degrees: f32,
    pub pitch_degrees: f32,
    pub fov_degrees: f32,
    pub sensitivity: f32,
    pub min_distance: f32,
    pub max_distance: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            focus: [0.0, 1.0, 0.0],
            distance: 20.0,
            yaw_degrees: 45.0,
            pitch_degrees: -30.0,
            fov_degrees: 45.0,
            sensitivity: 0.1,
            min_distance: 1.0,
            max_distance: 1000.0,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct PlaneConfig {
    pub origin: [f32; 3],
    pub normal: [f32; 3],
    #[serde(default)]
    pub size: Option<f32>,
}

/// Clipping planes created once the viewer has started
#[derive(Resource, Clone, Debug, Default)]
pub struct InitialClippingPlanes(pub Vec<PlaneConfig>);

#[derive(Deserialize)]
#[serde(default)]
pub struct Config {
    pub window: WindowConfig,
    pub clipping: ClippingConfig,
    pub camera: CameraConfig,
    pub planes: Vec<PlaneConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            clipping: ClippingConfig::default(),
            camera: CameraConfig::default(),
            planes: vec![PlaneConfig {
                origin: [0.0, 1.0, 0.0],
                normal: [0.0, 1.0, 0.0],
                size: None,
            }],
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

pub fn read_config(path: &Path) -> Result<Config, ConfigError> {
    let toml_str = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    toml::from_str(&toml_str).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

pub fn load_config(path: &Path) -> Config {
    match read_config(path) {
        Ok(config) => {
            println!("Read configuration from {}", path.to_string_lossy());
            config
        }
        Err(error) => {
            println!("Failed to load configuration, using defaults: {}", error);
            Config::default()
        }
    }
}

/// Everything the clipping plane viewer needs on top of Bevy's default plugins
pub struct ViewerPlugin;

impl Plugin for ViewerPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(bevy_egui::EguiPlugin::default())
            .add_plugins((
                TransformControlPlugin,
                ClippingPlanePlugin,
                ViewerCameraPlugin,
                ViewerUiPlugin,
            ))
            .init_resource::<InitialClippingPlanes>()
            .init_resource::<PlaneDragStatus>()
            .configure_sets(Update, TransformControlSystems.before(ClippingPlaneSystems))
            .add_systems(
                Startup,
                (
                    spawn_viewer_cameras_system,
                    spawn_demo_scene_system,
                    register_drag_callbacks_system,
                    spawn_initial_clipping_planes_system,
                )
                    .chain(),
            )
            .add_systems(
                Update,
                clipping_plane_shortcuts_system.before(ClippingPlaneSystems),
            );
    }
}

pub fn run_viewer(config: &Config) {
    let mut resolution = WindowResolution::default();
    resolution.set(config.window.width, config.window.height);

    let mut app = App::new();
    app.add_plugins(
        DefaultPlugins
            .set(bevy::window::WindowPlugin {
                primary_window: Some(Window {
                    title: config.window.title.clone(),
                    resolution,
                    ..Default::default()
                }),
                ..Default::default()
            })
            .set(bevy::log::LogPlugin {
                level: bevy::log::Level::INFO,
                filter: "wgpu=error,naga=error,clip_plane_viewer=info".to_string(),
                ..Default::default()
            }),
    );

    // Read by ClippingPlaneMaterials when the plugin builds
    app.insert_resource(config.clipping.clone())
        .insert_resource(config.camera.clone())
        .insert_resource(InitialClippingPlanes(config.planes.clone()))
        .insert_resource(ClearColor(Color::srgb(0.12, 0.12, 0.14)));

    app.add_plugins(ViewerPlugin);

    log::info!(
        "[Viewer] Starting with {} initial clipping planes",
        config.planes.len()
    );
    app.run();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.window.width, 1600.0);
        assert_eq!(config.clipping.plane_color, [1.0, 1.0, 0.0]);
        assert_eq!(config.clipping.plane_opacity, 0.2);
        assert_eq!(config.clipping.arrow_hit_radius, 0.18);
        assert_eq!(config.clipping.arrow_hit_height, 1.2);
        assert_eq!(config.camera.distance, 20.0);
        assert_eq!(config.planes.len(), 1);
    }

    #[test]
    fn test_partial_config() {
        let config: Config = toml::from_str(
            r#"
            [window]
            title = "cut"

            [clipping]
            plane_size = 12.5

            [camera]
            focus = [1.0, 2.0, 3.0]

            [[planes]]
            origin = [0.0, 0.0, 0.0]
            normal = [1.0, 0.0, 0.0]

            [[planes]]
            origin = [0.0, 2.0, 0.0]
            normal = [0.0, 1.0, 0.0]
            size = 4.0
            "#,
        )
        .unwrap();

        assert_eq!(config.window.title, "cut");
        assert_eq!(config.window.height, 900.0);
        assert_eq!(config.clipping.plane_size, 12.5);
        assert_eq!(config.clipping.gizmo_size, 1.0);
        assert_eq!(config.camera.focus, [1.0, 2.0, 3.0]);
        assert_eq!(config.camera.yaw_degrees, 45.0);
        assert_eq!(config.planes.len(), 2);
        assert_eq!(config.planes[0].size, None);
        assert_eq!(config.planes[1].size, Some(4.0));
    }

    #[test]
    fn test_read_config_errors() {
        let missing = Path::new("does-not-exist/clip-plane-viewer.toml");
        assert!(matches!(
            read_config(missing),
            Err(ConfigError::Read { .. })
        ));
        assert_eq!(load_config(missing).planes.len(), 1);

        assert!(toml::from_str::<Config>("[clipping]\nplane_size = \"big\"").is_err());
    }
}
