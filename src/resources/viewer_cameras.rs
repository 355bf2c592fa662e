use bevy::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProjectionMode {
    #[default]
    Perspective,
    Orthographic,
}

impl ProjectionMode {
    pub fn toggled(self) -> Self {
        match self {
            ProjectionMode::Perspective => ProjectionMode::Orthographic,
            ProjectionMode::Orthographic => ProjectionMode::Perspective,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ProjectionMode::Perspective => "Perspective",
            ProjectionMode::Orthographic => "Orthographic",
        }
    }
}

/// The perspective and orthographic viewer cameras, only one of which renders at a time
#[derive(Resource, Clone, Copy, Debug)]
pub struct ViewerCameras {
    pub perspective: Entity,
    pub orthographic: Entity,
    pub mode: ProjectionMode,
}

impl ViewerCameras {
    pub fn new(perspective: Entity, orthographic: Entity) -> Self {
        Self {
            perspective,
            orthographic,
            mode: ProjectionMode::default(),
        }
    }

    pub fn camera(&self, mode: ProjectionMode) -> Entity {
        match mode {
            ProjectionMode::Perspective => self.perspective,
            ProjectionMode::Orthographic => self.orthographic,
        }
    }

    /// The currently active camera entity
    pub fn active(&self) -> Entity {
        self.camera(self.mode)
    }

    pub fn iter(&self) -> impl Iterator<Item = Entity> {
        [self.perspective, self.orthographic].into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_active_camera_follows_mode() {
        let mut world = World::new();
        let perspective = world.spawn_empty().id();
        let orthographic = world.spawn_empty().id();

        let mut cameras = ViewerCameras::new(perspective, orthographic);
        assert_eq!(cameras.active(), perspective);

        cameras.mode = cameras.mode.toggled();
        assert_eq!(cameras.mode, ProjectionMode::Orthographic);
        assert_eq!(cameras.active(), orthographic);
        assert_eq!(cameras.iter().count(), 2);
    }
}
