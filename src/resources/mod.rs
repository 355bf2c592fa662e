mod clipping_plane_materials;
mod clipping_planes;
mod plane_drag;
mod viewer_cameras;
mod viewer_scene;

pub use clipping_plane_materials::ClippingPlaneMaterials;
pub use clipping_planes::ClippingPlanes;
pub use plane_drag::{PlaneDragStatus, ViewerDragCallbacks};
pub use viewer_cameras::{ProjectionMode, ViewerCameras};
pub use viewer_scene::ViewerScene;
