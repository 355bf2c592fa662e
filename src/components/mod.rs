mod clipping_plane;
mod transform_control;
mod viewer_camera;

pub use clipping_plane::{
    ArrowBoundingBox, ClippingPlane, ClippingPlaneCallbacks, ClippingPlaneHelper,
    ClippingPlaneMesh,
};
pub use transform_control::{
    GizmoAxis, TransformControl, TransformControlDrag, TransformControlEntities,
    TransformControlHandle, TransformSpace,
};
pub use viewer_camera::CameraControls;
