mod clipping_plane_event;
mod projection_event;
mod transform_control_event;

pub use clipping_plane_event::{
    ClippingPlaneVisibilityEvent, RemoveClippingPlaneEvent, SpawnClippingPlaneEvent,
};
pub use projection_event::ProjectionChangedEvent;
pub use transform_control_event::{DraggingChangedEvent, TransformControlChangeEvent};
