use bevy::prelude::*;

/// Sent whenever a transform control moves the object it is attached to
#[derive(Message, Clone, Debug)]
pub struct TransformControlChangeEvent {
    /// The transform control entity
    pub control: Entity,
}

/// Sent when a transform control starts (`value == true`) or stops dragging
#[derive(Message, Clone, Debug)]
pub struct DraggingChangedEvent {
    /// The transform control entity
    pub control: Entity,
    pub value: bool,
}
