use crate::brush::{BrushKind, Operation};
use crate::image::ImageRef;
use uuid::Uuid;

/// A replacement of the persisted image address, as seen by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueChange {
    pub old: ImageRef,
    pub new: ImageRef,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitEvent {
    /// A stroke was sent; the view should show that the panel is processing.
    Started {
        request_id: Uuid,
        points: usize,
    },
    Completed {
        request_id: Uuid,
        image: ImageRef,
    },
    /// The service failed or timed out. Nothing was applied.
    Failed {
        request_id: Uuid,
        reason: String,
    },
    /// Dropped before it could apply: the edited image changed or the panel closed.
    Discarded {
        request_id: Uuid,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorEvent {
    /// The panel was built; the named buttons start highlighted.
    PanelOpened {
        brush: BrushKind,
        operation: Operation,
        image: ImageRef,
    },
    PanelClosed,
    /// Un-highlight `cleared`, highlight `filled`. Indices are text button indices.
    ButtonRedraw {
        cleared: usize,
        filled: usize,
    },
    /// Canvas and thumbnail must both show `image`.
    ImageRedraw {
        image: ImageRef,
    },
    Commit(CommitEvent),
    ValueChanged(ValueChange),
}
