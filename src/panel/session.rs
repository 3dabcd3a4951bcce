use std::time::Instant;
use futures::future::BoxFuture;
use uuid::Uuid;
use crate::input::Subscription;
use crate::layout::PanelLayout;
use crate::service::{EditResult, EditServiceError};
use crate::state::EditorState;
use crate::stroke::StrokeRecorder;

/// What the panel shows besides the image
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PanelStatus {
    #[default]
    Idle,
    /// A stroke is with the edit service; drawing is disabled until it returns
    Processing,
    /// The last commit failed; cleared by the next interaction
    Failed(EditServiceError),
}

/// A stroke being recorded, with the document listeners that feed it.
///
/// The listeners live exactly as long as the gesture: taking the gesture out
/// of the session and letting it fall out of scope releases them.
pub(super) struct Gesture {
    pub recorder: StrokeRecorder,
    pub _move: Subscription,
    pub _release: Subscription,
}

pub(super) struct PendingCommit {
    pub request_id: Uuid,
    pub generation: u64,
    pub started: Instant,
    pub future: BoxFuture<'static, EditResult>,
}

impl std::fmt::Debug for PendingCommit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PendingCommit")
            .field("request_id", &self.request_id)
            .field("generation", &self.generation)
            .field("started", &self.started)
            .finish_non_exhaustive()
    }
}

/// Everything that exists only while the panel is open.
pub(super) struct PanelSession {
    pub layout: PanelLayout,
    pub state: EditorState,
    pub status: PanelStatus,
    pub gesture: Option<Gesture>,
    pub pending: Option<PendingCommit>,
    /// Stage listeners acquired on open, released when the session drops
    pub _listeners: Vec<Subscription>,
}

impl PanelSession {
    /// Takes the pending commit if the image changed since it was sent.
    pub fn take_stale_commit(&mut self) -> Option<PendingCommit> {
        let generation = self.state.generation();
        if self.pending.as_ref()?.generation == generation {
            return None;
        }
        self.status = PanelStatus::Idle;
        self.pending.take()
    }
}
