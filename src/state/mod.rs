mod editor_state;
mod field_value;
mod history;
mod persistence;

pub use editor_state::{CommitOutcome, EditorState, PendingEdit};
pub use field_value::{FieldValue, SharedFieldValue};
pub use history::ImageHistory;
pub use persistence::{
    FieldSnapshot,
    PersistenceError,
    PersistenceResult,
};
