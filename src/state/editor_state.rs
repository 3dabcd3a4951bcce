//! The editing state behind one open panel.
//!
//! Selections and image changes go through the transition methods, which
//! return the redraw the view has to perform. Two invariants hold after every
//! transition:
//!
//! - exactly one brush and exactly one operation are active, so every button
//!   redraw clears one button and fills another;
//! - every change of the current image bumps [`EditorState::generation`],
//!   which is how a commit that was sent against an older image is recognised
//!   when its result arrives.
//!
//! ```text
//!   select_source_image ──► original = current = seed, history cleared
//!   reset               ──► current = original,         history cleared
//!   commit (applied)    ──► history.push(current), current = result
//!   undo                ──► current = history.pop()
//! ```
use super::history::ImageHistory;
use super::field_value::FieldValue;
use crate::brush::{BrushKind, Operation};
use crate::event::EditorEvent;
use crate::image::ImageRef;
use crate::layout::TextButton;
use crate::service::EditRequest;
use crate::stroke::Stroke;

/// A request built from a finished stroke, tagged with the image generation
/// it was composed against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingEdit {
    pub request: EditRequest,
    pub generation: u64,
}

/// What happened to a commit result handed back to the state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitOutcome {
    Applied(EditorEvent),
    /// The current image changed while the request was in flight.
    Stale,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorState {
    brush: BrushKind,
    operation: Operation,
    original_image: ImageRef,
    current_image: ImageRef,
    history: ImageHistory,
    generation: u64,
}

impl EditorState {
    pub fn new(value: &FieldValue, undo_depth: usize) -> Self {
        Self {
            brush: value.brush,
            operation: value.operation,
            original_image: value.original_image.clone(),
            current_image: value.image.clone(),
            history: ImageHistory::new(undo_depth),
            generation: 0,
        }
    }

    pub fn active_brush(&self) -> BrushKind {
        self.brush
    }

    pub fn active_operation(&self) -> Operation {
        self.operation
    }

    pub fn original_image(&self) -> &ImageRef {
        &self.original_image
    }

    pub fn current_image(&self) -> &ImageRef {
        &self.current_image
    }

    pub fn history(&self) -> &ImageHistory {
        &self.history
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Text button indices that are highlighted: the active brush and the
    /// active operation.
    pub fn highlighted_buttons(&self) -> [usize; 2] {
        [
            TextButton::Brush(self.brush).index(),
            TextButton::Operation(self.operation).index(),
        ]
    }

    pub fn select_brush(&mut self, brush: BrushKind) -> Option<EditorEvent> {
        if brush == self.brush {
            return None;
        }
        let previous = std::mem::replace(&mut self.brush, brush);
        log::info!("Brush selected: {} (was {})", brush, previous);
        Some(EditorEvent::ButtonRedraw {
            cleared: TextButton::Brush(previous).index(),
            filled: TextButton::Brush(brush).index(),
        })
    }

    pub fn select_operation(&mut self, operation: Operation) -> Option<EditorEvent> {
        if operation == self.operation {
            return None;
        }
        let previous = std::mem::replace(&mut self.operation, operation);
        log::info!("Operation selected: {} (was {})", operation, previous);
        Some(EditorEvent::ButtonRedraw {
            cleared: TextButton::Operation(previous).index(),
            filled: TextButton::Operation(operation).index(),
        })
    }

    /// Starts a fresh edit from `image`.
    pub fn select_source_image(&mut self, image: ImageRef) -> EditorEvent {
        log::info!("Source image selected: {}", image);
        self.original_image = image.clone();
        self.history.clear();
        self.set_current(image)
    }

    pub fn reset(&mut self) -> EditorEvent {
        log::info!("Reset to {}", self.original_image);
        self.history.clear();
        self.set_current(self.original_image.clone())
    }

    /// Restores the image the last applied commit replaced. Empty history is a
    /// no-op.
    pub fn undo(&mut self) -> Option<EditorEvent> {
        let Some(previous) = self.history.pop() else {
            log::debug!("Undo ignored: history is empty");
            return None;
        };
        log::info!("Undo to {}", previous);
        Some(self.set_current(previous))
    }

    /// Replaces the current image from outside the panel (the host wrote the
    /// field value). History is kept; an in-flight commit becomes stale.
    pub fn replace_current(&mut self, image: ImageRef) -> Option<EditorEvent> {
        if image == self.current_image {
            return None;
        }
        Some(self.set_current(image))
    }

    /// Builds the request for a finished stroke. Empty strokes are not sent.
    pub fn prepare_commit(&self, stroke: Stroke) -> Option<PendingEdit> {
        if stroke.is_empty() {
            log::debug!("Commit ignored: stroke has no points");
            return None;
        }
        Some(PendingEdit {
            request: EditRequest::new(stroke, self.brush, self.operation, self.current_image.clone()),
            generation: self.generation,
        })
    }

    /// Applies a service result if the image it was composed against is
    /// still the current one.
    pub fn complete_commit(&mut self, generation: u64, result: ImageRef) -> CommitOutcome {
        if generation != self.generation {
            log::debug!(
                "Commit result {} dropped: generation {} is now {}",
                result,
                generation,
                self.generation
            );
            return CommitOutcome::Stale;
        }
        let replaced = self.current_image.clone();
        self.history.push(replaced);
        CommitOutcome::Applied(self.set_current(result))
    }

    fn set_current(&mut self, image: ImageRef) -> EditorEvent {
        self.current_image = image.clone();
        self.generation += 1;
        EditorEvent::ImageRedraw { image }
    }
}
