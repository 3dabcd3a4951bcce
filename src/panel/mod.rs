//! The dropdown editor: lifecycle, pointer handling and commits.
//!
//! A [`PanelController`] lives as long as its field. Opening creates a
//! session (layout, [`EditorState`], stage listeners); closing drops it, and
//! with it every listener, the stroke being recorded and any commit in
//! flight. Nothing in a session survives a close except what was written to
//! the shared field value.

mod session;

pub use session::PanelStatus;

use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::Instant;
use futures::FutureExt;
use crate::brush::{BrushKind, Operation};
use crate::config::FieldConfig;
use crate::event::{CommitEvent, EditorEvent, EventBus, EventHandler, ValueChange};
use crate::gallery::Gallery;
use crate::geometry::Point;
use crate::image::ImageRef;
use crate::input::{route_event, InputEvent, ListenerKind, ListenerRegistry, Route};
use crate::layout::{PanelLayout, TextButton, CANVAS_SIZE};
use crate::service::{EditResponse, EditService, EditServiceError};
use crate::state::{CommitOutcome, EditorState, SharedFieldValue};
use crate::stroke::{Stroke, StrokeRecorder};
use session::{Gesture, PanelSession, PendingCommit};

pub struct PanelController {
    config: FieldConfig,
    gallery: Gallery,
    service: Arc<dyn EditService>,
    value: SharedFieldValue,
    listeners: ListenerRegistry,
    events: EventBus,
    session: Option<PanelSession>,
}

impl std::fmt::Debug for PanelController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PanelController")
            .field("value", &self.value)
            .field("open", &self.is_open())
            .field("status", &self.status())
            .field("events", &self.events)
            .finish_non_exhaustive()
    }
}

impl PanelController {
    pub fn new(
        config: FieldConfig,
        service: Arc<dyn EditService>,
        value: SharedFieldValue,
        listeners: ListenerRegistry,
    ) -> Self {
        Self {
            gallery: Gallery::new(&config),
            config,
            service,
            value,
            listeners,
            events: EventBus::new(),
            session: None,
        }
    }

    /// Subscribe a handler to redraw, commit and value-change events
    pub fn subscribe(&self, handler: Box<dyn EventHandler>) {
        self.events.subscribe(handler);
    }

    pub(crate) fn emit(&self, event: EditorEvent) {
        self.events.emit(event);
    }

    pub fn is_open(&self) -> bool {
        self.session.is_some()
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    pub fn gallery(&self) -> &Gallery {
        &self.gallery
    }

    pub fn value(&self) -> &SharedFieldValue {
        &self.value
    }

    pub fn listeners(&self) -> &ListenerRegistry {
        &self.listeners
    }

    /// Editing state of the open panel
    pub fn state(&self) -> Option<&EditorState> {
        self.session.as_ref().map(|session| &session.state)
    }

    pub fn layout(&self) -> Option<&PanelLayout> {
        self.session.as_ref().map(|session| &session.layout)
    }

    pub fn status(&self) -> Option<&PanelStatus> {
        self.session.as_ref().map(|session| &session.status)
    }

    pub fn is_processing(&self) -> bool {
        self.session.as_ref().is_some_and(|session| session.pending.is_some())
    }

    /// Points recorded so far for the gesture in progress, for previews
    pub fn active_stroke(&self) -> Option<&[Point]> {
        let session = self.session.as_ref()?;
        session.gesture.as_ref().map(|gesture| gesture.recorder.points())
    }

    /// Builds the panel. Does nothing if it is already open.
    pub fn open(&mut self) {
        if self.session.is_some() {
            log::debug!("Panel already open");
            return;
        }

        let value = self.value.get();
        let state = EditorState::new(&value, self.config.undo_depth);
        let listeners = [
            ListenerKind::ButtonPress,
            ListenerKind::CanvasPress,
            ListenerKind::GalleryPress,
            ListenerKind::CanvasDragGuard,
        ]
        .into_iter()
        .map(|kind| self.listeners.bind(kind))
        .collect();

        log::info!("Panel opened on {} ({} / {})", value.image, value.brush, value.operation);
        self.session = Some(PanelSession {
            layout: PanelLayout::build(),
            state,
            status: PanelStatus::Idle,
            gesture: None,
            pending: None,
            _listeners: listeners,
        });
        self.events.emit(EditorEvent::PanelOpened {
            brush: value.brush,
            operation: value.operation,
            image: value.image,
        });
    }

    /// Tears the panel down. Safe to call when closed, mid-gesture or with a
    /// commit in flight; an in-flight result is dropped.
    pub fn close(&mut self) {
        let Some(mut session) = self.session.take() else {
            return;
        };
        if session.gesture.take().is_some() {
            log::debug!("Panel closed mid-gesture; stroke dropped");
        }
        if let Some(pending) = session.pending.take() {
            log::info!("Panel closed with commit {} in flight; result will be dropped", pending.request_id);
            self.events.emit(EditorEvent::Commit(CommitEvent::Discarded {
                request_id: pending.request_id,
            }));
        }
        drop(session);
        log::info!("Panel closed");
        self.events.emit(EditorEvent::PanelClosed);
    }

    /// Dispatches one pointer event. Returns whether a bound listener took it;
    /// for [`InputEvent::DragStart`] this means the host should cancel the drag.
    pub fn handle_input(&mut self, event: &InputEvent) -> bool {
        let Some(route) = route_event(event, &self.listeners) else {
            return false;
        };
        match route {
            Route::OpenEditor => self.open(),
            Route::TextButtons(point) => self.press_text_button(point),
            Route::Gallery(point) => self.press_gallery(point),
            Route::CanvasPress(point) => self.begin_stroke(point),
            Route::Drag(point) => self.extend_stroke(point),
            Route::Release(_) => self.end_stroke(),
            Route::SuppressDrag => {}
        }
        true
    }

    fn press_text_button(&mut self, point: Point) {
        let Some(layout) = self.layout() else { return };
        let Some(button) = layout.text_button_at(point) else {
            log::debug!("No text button at {:?}", point);
            return;
        };
        self.clear_failure();
        match button {
            TextButton::Brush(brush) => self.select_brush(brush),
            TextButton::Operation(operation) => self.select_operation(operation),
            TextButton::Undo => self.undo(),
            TextButton::Reset => self.reset(),
        }
    }

    fn press_gallery(&mut self, point: Point) {
        let Some(layout) = self.layout() else { return };
        let Some(index) = layout.gallery_tile_at(point) else {
            log::debug!("No gallery tile at {:?}", point);
            return;
        };
        self.clear_failure();
        self.select_gallery_image(index);
    }

    pub fn select_brush(&mut self, brush: BrushKind) {
        let Some(session) = self.session.as_mut() else { return };
        if let Some(redraw) = session.state.select_brush(brush) {
            self.value.set_brush(brush);
            self.events.emit(redraw);
        }
    }

    pub fn select_operation(&mut self, operation: Operation) {
        let Some(session) = self.session.as_mut() else { return };
        if let Some(redraw) = session.state.select_operation(operation) {
            self.value.set_operation(operation);
            self.events.emit(redraw);
        }
    }

    /// Starts a fresh edit from gallery seed `index`.
    pub fn select_gallery_image(&mut self, index: usize) {
        match self.gallery.address(index) {
            Some(image) => self.select_source_image(image),
            None => log::debug!("Gallery index {} out of range", index),
        }
    }

    pub fn select_source_image(&mut self, image: ImageRef) {
        let Some(session) = self.session.as_mut() else { return };
        let redraw = session.state.select_source_image(image.clone());
        let change = self.value.replace_source(image);
        self.publish_image_change(redraw, change);
    }

    pub fn reset(&mut self) {
        let Some(session) = self.session.as_mut() else { return };
        let redraw = session.state.reset();
        let change = self.value.replace_image(session.state.current_image().clone());
        self.publish_image_change(redraw, change);
    }

    pub fn undo(&mut self) {
        let Some(session) = self.session.as_mut() else { return };
        let Some(redraw) = session.state.undo() else { return };
        let change = self.value.replace_image(session.state.current_image().clone());
        self.publish_image_change(redraw, change);
    }

    /// Host-side write of the field value. Empty or unchanged addresses are
    /// ignored; otherwise exactly one change notification is raised.
    pub fn set_value(&mut self, image: ImageRef) {
        let Some(change) = self.value.replace_image(image.clone()) else {
            log::debug!("set_value ignored: {:?} is empty or unchanged", image);
            return;
        };
        let redraw = match self.session.as_mut() {
            Some(session) => session
                .state
                .replace_current(image.clone())
                .unwrap_or(EditorEvent::ImageRedraw { image }),
            None => EditorEvent::ImageRedraw { image },
        };
        self.publish_image_change(redraw, Some(change));
    }

    /// Emits the value change (if any) before the redraw, and drops a commit
    /// that no longer matches the current image.
    fn publish_image_change(&mut self, redraw: EditorEvent, change: Option<ValueChange>) {
        if let Some(change) = change {
            log::info!("Field value changed: {} -> {}", change.old, change.new);
            self.events.emit(EditorEvent::ValueChanged(change));
        }
        self.events.emit(redraw);

        let stale = self.session.as_mut().and_then(PanelSession::take_stale_commit);
        if let Some(pending) = stale {
            log::info!("Commit {} superseded by an image change", pending.request_id);
            self.events.emit(EditorEvent::Commit(CommitEvent::Discarded {
                request_id: pending.request_id,
            }));
        }
    }

    fn clear_failure(&mut self) {
        if let Some(session) = self.session.as_mut() {
            if matches!(session.status, PanelStatus::Failed(_)) {
                session.status = PanelStatus::Idle;
            }
        }
    }

    fn begin_stroke(&mut self, point: Point) {
        let Some(session) = self.session.as_mut() else { return };
        if session.pending.is_some() {
            log::debug!("Drawing disabled while a commit is in flight");
            return;
        }
        if !point.is_within_square(CANVAS_SIZE) {
            log::debug!("Press at {:?} is off the canvas", point);
            return;
        }
        if matches!(session.status, PanelStatus::Failed(_)) {
            session.status = PanelStatus::Idle;
        }
        // Replacing an unfinished gesture releases its listeners first
        session.gesture = None;
        session.gesture = Some(Gesture {
            recorder: StrokeRecorder::begin(point),
            _move: self.listeners.bind(ListenerKind::DocumentMove),
            _release: self.listeners.bind(ListenerKind::DocumentRelease),
        });
    }

    fn extend_stroke(&mut self, point: Point) {
        let Some(session) = self.session.as_mut() else { return };
        if let Some(gesture) = session.gesture.as_mut() {
            gesture.recorder.extend(point);
        }
    }

    fn end_stroke(&mut self) {
        let Some(session) = self.session.as_mut() else { return };
        // Move/release listeners go with the gesture, whatever happens below
        let Some(gesture) = session.gesture.take() else { return };
        let Gesture { recorder, _move: on_move, _release: on_release } = gesture;
        drop((on_move, on_release));
        let stroke = recorder.end();
        log::debug!("Stroke finished with {} points", stroke.len());
        self.commit_stroke(stroke);
    }

    /// Sends a finished stroke to the edit service. The result is picked up
    /// by [`Self::poll`].
    pub fn commit_stroke(&mut self, stroke: Stroke) {
        let Some(session) = self.session.as_mut() else { return };
        if session.pending.is_some() {
            log::warn!("Commit refused: another commit is in flight");
            return;
        }
        let Some(edit) = session.state.prepare_commit(stroke) else { return };
        let request_id = edit.request.id;
        let points = edit.request.points().len();
        log::info!(
            "Committing {} points ({} / {}) against {}",
            points,
            edit.request.brush,
            edit.request.operation,
            edit.request.source_image
        );
        let request = edit.request.with_pen_radius(self.config.mask_pen_radius);
        let future = self.service.submit(request);
        session.pending = Some(PendingCommit {
            request_id,
            generation: edit.generation,
            started: Instant::now(),
            future,
        });
        session.status = PanelStatus::Processing;
        self.events.emit(EditorEvent::Commit(CommitEvent::Started { request_id, points }));
    }

    /// Drives the commit in flight. Call once per frame; never blocks.
    pub fn poll(&mut self) {
        self.poll_at(Instant::now());
    }

    /// [`Self::poll`] with an explicit clock, for timeouts.
    pub fn poll_at(&mut self, now: Instant) {
        let Some(session) = self.session.as_mut() else { return };
        let Some(pending) = session.pending.as_mut() else { return };

        let mut cx = Context::from_waker(futures::task::noop_waker_ref());
        let result = match pending.future.poll_unpin(&mut cx) {
            Poll::Ready(result) => result,
            Poll::Pending => {
                if now.saturating_duration_since(pending.started) < self.config.commit_timeout {
                    return;
                }
                Err(EditServiceError::Timeout(self.config.commit_timeout))
            }
        };

        let Some(pending) = session.pending.take() else { return };
        match result {
            Ok(response) => self.finish_commit(pending, response),
            Err(error) => self.fail_commit(pending, error),
        }
    }

    fn finish_commit(&mut self, pending: PendingCommit, response: EditResponse) {
        if response.result_image.is_empty() {
            self.fail_commit(
                pending,
                EditServiceError::InvalidResponse("empty result image".to_owned()),
            );
            return;
        }
        let Some(session) = self.session.as_mut() else { return };
        session.status = PanelStatus::Idle;
        let request_id = pending.request_id;

        match session.state.complete_commit(pending.generation, response.result_image.clone()) {
            CommitOutcome::Applied(redraw) => {
                log::info!("Commit {} applied: {}", request_id, response.result_image);
                let change = self.value.replace_image(response.result_image.clone());
                self.publish_image_change(redraw, change);
                self.events.emit(EditorEvent::Commit(CommitEvent::Completed {
                    request_id,
                    image: response.result_image,
                }));
            }
            CommitOutcome::Stale => {
                self.events.emit(EditorEvent::Commit(CommitEvent::Discarded { request_id }));
            }
        }
    }

    fn fail_commit(&mut self, pending: PendingCommit, error: EditServiceError) {
        log::warn!("Commit {} failed: {}", pending.request_id, error);
        if let Some(session) = self.session.as_mut() {
            session.status = PanelStatus::Failed(error.clone());
        }
        self.events.emit(EditorEvent::Commit(CommitEvent::Failed {
            request_id: pending.request_id,
            reason: error.to_string(),
        }));
    }
}

impl Drop for PanelController {
    fn drop(&mut self) {
        self.close();
    }
}
