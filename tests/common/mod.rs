#![allow(dead_code)]

use std::sync::Arc;
use futures::channel::oneshot;
use futures::future::BoxFuture;
use futures::FutureExt;
use parking_lot::Mutex;
use ganpaint_field::event::{EditorEvent, CommitEvent};
use ganpaint_field::input::{InputEvent, InputLocation, Surface};
use ganpaint_field::service::{EditRequest, EditResponse, EditResult, EditService, EditServiceError};
use ganpaint_field::GanPaintField;

pub const CHURCH0: &str = "media/extensions/ganpaint_images/church0.jpg";
pub const CHURCH1: &str = "media/extensions/ganpaint_images/church1.jpg";

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub type EventLog = Arc<Mutex<Vec<EditorEvent>>>;

// Records every event the field emits
pub fn record_events(field: &GanPaintField) -> EventLog {
    let log: EventLog = Arc::new(Mutex::new(Vec::new()));
    let sink = log.clone();
    field.subscribe(Box::new(move |event: &EditorEvent| sink.lock().push(event.clone())));
    log
}

pub fn value_changes(log: &EventLog) -> usize {
    log.lock()
        .iter()
        .filter(|event| matches!(event, EditorEvent::ValueChanged(_)))
        .count()
}

pub fn commit_events(log: &EventLog) -> Vec<CommitEvent> {
    log.lock()
        .iter()
        .filter_map(|event| match event {
            EditorEvent::Commit(commit) => Some(commit.clone()),
            _ => None,
        })
        .collect()
}

pub fn press(surface: Surface, x: i32, y: i32) -> InputEvent {
    InputEvent::PointerDown {
        location: InputLocation::new(surface, x, y),
    }
}

pub fn drag(x: i32, y: i32) -> InputEvent {
    InputEvent::PointerMove {
        location: InputLocation::new(Surface::Canvas, x, y),
    }
}

pub fn release(x: i32, y: i32) -> InputEvent {
    InputEvent::PointerUp {
        location: InputLocation::new(Surface::Canvas, x, y),
    }
}

pub fn open(field: &mut GanPaintField) {
    assert!(field.handle_input(&press(Surface::Field, 4, 4)));
    assert!(field.is_open());
}

/// Press, optional drags and release on the canvas
pub fn draw(field: &mut GanPaintField, points: &[(i32, i32)]) {
    let (first, rest) = points.split_first().expect("stroke needs a point");
    field.handle_input(&press(Surface::Canvas, first.0, first.1));
    for &(x, y) in rest {
        field.handle_input(&drag(x, y));
    }
    let last = points.last().expect("stroke needs a point");
    field.handle_input(&release(last.0, last.1));
}

/// Service that answers every request immediately with the same image
pub fn ready_service(result: &'static str) -> Arc<dyn EditService> {
    Arc::new(move |_request: EditRequest| -> BoxFuture<'static, EditResult> {
        futures::future::ready(Ok(EditResponse::new(result))).boxed()
    })
}

/// Service whose answers are sent by the test
#[derive(Clone, Default)]
pub struct ManualService {
    requests: Arc<Mutex<Vec<EditRequest>>>,
    senders: Arc<Mutex<Vec<oneshot::Sender<EditResult>>>>,
}

impl ManualService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle(&self) -> Arc<dyn EditService> {
        Arc::new(self.clone())
    }

    pub fn requests(&self) -> Vec<EditRequest> {
        self.requests.lock().clone()
    }

    /// Answers the oldest unanswered request
    pub fn respond(&self, result: EditResult) {
        let sender = self.senders.lock().remove(0);
        let _ = sender.send(result);
    }
}

impl EditService for ManualService {
    fn submit(&self, request: EditRequest) -> BoxFuture<'static, EditResult> {
        self.requests.lock().push(request);
        let (sender, receiver) = oneshot::channel();
        self.senders.lock().push(sender);
        receiver
            .map(|answer| answer.unwrap_or(Err(EditServiceError::Cancelled)))
            .boxed()
    }
}
