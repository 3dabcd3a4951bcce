use crate::geometry::Point;
use super::{InputEvent, ListenerKind, ListenerRegistry, Surface};

/// Where an input event goes, given the listeners that are currently bound
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    OpenEditor,
    TextButtons(Point),
    CanvasPress(Point),
    Gallery(Point),
    Drag(Point),
    Release(Point),
    SuppressDrag,
}

/// Routes an input event to the handler whose listener is bound.
///
/// Events nobody listens for yield `None` and are dropped.
pub fn route_event(event: &InputEvent, listeners: &ListenerRegistry) -> Option<Route> {
    let (kind, route) = match *event {
        InputEvent::PointerDown { location } => match location.surface {
            Surface::Field => (ListenerKind::FieldPress, Route::OpenEditor),
            Surface::TextButtons => (ListenerKind::ButtonPress, Route::TextButtons(location.position)),
            Surface::Canvas => (ListenerKind::CanvasPress, Route::CanvasPress(location.position)),
            Surface::Gallery => (ListenerKind::GalleryPress, Route::Gallery(location.position)),
        },
        InputEvent::PointerMove { location } => (ListenerKind::DocumentMove, Route::Drag(location.position)),
        InputEvent::PointerUp { location } => (ListenerKind::DocumentRelease, Route::Release(location.position)),
        InputEvent::DragStart { surface: Surface::Canvas } => (ListenerKind::CanvasDragGuard, Route::SuppressDrag),
        InputEvent::DragStart { .. } => return None,
    };

    listeners.is_bound(kind).then_some(route)
}
