use egui::{Context, Pos2, Rect};
use crate::geometry::Point;

mod listeners;
mod router;
mod state;

pub use listeners::{ListenerKind, ListenerRegistry, Subscription};
pub use router::{route_event, Route};
pub use state::PointerState;

/// Represents which panel surface an input event occurred on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Surface {
    /// The thumbnail drawn inside the block; pressing it opens the panel
    Field,
    /// The brush, operation, undo and reset buttons
    TextButtons,
    /// The image being edited
    Canvas,
    /// The seed image tiles
    Gallery,
}

/// Represents the location where an input event occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputLocation {
    /// Pixel position relative to the surface's top-left corner
    pub position: Point,
    /// The surface the position is relative to
    pub surface: Surface,
}

impl InputLocation {
    pub fn new(surface: Surface, x: i32, y: i32) -> Self {
        Self {
            position: Point::new(x, y),
            surface,
        }
    }
}

/// Represents the pointer events the panel reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Primary button was pressed over a surface
    PointerDown { location: InputLocation },
    /// Pointer moved anywhere in the document; position is canvas-local
    PointerMove { location: InputLocation },
    /// Primary button was released anywhere in the document; position is canvas-local
    PointerUp { location: InputLocation },
    /// The host is about to start a native drag of a surface's content
    DragStart { surface: Surface },
}

impl InputEvent {
    /// Helper to check if an input event occurred within the canvas surface
    pub fn is_on_canvas(&self) -> bool {
        match self {
            InputEvent::PointerDown { location }
            | InputEvent::PointerMove { location }
            | InputEvent::PointerUp { location } => location.surface == Surface::Canvas,
            InputEvent::DragStart { surface } => *surface == Surface::Canvas,
        }
    }
}

/// Screen rectangles of the panel surfaces, as laid out by the view
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SurfaceRects {
    pub field: Option<Rect>,
    pub text_buttons: Option<Rect>,
    pub canvas: Option<Rect>,
    pub gallery: Option<Rect>,
}

impl SurfaceRects {
    /// Determine which surface a position is on
    fn surface_at(&self, pos: Pos2) -> Option<(Surface, Rect)> {
        [
            (Surface::Field, self.field),
            (Surface::TextButtons, self.text_buttons),
            (Surface::Canvas, self.canvas),
            (Surface::Gallery, self.gallery),
        ]
        .into_iter()
        .find_map(|(surface, rect)| rect.filter(|rect| rect.contains(pos)).map(|rect| (surface, rect)))
    }
}

/// Handles converting raw egui input into our domain-specific InputEvents
#[derive(Debug, Default)]
pub struct InputHandler {
    last_pointer_pos: Option<Pos2>,
    rects: SurfaceRects,
}

impl InputHandler {
    pub fn new(rects: SurfaceRects) -> Self {
        Self {
            last_pointer_pos: None,
            rects,
        }
    }

    /// Update the surface rectangles (e.g. when the dropdown moves)
    pub fn set_surface_rects(&mut self, rects: SurfaceRects) {
        self.rects = rects;
    }

    /// Position relative to the canvas origin, even when outside the canvas.
    ///
    /// Drag tracking is document-wide, so samples past the canvas edge are
    /// still reported and left for the stroke recorder to drop.
    fn canvas_location(&self, pos: Pos2) -> Option<InputLocation> {
        let canvas = self.rects.canvas?;
        let offset = pos - canvas.min;
        Some(InputLocation {
            position: Point::from_offset(offset.x, offset.y),
            surface: Surface::Canvas,
        })
    }

    fn surface_location(&self, pos: Pos2) -> Option<InputLocation> {
        let (surface, rect) = self.rects.surface_at(pos)?;
        let offset = pos - rect.min;
        Some(InputLocation {
            position: Point::from_offset(offset.x, offset.y),
            surface,
        })
    }

    /// Process raw egui input and generate our InputEvents
    pub fn process_input(&mut self, ctx: &Context) -> Vec<InputEvent> {
        let state = PointerState::from_egui(ctx);
        self.process(&state)
    }

    /// Translate one frame of pointer state
    pub fn process(&mut self, state: &PointerState) -> Vec<InputEvent> {
        let mut events = Vec::new();

        if let Some(pos) = state.pointer_pos {
            // If position changed, this is a move
            if Some(pos) != self.last_pointer_pos {
                if let Some(location) = self.canvas_location(pos) {
                    events.push(InputEvent::PointerMove { location });
                }
            }
            self.last_pointer_pos = Some(pos);

            if state.primary_pressed {
                if let Some(location) = self.surface_location(pos) {
                    events.push(InputEvent::PointerDown { location });
                }
            }
            if state.primary_released {
                if let Some(location) = self.canvas_location(pos) {
                    events.push(InputEvent::PointerUp { location });
                }
            }
        } else {
            self.last_pointer_pos = None;
            // A release outside the window still has to end the gesture
            if state.primary_released {
                events.push(InputEvent::PointerUp {
                    location: InputLocation::new(Surface::Canvas, -1, -1),
                });
            }
        }

        events
    }
}
