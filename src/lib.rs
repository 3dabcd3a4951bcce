#![warn(clippy::all, rust_2018_idioms)]

pub mod brush;
pub mod config;
pub mod error;
pub mod event;
pub mod field;
pub mod gallery;
pub mod geometry;
pub mod id_generator;
pub mod image;
pub mod input;
pub mod layout;
pub mod mask;
pub mod panel;
pub mod service;
pub mod state;
pub mod stroke;

pub use crate::brush::{BrushKind, Operation};
pub use crate::config::{ConfigError, FieldConfig};
pub use crate::error::{FieldError, FieldResult};
pub use crate::event::{CommitEvent, EditorEvent, EventBus, EventHandler, ValueChange};
pub use crate::field::{Field, GanPaintField};
pub use crate::gallery::Gallery;
pub use crate::geometry::{locate, ButtonRegion, Point};
pub use crate::image::ImageRef;
pub use crate::input::{InputEvent, InputHandler, InputLocation, Surface};
pub use crate::layout::{PanelLayout, TextButton};
pub use crate::mask::{MaskError, StrokeMask};
pub use crate::panel::{PanelController, PanelStatus};
pub use crate::service::{EditRequest, EditResponse, EditResult, EditService, EditServiceError};
pub use crate::state::{EditorState, FieldSnapshot, FieldValue, SharedFieldValue};
pub use crate::stroke::{OffCanvasPoint, Stroke, StrokeRecorder};
