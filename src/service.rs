//! Contract with the external image-editing backend.
//!
//! One committed stroke produces exactly one [`EditRequest`]; the service
//! answers with one [`EditResponse`] or an [`EditServiceError`]. Transport and
//! encoding belong to the implementor.

use crate::brush::{BrushKind, Operation};
use crate::gallery;
use crate::geometry::Point;
use crate::image::ImageRef;
use crate::mask::StrokeMask;
use crate::stroke::Stroke;
use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use uuid::Uuid;

/// Errors reported for a committed stroke
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditServiceError {
    #[error("Edit service rejected the request: {0}")]
    Rejected(String),

    #[error("Edit service unavailable: {0}")]
    Unavailable(String),

    #[error("Edit service did not answer within {0:?}")]
    Timeout(Duration),

    #[error("Edit request was cancelled")]
    Cancelled,

    #[error("Edit service returned an invalid response: {0}")]
    InvalidResponse(String),
}

pub type EditResult = Result<EditResponse, EditServiceError>;

/// Everything the backend needs to repaint one stroke.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditRequest {
    pub id: Uuid,
    pub stroke_points: Stroke,
    pub brush: BrushKind,
    pub operation: Operation,
    pub source_image: ImageRef,
    /// Half-width of the square pen used for [`Self::mask`]
    #[serde(default)]
    pub pen_radius: u32,
}

impl EditRequest {
    pub fn new(stroke: Stroke, brush: BrushKind, operation: Operation, source_image: ImageRef) -> Self {
        Self {
            id: Uuid::new_v4(),
            stroke_points: stroke,
            brush,
            operation,
            source_image,
            pen_radius: 0,
        }
    }

    pub fn with_pen_radius(mut self, pen_radius: u32) -> Self {
        self.pen_radius = pen_radius;
        self
    }

    pub fn points(&self) -> &[Point] {
        self.stroke_points.points()
    }

    /// Feature key the backend ranks its units by.
    pub fn feature(&self) -> &'static str {
        self.brush.name()
    }

    /// Selection mask of the stroke, drawn with the request's pen.
    pub fn mask(&self) -> StrokeMask {
        StrokeMask::rasterize(&self.stroke_points, self.pen_radius)
    }

    /// Dataset id of the source, when the source is still a gallery seed.
    pub fn dataset_image_id(&self) -> Option<u32> {
        gallery::dataset_image_id(&self.source_image)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditResponse {
    pub result_image: ImageRef,
}

impl EditResponse {
    pub fn new(result_image: impl Into<ImageRef>) -> Self {
        Self {
            result_image: result_image.into(),
        }
    }
}

/// The image-editing backend.
///
/// `submit` must not block: the returned future is polled from the UI loop
/// until it resolves or the commit times out. Dropping the future cancels the
/// request from the panel's point of view.
pub trait EditService: Send + Sync {
    fn submit(&self, request: EditRequest) -> BoxFuture<'static, EditResult>;
}

impl<F> EditService for F
where
    F: Fn(EditRequest) -> BoxFuture<'static, EditResult> + Send + Sync,
{
    fn submit(&self, request: EditRequest) -> BoxFuture<'static, EditResult> {
        self(request)
    }
}
