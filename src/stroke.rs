use crate::geometry::Point;
use crate::layout::CANVAS_SIZE;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

/// Raised when a serialized stroke holds a point outside the canvas
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("stroke point {0:?} is outside the canvas")]
pub struct OffCanvasPoint(pub Point);

/// Sealed stroke, shared with the edit request.
///
/// Every point lies on the canvas; deserializing checks this the same way
/// [`StrokeRecorder::extend`] does.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Point>", into = "Vec<Point>")]
pub struct Stroke {
    points: Arc<[Point]>,
}

/// Stroke being recorded during one gesture
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrokeRecorder {
    points: Vec<Point>,
}

impl Stroke {
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl TryFrom<Vec<Point>> for Stroke {
    type Error = OffCanvasPoint;

    fn try_from(points: Vec<Point>) -> Result<Self, Self::Error> {
        if let Some(point) = points.iter().find(|point| !point.is_within_square(CANVAS_SIZE)) {
            return Err(OffCanvasPoint(*point));
        }
        Ok(Self {
            points: points.into(),
        })
    }
}

impl From<Stroke> for Vec<Point> {
    fn from(stroke: Stroke) -> Self {
        stroke.points.to_vec()
    }
}

impl StrokeRecorder {
    /// Starts a stroke at the press position.
    ///
    /// The press position is kept as given; callers only begin strokes for
    /// presses that landed on the canvas.
    pub fn begin(point: Point) -> Self {
        debug_assert!(point.is_within_square(CANVAS_SIZE), "stroke started off canvas");
        Self {
            points: vec![point],
        }
    }

    /// Appends a drag sample. Samples off the canvas are dropped and the
    /// gesture carries on; returns whether the sample was kept.
    pub fn extend(&mut self, point: Point) -> bool {
        if !point.is_within_square(CANVAS_SIZE) {
            return false;
        }
        self.points.push(point);
        true
    }

    // Get a reference to the points for preview
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Freezes the recorded points for handoff.
    pub fn end(self) -> Stroke {
        Stroke {
            points: self.points.into(),
        }
    }
}
