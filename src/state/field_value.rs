use crate::brush::{BrushKind, Operation};
use crate::event::ValueChange;
use crate::image::ImageRef;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// What the field keeps between panel sessions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldValue {
    /// The address the host sees through `get_value`.
    pub image: ImageRef,
    /// The gallery seed the current image was edited from; reset returns here.
    pub original_image: ImageRef,
    pub brush: BrushKind,
    pub operation: Operation,
}

impl FieldValue {
    pub fn new(image: ImageRef) -> Self {
        Self {
            original_image: image.clone(),
            image,
            brush: BrushKind::default(),
            operation: Operation::default(),
        }
    }
}

/// Handle to the persisted value shared by the host and the open panel.
///
/// Every write happens under one lock, so readers only ever observe whole
/// values. Writes belong to the panel controller, which raises the change
/// notification; the host only reads through this handle.
///
/// ```compile_fail
/// use ganpaint_field::image::ImageRef;
/// use ganpaint_field::state::{FieldValue, SharedFieldValue};
///
/// let value = SharedFieldValue::new(FieldValue::new(ImageRef::from("a.jpg")));
/// value.replace_image(ImageRef::from("b.jpg"));
/// ```
#[derive(Debug, Clone)]
pub struct SharedFieldValue {
    inner: Arc<Mutex<FieldValue>>,
}

impl SharedFieldValue {
    pub fn new(value: FieldValue) -> Self {
        Self {
            inner: Arc::new(Mutex::new(value)),
        }
    }

    pub fn get(&self) -> FieldValue {
        self.inner.lock().clone()
    }

    pub fn image(&self) -> ImageRef {
        self.inner.lock().image.clone()
    }

    /// Replaces the image address. Empty and unchanged addresses are ignored
    /// and produce no change.
    pub(crate) fn replace_image(&self, image: ImageRef) -> Option<ValueChange> {
        if image.is_empty() {
            return None;
        }
        let mut value = self.inner.lock();
        if value.image == image {
            return None;
        }
        let old = std::mem::replace(&mut value.image, image.clone());
        Some(ValueChange { old, new: image })
    }

    /// Makes `image` the new seed and the displayed image in one write.
    pub(crate) fn replace_source(&self, image: ImageRef) -> Option<ValueChange> {
        if image.is_empty() {
            return None;
        }
        let mut value = self.inner.lock();
        value.original_image = image.clone();
        if value.image == image {
            return None;
        }
        let old = std::mem::replace(&mut value.image, image.clone());
        Some(ValueChange { old, new: image })
    }

    pub(crate) fn set_brush(&self, brush: BrushKind) {
        self.inner.lock().brush = brush;
    }

    pub(crate) fn set_operation(&self, operation: Operation) {
        self.inner.lock().operation = operation;
    }

    /// Overwrites everything except the image, then replaces the image with
    /// the same rules as [`Self::replace_image`].
    pub(crate) fn restore(&self, restored: FieldValue) -> Option<ValueChange> {
        let mut value = self.inner.lock();
        value.original_image = restored.original_image;
        value.brush = restored.brush;
        value.operation = restored.operation;
        if restored.image.is_empty() || value.image == restored.image {
            return None;
        }
        let old = std::mem::replace(&mut value.image, restored.image.clone());
        Some(ValueChange {
            old,
            new: restored.image,
        })
    }
}
