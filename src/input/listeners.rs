use std::cell::RefCell;
use std::rc::{Rc, Weak};
use crate::id_generator::generate_listener_id;

/// The pointer bindings the field and its panel can hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListenerKind {
    /// Press on the field thumbnail; opens the panel
    FieldPress,
    /// Press on the text button stage
    ButtonPress,
    /// Press on the canvas; starts a stroke
    CanvasPress,
    /// Press on the gallery stage
    GalleryPress,
    /// Suppresses native dragging of the canvas image
    CanvasDragGuard,
    /// Document-wide move tracking, only while a stroke is recorded
    DocumentMove,
    /// Document-wide release, only while a stroke is recorded
    DocumentRelease,
}

type Bindings = RefCell<Vec<(usize, ListenerKind)>>;

/// The set of live pointer bindings.
///
/// Bindings only exist while their [`Subscription`] is alive; dropping the
/// subscription releases the binding.
#[derive(Debug, Clone, Default)]
pub struct ListenerRegistry {
    bindings: Rc<Bindings>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind(&self, kind: ListenerKind) -> Subscription {
        let id = generate_listener_id();
        self.bindings.borrow_mut().push((id, kind));
        log::trace!("Bound {:?} listener #{}", kind, id);
        Subscription {
            id,
            kind,
            bindings: Rc::downgrade(&self.bindings),
        }
    }

    pub fn is_bound(&self, kind: ListenerKind) -> bool {
        self.bindings.borrow().iter().any(|(_, bound)| *bound == kind)
    }

    /// Number of live bindings of any kind
    pub fn len(&self) -> usize {
        self.bindings.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.borrow().is_empty()
    }
}

/// Ownership of one binding in a [`ListenerRegistry`]
#[must_use = "the listener is released as soon as the subscription is dropped"]
#[derive(Debug)]
pub struct Subscription {
    id: usize,
    kind: ListenerKind,
    bindings: Weak<Bindings>,
}

impl Subscription {
    pub fn kind(&self) -> ListenerKind {
        self.kind
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(bindings) = self.bindings.upgrade() {
            bindings.borrow_mut().retain(|(id, _)| *id != self.id);
            log::trace!("Released {:?} listener #{}", self.kind, self.id);
        }
    }
}
