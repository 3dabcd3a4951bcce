use crate::image::ImageRef;
use std::collections::VecDeque;

/// Images the current image can be rolled back to, most recent last.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageHistory {
    /// Stack of images that can be restored by undo
    undo_stack: VecDeque<ImageRef>,
    /// Entries beyond this are dropped from the bottom
    depth: usize,
}

impl ImageHistory {
    /// Creates a new empty history holding at most `depth` images
    pub fn new(depth: usize) -> Self {
        Self {
            undo_stack: VecDeque::with_capacity(depth.min(64)),
            depth,
        }
    }

    /// Record the image that a committed edit replaced
    pub fn push(&mut self, image: ImageRef) {
        if self.depth == 0 {
            return;
        }
        if self.undo_stack.len() == self.depth {
            self.undo_stack.pop_front();
        }
        self.undo_stack.push_back(image);
    }

    /// Take the most recently replaced image, if any
    pub fn pop(&mut self) -> Option<ImageRef> {
        self.undo_stack.pop_back()
    }

    /// Returns true if there are images that can be restored
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.undo_stack.is_empty()
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn entries(&self) -> impl Iterator<Item = &ImageRef> {
        self.undo_stack.iter()
    }

    /// Clear the history
    pub fn clear(&mut self) {
        self.undo_stack.clear();
    }
}
