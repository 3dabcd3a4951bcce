use std::sync::atomic::{AtomicUsize, Ordering};

// Single static counter for listener subscriptions
static NEXT_LISTENER_ID: AtomicUsize = AtomicUsize::new(1);

pub fn generate_listener_id() -> usize {
    NEXT_LISTENER_ID.fetch_add(1, Ordering::Relaxed)
}
