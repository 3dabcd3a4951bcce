use egui::{Context, Pos2};

/// The pointer facts the panel needs from one egui frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerState {
    pub pointer_pos: Option<Pos2>,
    pub primary_pressed: bool,
    pub primary_released: bool,
}

impl PointerState {
    /// Create a new PointerState from egui input
    pub fn from_egui(ctx: &Context) -> Self {
        ctx.input(|i| Self {
            pointer_pos: i.pointer.latest_pos(),
            primary_pressed: i.pointer.primary_pressed(),
            primary_released: i.pointer.primary_released(),
        })
    }
}
