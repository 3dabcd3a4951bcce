// The view layer draws from the same numbers.
pub const THUMBNAIL_SIZE: i32 = 26;
pub const ARROW_SIZE: i32 = 12;
pub const BUTTON_RADIUS: i32 = 4;
pub const TEXT_BUTTON_HEIGHT: i32 = 18;
pub const BRUSH_BUTTON_WIDTH: i32 = 80;
pub const BUTTON_PAD: i32 = 4;
pub const CANVAS_SIZE: i32 = 256;
pub const GALLERY_TILE_SIZE: i32 = 32;

pub const TEXT_BUTTON_STAGE_WIDTH: i32 = 100;
pub const GALLERY_STAGE_WIDTH: i32 = 118;

pub const GALLERY_ROWS: usize = 5;
pub const GALLERY_COLUMNS: usize = 3;
/// Grid tiles plus the single trailing tile.
pub const GALLERY_TILE_COUNT: usize = GALLERY_ROWS * GALLERY_COLUMNS + 1;

const BRUSH_COLUMN_X: i32 = 10;
const BRUSH_COLUMN_Y: i32 = 19;
const GALLERY_ORIGIN_X: i32 = 5;
const GALLERY_ORIGIN_Y: i32 = 38;

use crate::brush::{BrushKind, Operation};
use crate::geometry::{self, ButtonRegion, Point};

/// Action behind one of the text buttons on the left stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextButton {
    Brush(BrushKind),
    Operation(Operation),
    Undo,
    Reset,
}

impl TextButton {
    pub const DRAW_INDEX: usize = 7;
    pub const REMOVE_INDEX: usize = 8;
    pub const UNDO_INDEX: usize = 9;
    pub const RESET_INDEX: usize = 10;
    pub const COUNT: usize = 11;

    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0..=6 => BrushKind::from_index(index).map(Self::Brush),
            Self::DRAW_INDEX => Some(Self::Operation(Operation::Draw)),
            Self::REMOVE_INDEX => Some(Self::Operation(Operation::Remove)),
            Self::UNDO_INDEX => Some(Self::Undo),
            Self::RESET_INDEX => Some(Self::Reset),
            _ => None,
        }
    }

    pub fn index(self) -> usize {
        match self {
            Self::Brush(brush) => brush.index(),
            Self::Operation(Operation::Draw) => Self::DRAW_INDEX,
            Self::Operation(Operation::Remove) => Self::REMOVE_INDEX,
            Self::Undo => Self::UNDO_INDEX,
            Self::Reset => Self::RESET_INDEX,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Brush(brush) => brush.name(),
            Self::Operation(operation) => operation.name(),
            Self::Undo => "undo",
            Self::Reset => "reset",
        }
    }
}

/// Button regions for both button stages, in hit-test order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelLayout {
    text_buttons: Vec<ButtonRegion>,
    gallery_tiles: Vec<ButtonRegion>,
}

impl Default for PanelLayout {
    fn default() -> Self {
        Self::build()
    }
}

impl PanelLayout {
    pub fn build() -> Self {
        let mut text_buttons = Vec::with_capacity(TextButton::COUNT);
        for i in 0..BrushKind::ALL.len() as i32 {
            let y = BRUSH_COLUMN_Y + i * (TEXT_BUTTON_HEIGHT + BUTTON_PAD);
            text_buttons.push(ButtonRegion::new(
                BRUSH_COLUMN_X,
                y,
                BRUSH_BUTTON_WIDTH,
                TEXT_BUTTON_HEIGHT,
            ));
        }
        // draw, remove, undo, reset
        text_buttons.push(ButtonRegion::new(6, 191, 36, TEXT_BUTTON_HEIGHT));
        text_buttons.push(ButtonRegion::new(46, 191, 48, TEXT_BUTTON_HEIGHT));
        text_buttons.push(ButtonRegion::new(8, 218, 36, TEXT_BUTTON_HEIGHT));
        text_buttons.push(ButtonRegion::new(50, 218, 37, TEXT_BUTTON_HEIGHT));

        let step = GALLERY_TILE_SIZE + BUTTON_PAD;
        let mut gallery_tiles = Vec::with_capacity(GALLERY_TILE_COUNT);
        for row in 0..GALLERY_ROWS as i32 {
            let y = GALLERY_ORIGIN_Y + row * step;
            for col in 0..GALLERY_COLUMNS as i32 {
                let x = GALLERY_ORIGIN_X + col * step;
                gallery_tiles.push(ButtonRegion::new(x, y, GALLERY_TILE_SIZE, GALLERY_TILE_SIZE));
            }
        }
        gallery_tiles.push(ButtonRegion::new(
            GALLERY_ORIGIN_X,
            GALLERY_ORIGIN_Y + GALLERY_ROWS as i32 * step,
            GALLERY_TILE_SIZE,
            GALLERY_TILE_SIZE,
        ));

        Self {
            text_buttons,
            gallery_tiles,
        }
    }

    pub fn text_buttons(&self) -> &[ButtonRegion] {
        &self.text_buttons
    }

    pub fn gallery_tiles(&self) -> &[ButtonRegion] {
        &self.gallery_tiles
    }

    pub fn text_button_at(&self, point: Point) -> Option<TextButton> {
        geometry::locate(point, &self.text_buttons).and_then(TextButton::from_index)
    }

    /// Gallery tile index under `point`; equals the seed image number.
    pub fn gallery_tile_at(&self, point: Point) -> Option<usize> {
        geometry::locate(point, &self.gallery_tiles)
    }
}
