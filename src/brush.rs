use serde::{Deserialize, Serialize};
use std::fmt;

/// The semantic category of image content a stroke paints or erases.
///
/// The backend treats the lowercase name as its feature key, so the serialized
/// form and [`BrushKind::name`] must stay in sync.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BrushKind {
    #[default]
    Tree,
    Grass,
    Door,
    Sky,
    Cloud,
    Brick,
    Dome,
}

impl BrushKind {
    /// All brushes in button order.
    pub const ALL: [BrushKind; 7] = [
        BrushKind::Tree,
        BrushKind::Grass,
        BrushKind::Door,
        BrushKind::Sky,
        BrushKind::Cloud,
        BrushKind::Brick,
        BrushKind::Dome,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Tree => "tree",
            Self::Grass => "grass",
            Self::Door => "door",
            Self::Sky => "sky",
            Self::Cloud => "cloud",
            Self::Brick => "brick",
            Self::Dome => "dome",
        }
    }

    /// Position of this brush in the button column.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|brush| brush.name() == name)
    }
}

impl fmt::Display for BrushKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Whether a stroke adds or removes the brush's content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    #[default]
    Draw,
    Remove,
}

impl Operation {
    pub const ALL: [Operation; 2] = [Operation::Draw, Operation::Remove];

    pub fn name(self) -> &'static str {
        match self {
            Self::Draw => "draw",
            Self::Remove => "remove",
        }
    }

    /// The other operation; the two buttons are mutually exclusive.
    pub fn opposite(self) -> Self {
        match self {
            Self::Draw => Self::Remove,
            Self::Remove => Self::Draw,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn brush_names_round_trip_through_lookup() {
        for brush in BrushKind::ALL {
            assert_eq!(BrushKind::from_name(brush.name()), Some(brush));
            assert_eq!(BrushKind::from_index(brush.index()), Some(brush));
        }
        assert_eq!(BrushKind::from_name("building"), None);
        assert_eq!(BrushKind::from_index(7), None);
    }

    #[test]
    fn brush_serializes_as_feature_name() {
        let json = serde_json::to_string(&BrushKind::Cloud).unwrap();
        assert_eq!(json, "\"cloud\"");
    }
}
