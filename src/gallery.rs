use crate::config::FieldConfig;
use crate::image::ImageRef;
use crate::layout::GALLERY_TILE_COUNT;

const SEED_STEM: &str = "church";

/// Dataset ids the edit backend uses for the sixteen seed images, by gallery index.
pub const DATASET_IMAGE_IDS: [u32; GALLERY_TILE_COUNT] = [
    104, 425, 457, 489, 495, 570, 584, 644, 700, 705, 719, 726, 816, 1085, 1146, 1362,
];

/// Deterministic addressing of the seed images shown in the gallery stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gallery {
    base: String,
    extension: String,
}

impl Gallery {
    pub fn new(config: &FieldConfig) -> Self {
        Self {
            base: config.gallery_base(),
            extension: config.image_extension.clone(),
        }
    }

    pub fn len(&self) -> usize {
        GALLERY_TILE_COUNT
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    /// Address of seed `index`, or `None` outside `0..16`.
    pub fn address(&self, index: usize) -> Option<ImageRef> {
        (index < GALLERY_TILE_COUNT).then(|| {
            ImageRef::new(format!("{}{}{}.{}", self.base, SEED_STEM, index, self.extension))
        })
    }

    /// The image a freshly created field shows.
    pub fn default_image(&self) -> ImageRef {
        ImageRef::new(format!("{}{}0.{}", self.base, SEED_STEM, self.extension))
    }

    pub fn addresses(&self) -> impl Iterator<Item = ImageRef> + '_ {
        (0..GALLERY_TILE_COUNT).filter_map(|index| self.address(index))
    }
}

/// Recovers the seed number from a `churchN.ext` address.
///
/// Only the file name is inspected, so any base path is accepted. Images
/// returned by the edit service usually do not follow the scheme.
pub fn seed_index(image: &ImageRef) -> Option<usize> {
    let file_name = image.file_name();
    let stem = file_name.split('.').next()?;
    let digits = stem.strip_prefix(SEED_STEM)?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits
        .parse::<usize>()
        .ok()
        .filter(|index| *index < GALLERY_TILE_COUNT)
}

/// Backend dataset id of a seed image address.
pub fn dataset_image_id(image: &ImageRef) -> Option<u32> {
    seed_index(image).map(|index| DATASET_IMAGE_IDS[index])
}
