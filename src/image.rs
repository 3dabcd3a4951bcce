use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Address of a bitmap: a gallery seed or an image returned by the edit service.
///
/// The crate never dereferences the address; it is only compared, stored and
/// handed to the view layer. Cloning shares the underlying string.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageRef(Arc<str>);

impl ImageRef {
    pub fn new(address: impl Into<Arc<str>>) -> Self {
        Self(address.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// File name after the last `/`, or the whole address.
    pub fn file_name(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or(&self.0)
    }
}

impl fmt::Debug for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ImageRef").field(&&*self.0).finish()
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ImageRef {
    fn from(address: &str) -> Self {
        Self::new(address)
    }
}

impl From<String> for ImageRef {
    fn from(address: String) -> Self {
        Self::new(address)
    }
}

impl AsRef<str> for ImageRef {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}
