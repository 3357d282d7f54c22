//! References to media files embedded in content records.

use std::fmt;

/// A reference to a binary or media resource, such as an uploaded image.
///
/// Only the path is written out when a record is encoded.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AssetReference {
    path: String,
}

impl AssetReference {
    /// Creates a reference to the asset at `path`.
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the asset path.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }
}

impl fmt::Display for AssetReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_path() {
        let asset = AssetReference::new("/images/photo.png");
        assert_eq!(asset.path(), "/images/photo.png");
        assert_eq!(asset.to_string(), "/images/photo.png");
    }
}
