//! Text formats for Folio content records.
//!
//! Both formats share one output pipeline:
//! - Custom scalars (timestamps, asset references) resolved first
//! - Mapping keys ordered with the caller's `SortedKeys` at every level
//! - The library serializer emits the resulting plain data

mod json;
mod schema;
mod yaml;

pub use json::*;
pub use schema::*;
pub use yaml::*;

use std::path::Path;

use folio_domain::ContentFormat;

/// Returns the format handling files with `extension` (case-insensitive,
/// with or without a leading dot).
#[must_use]
pub fn format_for_extension(extension: &str) -> Option<Box<dyn ContentFormat>> {
    let extension = extension.trim_start_matches('.').to_ascii_lowercase();
    let formats: [Box<dyn ContentFormat>; 2] =
        [Box::new(YamlFormat::new()), Box::new(JsonFormat::new())];
    let format = formats
        .into_iter()
        .find(|format| format.extensions().contains(&extension.as_str()));
    if format.is_none() {
        tracing::debug!(%extension, "no content format for extension");
    }
    format
}

/// Returns the format handling the file at `path`, by its extension.
#[must_use]
pub fn format_for_path(path: &Path) -> Option<Box<dyn ContentFormat>> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .and_then(format_for_extension)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_for_extension() {
        assert_eq!(format_for_extension("yml").map(|f| f.name()), Some("yaml"));
        assert_eq!(format_for_extension(".YAML").map(|f| f.name()), Some("yaml"));
        assert_eq!(format_for_extension("json").map(|f| f.name()), Some("json"));
        assert!(format_for_extension("toml").is_none());
    }

    #[test]
    fn test_format_for_path() {
        let format = format_for_path(Path::new("content/posts/hello.md.yml"));
        assert_eq!(format.map(|f| f.name()), Some("yaml"));
        assert!(format_for_path(Path::new("README")).is_none());
    }
}
