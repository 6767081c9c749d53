// Adapters layer: concrete catalog providers (local file, http).

pub mod file_source;
pub mod http_source;

pub use file_source::{CatalogFormat, FileCatalogSource};
pub use http_source::HttpCatalogSource;

use crate::domain::ports::CatalogSource;
use crate::utils::error::Result;

/// Picks a provider from a location string: http(s) URLs are fetched,
/// anything else is read from disk.
pub fn catalog_source_from(location: &str) -> Result<Box<dyn CatalogSource>> {
    let trimmed = location.trim();
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        Ok(Box::new(HttpCatalogSource::new(trimmed)?))
    } else {
        Ok(Box::new(FileCatalogSource::new(trimmed)?))
    }
}
