//! Scene description loading from disk.

use std::path::Path;

use thiserror::Error;

use super::parser::{parse_description, ParseError};
use super::types::SceneDescription;

/// Errors that can occur while loading a scene description.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),
}

/// Result type for loading operations.
pub type LoadResult<T> = Result<T, LoadError>;

/// Load and validate a scene description file.
///
/// # Example
///
/// ```ignore
/// use glint_core::description::load_description;
///
/// let desc = load_description("description.txt")?;
/// println!("{} objects, {} lights", desc.objects.len(), desc.light_count());
/// ```
pub fn load_description<P: AsRef<Path>>(path: P) -> LoadResult<SceneDescription> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })?;

    let desc = load_description_from_string(&content)?;
    log::info!(
        "Loaded {}: {} objects, {} point lights, {} spotlights",
        path.display(),
        desc.objects.len(),
        desc.point_lights.len(),
        desc.spot_lights.len()
    );
    Ok(desc)
}

/// Load a description from a string (useful for testing).
pub fn load_description_from_string(content: &str) -> LoadResult<SceneDescription> {
    let desc = parse_description(content)?;

    if desc.light_count() == 0 {
        log::warn!("Scene has no lights, only ambient shading will be visible");
    }

    Ok(desc)
}
