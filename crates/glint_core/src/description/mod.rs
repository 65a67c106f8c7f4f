//! Scene description support for Glint.
//!
//! This module parses the plain-text scene description format into
//! [`SceneDescription`], validating everything the renderer relies on so
//! that malformed input fails before any rendering starts.
//!
//! ## Supported objects
//!
//! - `sphere`: center and radius
//! - `cube`: axis-aligned, minimum corner and side length
//! - `pyramid`: square base corner, base width and apex height
//!
//! Lights are point lights (position, color, falloff) and spotlights
//! (point light plus a look-at target and a cutoff half-angle).
//!
//! # Example
//!
//! ```ignore
//! use glint_core::description::load_description;
//!
//! let desc = load_description("scenes/description.txt")?;
//! println!("Rendering at {}x{}", desc.pixel_size, desc.pixel_size);
//! ```

mod loader;
mod parser;
mod types;

pub use loader::*;
pub use parser::*;
pub use types::*;
