//! Glint Core - scene description types and loading.
//!
//! This crate provides:
//!
//! - **Description types**: `SceneDescription`, `ObjectDesc`, light descriptions
//! - **Loading**: text description parsing with line-accurate errors
//!
//! # Example
//!
//! ```ignore
//! use glint_core::load_description;
//!
//! let desc = load_description("description.txt")?;
//! println!("Loaded {} objects, {} lights",
//!     desc.objects.len(),
//!     desc.light_count());
//! ```

pub mod description;

// Re-export commonly used types
pub use description::{
    load_description, load_description_from_string, parse_description, LoadError, ObjectDesc,
    ParseError, SceneDescription,
};
