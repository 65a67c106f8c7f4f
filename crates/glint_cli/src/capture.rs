//! Output naming for successive captures.

use std::path::{Path, PathBuf};

/// Hands out `Output_<n>.bmp` paths with a strictly increasing `n`.
#[derive(Debug, Clone)]
pub struct CaptureSequence {
    output_dir: PathBuf,
    next_index: u32,
}

impl CaptureSequence {
    pub fn new(output_dir: impl Into<PathBuf>, start_index: u32) -> Self {
        Self {
            output_dir: output_dir.into(),
            next_index: start_index,
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Index the next capture will use.
    pub fn peek(&self) -> u32 {
        self.next_index
    }

    /// Path for the next capture; advances the counter.
    pub fn next_path(&mut self) -> PathBuf {
        let path = self
            .output_dir
            .join(format!("Output_{}.bmp", self.next_index));
        self.next_index += 1;
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_are_numbered_in_order() {
        let mut captures = CaptureSequence::new("renders", 1);
        assert_eq!(captures.next_path(), Path::new("renders").join("Output_1.bmp"));
        assert_eq!(captures.next_path(), Path::new("renders").join("Output_2.bmp"));
        assert_eq!(captures.peek(), 3);
    }

    #[test]
    fn test_custom_start_index() {
        let mut captures = CaptureSequence::new(".", 41);
        let first = captures.next_path();
        let second = captures.next_path();
        assert!(first.ends_with("Output_41.bmp"));
        assert!(second.ends_with("Output_42.bmp"));
        assert_eq!(captures.output_dir(), Path::new("."));
    }
}
