//! Temporary output locations and PNG inspection helpers.

use std::path::{Path, PathBuf};
use tempfile::TempDir;

const PNG_SIGNATURE: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

/// A temporary directory that is removed when dropped.
#[derive(Debug)]
pub struct TestOutputDir {
    dir: TempDir,
}

impl TestOutputDir {
    /// Create a fresh directory.
    ///
    /// # Panics
    ///
    /// Panics if the temporary directory cannot be created.
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("failed to create temporary output directory"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Path of a file inside the directory (not created).
    pub fn file(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }
}

impl Default for TestOutputDir {
    fn default() -> Self {
        Self::new()
    }
}

/// True when `bytes` start with the PNG signature.
pub fn is_png(bytes: &[u8]) -> bool {
    bytes.len() >= 8 && bytes[..8] == PNG_SIGNATURE
}

/// `(width, height)` from a PNG's IHDR chunk.
pub fn png_dimensions(bytes: &[u8]) -> Option<(u32, u32)> {
    if !is_png(bytes) || bytes.len() < 24 || &bytes[12..16] != b"IHDR" {
        return None;
    }
    let read = |at: usize| u32::from_be_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]]);
    Some((read(16), read(20)))
}

/// Color type byte from the IHDR chunk (3 = indexed, 6 = RGBA).
pub fn png_color_type(bytes: &[u8]) -> Option<u8> {
    png_dimensions(bytes)?;
    bytes.get(25).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_dir_is_removed() {
        let path = {
            let dir = TestOutputDir::new();
            std::fs::write(dir.file("a.txt"), b"x").unwrap();
            assert!(dir.file("a.txt").exists());
            dir.path().to_path_buf()
        };
        assert!(!path.exists());
    }

    #[test]
    fn test_png_header_parsing() {
        let mut bytes = PNG_SIGNATURE.to_vec();
        bytes.extend_from_slice(&13u32.to_be_bytes());
        bytes.extend_from_slice(b"IHDR");
        bytes.extend_from_slice(&800u32.to_be_bytes());
        bytes.extend_from_slice(&600u32.to_be_bytes());
        bytes.extend_from_slice(&[8, 6, 0, 0, 0]);
        assert_eq!(png_dimensions(&bytes), Some((800, 600)));
        assert_eq!(png_color_type(&bytes), Some(6));
        assert!(!is_png(b"GIF89a"));
    }
}
