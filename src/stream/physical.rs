//! Physical file backend for memory-mapped I/O.
//!
//! This module provides the [`crate::stream::Physical`] backend that implements the
//! [`crate::stream::Backend`] trait for accessing section data from disk using
//! memory-mapped I/O. Debug sections can be large (hundreds of megabytes for a
//! binary with full debug info) and are accessed in a sparse, non-sequential
//! pattern during decoding, which is exactly the access profile demand paging
//! serves well.
//!
//! # Usage Examples
//!
//! ```rust,no_run
//! use dwarfscope::{Backend, Physical};
//! use std::path::Path;
//!
//! let section = Physical::new(Path::new("debug_abbrev.bin"))?;
//! println!("Section size: {} bytes", section.len());
//!
//! let head = section.data_slice(0, 4)?;
//! println!("First bytes: {head:02X?}");
//! # Ok::<(), dwarfscope::Error>(())
//! ```

use super::Backend;
use crate::{
    Error::{Error, FileError},
    Result,
};

use memmap2::Mmap;
use std::{fs, path::Path};

/// Section data backed by a read-only memory-mapped file.
///
/// [`Physical`] maps a file directly into the process's virtual address space,
/// so only the pages a decoder actually touches are loaded. The mapping is
/// read-only and shared; multiple processes can access the same file
/// efficiently. All access operations include bounds checking.
///
/// # Examples
///
/// ```rust,no_run
/// use dwarfscope::{Backend, Physical};
/// use std::path::Path;
///
/// let section = Physical::new(Path::new("debug_abbrev.bin"))?;
/// assert!(section.len() > 0);
/// # Ok::<(), dwarfscope::Error>(())
/// ```
#[derive(Debug)]
pub struct Physical {
    /// Memory-mapped file data
    data: Mmap,
}

impl Physical {
    /// Create a new physical backend by memory-mapping the specified file.
    ///
    /// # Arguments
    /// * `path` - Path to the section data on disk. Accepts `&Path`, `&str`, `String`, or `PathBuf`.
    ///
    /// # Errors
    /// Returns [`crate::Error::FileError`] if the file cannot be opened or
    /// [`crate::Error::Error`] if memory mapping fails.
    pub fn new(path: impl AsRef<Path>) -> Result<Physical> {
        let file = match fs::File::open(path) {
            Ok(file) => file,
            Err(error) => return Err(FileError(error)),
        };

        let mmap = match unsafe { Mmap::map(&file) } {
            Ok(mmap) => mmap,
            Err(error) => return Err(Error(error.to_string())),
        };

        Ok(Physical { data: mmap })
    }

    /// Creates a new physical backend from an already-opened [`std::fs::File`].
    ///
    /// Useful when the file needs to be opened with specific permissions or flags
    /// before mapping.
    ///
    /// # Arguments
    /// * `file` - An opened file handle
    ///
    /// # Errors
    /// Returns [`crate::Error::Error`] if memory mapping fails.
    #[allow(clippy::needless_pass_by_value)]
    pub fn from_std_file(file: fs::File) -> Result<Physical> {
        // The handle must stay alive for the duration of the mapping; Mmap keeps
        // it alive internally, so taking `file` by value is intentional.
        let mmap = unsafe { Mmap::map(&file) }.map_err(|error| Error(error.to_string()))?;

        Ok(Physical { data: mmap })
    }
}

impl Backend for Physical {
    fn data_slice(&self, offset: usize, len: usize) -> Result<&[u8]> {
        let Some(offset_end) = offset.checked_add(len) else {
            return Err(out_of_bounds_error!());
        };

        if offset_end > self.data.len() {
            return Err(out_of_bounds_error!());
        }

        Ok(&self.data[offset..offset_end])
    }

    fn data(&self) -> &[u8] {
        self.data.as_ref()
    }

    fn len(&self) -> usize {
        self.data.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_file(name: &str, content: &[u8]) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn maps_and_slices() {
        let path = temp_file(
            "dwarfscope_physical_test.bin",
            &[0x01, 0x11, 0x01, 0x03, 0x08, 0x00, 0x00, 0x00],
        );

        let physical = Physical::new(&path).unwrap();
        assert_eq!(physical.len(), 8);
        assert_eq!(physical.data()[1], 0x11);
        assert_eq!(physical.data_slice(3, 2).unwrap(), &[0x03, 0x08]);

        assert!(physical.data_slice(7, 2).is_err());
        assert!(physical.data_slice(usize::MAX, 1).is_err());

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn invalid_file_path() {
        let result = Physical::new("/nonexistent/path/to/debug_abbrev.bin");
        match result {
            Err(FileError(io_error)) => {
                assert_eq!(io_error.kind(), std::io::ErrorKind::NotFound);
            }
            _ => panic!("Expected FileError"),
        }
    }

    #[test]
    fn from_std_file_maps() {
        let path = temp_file("dwarfscope_physical_std.bin", &[0xAA, 0xBB, 0xCC]);

        let file = std::fs::File::open(&path).unwrap();
        let physical = Physical::from_std_file(file).unwrap();
        assert_eq!(physical.data(), &[0xAA, 0xBB, 0xCC]);

        std::fs::remove_file(&path).unwrap();
    }
}
