//! Byte-stream access layer for DWARF section decoding.
//!
//! This module provides the storage boundary and the reading machinery every decoder
//! in this crate is built on. Section data (e.g. the contents of `.debug_abbrev`)
//! is owned by a [`crate::stream::Backend`] implementation; decoding happens through
//! a [`crate::stream::Parser`] cursor positioned over that data, and structured
//! records are read through the [`crate::stream::Record`] layout trait.
//!
//! # Architecture
//!
//! Three layers, bottom up:
//!
//! - **Storage** - [`crate::stream::Backend`] abstracts where the bytes live:
//!   [`crate::stream::Memory`] for owned buffers, [`crate::stream::Physical`] for
//!   memory-mapped files. Backends are immutable and hold no cursor; every reader
//!   keeps its own position.
//! - **Primitives** - [`crate::stream::io`] reads fixed-width integers at an explicit
//!   offset with bounds checking, in either byte order.
//! - **Cursor** - [`crate::stream::Parser`] maintains a position over a byte slice
//!   and layers DWARF-specific reads on the primitives: LEB128 varints, chunked
//!   C-string scanning, and scoped position preservation for nested decodes.
//!
//! # Key Components
//!
//! - [`crate::stream::Backend`] - Storage trait with bounds-checked slice access
//! - [`crate::stream::Memory`] / [`crate::stream::Physical`] - Owned-buffer and mmap backends
//! - [`crate::stream::Parser`] - Cursor-based reader for section data
//! - [`crate::stream::Record`] / [`crate::stream::parse_record_at`] - Declarative record
//!   layouts with unified error translation
//!
//! # Usage Examples
//!
//! ```rust
//! use dwarfscope::{Backend, Memory, Parser};
//!
//! let section = Memory::new(vec![0xE5, 0x8E, 0x26, 0x2A]);
//! let mut parser = Parser::new(section.data());
//!
//! let value = parser.read_uleb128()?;
//! assert_eq!(value, 624485);
//! assert_eq!(parser.pos(), 3);
//! # Ok::<(), dwarfscope::Error>(())
//! ```

pub mod io;
pub mod parser;
pub mod record;

mod memory;
mod physical;

pub use memory::Memory;
pub use parser::Parser;
pub use physical::Physical;
pub use record::{parse_record_at, Record};

use crate::Result;

/// Storage abstraction for section data.
///
/// A `Backend` owns (or maps) the raw bytes of a DWARF section and hands out
/// bounds-checked views of them. Backends carry no read position: the cursor is
/// the private state of whichever [`Parser`] or table is decoding, which is what
/// lets several consumers share one backend safely.
///
/// # Examples
///
/// ```rust
/// use dwarfscope::{Backend, Memory};
///
/// let section = Memory::new(vec![0x01, 0x02, 0x03, 0x04]);
/// assert_eq!(section.len(), 4);
/// assert_eq!(section.data_slice(1, 2)?, &[0x02, 0x03]);
/// # Ok::<(), dwarfscope::Error>(())
/// ```
pub trait Backend: Send + Sync {
    /// Returns a slice of the data at the given offset and length.
    ///
    /// This method provides bounds-checked access to the underlying data.
    ///
    /// # Arguments
    ///
    /// * `offset` - The starting offset within the data.
    /// * `len` - The length of the slice in bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the requested range is out of bounds.
    fn data_slice(&self, offset: usize, len: usize) -> Result<&[u8]>;

    /// Returns the entire data buffer.
    ///
    /// For file-based backends this is the mapped file content; for memory-based
    /// backends the underlying buffer.
    fn data(&self) -> &[u8];

    /// Returns the total length of the data buffer.
    ///
    /// This is equivalent to `self.data().len()` but may be more efficient
    /// for some backend implementations.
    fn len(&self) -> usize;

    /// Returns `true` if the backend holds no data.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
