// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]
#![allow(dead_code)]
//#![deny(unsafe_code)]
// - 'stream/physical.rs' uses mmap to map a file into memory

//! # dwarfscope
//!
//! A small, focused framework for decoding DWARF abbreviation tables from
//! `.debug_abbrev` sections. Built in pure Rust, `dwarfscope` provides the
//! byte-stream substrate (endian-aware reads, LEB128 varints, cursor
//! discipline) and a lazy, memoizing abbreviation-table decoder on top of it.
//!
//! ## Features
//!
//! - **📦 Efficient section access** - Memory-mapped file access or in-memory
//!   buffers behind one [`Backend`] trait
//! - **⏳ Lazy decoding** - Abbreviation entries are decoded only as far as a
//!   lookup needs, and never twice
//! - **🔧 Cross-platform** - Works on Windows, Linux, macOS, and any
//!   Rust-supported platform
//! - **🛡️ Memory safe** - Strict bounds checking and comprehensive error
//!   handling; malformed input becomes an [`Error`], never a panic
//!
//! ## Quick Start
//!
//! Add `dwarfscope` to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! dwarfscope = "0.1"
//! ```
//!
//! ### Using the Prelude
//!
//! For convenient access to the most commonly used types, import the prelude:
//!
//! ```rust
//! use dwarfscope::prelude::*;
//!
//! let section = Memory::new(vec![
//!     0x01, 0x11, 0x01, 0x03, 0x0E, 0x00, 0x00,
//!     0x00,
//! ]);
//! let mut table = AbbrevTable::new(&section, 0);
//! let decl = table.get_abbrev(1)?;
//! println!("tag: {}", decl.tag());
//! # Ok::<(), dwarfscope::Error>(())
//! ```
//!
//! ### File-backed Sections
//!
//! ```rust,no_run
//! use dwarfscope::{AbbrevTable, Physical};
//!
//! // Map a raw .debug_abbrev section dump from disk
//! let section = Physical::new("tests/samples/debug_abbrev.bin")?;
//! let mut table = AbbrevTable::new(&section, 0);
//! let decl = table.get_abbrev(1)?;
//! # Ok::<(), dwarfscope::Error>(())
//! ```
//!
//! ## Architecture
//!
//! `dwarfscope` is organized into a few key modules:
//!
//! - [`prelude`] - Convenient re-exports of commonly used types and traits
//! - [`stream`] - Section backends, the byte-stream [`Parser`], endian reads
//!   and the [`Record`] decoding seam
//! - [`abbrev`] - Abbreviation tables and declarations
//! - [`constants`] - DWARF tag, attribute, form and children-flag constants
//! - [`Error`] and [`Result`] - Comprehensive error handling
//!
//! ### The Abbreviation Layer
//!
//! [`AbbrevTable`] is the main entry point. It decodes one table from a
//! section at a given offset, strictly on demand: looking up a code decodes
//! entries in stream order only until that code is found, caching everything
//! decoded along the way. [`AbbrevDecl`] exposes the decoded entry through
//! typed accessors.
//!
//! ### The Stream Layer
//!
//! The [`stream`] module provides the machinery the abbreviation layer is
//! built on and is usable on its own for other DWARF section work:
//!
//! - **Backends**: [`Memory`] (owned buffer) and [`Physical`] (memory-mapped
//!   file) behind the [`Backend`] trait
//! - **Parser**: bounds-checked cursor reads, ULEB128/SLEB128, C-string
//!   scanning, save/restore cursor discipline
//! - **Records**: the [`Record`] trait and [`parse_record_at`] for decoding
//!   typed records at the cursor or an explicit offset
//!
//! ## Error Handling
//!
//! All operations return [`Result<T, Error>`](Result) with detailed error
//! information:
//!
//! ```rust
//! use dwarfscope::{AbbrevTable, Error, Memory};
//!
//! let section = Memory::new(vec![0x00]);
//! let mut table = AbbrevTable::new(&section, 0);
//! match table.get_abbrev(4) {
//!     Ok(decl) => println!("found {}", decl.tag()),
//!     Err(Error::AbbrevNotFound(code)) => println!("no declaration {}", code),
//!     Err(Error::Malformed { message, .. }) => println!("malformed: {}", message),
//!     Err(e) => println!("other error: {}", e),
//! }
//! ```
#[macro_use]
pub(crate) mod error;

/// Convenient re-exports of the most commonly used types and traits.
///
/// This module provides a curated selection of the most frequently used types
/// from across the dwarfscope library, allowing for convenient glob imports.
///
/// # Example
///
/// ```rust
/// use dwarfscope::prelude::*;
///
/// let section = Memory::new(vec![0x00]);
/// let mut table = AbbrevTable::new(&section, 0);
/// assert!(table.get_abbrev(1).is_err());
/// ```
pub mod prelude;

/// DWARF abbreviation tables and declarations.
///
/// This module implements lazy decoding of `.debug_abbrev` tables. It
/// provides:
///
/// - **Lazy Lookup**: Decode entries only as far as a code lookup requires
/// - **Memoization**: Every decoded declaration is cached for the table's
///   lifetime
/// - **Resumability**: The decode cursor persists across lookups
///
/// # Key Types
///
/// - [`AbbrevTable`] - One table, decoded lazily from a section offset
/// - [`AbbrevDecl`] - A decoded declaration with typed accessors
/// - [`AttributeSpec`] - One (name, form) attribute description
///
/// # Examples
///
/// ```rust
/// use dwarfscope::{AbbrevTable, Memory};
/// use dwarfscope::constants::DW_TAG_compile_unit;
///
/// let section = Memory::new(vec![0x01, 0x11, 0x01, 0x00, 0x00, 0x00]);
/// let mut table = AbbrevTable::new(&section, 0);
/// assert_eq!(table.get_abbrev(1)?.tag(), DW_TAG_compile_unit);
/// # Ok::<(), dwarfscope::Error>(())
/// ```
pub mod abbrev;

/// DWARF constant definitions: tags, attributes, forms, children flags.
///
/// Each constant family is a tuple newtype over its encoded width, so unknown
/// values read from real sections are carried losslessly rather than rejected.
///
/// # Examples
///
/// ```rust
/// use dwarfscope::constants::{DwTag, DW_TAG_compile_unit};
///
/// assert_eq!(DwTag(0x11), DW_TAG_compile_unit);
/// assert_eq!(format!("{}", DW_TAG_compile_unit), "DW_TAG_compile_unit");
/// assert_eq!(format!("{}", DwTag(0x9999)), "Unknown DwTag: 0x9999");
/// ```
pub mod constants;

/// Low-level section and byte-stream parsing utilities.
///
/// Provides the section [`Backend`] trait with its [`Memory`] and [`Physical`]
/// implementations, the bounds-checked [`Parser`] cursor, endian-aware
/// primitive reads, and the [`Record`] trait for typed record decoding.
///
/// # Example
///
/// ```rust
/// use dwarfscope::Parser;
///
/// let mut parser = Parser::new(&[0xE5, 0x8E, 0x26]);
/// assert_eq!(parser.read_uleb128()?, 624485);
/// # Ok::<(), dwarfscope::Error>(())
/// ```
pub mod stream;

/// General-purpose helpers shared across the crate.
pub mod utils;

/// `dwarfscope` Result type
///
/// A type alias for [`std::result::Result<T, Error>`] where the error type is
/// always [`Error`]. This is used consistently throughout the crate for all
/// fallible operations.
pub type Result<T> = std::result::Result<T, Error>;

/// `dwarfscope` Error type
///
/// The main error type for all operations in this crate. Provides detailed
/// error information for section access, stream parsing, and abbreviation
/// decoding.
pub use error::Error;

pub use error::{dwarf_assert, format_assert};

/// Abbreviation decoding entry points.
///
/// See [`abbrev::AbbrevTable`] for lazy table decoding and
/// [`abbrev::AbbrevDecl`] for the decoded declarations it hands out.
pub use abbrev::{AbbrevDecl, AbbrevTable, AttributeSpec, FieldValue};

/// Provides access to low-level section and byte-stream parsing utilities.
///
/// The [`Parser`] type is the cursor every decoder in this crate reads
/// through; [`Memory`] and [`Physical`] are the section backends.
pub use stream::{parse_record_at, Backend, Memory, Parser, Physical, Record};
