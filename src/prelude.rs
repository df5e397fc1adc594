//! # dwarfscope Prelude
//!
//! This module provides a convenient prelude for the most commonly used types
//! and traits from the dwarfscope library. Import this module to get quick
//! access to the essential types for abbreviation-table decoding.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all dwarfscope operations
pub use crate::Error;

/// The result type used throughout dwarfscope
pub use crate::Result;

// ================================================================================================
// Main Entry Points
// ================================================================================================

/// Lazy abbreviation-table decoding
pub use crate::{AbbrevDecl, AbbrevTable, AttributeSpec, FieldValue};

/// Section backends and low-level stream parsing
pub use crate::{parse_record_at, Backend, Memory, Parser, Physical, Record};

// ================================================================================================
// DWARF Constants
// ================================================================================================

/// Constant newtypes; the individual `DW_*` values live in [`crate::constants`]
pub use crate::constants::{DwAt, DwChildren, DwForm, DwTag};

pub use crate::constants::{DW_CHILDREN_no, DW_CHILDREN_yes};
