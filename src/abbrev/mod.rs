//! DWARF abbreviation table decoding.
//!
//! Every Debugging Information Entry (DIE) in a compilation unit opens with a
//! small integer code referencing a declaration in the unit's abbreviation
//! table; the declaration supplies the DIE's tag, whether it has children, and
//! the ordered list of attribute/form pairs its values follow. The table is the
//! compact dictionary that keeps DWARF from repeating that metadata per entry.
//!
//! # Architecture
//!
//! - [`crate::abbrev::AbbrevDecl`] - One decoded declaration: immutable, typed
//!   access to tag, children flag and attribute specifications, plus a narrow
//!   key-based accessor for generic tooling.
//! - [`crate::abbrev::AbbrevTable`] - The table engine: a lazy, resumable
//!   decoder over one table's byte range. Entries are decoded one at a time, on
//!   demand; the decode position persists across lookups and every declaration
//!   seen is cached, so total decode work is linear in the number of distinct
//!   codes a unit actually uses, not in the number of lookups.
//!
//! # Usage Examples
//!
//! ```rust
//! use dwarfscope::{AbbrevTable, Memory};
//! use dwarfscope::constants::*;
//!
//! // code 1: DW_TAG_compile_unit, has children, one (DW_AT_name, DW_FORM_strp) spec
//! let section = Memory::new(vec![
//!     0x01, 0x11, 0x01, 0x03, 0x0E, 0x00, 0x00, // declaration
//!     0x00,                                     // table terminator
//! ]);
//!
//! let mut table = AbbrevTable::new(&section, 0);
//! let decl = table.get_abbrev(1)?;
//!
//! assert_eq!(decl.tag(), DW_TAG_compile_unit);
//! assert!(decl.has_children());
//! assert_eq!(
//!     decl.iter_attr_specs().collect::<Vec<_>>(),
//!     vec![(DW_AT_name, DW_FORM_strp)],
//! );
//! # Ok::<(), dwarfscope::Error>(())
//! ```

mod declaration;
mod table;

pub use declaration::{AbbrevDecl, AttributeSpec, FieldValue};
pub use table::AbbrevTable;
