//! Lazy, resumable abbreviation table decoding.
//!
//! [`AbbrevTable`] decodes one table from a section at a fixed offset. Entries
//! are decoded strictly on demand: a lookup for code `n` decodes entries in
//! stream order only until `n` has been seen or the table terminator is hit,
//! and every decoded entry is cached so no byte of the table is ever decoded
//! twice. The decode cursor survives across lookups, so interleaved lookups
//! for different codes each resume where the previous decode stopped.

use std::{collections::HashMap, sync::Arc};

use crate::{
    abbrev::declaration::{AbbrevDecl, AbbrevDeclBody},
    stream::{parse_record_at, Backend, Parser},
    Error, Result,
};

/// One abbreviation table, decoded lazily from a section.
///
/// The table borrows its section [`Backend`] immutably and keeps all decode
/// state private: a byte cursor into the section, a terminated flag, and a
/// cache of decoded declarations keyed by code. Several tables can share one
/// backend; each decodes independently.
///
/// # Examples
///
/// ```rust
/// use dwarfscope::{AbbrevTable, Memory};
/// use dwarfscope::constants::*;
///
/// let section = Memory::new(vec![
///     0x01, 0x11, 0x01, 0x03, 0x0E, 0x00, 0x00,
///     0x02, 0x2e, 0x00, 0x03, 0x08, 0x00, 0x00,
///     0x00,
/// ]);
/// let mut table = AbbrevTable::new(&section, 0);
///
/// // Looking up code 2 decodes (and caches) code 1 along the way
/// let sub = table.get_abbrev(2)?;
/// assert_eq!(sub.tag(), DW_TAG_subprogram);
///
/// let cu = table.get_abbrev(1)?;
/// assert_eq!(cu.tag(), DW_TAG_compile_unit);
/// # Ok::<(), dwarfscope::Error>(())
/// ```
pub struct AbbrevTable<'a> {
    source: &'a dyn Backend,
    /// Byte offset of the table start within the section.
    offset: usize,
    /// Absolute byte position of the next undecoded entry.
    cursor: usize,
    /// Set once the terminator (a single zero code) has been decoded. A
    /// terminated table never touches the section again.
    terminated: bool,
    cache: HashMap<u64, Arc<AbbrevDecl>>,
}

impl<'a> AbbrevTable<'a> {
    /// Create a table decoding from `source` starting at `offset`.
    ///
    /// No bytes are read here; decoding is deferred entirely to
    /// [`get_abbrev`](AbbrevTable::get_abbrev). An offset past the end of the
    /// section surfaces as a decode error on first lookup, not here.
    #[must_use]
    pub fn new(source: &'a dyn Backend, offset: usize) -> AbbrevTable<'a> {
        AbbrevTable {
            source,
            offset,
            cursor: offset,
            terminated: false,
            cache: HashMap::new(),
        }
    }

    /// Byte offset of the table start within the section.
    #[must_use]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Number of declarations decoded so far.
    ///
    /// This grows as lookups advance the decode cursor; it is the table's full
    /// entry count only once [`is_exhausted`](AbbrevTable::is_exhausted) is
    /// true.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    /// Has any declaration been decoded yet?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    /// Has the table terminator been reached?
    ///
    /// Once true, every declaration of the table is cached and lookups never
    /// read the section again.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.terminated
    }

    /// Look up the declaration with the given code.
    ///
    /// Cached declarations are returned immediately. Otherwise decoding
    /// resumes at the saved cursor and proceeds entry by entry, caching each
    /// one, until `code` is found or the terminator is hit. Progress made on
    /// the way to a failed lookup is kept: the entries decoded while searching
    /// stay cached and the cursor stays advanced.
    ///
    /// # Errors
    /// - [`Error::AbbrevNotFound`] when the table ends without declaring
    ///   `code`. This is recoverable; previously decoded declarations remain
    ///   available and lookups for them keep succeeding.
    /// - [`Error::Parse`] when an entry body is malformed or truncated.
    /// - [`Error::Malformed`] / [`Error::OutOfBounds`] when the section data
    ///   itself cannot be read at the cursor.
    pub fn get_abbrev(&mut self, code: u64) -> Result<Arc<AbbrevDecl>> {
        if let Some(decl) = self.cache.get(&code) {
            return Ok(Arc::clone(decl));
        }
        if self.terminated {
            return Err(Error::AbbrevNotFound(code));
        }

        loop {
            let decl = match self.decode_next_entry()? {
                Some(decl) => decl,
                None => return Err(Error::AbbrevNotFound(code)),
            };
            if decl.code() == code {
                return Ok(decl);
            }
        }
    }

    /// Decode the next entry at the cursor, cache it, and advance the cursor.
    ///
    /// Returns `Ok(None)` after decoding the terminator, which also marks the
    /// table terminated. The cursor is only persisted after a fully successful
    /// decode step; a failed step leaves the table exactly as it was.
    fn decode_next_entry(&mut self) -> Result<Option<Arc<AbbrevDecl>>> {
        let data = self.source.data();
        let mut parser = Parser::new(data);
        parser.seek(self.cursor)?;

        let entry_code = parser.read_uleb128()?;
        if entry_code == 0 {
            self.cursor = parser.pos();
            self.terminated = true;
            return Ok(None);
        }

        let body: AbbrevDeclBody = parse_record_at(&mut parser, None)?;
        let decl = Arc::new(AbbrevDecl::new(entry_code, body));

        self.cursor = parser.pos();
        // Codes are unique in well-formed tables; on a duplicate the later
        // entry replaces the earlier one, matching decode order.
        self.cache.insert(entry_code, Arc::clone(&decl));
        Ok(Some(decl))
    }
}
