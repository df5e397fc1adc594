//! Low-level byte stream parser for DWARF section decoding.
//!
//! This module provides the [`crate::stream::Parser`] type, a cursor-based binary
//! reader designed for the byte layout DWARF specifies: fixed-width integers in
//! either byte order, LEB128 variable-length integers, and null-terminated byte
//! strings. It offers bounds-checked access with explicit position tracking.
//!
//! # Architecture
//!
//! The parser maintains a position within a byte slice. Reads advance the
//! position; seeks relocate it; peeks and guarded scopes leave it untouched.
//! Two scoping disciplines coexist and are deliberately distinct:
//!
//! - [`crate::stream::Parser::with_saved_position`] restores the position on
//!   every exit path, success or failure ("peek and restore").
//! - Explicit-offset operations such as [`crate::stream::parse_record_at`] and
//!   [`crate::stream::Parser::read_cstring`] seek first and leave the position
//!   wherever decoding stopped ("seek and consume").
//!
//! # Key Components
//!
//! ## Navigation
//! - [`crate::stream::Parser::seek`] / [`crate::stream::Parser::pos`] - Relocate and query the cursor
//! - [`crate::stream::Parser::advance`] / [`crate::stream::Parser::advance_by`] - Move forward
//!
//! ## Data Access
//! - [`crate::stream::Parser::read_le`] / [`crate::stream::Parser::read_be`] - Fixed-width integers
//! - [`crate::stream::Parser::read_uleb128`] / [`crate::stream::Parser::read_sleb128`] - DWARF varints
//! - [`crate::stream::Parser::read_cstring`] - Chunked null-terminated byte strings
//! - [`crate::stream::Parser::peek_byte`] / [`crate::stream::Parser::peek_le`] /
//!   [`crate::stream::Parser::peek_uleb128`] - Non-advancing reads
//!
//! # Usage Examples
//!
//! ```rust
//! use dwarfscope::Parser;
//!
//! // One abbreviation entry header: code 1, tag 0x11, children byte
//! let data = [0x01, 0x11, 0x01];
//! let mut parser = Parser::new(&data);
//!
//! let code = parser.read_uleb128()?;
//! let tag = parser.read_uleb128()?;
//! let children = parser.read_le::<u8>()?;
//! assert_eq!((code, tag, children), (1, 0x11, 1));
//! # Ok::<(), dwarfscope::Error>(())
//! ```

use crate::{
    stream::io::{read_be_at, read_le_at, EndianIO},
    Result,
};

/// Chunk size for the null-terminator scan in [`Parser::read_cstring`].
const CSTRING_CHUNK: usize = 64;

/// A cursor-based reader over DWARF section data.
///
/// `Parser` tracks a position within a byte slice and provides bounds-checked,
/// endian-aware reads of the primitives DWARF structures are built from. The
/// parser is the single logical reader of its position: nested decodes that must
/// not perturb a caller's position go through
/// [`with_saved_position`](Parser::with_saved_position). The parser itself is not
/// synchronized; concurrent use of one parser from multiple threads is outside
/// its contract.
///
/// # Examples
///
/// ```rust
/// use dwarfscope::Parser;
///
/// let data = [0x7F, 0x80, 0x01];
/// let mut parser = Parser::new(&data);
///
/// assert_eq!(parser.read_uleb128()?, 127);
/// assert_eq!(parser.read_uleb128()?, 128);
/// assert!(!parser.has_more_data());
/// # Ok::<(), dwarfscope::Error>(())
/// ```
pub struct Parser<'a> {
    /// The binary data being parsed
    data: &'a [u8],
    /// Current position within the data buffer
    position: usize,
}

impl<'a> Parser<'a> {
    /// Create a new [`Parser`] from a byte slice.
    ///
    /// # Arguments
    /// * `data` - The byte slice to read from
    #[must_use]
    pub fn new(data: &'a [u8]) -> Self {
        Parser { data, position: 0 }
    }

    /// Returns the length of the underlying data buffer.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the parser has no data.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns `true` if there is more data available to parse.
    #[must_use]
    pub fn has_more_data(&self) -> bool {
        self.position < self.data.len()
    }

    /// Move the current position to the specified index.
    ///
    /// Seeking to the end of the data (one past the last byte) is allowed; any
    /// subsequent read from there fails with out-of-bounds.
    ///
    /// # Arguments
    /// * `pos` - The position to move the cursor to
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if position is beyond the data length.
    pub fn seek(&mut self, pos: usize) -> Result<()> {
        if pos > self.data.len() {
            return Err(out_of_bounds_error!());
        }

        self.position = pos;
        Ok(())
    }

    /// Move the position forward by one byte.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if advancing would exceed the data length.
    pub fn advance(&mut self) -> Result<()> {
        self.advance_by(1)
    }

    /// Move the position forward by the specified number of bytes.
    ///
    /// # Arguments
    /// * `step` - Amount of bytes to advance
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if advancing by step would exceed the data length.
    pub fn advance_by(&mut self, step: usize) -> Result<()> {
        if self.position + step > self.data.len() {
            return Err(out_of_bounds_error!());
        }

        self.position += step;
        Ok(())
    }

    /// Get the current position of the parser within the data buffer.
    #[must_use]
    pub fn pos(&self) -> usize {
        self.position
    }

    /// Get access to the underlying data buffer.
    #[must_use]
    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    /// Returns the number of bytes remaining from the current position.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.position)
    }

    /// Ensures that at least `needed` bytes are available from the current position.
    ///
    /// # Arguments
    /// * `needed` - The number of bytes required from the current position
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if fewer than `needed` bytes remain.
    pub fn ensure_remaining(&self, needed: usize) -> Result<()> {
        if self.remaining() < needed {
            return Err(out_of_bounds_error!());
        }
        Ok(())
    }

    /// Peek at the next byte without advancing the position.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if position is at or beyond the data length.
    pub fn peek_byte(&self) -> Result<u8> {
        if self.position >= self.data.len() {
            return Err(out_of_bounds_error!());
        }
        Ok(self.data[self.position])
    }

    /// Peek at a value of type `T` in little-endian format without advancing the position.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if reading `T` would exceed the data length.
    pub fn peek_le<T: EndianIO>(&self) -> Result<T> {
        let mut temp_position = self.position;
        read_le_at::<T>(self.data, &mut temp_position)
    }

    /// Peek at a ULEB128 value without advancing the position.
    ///
    /// Built on [`with_saved_position`](Parser::with_saved_position), so the
    /// position is untouched even when the varint is malformed or truncated.
    ///
    /// # Errors
    /// Propagates the error of [`read_uleb128`](Parser::read_uleb128).
    pub fn peek_uleb128(&mut self) -> Result<u64> {
        self.with_saved_position(|p| p.read_uleb128())
    }

    /// Run `f` with the current position saved, restoring it on every exit path.
    ///
    /// This is the scoped-cursor guard for nested decodes: whatever `f` reads or
    /// seeks, the parser's position afterwards is exactly what it was before the
    /// call, including when `f` fails, in which case the error is propagated
    /// unchanged. Contrast with [`transactional`](Parser::transactional), which
    /// keeps the advance on success.
    ///
    /// # Arguments
    /// * `f` - A closure that takes a mutable reference to the parser and returns a `Result<T>`
    ///
    /// # Errors
    /// Returns any error produced by the closure `f`; the position is restored
    /// regardless.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use dwarfscope::Parser;
    ///
    /// let data = [0x05, 0x06, 0x07];
    /// let mut parser = Parser::new(&data);
    /// parser.advance()?;
    ///
    /// let ahead = parser.with_saved_position(|p| {
    ///     p.seek(2)?;
    ///     p.read_le::<u8>()
    /// })?;
    /// assert_eq!(ahead, 0x07);
    /// assert_eq!(parser.pos(), 1); // untouched
    /// # Ok::<(), dwarfscope::Error>(())
    /// ```
    pub fn with_saved_position<T, F>(&mut self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Self) -> Result<T>,
    {
        let saved_position = self.position;
        let result = f(self);
        self.position = saved_position;
        result
    }

    /// Execute a closure transactionally, rolling back on failure.
    ///
    /// Saves the current position, executes the closure, and commits the position
    /// change only if the closure succeeds. On failure the position is restored.
    /// Useful for speculative parsing where input should be consumed only when
    /// parsing succeeds.
    ///
    /// # Arguments
    /// * `f` - A closure that takes a mutable reference to the parser and returns a `Result<T>`
    ///
    /// # Errors
    /// Returns any error produced by the closure `f`. When an error is returned,
    /// the parser position is automatically restored to its state before the call.
    pub fn transactional<T, F>(&mut self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Self) -> Result<T>,
    {
        let saved_position = self.position;
        let result = f(self);
        if result.is_err() {
            self.position = saved_position;
        }
        result
    }

    /// Read a type `T` from the current position in little-endian format and advance the position.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if reading would exceed the data length.
    pub fn read_le<T: EndianIO>(&mut self) -> Result<T> {
        read_le_at::<T>(self.data, &mut self.position)
    }

    /// Read a type `T` from the current position in big-endian format and advance the position.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if reading would exceed the data length.
    pub fn read_be<T: EndianIO>(&mut self) -> Result<T> {
        read_be_at::<T>(self.data, &mut self.position)
    }

    /// Reads a slice of bytes of the specified length from the current position.
    ///
    /// # Arguments
    /// * `length` - The number of bytes to read
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if reading `length` bytes would exceed the data.
    pub fn read_bytes(&mut self, length: usize) -> Result<&'a [u8]> {
        let Some(end) = self.position.checked_add(length) else {
            return Err(out_of_bounds_error!());
        };

        if end > self.data.len() {
            return Err(out_of_bounds_error!());
        }

        let bytes = &self.data[self.position..end];
        self.position = end;
        Ok(bytes)
    }

    /// Read an unsigned LEB128 variable-length integer.
    ///
    /// Each byte contributes its lower 7 bits, least significant group first;
    /// the high bit marks continuation. This is the encoding DWARF uses for
    /// abbreviation codes, tags, attribute names and forms.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if the data ends mid-varint or
    /// [`crate::Error::Malformed`] if the encoded value exceeds `u64`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use dwarfscope::Parser;
    ///
    /// let data = [0xE5, 0x8E, 0x26];
    /// let mut parser = Parser::new(&data);
    /// assert_eq!(parser.read_uleb128()?, 624485);
    /// # Ok::<(), dwarfscope::Error>(())
    /// ```
    pub fn read_uleb128(&mut self) -> Result<u64> {
        let mut value = 0u64;
        let mut shift = 0u32;

        loop {
            if self.position >= self.data.len() {
                return Err(out_of_bounds_error!());
            }

            let byte = self.data[self.position];
            self.position += 1;

            // The 10th byte may only carry the final bit of a u64.
            if shift == 63 && (byte & 0x7F) > 1 {
                return Err(malformed_error!(
                    "ULEB128 overflow: value exceeds u64 at offset {}",
                    self.position - 1
                ));
            }

            value |= u64::from(byte & 0x7F) << shift;
            shift += 7;

            if (byte & 0x80) == 0 {
                break;
            }

            if shift >= 64 {
                return Err(malformed_error!(
                    "ULEB128 overflow: continuation past {} bits",
                    shift
                ));
            }
        }

        Ok(value)
    }

    /// Read a signed LEB128 variable-length integer.
    ///
    /// Same grouping as [`read_uleb128`](Parser::read_uleb128) with the result
    /// sign-extended from bit 6 of the final byte.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if the data ends mid-varint or
    /// [`crate::Error::Malformed`] if the encoded value exceeds `i64`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use dwarfscope::Parser;
    ///
    /// let data = [0x7F]; // -1
    /// let mut parser = Parser::new(&data);
    /// assert_eq!(parser.read_sleb128()?, -1);
    /// # Ok::<(), dwarfscope::Error>(())
    /// ```
    pub fn read_sleb128(&mut self) -> Result<i64> {
        let mut value = 0i64;
        let mut shift = 0u32;

        loop {
            if self.position >= self.data.len() {
                return Err(out_of_bounds_error!());
            }

            let byte = self.data[self.position];
            self.position += 1;

            // The 10th byte may only hold the sign bit (0x00 or 0x7F groups).
            if shift == 63 && (byte & 0x7F) != 0 && (byte & 0x7F) != 0x7F {
                return Err(malformed_error!(
                    "SLEB128 overflow: value exceeds i64 at offset {}",
                    self.position - 1
                ));
            }

            value |= i64::from(byte & 0x7F) << shift;
            shift += 7;

            if (byte & 0x80) == 0 {
                if shift < 64 && (byte & 0x40) != 0 {
                    value |= -1i64 << shift;
                }
                break;
            }

            if shift >= 64 {
                return Err(malformed_error!(
                    "SLEB128 overflow: continuation past {} bits",
                    shift
                ));
            }
        }

        Ok(value)
    }

    /// Read a null-terminated byte string, scanning in fixed-size chunks.
    ///
    /// If `offset` is given, the parser seeks there first; this seek is a
    /// positioning side effect and is not undone. The scan reads up to 64 bytes
    /// at a time and accumulates everything strictly before the first null byte.
    /// The cursor is left at the end of the last chunk examined, not immediately
    /// after the terminator.
    ///
    /// Returns `Some(bytes)` without the terminator, or `None` if the data ran
    /// out before any null byte was seen. A terminator as the very first byte
    /// yields `Some` of an empty vector, which is distinct from `None`. The
    /// bytes are returned raw; text decoding is the caller's concern.
    ///
    /// # Arguments
    /// * `offset` - Optional position to seek to before scanning
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if `offset` is beyond the data length.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use dwarfscope::Parser;
    ///
    /// let data = b"main\0_start\0";
    /// let mut parser = Parser::new(data);
    ///
    /// assert_eq!(parser.read_cstring(None)?, Some(b"main".to_vec()));
    /// assert_eq!(parser.read_cstring(Some(5))?, Some(b"_start".to_vec()));
    ///
    /// // No terminator anywhere: the not-found sentinel, not an empty string
    /// let mut parser = Parser::new(b"abc");
    /// assert_eq!(parser.read_cstring(None)?, None);
    /// # Ok::<(), dwarfscope::Error>(())
    /// ```
    pub fn read_cstring(&mut self, offset: Option<usize>) -> Result<Option<Vec<u8>>> {
        if let Some(pos) = offset {
            self.seek(pos)?;
        }

        let mut accum = Vec::new();
        loop {
            let take = CSTRING_CHUNK.min(self.remaining());
            let chunk = self.read_bytes(take)?;

            if let Some(end_index) = chunk.iter().position(|&b| b == 0) {
                accum.extend_from_slice(&chunk[..end_index]);
                return Ok(Some(accum));
            }

            accum.extend_from_slice(chunk);
            if chunk.len() < CSTRING_CHUNK {
                return Ok(None);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn test_read_uleb128() {
        let test_cases: Vec<(Vec<u8>, u64)> = vec![
            (vec![0x00], 0),
            (vec![0x03], 3),
            (vec![0x7F], 127),
            (vec![0x80, 0x01], 128),
            (vec![0xE5, 0x8E, 0x26], 624485),
            (
                vec![0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0x01],
                u64::MAX,
            ),
        ];

        for (input, expected) in test_cases {
            let mut parser = Parser::new(&input);
            assert_eq!(parser.read_uleb128().unwrap(), expected);
            assert_eq!(parser.pos(), input.len());
        }
    }

    #[test]
    fn test_read_uleb128_truncated() {
        let mut parser = Parser::new(&[0x80]);
        assert!(matches!(
            parser.read_uleb128(),
            Err(Error::OutOfBounds { .. })
        ));
    }

    #[test]
    fn test_read_uleb128_overflow() {
        // 10th byte carries more than the final u64 bit
        let input = [0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0x02];
        let mut parser = Parser::new(&input);
        assert!(matches!(
            parser.read_uleb128(),
            Err(Error::Malformed { .. })
        ));

        // 11 continuation bytes
        let input = [0x80; 10];
        let mut parser = Parser::new(&input);
        assert!(matches!(
            parser.read_uleb128(),
            Err(Error::Malformed { .. })
        ));
    }

    #[test]
    fn test_read_sleb128() {
        let test_cases: Vec<(Vec<u8>, i64)> = vec![
            (vec![0x00], 0),
            (vec![0x02], 2),
            (vec![0x7E], -2),
            (vec![0x7F], -1),
            (vec![0xFF, 0x00], 127),
            (vec![0x81, 0x7F], -127),
            (vec![0x80, 0x01], 128),
            (vec![0x80, 0x7F], -128),
        ];

        for (input, expected) in test_cases {
            let mut parser = Parser::new(&input);
            assert_eq!(parser.read_sleb128().unwrap(), expected, "input {input:02X?}");
            assert_eq!(parser.pos(), input.len());
        }
    }

    #[test]
    fn test_read_sleb128_truncated() {
        let mut parser = Parser::new(&[0x80, 0x80]);
        assert!(matches!(
            parser.read_sleb128(),
            Err(Error::OutOfBounds { .. })
        ));
    }

    #[test]
    fn test_with_saved_position_restores_on_success() {
        let data = [0x01, 0x02, 0x03, 0x04];
        let mut parser = Parser::new(&data);
        parser.advance_by(1).unwrap();

        let value: u16 = parser.with_saved_position(|p| p.read_le()).unwrap();
        assert_eq!(value, 0x0302);
        assert_eq!(parser.pos(), 1);
    }

    #[test]
    fn test_with_saved_position_restores_on_failure() {
        let data = [0x01, 0x02];
        let mut parser = Parser::new(&data);
        parser.advance_by(1).unwrap();

        let result: Result<u32> = parser.with_saved_position(|p| {
            p.read_le::<u8>()?; // advances before failing
            p.read_le::<u32>()
        });
        assert!(result.is_err());
        assert_eq!(parser.pos(), 1);
    }

    #[test]
    fn test_with_saved_position_restores_after_seek() {
        let data = [0x01, 0x02, 0x03, 0x04];
        let mut parser = Parser::new(&data);

        parser
            .with_saved_position(|p| {
                p.seek(3)?;
                p.read_le::<u8>()
            })
            .unwrap();
        assert_eq!(parser.pos(), 0);
    }

    #[test]
    fn test_peek_uleb128() {
        let data = [0x80, 0x01, 0x2A];
        let mut parser = Parser::new(&data);

        assert_eq!(parser.peek_uleb128().unwrap(), 128);
        assert_eq!(parser.pos(), 0);
        assert_eq!(parser.read_uleb128().unwrap(), 128);
        assert_eq!(parser.pos(), 2);
    }

    #[test]
    fn test_transactional() {
        let data = [0x01, 0x02, 0x03, 0x04];
        let mut parser = Parser::new(&data);

        let result: u16 = parser.transactional(|p| p.read_le()).unwrap();
        assert_eq!(result, 0x0201);
        assert_eq!(parser.pos(), 2); // committed on success

        let result: Result<u32> = parser.transactional(|p| p.read_le());
        assert!(result.is_err());
        assert_eq!(parser.pos(), 2); // restored on failure
    }

    #[test]
    fn test_read_cstring_simple() {
        let mut parser = Parser::new(b"abc\0def");
        assert_eq!(parser.read_cstring(None).unwrap(), Some(b"abc".to_vec()));
    }

    #[test]
    fn test_read_cstring_empty_vs_not_found() {
        // Terminator at offset 0: empty string, not the sentinel
        let mut parser = Parser::new(&[0x00, 0x61]);
        assert_eq!(parser.read_cstring(None).unwrap(), Some(Vec::new()));

        // No terminator anywhere: sentinel
        let mut parser = Parser::new(b"abcdef");
        assert_eq!(parser.read_cstring(None).unwrap(), None);

        // Exhausted stream
        let mut parser = Parser::new(&[]);
        assert_eq!(parser.read_cstring(None).unwrap(), None);
    }

    #[test]
    fn test_read_cstring_chunk_boundaries() {
        // Terminator exactly at the end of the first 64-byte chunk
        let mut data = vec![0x61; 63];
        data.push(0x00);
        let mut parser = Parser::new(&data);
        assert_eq!(
            parser.read_cstring(None).unwrap(),
            Some(vec![0x61; 63])
        );

        // Terminator as the first byte of the second chunk
        let mut data = vec![0x62; 64];
        data.push(0x00);
        let mut parser = Parser::new(&data);
        assert_eq!(
            parser.read_cstring(None).unwrap(),
            Some(vec![0x62; 64])
        );

        // String spanning several chunks with no terminator
        let data = vec![0x63; 200];
        let mut parser = Parser::new(&data);
        assert_eq!(parser.read_cstring(None).unwrap(), None);
    }

    #[test]
    fn test_read_cstring_explicit_offset_not_restored() {
        let mut parser = Parser::new(b"xx\0yy\0");
        assert_eq!(parser.read_cstring(Some(3)).unwrap(), Some(b"yy".to_vec()));
        // Seek-and-consume: the cursor stays where the scan stopped
        assert_ne!(parser.pos(), 0);

        assert!(parser.read_cstring(Some(100)).is_err());
    }

    #[test]
    fn test_seek_and_bounds() {
        let data = [0x01, 0x02, 0x03];
        let mut parser = Parser::new(&data);

        parser.seek(3).unwrap(); // end position is a valid seek target
        assert!(!parser.has_more_data());
        assert!(parser.seek(4).is_err());

        parser.seek(1).unwrap();
        assert_eq!(parser.remaining(), 2);
        assert!(parser.ensure_remaining(2).is_ok());
        assert!(parser.ensure_remaining(3).is_err());
    }

    #[test]
    fn test_peek_does_not_advance() {
        let data = [0x01, 0x02];
        let parser = Parser::new(&data);
        assert_eq!(parser.peek_byte().unwrap(), 0x01);
        assert_eq!(parser.peek_le::<u16>().unwrap(), 0x0201);
        assert_eq!(parser.pos(), 0);
    }

    #[test]
    fn test_read_bytes() {
        let data = [0x01, 0x02, 0x03, 0x04, 0x05];
        let mut parser = Parser::new(&data);

        let chunk = parser.read_bytes(3).unwrap();
        assert_eq!(chunk, &[0x01, 0x02, 0x03]);
        assert_eq!(parser.pos(), 3);

        assert!(parser.read_bytes(3).is_err());
    }
}
