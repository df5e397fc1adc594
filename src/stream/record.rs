//! Declarative record layouts with unified error translation.
//!
//! A [`crate::stream::Record`] implementation describes how to decode one binary
//! record shape from a [`crate::stream::Parser`]: which primitives to read, in
//! which order, and when a repeated field list ends. Layouts are plain types, so
//! they are constructed once (as code) and reused for every decode call.
//!
//! [`crate::stream::parse_record_at`] is the single entry point record consumers
//! go through. It owns two contracts the rest of the crate depends on:
//!
//! - **Positioning**: an explicit offset seeks the parser first, and that seek is
//!   not undone afterwards. Record decoding is "seek and consume", unlike the
//!   restore-always guard on the parser.
//! - **Error translation**: whatever the io layer fails with (truncated data,
//!   invalid varint, layout mismatch), the caller sees the single unified
//!   [`crate::Error::Parse`] kind carrying the original message. Consumers of
//!   records never match on io-level error kinds.
//!
//! # Usage Examples
//!
//! ```rust
//! use dwarfscope::{parse_record_at, Parser, Record, Result};
//!
//! struct Header {
//!     version: u16,
//!     unit_len: u64,
//! }
//!
//! impl Record for Header {
//!     fn read(parser: &mut Parser<'_>) -> Result<Self> {
//!         Ok(Header {
//!             version: parser.read_le()?,
//!             unit_len: parser.read_uleb128()?,
//!         })
//!     }
//! }
//!
//! let data = [0x04, 0x00, 0x80, 0x02];
//! let mut parser = Parser::new(&data);
//! let header: Header = parse_record_at(&mut parser, None)?;
//! assert_eq!((header.version, header.unit_len), (4, 256));
//! # Ok::<(), dwarfscope::Error>(())
//! ```

use crate::{stream::Parser, Result};

/// One decodable record shape.
///
/// Implementations read the record's fields from the parser's current position,
/// advancing it by exactly the bytes the record occupies. Implementations report
/// failures with the io/parser-level error kinds; translation to the unified
/// parse error is [`parse_record_at`]'s job, so `read` bodies stay free of
/// error-mapping noise.
pub trait Record: Sized {
    /// Decode one record at the parser's current position.
    ///
    /// # Errors
    /// Returns an io-level error ([`crate::Error::OutOfBounds`] or
    /// [`crate::Error::Malformed`]) if the bytes do not match the layout.
    fn read(parser: &mut Parser<'_>) -> Result<Self>;
}

/// Decode one record, optionally seeking to an explicit offset first.
///
/// If `offset` is `Some`, the parser seeks there before decoding; the seek is a
/// positioning side effect that persists after the call, as does the advance
/// past the decoded record. If `offset` is `None`, decoding starts at the
/// current position.
///
/// # Arguments
/// * `parser` - The parser to decode from
/// * `offset` - Optional position to seek to before decoding
///
/// # Errors
/// Returns [`crate::Error::Parse`] wrapping the message of any underlying decode
/// failure. The parser position after a failure is unspecified; reseek before
/// reading again.
///
/// # Examples
///
/// ```rust
/// use dwarfscope::{parse_record_at, Error, Parser, Record, Result};
///
/// struct Pair(u64, u64);
///
/// impl Record for Pair {
///     fn read(parser: &mut Parser<'_>) -> Result<Self> {
///         Ok(Pair(parser.read_uleb128()?, parser.read_uleb128()?))
///     }
/// }
///
/// let data = [0xFF, 0x03, 0x00, 0x01, 0x08];
/// let mut parser = Parser::new(&data);
///
/// let pair: Pair = parse_record_at(&mut parser, Some(3))?;
/// assert_eq!((pair.0, pair.1), (1, 8));
/// assert_eq!(parser.pos(), 5); // seek and advance both persist
///
/// // A truncated record surfaces as the unified Parse kind
/// let result: Result<Pair> = parse_record_at(&mut parser, Some(4));
/// assert!(matches!(result, Err(Error::Parse { .. })));
/// # Ok::<(), dwarfscope::Error>(())
/// ```
pub fn parse_record_at<T: Record>(parser: &mut Parser<'_>, offset: Option<usize>) -> Result<T> {
    if let Some(pos) = offset {
        parser.seek(pos).map_err(|e| parse_error!("{}", e))?;
    }

    T::read(parser).map_err(|e| parse_error!("{}", e))
}
