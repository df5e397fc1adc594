//! Low-level byte order and safe reading utilities for DWARF section decoding.
//!
//! This module implements bounds-checked reads of primitive integers from byte
//! buffers in both little-endian and big-endian byte order. DWARF data follows the
//! byte order of the containing object file, so both orders are first-class here.
//!
//! # Key Components
//!
//! - [`crate::stream::io::EndianIO`] - Trait defining endian-aware conversion for primitive types
//! - [`crate::stream::io::read_le`] / [`crate::stream::io::read_be`] - Read from the buffer start
//! - [`crate::stream::io::read_le_at`] / [`crate::stream::io::read_be_at`] - Read at an offset,
//!   advancing it by the bytes consumed
//!
//! # Usage Examples
//!
//! ```rust,ignore
//! use dwarfscope::stream::io::read_le_at;
//!
//! let data = [0x01, 0x00, 0x02, 0x00];
//! let mut offset = 0;
//!
//! let first: u16 = read_le_at(&data, &mut offset)?;
//! let second: u16 = read_le_at(&data, &mut offset)?;
//! assert_eq!((first, second, offset), (1, 2, 4));
//! # Ok::<(), dwarfscope::Error>(())
//! ```
//!
//! # Error Handling
//!
//! All read functions return [`crate::Result<T>`] and fail with
//! [`crate::Error::OutOfBounds`] if the buffer holds fewer bytes than the target
//! type requires. This is the io layer's only failure mode; structural validation
//! happens above it.

use crate::{Error::OutOfBounds, Result};

/// Trait for type-specific safe binary reads.
///
/// `EndianIO` abstracts the conversion from a fixed-size byte array to a typed
/// value in either byte order. It is implemented for the integer widths DWARF
/// structures use; the read functions in this module are generic over it.
///
/// Each implementation defines a `Bytes` associated type naming the fixed-size
/// array for that width (e.g. `[u8; 4]` for `u32`).
pub trait EndianIO: Sized {
    /// Associated type representing the byte array type for this numeric type.
    type Bytes: Sized + for<'a> TryFrom<&'a [u8]>;

    /// Read T from a byte buffer in little-endian
    fn from_le_bytes(bytes: Self::Bytes) -> Self;
    /// Read T from a byte buffer in big-endian
    fn from_be_bytes(bytes: Self::Bytes) -> Self;
}

macro_rules! impl_endian_io {
    ($($ty:ty),+) => {
        $(
            impl EndianIO for $ty {
                type Bytes = [u8; std::mem::size_of::<$ty>()];

                fn from_le_bytes(bytes: Self::Bytes) -> Self {
                    <$ty>::from_le_bytes(bytes)
                }

                fn from_be_bytes(bytes: Self::Bytes) -> Self {
                    <$ty>::from_be_bytes(bytes)
                }
            }
        )+
    };
}

impl_endian_io!(u8, i8, u16, i16, u32, i32, u64, i64);

/// Safely reads a value of type `T` in little-endian byte order from the start of a buffer.
///
/// # Errors
/// Returns [`crate::Error::OutOfBounds`] if there are insufficient bytes.
///
/// # Examples
///
/// ```rust,ignore
/// use dwarfscope::stream::io::read_le;
///
/// let data = [0x01, 0x00, 0x00, 0x00];
/// let value: u32 = read_le(&data)?;
/// assert_eq!(value, 1);
/// # Ok::<(), dwarfscope::Error>(())
/// ```
pub fn read_le<T: EndianIO>(data: &[u8]) -> Result<T> {
    let mut offset = 0_usize;
    read_le_at(data, &mut offset)
}

/// Safely reads a value of type `T` in little-endian byte order at a specific offset.
///
/// Advances `offset` by the number of bytes read on success.
///
/// # Arguments
///
/// * `data` - The byte buffer to read from
/// * `offset` - Mutable reference to the offset position (advanced after reading)
///
/// # Errors
/// Returns [`crate::Error::OutOfBounds`] if there are insufficient bytes.
pub fn read_le_at<T: EndianIO>(data: &[u8], offset: &mut usize) -> Result<T> {
    let type_len = std::mem::size_of::<T>();
    if (type_len + *offset) > data.len() {
        return Err(OutOfBounds);
    }

    let Ok(read) = data[*offset..*offset + type_len].try_into() else {
        return Err(OutOfBounds);
    };

    *offset += type_len;

    Ok(T::from_le_bytes(read))
}

/// Safely reads a value of type `T` in big-endian byte order from the start of a buffer.
///
/// # Errors
/// Returns [`crate::Error::OutOfBounds`] if there are insufficient bytes.
pub fn read_be<T: EndianIO>(data: &[u8]) -> Result<T> {
    let mut offset = 0_usize;
    read_be_at(data, &mut offset)
}

/// Safely reads a value of type `T` in big-endian byte order at a specific offset.
///
/// Advances `offset` by the number of bytes read on success. Big-endian DWARF data
/// occurs in object files for big-endian targets.
///
/// # Arguments
///
/// * `data` - The byte buffer to read from
/// * `offset` - Mutable reference to the offset position (advanced after reading)
///
/// # Errors
/// Returns [`crate::Error::OutOfBounds`] if there are insufficient bytes.
pub fn read_be_at<T: EndianIO>(data: &[u8], offset: &mut usize) -> Result<T> {
    let type_len = std::mem::size_of::<T>();
    if (type_len + *offset) > data.len() {
        return Err(OutOfBounds);
    }

    let Ok(read) = data[*offset..*offset + type_len].try_into() else {
        return Err(OutOfBounds);
    };

    *offset += type_len;

    Ok(T::from_be_bytes(read))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn read_le_advances_offset() {
        let data = [0x01, 0x00, 0x02, 0x00, 0x03, 0x00, 0x00, 0x00];
        let mut offset = 0;

        let first: u16 = read_le_at(&data, &mut offset).unwrap();
        let second: u16 = read_le_at(&data, &mut offset).unwrap();
        let third: u32 = read_le_at(&data, &mut offset).unwrap();

        assert_eq!(first, 1);
        assert_eq!(second, 2);
        assert_eq!(third, 3);
        assert_eq!(offset, 8);
    }

    #[test]
    fn read_be_values() {
        let data = [0x00, 0x01, 0x00, 0x00, 0x00, 0x02];
        let mut offset = 0;

        let first: u16 = read_be_at(&data, &mut offset).unwrap();
        let second: u32 = read_be_at(&data, &mut offset).unwrap();

        assert_eq!(first, 1);
        assert_eq!(second, 2);

        assert_eq!(read_be::<u16>(&data).unwrap(), 1);
    }

    #[test]
    fn signed_reads() {
        let data = [0xFF, 0xFF];
        let mut offset = 0;
        let value: i16 = read_le_at(&data, &mut offset).unwrap();
        assert_eq!(value, -1);

        assert_eq!(read_le::<i8>(&[0x80]).unwrap(), i8::MIN);
    }

    #[test]
    fn out_of_bounds_leaves_offset_untouched() {
        let data = [0x01, 0x02];
        let mut offset = 1;

        let result: Result<u32> = read_le_at(&data, &mut offset);
        assert!(matches!(result, Err(Error::OutOfBounds)));
        assert_eq!(offset, 1);
    }
}
