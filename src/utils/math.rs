//! Mathematical utility functions.

/// Rounds `num` up to the nearest multiple of `2^bits`.
///
/// Zero rounds to zero for every alignment.
///
/// # Examples
///
/// ```rust
/// use dwarfscope::utils::roundup;
///
/// assert_eq!(roundup(0, 3), 0);
/// assert_eq!(roundup(1, 3), 8);
/// assert_eq!(roundup(8, 3), 8);
/// assert_eq!(roundup(9, 3), 16);
/// ```
#[must_use]
pub fn roundup(num: u64, bits: u32) -> u64 {
    let mask = (1u64 << bits) - 1;
    (num.wrapping_sub(1) | mask).wrapping_add(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundup_zero() {
        assert_eq!(roundup(0, 0), 0);
        assert_eq!(roundup(0, 3), 0);
        assert_eq!(roundup(0, 16), 0);
    }

    #[test]
    fn test_roundup_already_aligned() {
        assert_eq!(roundup(8, 3), 8);
        assert_eq!(roundup(16, 4), 16);
        assert_eq!(roundup(4096, 12), 4096);
        assert_eq!(roundup(7, 0), 7);
    }

    #[test]
    fn test_roundup_rounds_up() {
        assert_eq!(roundup(1, 3), 8);
        assert_eq!(roundup(9, 3), 16);
        assert_eq!(roundup(15, 3), 16);
        assert_eq!(roundup(17, 4), 32);
        assert_eq!(roundup(1, 12), 4096);
    }
}
