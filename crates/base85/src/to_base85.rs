//! Base85 encoding.

use crate::constants::{DIGIT_BASE, END_DELIMITER, START_DELIMITER, ZERO_SHORTHAND};

/// Encodes a byte buffer to a Base85/Ascii85 string.
///
/// The input is processed in 4-byte groups, zero-padded at the end. A full
/// all-zero group emits the single shorthand character `z`; any other group
/// is taken as a big-endian 32-bit integer and emits five digit characters,
/// most significant first. A final group holding `n < 4` real bytes emits
/// only its `n + 1` leading digits.
///
/// When `delimiters` is true the output is wrapped in the `<~` and `~>`
/// bookends.
///
/// # Example
///
/// ```
/// use sdb_base85::to_base85;
///
/// assert_eq!(to_base85(&[0, 0, 0, 0], true), "<~z~>");
/// assert_eq!(to_base85(b"sure", false), "F*2M7");
/// ```
pub fn to_base85(data: &[u8], delimiters: bool) -> String {
    let mut out = String::with_capacity(data.len() / 4 * 5 + 9);
    if delimiters {
        out.push_str(START_DELIMITER);
    }
    for chunk in data.chunks(4) {
        let mut group = [0u8; 4];
        group[..chunk.len()].copy_from_slice(chunk);
        let value = u32::from_be_bytes(group);
        if value == 0 && chunk.len() == 4 {
            out.push(ZERO_SHORTHAND as char);
            continue;
        }
        let mut digits = [0u8; 5];
        let mut rest = value;
        for slot in digits.iter_mut().rev() {
            *slot = (rest % 85) as u8;
            rest /= 85;
        }
        for &digit in &digits[..chunk.len() + 1] {
            out.push((DIGIT_BASE + digit) as char);
        }
    }
    if delimiters {
        out.push_str(END_DELIMITER);
    }
    out
}
