use alloc::string::String;

use crate::{alphabet::Codec, check::CheckDigit, error::Result};

/// The default check-digit strategy.
///
/// Computes the CRC-32 (IEEE) checksum of the identifier's UTF-8 bytes,
/// reduces it modulo `radix`, and renders the result with the canonical codec
/// for that radix.
///
/// The check catches most transcription errors: a single corrupted character
/// slips through with probability of roughly `1 / radix`. It is not a
/// cryptographic signature.
#[derive(Default, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Crc32CheckDigit;

impl CheckDigit for Crc32CheckDigit {
    fn compute(&self, id: &str, radix: u8) -> Result<char> {
        let codec = Codec::new(radix)?;
        let digit = crc32fast::hash(id.as_bytes()) % u32::from(radix);
        // `digit < radix`, so the alphabet always has a character for it
        Ok(codec
            .alphabet()
            .char_at(digit as usize)
            .unwrap_or_default())
    }
}

/// Computes the default check character for `id`.
///
/// # Errors
///
/// Returns [`crate::Error::UnsupportedRadix`] if `radix` is outside
/// `2..=94`.
pub fn compute_check_digit(id: &str, radix: u8) -> Result<char> {
    Crc32CheckDigit.compute(id, radix)
}

/// Appends the default check character to `id`.
///
/// # Errors
///
/// Returns [`crate::Error::UnsupportedRadix`] if `radix` is outside
/// `2..=94`.
///
/// # Example
///
/// ```
/// use keyforge::append_check_digit;
///
/// assert_eq!(append_check_digit("1234567890", 10).unwrap(), "12345678905");
/// ```
pub fn append_check_digit(id: &str, radix: u8) -> Result<String> {
    Crc32CheckDigit.append(id, radix)
}

/// Verifies the default check character at the end of `id_with_digit`.
///
/// # Example
///
/// ```
/// use keyforge::verify_check_digit;
///
/// assert!(verify_check_digit("12345678905", 10));
/// assert!(!verify_check_digit("12345678904", 10));
/// ```
pub fn verify_check_digit(id_with_digit: &str, radix: u8) -> bool {
    Crc32CheckDigit.verify(id_with_digit, radix)
}
