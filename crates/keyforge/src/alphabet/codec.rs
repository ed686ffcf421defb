use alloc::string::String;

use crate::{
    alphabet::Alphabet,
    error::{Error, Result},
};

/// Widest possible output: `u128::MAX` in radix 2.
pub const MAX_DIGITS: usize = 128;

/// Converts unsigned integers to and from positional strings in a fixed radix.
///
/// A codec pairs a radix with an [`Alphabet`] holding at least `radix`
/// characters. Only the first `radix` characters are ever produced, and
/// decoding rejects characters whose digit value is not below the radix.
///
/// # Example
///
/// ```
/// use keyforge::Codec;
///
/// let codec = Codec::new(32).unwrap();
/// assert_eq!(codec.encode(123_456_789_u64), "3NQK8N");
/// assert_eq!(codec.decode("3NQK8N").unwrap(), 123_456_789);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Codec {
    radix: u8,
    alphabet: Alphabet,
}

impl Codec {
    /// Creates a codec for `radix` using the canonical alphabet selected by
    /// [`Alphabet::for_radix`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedRadix`] if `radix` is outside `2..=94`.
    pub fn new(radix: u8) -> Result<Self> {
        let alphabet = Alphabet::for_radix(radix)?;
        Ok(Self { radix, alphabet })
    }

    /// Creates a codec with an explicit alphabet, bypassing the canonical
    /// selection policy.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRadix`] if `radix < 2` or the alphabet has fewer
    /// than `radix` characters.
    pub fn with_alphabet(radix: u8, alphabet: Alphabet) -> Result<Self> {
        if radix < 2 || usize::from(radix) > alphabet.len() {
            return Err(Error::InvalidRadix {
                radix,
                alphabet_len: alphabet.len(),
            });
        }
        Ok(Self { radix, alphabet })
    }

    /// Returns a codec whose digit characters are permuted by `seed`.
    ///
    /// Only the characters reachable in this radix take part in the shuffle,
    /// so every digit still renders as one of them. The same `(codec, seed)`
    /// pair always produces the same mapping.
    ///
    /// # Example
    ///
    /// ```
    /// use keyforge::Codec;
    ///
    /// let secret = Codec::new(62).unwrap().shuffled(0xC0FFEE);
    /// let encoded = secret.encode(987_654_321_u64);
    /// assert_eq!(secret.decode(&encoded).unwrap(), 987_654_321);
    /// ```
    pub fn shuffled(&self, seed: u64) -> Self {
        Self {
            radix: self.radix,
            alphabet: self.alphabet.prefix(usize::from(self.radix)).shuffled(seed),
        }
    }

    /// The radix of this codec.
    pub const fn radix(&self) -> u8 {
        self.radix
    }

    /// The alphabet backing this codec.
    pub const fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// Encodes `value` using the minimal number of digits (at least one).
    pub fn encode(&self, value: impl Into<u128>) -> String {
        self.encode_padded(value, 0)
    }

    /// Encodes `value`, left-padding with the zero digit up to `width`
    /// characters. Longer encodings are never truncated.
    pub fn encode_padded(&self, value: impl Into<u128>, width: usize) -> String {
        let mut buf = [0_u8; MAX_DIGITS];
        let digits = self.encode_to_buf(value.into(), &mut buf);
        let mut out = String::with_capacity(width.max(digits.len()));
        for _ in digits.len()..width {
            out.push(char::from(self.alphabet.byte_at(0)));
        }
        out.push_str(digits);
        out
    }

    /// Encodes into a caller-provided stack buffer without heap allocation,
    /// returning the written tail of `buf`.
    pub fn encode_to_buf<'a>(&self, mut value: u128, buf: &'a mut [u8; MAX_DIGITS]) -> &'a str {
        let radix = u128::from(self.radix);
        let mut pos = MAX_DIGITS;
        loop {
            pos -= 1;
            let digit = (value % radix) as usize;
            buf[pos] = self.alphabet.byte_at(digit);
            value /= radix;
            if value == 0 {
                break;
            }
        }
        // SAFETY: every byte comes from the ASCII alphabet
        unsafe { core::str::from_utf8_unchecked(&buf[pos..]) }
    }

    /// Decodes `text` back into an integer.
    ///
    /// # Errors
    ///
    /// - [`Error::DecodeEmpty`] if `text` is empty
    /// - [`Error::DecodeInvalidChar`] if a character is not a digit of this
    ///   codec
    /// - [`Error::DecodeOverflow`] if the value does not fit in a `u128`
    pub fn decode(&self, text: &str) -> Result<u128> {
        if text.is_empty() {
            return Err(Error::DecodeEmpty);
        }
        let radix = u128::from(self.radix);
        let mut acc = 0_u128;
        for (index, ch) in text.chars().enumerate() {
            let value = match self.alphabet.value_of(ch) {
                Some(value) if value < self.radix => value,
                _ => return Err(Error::DecodeInvalidChar { ch, index }),
            };
            acc = acc
                .checked_mul(radix)
                .and_then(|acc| acc.checked_add(u128::from(value)))
                .ok_or(Error::DecodeOverflow)?;
        }
        Ok(acc)
    }

    /// Decodes `text` into a `u64`.
    ///
    /// # Errors
    ///
    /// Same as [`Codec::decode`], plus [`Error::DecodeOverflow`] if the value
    /// exceeds `u64::MAX`.
    pub fn decode_u64(&self, text: &str) -> Result<u64> {
        u64::try_from(self.decode(text)?).map_err(|_| Error::DecodeOverflow)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    const SAMPLES: [u128; 9] = [
        0,
        1,
        61,
        62,
        4095,
        123_456_789,
        0x7FFF_FFFF_FFFF_FFFF,
        u64::MAX as u128,
        (1 << 96) - 1,
    ];

    fn roundtrip(codec: &Codec) {
        for &value in &SAMPLES {
            let encoded = codec.encode(value);
            let decoded = codec.decode(&encoded).unwrap();
            assert_eq!(
                decoded,
                value,
                "radix {} encoded {value} as {encoded}",
                codec.radix()
            );
        }
    }

    #[test]
    fn encode_decode_preserves_values_for_every_supported_radix() {
        for radix in 2..=94 {
            roundtrip(&Codec::new(radix).unwrap());
        }
    }

    #[test]
    fn encode_decode_preserves_values_with_shuffled_alphabets() {
        for radix in [2, 10, 32, 36, 62, 64, 94] {
            let codec = Codec::new(radix).unwrap().shuffled(0xDEAD_BEEF);
            roundtrip(&codec);
        }
    }

    #[test]
    fn encode_matches_known_values() {
        let base32 = Codec::new(32).unwrap();
        assert_eq!(base32.encode(123_456_789_u64), "3NQK8N");
        assert_eq!(base32.decode("3NQK8N").unwrap(), 123_456_789);

        let base10 = Codec::new(10).unwrap();
        assert_eq!(base10.encode(1_234_567_890_u64), "1234567890");

        let base16 = Codec::new(16).unwrap();
        assert_eq!(base16.encode(0xBEEF_u32), "BEEF");

        let base62 = Codec::new(62).unwrap();
        assert_eq!(base62.encode(61_u8), "z");
        assert_eq!(base62.encode(62_u8), "10");
    }

    #[test]
    fn encode_zero_yields_first_character() {
        for radix in [2, 32, 62, 64, 94] {
            assert_eq!(Codec::new(radix).unwrap().encode(0_u8), "0");
        }
        let custom = Codec::with_alphabet(3, Alphabet::new("xyz").unwrap()).unwrap();
        assert_eq!(custom.encode(0_u8), "x");
        assert_eq!(custom.encode(5_u8), "yz");
    }

    #[test]
    fn encode_uses_minimal_length() {
        let codec = Codec::new(10).unwrap();
        for (value, len) in [(9_u32, 1), (10, 2), (99, 2), (100, 3)] {
            assert_eq!(codec.encode(value).len(), len);
        }
        let binary = Codec::new(2).unwrap();
        assert_eq!(binary.encode(u128::MAX).len(), 128);
    }

    #[test]
    fn encode_padded_pads_but_never_truncates() {
        let codec = Codec::new(62).unwrap();
        assert_eq!(codec.encode_padded(5_u8, 3), "005");
        assert_eq!(codec.encode_padded(3844_u32, 2), "100");
        assert_eq!(codec.encode_padded(0_u8, 0), "0");
    }

    #[test]
    fn decode_rejects_characters_outside_the_radix() {
        let base10 = Codec::new(10).unwrap();
        assert_eq!(
            base10.decode("12a4"),
            Err(Error::DecodeInvalidChar { ch: 'a', index: 2 })
        );
        assert_eq!(
            base10.decode("9A"),
            Err(Error::DecodeInvalidChar { ch: 'A', index: 1 })
        );

        let base32 = Codec::new(32).unwrap();
        assert_eq!(
            base32.decode("ZZZZZZ!"),
            Err(Error::DecodeInvalidChar { ch: '!', index: 6 })
        );
        assert_eq!(
            base32.decode("ü"),
            Err(Error::DecodeInvalidChar { ch: 'ü', index: 0 })
        );
    }

    #[test]
    fn decode_rejects_empty_input() {
        assert_eq!(Codec::new(62).unwrap().decode(""), Err(Error::DecodeEmpty));
    }

    #[test]
    fn decode_reports_overflow() {
        let binary = Codec::new(2).unwrap();
        let too_wide: String = core::iter::repeat_n('1', 129).collect();
        assert_eq!(binary.decode(&too_wide), Err(Error::DecodeOverflow));

        let base62 = Codec::new(62).unwrap();
        let above_u64 = base62.encode(u128::from(u64::MAX) + 1);
        assert_eq!(base62.decode_u64(&above_u64), Err(Error::DecodeOverflow));
        let max = base62.encode(u64::MAX);
        assert_eq!(base62.decode_u64(&max).unwrap(), u64::MAX);
    }

    #[test]
    fn crockford_decode_accepts_case_and_aliases() {
        let codec = Codec::new(32).unwrap();
        assert_eq!(codec.decode("3nqk8n").unwrap(), 123_456_789);
        assert_eq!(codec.decode("aBcD").unwrap(), codec.decode("ABCD").unwrap());
        assert_eq!(codec.decode("O1").unwrap(), codec.decode("01").unwrap());
        assert_eq!(codec.decode("IL").unwrap(), codec.decode("11").unwrap());
        assert!(codec.decode("U").is_err());
    }

    #[test]
    fn base62_decode_is_case_sensitive() {
        let codec = Codec::new(62).unwrap();
        assert_ne!(codec.decode("a").unwrap(), codec.decode("A").unwrap());
    }

    #[test]
    fn with_alphabet_checks_radix_against_alphabet_length() {
        let alphabet = Alphabet::new("01").unwrap();
        assert_eq!(
            Codec::with_alphabet(3, alphabet.clone()),
            Err(Error::InvalidRadix {
                radix: 3,
                alphabet_len: 2
            })
        );
        assert_eq!(
            Codec::with_alphabet(1, alphabet.clone()),
            Err(Error::InvalidRadix {
                radix: 1,
                alphabet_len: 2
            })
        );
        assert!(Codec::with_alphabet(2, alphabet).is_ok());
    }

    #[test]
    fn new_rejects_unsupported_radix() {
        assert_eq!(Codec::new(1), Err(Error::UnsupportedRadix { radix: 1 }));
        assert_eq!(Codec::new(95), Err(Error::UnsupportedRadix { radix: 95 }));
    }

    #[test]
    fn shuffled_codec_only_uses_radix_characters() {
        let codec = Codec::new(10).unwrap().shuffled(99);
        let encoded: Vec<char> = codec.encode(9_876_543_210_u64).chars().collect();
        assert!(encoded.iter().all(char::is_ascii_digit));
        assert_ne!(
            codec.alphabet().as_str(),
            "0123456789",
            "seed 99 should permute the digits"
        );
    }

    #[test]
    fn shuffled_codec_is_stable_across_instances() {
        let a = Codec::new(62).unwrap().shuffled(5);
        let b = Codec::new(62).unwrap().shuffled(5);
        assert_eq!(a.encode(1_000_000_u32), b.encode(1_000_000_u32));
    }
}
