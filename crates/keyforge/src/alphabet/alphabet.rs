use alloc::{borrow::Cow, vec::Vec};
use core::fmt;

use rand::{SeedableRng, rngs::StdRng, seq::SliceRandom};

use crate::{
    alphabet::{
        BASE62_CHARS, BASE62_LOOKUP, CROCKFORD32_CHARS, CROCKFORD32_LOOKUP, NO_VALUE,
        PRINTABLE94_CHARS, PRINTABLE94_LOOKUP, URL_SAFE64_CHARS, URL_SAFE64_LOOKUP,
        build_lookup,
    },
    error::{Error, Result},
};

/// An ordered, duplicate-free set of ASCII characters used to render digits.
///
/// The position of a character is its digit value. Decoding goes through a
/// 256-entry lookup table, which may also accept aliases that never appear in
/// encoded output (the Crockford table accepts lower case and the `O`/`I`/`L`
/// lookalikes).
///
/// The canonical tables are `const` and borrow static data, so cloning them
/// never allocates.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Alphabet {
    chars: Cow<'static, [u8]>,
    lookup: Cow<'static, [u8; 256]>,
}

impl Alphabet {
    /// `0-9A-Za-z`, radix 62.
    pub const BASE62: Self = Self::from_static(BASE62_CHARS.as_slice(), &BASE62_LOOKUP);

    /// Crockford base32, radix 32. Excludes `I L O U`.
    pub const CROCKFORD32: Self =
        Self::from_static(CROCKFORD32_CHARS.as_slice(), &CROCKFORD32_LOOKUP);

    /// Base62 followed by `-_`, radix 64.
    pub const URL_SAFE64: Self = Self::from_static(URL_SAFE64_CHARS.as_slice(), &URL_SAFE64_LOOKUP);

    /// Base62 followed by the ASCII punctuation characters, radix 94.
    pub const PRINTABLE94: Self =
        Self::from_static(PRINTABLE94_CHARS.as_slice(), &PRINTABLE94_LOOKUP);

    const fn from_static(chars: &'static [u8], lookup: &'static [u8; 256]) -> Self {
        Self {
            chars: Cow::Borrowed(chars),
            lookup: Cow::Borrowed(lookup),
        }
    }

    /// Builds a custom alphabet.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidAlphabet`] if `chars` has fewer than two
    /// characters, contains non-ASCII characters, or repeats a character.
    ///
    /// # Example
    ///
    /// ```
    /// use keyforge::Alphabet;
    ///
    /// let hex = Alphabet::new("0123456789abcdef").unwrap();
    /// assert_eq!(hex.len(), 16);
    /// assert!(Alphabet::new("aa").is_err());
    /// ```
    pub fn new(chars: &str) -> Result<Self> {
        if !chars.is_ascii() {
            return Err(Error::InvalidAlphabet {
                reason: "characters must be ASCII",
            });
        }
        let bytes = chars.as_bytes();
        if bytes.len() < 2 {
            return Err(Error::InvalidAlphabet {
                reason: "at least two characters are required",
            });
        }
        let lookup = build_lookup(bytes);
        if bytes
            .iter()
            .enumerate()
            .any(|(i, &b)| usize::from(lookup[usize::from(b)]) != i)
        {
            return Err(Error::InvalidAlphabet {
                reason: "characters must be unique",
            });
        }
        Ok(Self {
            chars: Cow::Owned(bytes.to_vec()),
            lookup: Cow::Owned(lookup),
        })
    }

    /// Selects the canonical alphabet for `radix`.
    ///
    /// - `32` uses [`Alphabet::CROCKFORD32`]
    /// - `2..=62` uses [`Alphabet::BASE62`] (only the first `radix` characters
    ///   are ever produced)
    /// - `63..=64` uses [`Alphabet::URL_SAFE64`]
    /// - `65..=94` uses [`Alphabet::PRINTABLE94`]
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedRadix`] for any other radix.
    pub fn for_radix(radix: u8) -> Result<Self> {
        match radix {
            32 => Ok(Self::CROCKFORD32),
            2..=62 => Ok(Self::BASE62),
            63..=64 => Ok(Self::URL_SAFE64),
            65..=94 => Ok(Self::PRINTABLE94),
            _ => Err(Error::UnsupportedRadix { radix }),
        }
    }

    /// Number of characters in the alphabet.
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// Returns `true` if the alphabet holds no characters.
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// The characters in digit order.
    pub fn as_str(&self) -> &str {
        // SAFETY: alphabets only ever hold validated ASCII bytes
        unsafe { core::str::from_utf8_unchecked(&self.chars) }
    }

    /// Returns the character rendering `digit`, if the alphabet has one.
    pub fn char_at(&self, digit: usize) -> Option<char> {
        self.chars.get(digit).map(|&b| char::from(b))
    }

    /// Returns the digit value of `ch`, including accepted aliases.
    pub fn value_of(&self, ch: char) -> Option<u8> {
        let b = u8::try_from(ch).ok()?;
        match self.lookup[usize::from(b)] {
            NO_VALUE => None,
            value => Some(value),
        }
    }

    pub(crate) fn byte_at(&self, digit: usize) -> u8 {
        self.chars[digit]
    }

    /// Keeps only the first `len` characters.
    ///
    /// Aliases whose canonical character survives are kept.
    pub fn prefix(&self, len: usize) -> Self {
        if len >= self.chars.len() {
            return self.clone();
        }
        self.rebuild(self.chars[..len].to_vec())
    }

    /// Returns a copy of this alphabet with its characters permuted by a PRNG
    /// seeded with `seed`.
    ///
    /// The permutation is a pure function of `(alphabet, seed)`: the same
    /// inputs always produce the same order, so a caller-secret seed yields a
    /// stable but non-obvious digit mapping.
    ///
    /// # Example
    ///
    /// ```
    /// use keyforge::Alphabet;
    ///
    /// let a = Alphabet::BASE62.shuffled(42);
    /// let b = Alphabet::BASE62.shuffled(42);
    /// assert_eq!(a, b);
    /// assert_ne!(a, Alphabet::BASE62);
    /// ```
    pub fn shuffled(&self, seed: u64) -> Self {
        let mut chars = self.chars.to_vec();
        let mut rng = StdRng::seed_from_u64(seed);
        chars.shuffle(&mut rng);
        self.rebuild(chars)
    }

    fn rebuild(&self, chars: Vec<u8>) -> Self {
        let mut lookup = build_lookup(&chars);
        for byte in 0..=u8::MAX {
            let old = self.lookup[usize::from(byte)];
            if old == NO_VALUE || lookup[usize::from(byte)] != NO_VALUE {
                continue;
            }
            // Alias: follow its canonical character into the new order.
            let canonical = self.chars[usize::from(old)];
            if canonical != byte {
                lookup[usize::from(byte)] = lookup[usize::from(canonical)];
            }
        }
        Self {
            chars: Cow::Owned(chars),
            lookup: Cow::Owned(lookup),
        }
    }
}

impl fmt::Debug for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Alphabet").field(&self.as_str()).finish()
    }
}

impl fmt::Display for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
