/// Digits, upper case, then lower case. Sorts the same as ASCII.
pub const BASE62_CHARS: &[u8; 62] =
    b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Crockford's base32 alphabet: digits and upper case minus `I L O U`.
pub const CROCKFORD32_CHARS: &[u8; 32] = b"0123456789ABCDEFGHJKMNPQRSTVWXYZ";

/// [`BASE62_CHARS`] extended with the two URL-safe symbols `-` and `_`.
pub const URL_SAFE64_CHARS: &[u8; 64] =
    b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz-_";

/// [`BASE62_CHARS`] extended with every ASCII punctuation character, in ASCII
/// order.
pub const PRINTABLE94_CHARS: &[u8; 94] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~";

/// Lookup sentinel for bytes outside the alphabet.
pub(crate) const NO_VALUE: u8 = u8::MAX;

pub(crate) const fn build_lookup(chars: &[u8]) -> [u8; 256] {
    let mut lut = [NO_VALUE; 256];
    let mut i = 0;
    while i < chars.len() {
        lut[chars[i] as usize] = i as u8;
        i += 1;
    }
    lut
}

pub(crate) const BASE62_LOOKUP: [u8; 256] = build_lookup(BASE62_CHARS);
pub(crate) const URL_SAFE64_LOOKUP: [u8; 256] = build_lookup(URL_SAFE64_CHARS);
pub(crate) const PRINTABLE94_LOOKUP: [u8; 256] = build_lookup(PRINTABLE94_CHARS);

/// Lookup table for Crockford base32 decoding
pub(crate) const CROCKFORD32_LOOKUP: [u8; 256] = {
    let mut lut = build_lookup(CROCKFORD32_CHARS);
    let mut i = 0;
    // Main alphabet, allow lower-case
    while i < CROCKFORD32_CHARS.len() {
        let c = CROCKFORD32_CHARS[i];
        if c.is_ascii_uppercase() {
            lut[c.to_ascii_lowercase() as usize] = i as u8;
        }
        i += 1;
    }
    // Crockford-specific aliases
    lut[b'O' as usize] = 0;
    lut[b'o' as usize] = 0;
    lut[b'I' as usize] = 1;
    lut[b'i' as usize] = 1;
    lut[b'L' as usize] = 1;
    lut[b'l' as usize] = 1;
    lut
};
