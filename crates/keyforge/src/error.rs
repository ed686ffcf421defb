use core::fmt;

/// A result type defaulting to the crate-wide [`Error`].
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// All error variants that `keyforge` can emit.
///
/// Radix errors are configuration mistakes and are surfaced immediately.
/// Decode errors are the expected outcome of feeding user input through a
/// codec and should be handled as ordinary values. Check-digit mismatches are
/// not errors at all: [`crate::CheckDigit::verify`] returns a `bool`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Error {
    /// The radix is below 2 or larger than the supplied alphabet.
    InvalidRadix {
        /// The requested radix.
        radix: u8,
        /// Number of characters in the alphabet.
        alphabet_len: usize,
    },

    /// No canonical alphabet exists for this radix (outside `2..=94`).
    UnsupportedRadix {
        /// The requested radix.
        radix: u8,
    },

    /// A custom alphabet is too short, contains non-ASCII characters, or
    /// repeats a character.
    InvalidAlphabet {
        /// Why the alphabet was rejected.
        reason: &'static str,
    },

    /// Attempted to decode an empty string.
    DecodeEmpty,

    /// A character is not part of the alphabet (or maps to a digit value
    /// outside the radix).
    DecodeInvalidChar {
        /// The offending character.
        ch: char,
        /// Character offset within the input.
        index: usize,
    },

    /// The decoded value does not fit into the target integer type.
    DecodeOverflow,

    /// A component does not fit into its bit field.
    ComponentOverflow {
        /// Name of the field.
        field: &'static str,
        /// Value that was supplied.
        value: u64,
        /// Largest value the field can hold.
        max: u64,
    },

    /// The worker id does not fit in 10 bits.
    InvalidWorkerId {
        /// Value that was supplied.
        worker_id: u64,
    },

    /// The epoch cannot be used as a zero point (its year must be at least 1).
    InvalidEpoch {
        /// Epoch in milliseconds since the Unix epoch.
        millis: i64,
    },

    /// The requested identifier length cannot be produced.
    InvalidLength {
        /// Length that was requested.
        len: usize,
    },

    /// An environment override could not be parsed.
    InvalidEnv {
        /// Name of the environment variable.
        var: &'static str,
        /// Raw value found in the environment.
        value: String,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidRadix {
                radix,
                alphabet_len,
            } => write!(
                f,
                "invalid radix {radix} for an alphabet of {alphabet_len} characters"
            ),
            Self::UnsupportedRadix { radix } => {
                write!(f, "unsupported radix {radix}: expected 2..=94")
            }
            Self::InvalidAlphabet { reason } => write!(f, "invalid alphabet: {reason}"),
            Self::DecodeEmpty => write!(f, "cannot decode an empty string"),
            Self::DecodeInvalidChar { ch, index } => {
                write!(f, "invalid character {ch:?} at index {index}")
            }
            Self::DecodeOverflow => write!(f, "decoded value overflows the target type"),
            Self::ComponentOverflow { field, value, max } => {
                write!(f, "{field} {value} exceeds maximum {max}")
            }
            Self::InvalidWorkerId { worker_id } => {
                write!(f, "worker id {worker_id} exceeds maximum 1023")
            }
            Self::InvalidEpoch { millis } => write!(f, "invalid epoch: {millis}ms"),
            Self::InvalidLength { len } => write!(f, "invalid identifier length: {len}"),
            Self::InvalidEnv { var, value } => write!(f, "invalid value for {var}: {value:?}"),
        }
    }
}

impl core::error::Error for Error {}
