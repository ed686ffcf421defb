use alloc::string::{String, ToString};
use core::fmt;

use crate::{
    alphabet::Codec,
    error::{Error, Result},
};

/// A 64-bit Snowflake ID
///
/// - 1 bit reserved (always zero, so the value fits a signed 64-bit column)
/// - 41 bits timestamp (ms since the configured epoch)
/// - 10 bits worker ID
/// - 12 bits sequence
///
/// ```text
///  Bit Index:  63           63 62            22 21             12 11             0
///              +--------------+----------------+-----------------+---------------+
///  Field:      | reserved (1) | timestamp (41) | worker ID (10)  | sequence (12) |
///              +--------------+----------------+-----------------+---------------+
///              |<----------- MSB ---------- 64 bits ----------- LSB ------------>|
/// ```
///
/// IDs order by timestamp first, then worker, then sequence.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SnowflakeId {
    id: u64,
}

/// The unpacked fields of a [`SnowflakeId`].
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct SnowflakeParts {
    /// Milliseconds since the epoch (41 bits).
    pub timestamp_ms: u64,
    /// Worker id (10 bits).
    pub worker_id: u16,
    /// Per-millisecond sequence (12 bits).
    pub sequence: u16,
}

impl SnowflakeId {
    /// Bitmask for extracting the 41-bit timestamp field. Occupies bits 22
    /// through 62.
    pub const TIMESTAMP_MASK: u64 = (1 << 41) - 1;

    /// Bitmask for extracting the 10-bit worker ID field. Occupies bits 12
    /// through 21.
    pub const WORKER_ID_MASK: u64 = (1 << 10) - 1;

    /// Bitmask for extracting the 12-bit sequence field. Occupies bits 0
    /// through 11.
    pub const SEQUENCE_MASK: u64 = (1 << 12) - 1;

    /// Number of bits to shift the timestamp to its correct position (bit 22).
    pub const TIMESTAMP_SHIFT: u64 = 22;

    /// Number of bits to shift the worker ID to its correct position (bit 12).
    pub const WORKER_ID_SHIFT: u64 = 12;

    /// Number of bits to shift the sequence field (bit 0).
    pub const SEQUENCE_SHIFT: u64 = 0;

    /// Packs the three fields, silently truncating each to its bit width.
    ///
    /// Callers are responsible for supplying in-range values; use
    /// [`SnowflakeId::try_from_components`] to reject them instead.
    pub const fn from_components(timestamp_ms: u64, worker_id: u64, sequence: u64) -> Self {
        let timestamp = (timestamp_ms & Self::TIMESTAMP_MASK) << Self::TIMESTAMP_SHIFT;
        let worker_id = (worker_id & Self::WORKER_ID_MASK) << Self::WORKER_ID_SHIFT;
        let sequence = (sequence & Self::SEQUENCE_MASK) << Self::SEQUENCE_SHIFT;
        Self {
            id: timestamp | worker_id | sequence,
        }
    }

    /// Packs the three fields, rejecting values that do not fit.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ComponentOverflow`] naming the first field that
    /// exceeds its bit width.
    pub fn try_from_components(
        timestamp_ms: u64,
        worker_id: u64,
        sequence: u64,
    ) -> Result<Self> {
        if timestamp_ms > Self::TIMESTAMP_MASK {
            return Err(Error::ComponentOverflow {
                field: "timestamp",
                value: timestamp_ms,
                max: Self::TIMESTAMP_MASK,
            });
        }
        if worker_id > Self::WORKER_ID_MASK {
            return Err(Error::ComponentOverflow {
                field: "worker_id",
                value: worker_id,
                max: Self::WORKER_ID_MASK,
            });
        }
        if sequence > Self::SEQUENCE_MASK {
            return Err(Error::ComponentOverflow {
                field: "sequence",
                value: sequence,
                max: Self::SEQUENCE_MASK,
            });
        }
        Ok(Self::from_components(timestamp_ms, worker_id, sequence))
    }

    /// Extracts the timestamp from the packed ID.
    pub const fn timestamp(&self) -> u64 {
        (self.id >> Self::TIMESTAMP_SHIFT) & Self::TIMESTAMP_MASK
    }

    /// Extracts the worker ID from the packed ID.
    pub const fn worker_id(&self) -> u16 {
        ((self.id >> Self::WORKER_ID_SHIFT) & Self::WORKER_ID_MASK) as u16
    }

    /// Extracts the sequence number from the packed ID.
    pub const fn sequence(&self) -> u16 {
        ((self.id >> Self::SEQUENCE_SHIFT) & Self::SEQUENCE_MASK) as u16
    }

    /// Unpacks all three fields.
    pub const fn decompose(&self) -> SnowflakeParts {
        SnowflakeParts {
            timestamp_ms: self.timestamp(),
            worker_id: self.worker_id(),
            sequence: self.sequence(),
        }
    }

    /// Converts this type into its raw type representation
    pub const fn to_raw(&self) -> u64 {
        self.id
    }

    /// Converts a raw type into this type
    ///
    /// The reserved top bit is kept as-is; check [`SnowflakeId::is_valid`]
    /// when the value comes from untrusted input.
    pub const fn from_raw(raw: u64) -> Self {
        Self { id: raw }
    }

    /// Returns `true` if the reserved bit is clear.
    pub const fn is_valid(&self) -> bool {
        self.id >> 63 == 0
    }

    /// Renders the ID in `radix`. Radix 10 is plain decimal.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedRadix`] if `radix` is outside `2..=94`.
    ///
    /// # Example
    ///
    /// ```
    /// use keyforge::SnowflakeId;
    ///
    /// let id = SnowflakeId::from_raw(4_194_304);
    /// assert_eq!(id.encode(10).unwrap(), "4194304");
    /// assert_eq!(id.encode(32).unwrap(), "40000");
    /// ```
    pub fn encode(&self, radix: u8) -> Result<String> {
        if radix == 10 {
            return Ok(self.id.to_string());
        }
        Ok(Codec::new(radix)?.encode(self.id))
    }

    /// Parses an ID rendered by [`SnowflakeId::encode`].
    ///
    /// # Errors
    ///
    /// - [`Error::UnsupportedRadix`] if `radix` is outside `2..=94`
    /// - any decode error from [`Codec::decode`]
    /// - [`Error::DecodeOverflow`] if the value does not fit 63 bits
    pub fn decode(text: &str, radix: u8) -> Result<Self> {
        let raw = Codec::new(radix)?.decode_u64(text)?;
        let id = Self::from_raw(raw);
        if !id.is_valid() {
            return Err(Error::DecodeOverflow);
        }
        Ok(id)
    }

    /// Returns the ID as a zero-padded 19-digit string, which sorts like the
    /// integer.
    pub fn to_padded_string(&self) -> String {
        alloc::format!("{:019}", self.id)
    }
}

impl From<SnowflakeParts> for SnowflakeId {
    fn from(parts: SnowflakeParts) -> Self {
        Self::from_components(
            parts.timestamp_ms,
            u64::from(parts.worker_id),
            u64::from(parts.sequence),
        )
    }
}

impl From<SnowflakeId> for u64 {
    fn from(id: SnowflakeId) -> Self {
        id.to_raw()
    }
}

impl fmt::Display for SnowflakeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

impl fmt::Debug for SnowflakeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SnowflakeId")
            .field("id", &format_args!("0x{:016x}", self.id))
            .field("timestamp", &self.timestamp())
            .field("worker_id", &self.worker_id())
            .field("sequence", &self.sequence())
            .finish()
    }
}

/// Packs a timestamp, worker id, and sequence into a raw Snowflake value.
///
/// Out-of-range inputs are masked to their bit widths, never rejected.
///
/// # Example
///
/// ```
/// use keyforge::compose;
///
/// assert_eq!(compose(0, 0, 0), 0);
/// assert_eq!(compose(1, 0, 0), 1 << 22);
/// ```
pub const fn compose(timestamp_ms: u64, worker_id: u64, sequence: u64) -> u64 {
    SnowflakeId::from_components(timestamp_ms, worker_id, sequence).to_raw()
}

/// Unpacks a raw Snowflake value. Exact inverse of [`compose`] for in-range
/// inputs.
pub const fn decompose(id: u64) -> SnowflakeParts {
    SnowflakeId::from_raw(id).decompose()
}
