//! Time-ordered identifier generation.
//!
//! - [`SnowflakeGenerator`]: 63-bit integers packing a millisecond timestamp,
//!   a worker id and a per-millisecond sequence.
//! - [`TemporalGenerator`]: human-scannable event and request ids built from
//!   calendar fields.
//! - [`Codec`]: positional encoding in radix 2 through 94 over canonical or
//!   shuffled [`Alphabet`]s.
//! - [`CheckDigit`]: single-character verification of user-entered codes.
//!
//! All generators read an immutable [`Config`] and share a
//! [`SequenceCounter`], both behind an `Arc`.
//!
//! # Features
//!
//! - `tracing`: trace spans on generation and warnings on clock anomalies
//! - `parking-lot`: use `parking_lot::Mutex` for the sequence counter
//! - `serde`: `Serialize`/`Deserialize` for ids and configuration enums
extern crate alloc;

mod alphabet;
mod check;
mod config;
mod error;
mod random;
mod sequence;
mod snowflake;
mod temporal;
mod time;

pub use crate::alphabet::*;
pub use crate::check::*;
pub use crate::config::*;
pub use crate::error::*;
pub use crate::random::*;
pub use crate::sequence::*;
pub use crate::snowflake::*;
pub use crate::temporal::*;
pub use crate::time::*;
