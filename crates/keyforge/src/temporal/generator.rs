use alloc::{string::String, sync::Arc};

use chrono::{DateTime, Utc};
#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{
    alphabet::Codec,
    config::Config,
    error::{Error, Result},
    random::{RandSource, ThreadRandom},
    sequence::SequenceCounter,
    snowflake::SequenceMethod,
    temporal::{
        EVENT_FRACTION_STEPS, EVENT_ID_TIME_LEN, REQUEST_FRACTION_STEPS, REQUEST_FRACTION_WIDTH,
        REQUEST_ID_LEN, REQUEST_SECONDS_WIDTH, REQUEST_SEQUENCE_SPACE, REQUEST_SEQUENCE_WIDTH,
        REQUEST_TAIL_LEN, REQUEST_WORKER_WIDTH, push_date_hour, push_padded, push_single,
    },
    time::{SystemClock, TimeSource},
};

/// Composes human-scannable string identifiers from calendar fields.
///
/// Both kinds start with the most significant calendar fields, so ids built
/// from the canonical (ASCII-ordered) tables sort lexicographically by
/// creation time:
///
/// ```text
///  event id (radix 62):
///  +---+---+---+---+---+---+-------+-------------+-------+
///  | Y | M | D | h | m | s | frac  | random tail | check |
///  +---+---+---+---+---+---+-------+-------------+-------+
///    0   1   2   3   4   5   6..8    8..size-1    optional
///
///  request id (16 characters):
///  +---+---+---+---+-------------+--------+---------+---------+--------+
///  | Y | M | D | h | sec in hour |  frac  |   seq   | worker  |  tail  |
///  +---+---+---+---+-------------+--------+---------+---------+--------+
///    0   1   2   3      4..7       7..9     9..11     11..13    13..16
///    ------ radix 62 -----   ---------------- radix 32 ----------------
/// ```
///
/// The year column holds `year mod epoch_year`. Calendar fields are read in
/// the configured [`crate::CalendarZone`].
///
/// ## See Also
/// - [`SnowflakeGenerator`](crate::SnowflakeGenerator)
/// - [`short_request_id`](crate::short_request_id)
pub struct TemporalGenerator<T = SystemClock, R = ThreadRandom>
where
    T: TimeSource,
    R: RandSource,
{
    config: Arc<Config>,
    counter: Arc<SequenceCounter>,
    time: T,
    rng: R,
}

impl TemporalGenerator {
    /// Creates a generator reading the system clock and the thread-local
    /// CSPRNG.
    ///
    /// # Example
    ///
    /// ```
    /// use std::sync::Arc;
    /// use keyforge::{Config, SequenceCounter, SequenceMethod, TemporalGenerator};
    ///
    /// let generator = TemporalGenerator::new(
    ///     Arc::new(Config::default()),
    ///     Arc::new(SequenceCounter::new()),
    /// );
    /// let id = generator.request_id(SequenceMethod::Counter).unwrap();
    /// assert_eq!(id.len(), 16);
    /// ```
    pub fn new(config: Arc<Config>, counter: Arc<SequenceCounter>) -> Self {
        Self::with_sources(config, counter, SystemClock, ThreadRandom)
    }
}

impl<T, R> TemporalGenerator<T, R>
where
    T: TimeSource,
    R: RandSource,
{
    /// Creates a generator with explicit time and random sources.
    pub fn with_sources(config: Arc<Config>, counter: Arc<SequenceCounter>, time: T, rng: R) -> Self {
        Self {
            config,
            counter,
            time,
            rng,
        }
    }

    /// The configuration this generator was built with.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Generates an event id of exactly `size` characters for the current
    /// time. See [`TemporalGenerator::event_id_at`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidLength`] if a check digit is requested with a
    /// `size` of zero, or any error from the configured check-digit strategy.
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn event_id(&self, size: usize, with_check_digit: bool) -> Result<String> {
        self.event_id_at(size, with_check_digit, self.time.now())
    }

    /// Generates an event id of exactly `size` characters for the instant
    /// `at`.
    ///
    /// The body is the eight time characters followed by a random radix-62
    /// tail, truncated to `size` (or `size - 1` when a check digit is
    /// requested). Sizes below eight therefore keep only the leading calendar
    /// fields.
    ///
    /// # Errors
    ///
    /// See [`TemporalGenerator::event_id`].
    ///
    /// # Example
    ///
    /// ```
    /// use chrono::{TimeZone, Utc};
    /// use keyforge::TemporalGenerator;
    ///
    /// let generator = TemporalGenerator::new(Default::default(), Default::default());
    /// let at = Utc.with_ymd_and_hms(2026, 10, 16, 13, 45, 30).unwrap();
    ///
    /// let id = generator.event_id_at(12, true, at).unwrap();
    /// assert_eq!(id.len(), 12);
    /// assert!(id.starts_with("6AGDjU00"));
    /// assert!(keyforge::verify_check_digit(&id, 62));
    /// ```
    pub fn event_id_at(&self, size: usize, with_check_digit: bool, at: DateTime<Utc>) -> Result<String> {
        let body_len = if with_check_digit {
            size.checked_sub(1).ok_or(Error::InvalidLength { len: size })?
        } else {
            size
        };

        let base62 = Codec::new(62)?;
        let fields = self.config.zone().fields(at);
        let mut body = String::with_capacity(body_len.max(EVENT_ID_TIME_LEN));
        push_date_hour(&mut body, &base62, &fields, self.config.epoch_year());
        push_single(&mut body, &base62, fields.minute);
        push_single(&mut body, &base62, fields.second);
        push_padded(&mut body, &base62, u64::from(fields.fraction(EVENT_FRACTION_STEPS)), 2);
        for _ in EVENT_ID_TIME_LEN..body_len {
            // `random_below(62) < 62`
            push_single(&mut body, &base62, self.rng.random_below(62) as u32);
        }
        body.truncate(body_len);

        if with_check_digit {
            self.config.check_digit().append(&body, 62)
        } else {
            Ok(body)
        }
    }

    /// Generates a 16-character request id for the current time.
    ///
    /// # Errors
    ///
    /// Never fails with the canonical tables; the `Result` reports codec
    /// construction errors.
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip_all))]
    pub fn request_id(&self, method: SequenceMethod) -> Result<String> {
        self.request_id_at(method, self.time.now())
    }

    /// Generates a 16-character request id for the instant `at`.
    ///
    /// The fraction column holds the millisecond within the second. Under
    /// [`SequenceMethod::Counter`] the sequence column is drawn from the
    /// shared counter for that same millisecond, the key Snowflake ids use.
    /// Only the low 10 bits of the value are kept.
    ///
    /// # Errors
    ///
    /// See [`TemporalGenerator::request_id`].
    pub fn request_id_at(&self, method: SequenceMethod, at: DateTime<Utc>) -> Result<String> {
        let base62 = Codec::new(62)?;
        let base32 = Codec::new(32)?;
        let fields = self.config.zone().fields(at);

        let sequence = match method {
            SequenceMethod::Counter => {
                let millis = self.config.millis_since_epoch(at);
                u64::from(self.counter.next_sequence(millis)) % REQUEST_SEQUENCE_SPACE
            }
            SequenceMethod::Random => self.rng.random_below(REQUEST_SEQUENCE_SPACE),
        };

        let mut id = String::with_capacity(REQUEST_ID_LEN);
        push_date_hour(&mut id, &base62, &fields, self.config.epoch_year());
        push_padded(
            &mut id,
            &base32,
            u64::from(fields.seconds_in_hour()),
            REQUEST_SECONDS_WIDTH,
        );
        push_padded(
            &mut id,
            &base32,
            u64::from(fields.fraction(REQUEST_FRACTION_STEPS)),
            REQUEST_FRACTION_WIDTH,
        );
        push_padded(&mut id, &base32, sequence, REQUEST_SEQUENCE_WIDTH);
        push_padded(
            &mut id,
            &base32,
            u64::from(self.config.worker_id()),
            REQUEST_WORKER_WIDTH,
        );
        for _ in 0..REQUEST_TAIL_LEN {
            // `random_below(32) < 32`
            push_single(&mut id, &base32, self.rng.random_below(32) as u32);
        }
        debug_assert_eq!(id.len(), REQUEST_ID_LEN);
        Ok(id)
    }
}
