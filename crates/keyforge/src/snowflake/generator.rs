use alloc::{string::String, sync::Arc};

use chrono::{DateTime, TimeDelta, Utc};
#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{
    alphabet::Codec,
    config::Config,
    error::Result,
    random::{RandSource, ThreadRandom},
    sequence::{SEQUENCE_SPACE, SequenceCounter},
    snowflake::SnowflakeId,
    time::{SystemClock, TimeSource},
};

/// How the 12-bit sequence field of a new ID is filled.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Default, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SequenceMethod {
    /// Take the next value from the shared [`SequenceCounter`]. IDs from one
    /// counter are unique and strictly increasing while the clock does not
    /// move backwards.
    #[default]
    Counter,
    /// Draw a uniform random value. IDs are harder to enumerate but may
    /// collide within a millisecond.
    Random,
}

/// A Snowflake ID generator suitable for multi-threaded environments.
///
/// The generator itself is immutable; the only shared mutable state is the
/// injected [`SequenceCounter`]. Generators that must never collide (same
/// worker id, same process) should share one counter.
///
/// ## Features
/// - ✅ Thread-safe (`Send + Sync` whenever the time and random sources are)
/// - ✅ Counter or random sequence per call
/// - ✅ Per-call worker id override
///
/// ## Recommended When
/// - You need 63-bit integer keys that sort by creation time
///
/// ## See Also
/// - [`TemporalGenerator`]
///
/// [`TemporalGenerator`]: crate::TemporalGenerator
pub struct SnowflakeGenerator<T = SystemClock, R = ThreadRandom>
where
    T: TimeSource,
    R: RandSource,
{
    config: Arc<Config>,
    counter: Arc<SequenceCounter>,
    time: T,
    rng: R,
}

impl SnowflakeGenerator {
    /// Creates a generator reading the system clock and the thread-local
    /// CSPRNG.
    ///
    /// # Example
    ///
    /// ```
    /// use std::sync::Arc;
    /// use keyforge::{Config, SequenceCounter, SequenceMethod, SnowflakeGenerator};
    ///
    /// let config = Arc::new(Config::builder().worker_id(3).build().unwrap());
    /// let generator = SnowflakeGenerator::new(config, Arc::new(SequenceCounter::new()));
    ///
    /// let a = generator.generate(None, SequenceMethod::Counter);
    /// let b = generator.generate(None, SequenceMethod::Counter);
    /// assert!(a < b);
    /// assert_eq!(a.worker_id(), 3);
    /// ```
    pub fn new(config: Arc<Config>, counter: Arc<SequenceCounter>) -> Self {
        Self::with_sources(config, counter, SystemClock, ThreadRandom)
    }
}

impl<T, R> SnowflakeGenerator<T, R>
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

    /// The shared sequence counter.
    pub fn counter(&self) -> &Arc<SequenceCounter> {
        &self.counter
    }

    /// Generates an ID for the current time.
    ///
    /// `worker_id` overrides the configured worker id for this call only; it
    /// is masked to 10 bits like every other field.
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip_all))]
    pub fn generate(&self, worker_id: Option<u16>, method: SequenceMethod) -> SnowflakeId {
        self.generate_at(self.time.now(), worker_id, method)
    }

    /// Generates an ID for the instant `at`.
    ///
    /// Instants before the epoch are clamped to timestamp `0`.
    pub fn generate_at(
        &self,
        at: DateTime<Utc>,
        worker_id: Option<u16>,
        method: SequenceMethod,
    ) -> SnowflakeId {
        let timestamp = self.config.millis_since_epoch(at);
        let worker_id = worker_id.unwrap_or(self.config.worker_id);
        let sequence = match method {
            SequenceMethod::Counter => self.counter.next_sequence(timestamp),
            // `random_below(4096) < 4096`
            SequenceMethod::Random => self.rng.random_below(SEQUENCE_SPACE) as u16,
        };
        SnowflakeId::from_components(timestamp, u64::from(worker_id), u64::from(sequence))
    }

    /// Generates an ID with the configured worker id and the counter.
    pub fn next_id(&self) -> SnowflakeId {
        self.generate(None, SequenceMethod::Counter)
    }

    /// Generates an ID and renders it in `radix` (decimal for `10`).
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::UnsupportedRadix`] if `radix` is outside
    /// `2..=94`. No sequence value is consumed in that case.
    ///
    /// # Example
    ///
    /// ```
    /// use std::sync::Arc;
    /// use keyforge::{Config, SequenceCounter, SequenceMethod, SnowflakeGenerator, SnowflakeId};
    ///
    /// let generator = SnowflakeGenerator::new(
    ///     Arc::new(Config::default()),
    ///     Arc::new(SequenceCounter::new()),
    /// );
    /// let encoded = generator.generate_encoded(None, 62, SequenceMethod::Random).unwrap();
    /// let id = SnowflakeId::decode(&encoded, 62).unwrap();
    /// assert_eq!(id.worker_id(), 0);
    /// ```
    pub fn generate_encoded(
        &self,
        worker_id: Option<u16>,
        radix: u8,
        method: SequenceMethod,
    ) -> Result<String> {
        if radix == 10 {
            return Ok(alloc::string::ToString::to_string(
                &self.generate(worker_id, method),
            ));
        }
        let codec = Codec::new(radix)?;
        Ok(codec.encode(self.generate(worker_id, method).to_raw()))
    }

    /// Maps the timestamp of `id` back to wall-clock time using the
    /// configured epoch. Saturates at [`DateTime::<Utc>::MAX_UTC`].
    pub fn timestamp_of(&self, id: SnowflakeId) -> DateTime<Utc> {
        // 41-bit timestamps always fit an i64
        TimeDelta::try_milliseconds(id.timestamp() as i64)
            .and_then(|elapsed| self.config.epoch().checked_add_signed(elapsed))
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }
}
