use alloc::sync::Arc;
use core::fmt;

use chrono::{DateTime, Datelike, Utc};

use crate::{
    check::{CheckDigit, Crc32CheckDigit},
    config::ConfigBuilder,
    error::Result,
    time::{CalendarZone, DEFAULT_EPOCH_MILLIS},
};

/// Environment variable overriding the default worker id.
pub const WORKER_ID_ENV: &str = "KEYFORGE_WORKER_ID";

/// Environment variable overriding the default epoch, in milliseconds since
/// the Unix epoch.
pub const EPOCH_MILLIS_ENV: &str = "KEYFORGE_EPOCH_MILLIS";

/// Largest worker id that fits in the 10-bit field.
pub const MAX_WORKER_ID: u16 = (1 << 10) - 1;

/// A shareable check-digit strategy.
pub type SharedCheckDigit = Arc<dyn CheckDigit + Send + Sync>;

/// Immutable generator configuration.
///
/// Built once at startup through [`Config::builder`] (or [`Config::from_env`])
/// and shared with every generator through an [`Arc`]. Two generators built
/// from different configs in the same process are fully independent.
///
/// # Example
///
/// ```
/// use keyforge::{CalendarZone, Config};
///
/// let config = Config::builder()
///     .worker_id(7)
///     .zone(CalendarZone::Utc)
///     .build()
///     .unwrap();
/// assert_eq!(config.worker_id(), 7);
/// assert_eq!(config.epoch_millis(), keyforge::DEFAULT_EPOCH_MILLIS);
/// ```
#[derive(Clone)]
pub struct Config {
    pub(crate) epoch: DateTime<Utc>,
    pub(crate) worker_id: u16,
    pub(crate) zone: CalendarZone,
    pub(crate) check_digit: SharedCheckDigit,
}

impl Config {
    /// Starts a builder populated with defaults.
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Builds a config from defaults plus the process environment
    /// ([`WORKER_ID_ENV`], [`EPOCH_MILLIS_ENV`]).
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidEnv`] for unparsable overrides, or any
    /// validation error from [`ConfigBuilder::build`].
    pub fn from_env() -> Result<Self> {
        ConfigBuilder::default()
            .with_overrides(|var| std::env::var(var).ok())?
            .build()
    }

    /// The zero point of every timestamp.
    pub const fn epoch(&self) -> DateTime<Utc> {
        self.epoch
    }

    /// The epoch in milliseconds since the Unix epoch.
    pub fn epoch_millis(&self) -> i64 {
        self.epoch.timestamp_millis()
    }

    /// The calendar year of the epoch.
    pub fn epoch_year(&self) -> i32 {
        self.epoch.year()
    }

    /// The default worker id, `0..=1023`.
    pub const fn worker_id(&self) -> u16 {
        self.worker_id
    }

    /// The zone calendar fields are read in.
    pub const fn zone(&self) -> CalendarZone {
        self.zone
    }

    /// The check-digit strategy.
    pub fn check_digit(&self) -> &(dyn CheckDigit + Send + Sync) {
        self.check_digit.as_ref()
    }

    /// Milliseconds from the epoch to `at`, or `0` if `at` precedes the epoch.
    pub fn millis_since_epoch(&self, at: DateTime<Utc>) -> u64 {
        let elapsed = at.timestamp_millis().saturating_sub(self.epoch_millis());
        u64::try_from(elapsed).unwrap_or_else(|_| {
            #[cfg(feature = "tracing")]
            tracing::warn!(%at, epoch = %self.epoch, "clock is before the epoch");
            0
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            // The default epoch is a valid timestamp.
            epoch: DateTime::from_timestamp_millis(DEFAULT_EPOCH_MILLIS).unwrap_or_default(),
            worker_id: 0,
            zone: CalendarZone::Utc,
            check_digit: Arc::new(Crc32CheckDigit),
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("epoch", &self.epoch)
            .field("worker_id", &self.worker_id)
            .field("zone", &self.zone)
            .finish_non_exhaustive()
    }
}
