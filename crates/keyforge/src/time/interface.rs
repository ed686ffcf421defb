use chrono::{DateTime, Utc};

/// Default epoch: Wednesday, January 1, 2020 00:00:00 UTC
pub const DEFAULT_EPOCH_MILLIS: i64 = 1_577_836_800_000;

/// A trait for wall-clock time sources.
///
/// This abstraction allows you to plug in the real system clock or a mocked
/// time source in tests. Calendar fields for temporal identifiers are derived
/// from the returned instant, so implementations should provide at least
/// millisecond resolution.
///
/// # Example
///
/// ```
/// use chrono::{DateTime, Utc};
/// use keyforge::TimeSource;
///
/// struct FixedTime;
/// impl TimeSource for FixedTime {
///     fn now(&self) -> DateTime<Utc> {
///         DateTime::from_timestamp_millis(1234).unwrap()
///     }
/// }
///
/// let time = FixedTime;
/// assert_eq!(time.unix_millis(), 1234);
/// ```
pub trait TimeSource {
    /// Returns the current instant.
    fn now(&self) -> DateTime<Utc>;

    /// Returns the current time in milliseconds since the Unix epoch.
    fn unix_millis(&self) -> i64 {
        self.now().timestamp_millis()
    }
}

impl<T: TimeSource + ?Sized> TimeSource for &T {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }
}
