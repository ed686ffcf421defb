use chrono::{DateTime, Utc};

use crate::time::TimeSource;

/// A [`TimeSource`] reading the operating system's wall clock.
///
/// The wall clock may be adjusted (NTP, manual changes). Generators do not
/// correct for a clock moving backwards; see [`crate::SequenceCounter`].
#[derive(Default, Clone, Copy, Debug)]
pub struct SystemClock;

impl TimeSource for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
