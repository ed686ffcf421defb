#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::sequence::mutex::{Mutex, lock};

/// Number of distinct sequence values per millisecond (12 bits).
pub const SEQUENCE_SPACE: u64 = 1 << 12;

/// Largest value [`SequenceCounter::next_sequence`] can return.
pub const MAX_SEQUENCE: u16 = (SEQUENCE_SPACE - 1) as u16;

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
struct SequenceState {
    last_millisecond: u64,
    counter: u64,
}

/// A lock-protected counter that restarts at zero every millisecond.
///
/// Every caller observing the same millisecond receives a distinct value in
/// `0..=4095`, in lock acquisition order. Past 4096 calls within one
/// millisecond the values wrap and repeat; this is a silent loss of
/// uniqueness under extreme throughput, not an error.
///
/// The counter is the only shared mutable state in the crate. Share one
/// instance (behind an [`Arc`]) between every generator that must not collide.
///
/// ## Recommended When
/// - Several threads generate IDs with the same worker id
///
/// ## See Also
/// - [`SnowflakeGenerator`]
/// - [`TemporalGenerator`]
///
/// [`Arc`]: alloc::sync::Arc
/// [`SnowflakeGenerator`]: crate::SnowflakeGenerator
/// [`TemporalGenerator`]: crate::TemporalGenerator
#[derive(Default, Debug)]
pub struct SequenceCounter {
    state: Mutex<SequenceState>,
}

impl SequenceCounter {
    /// Creates a counter that has not observed any millisecond yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the next sequence value for `now_ms`.
    ///
    /// The lock is held only for the compare, read, and increment.
    ///
    /// # Example
    ///
    /// ```
    /// use keyforge::SequenceCounter;
    ///
    /// let counter = SequenceCounter::new();
    /// assert_eq!(counter.next_sequence(42), 0);
    /// assert_eq!(counter.next_sequence(42), 1);
    /// assert_eq!(counter.next_sequence(43), 0);
    /// ```
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn next_sequence(&self, now_ms: u64) -> u16 {
        let mut state = lock(&self.state);
        if now_ms != state.last_millisecond {
            if now_ms < state.last_millisecond {
                Self::cold_clock_behind(now_ms, state.last_millisecond);
            }
            state.last_millisecond = now_ms;
            state.counter = 0;
        }
        let seq = state.counter % SEQUENCE_SPACE;
        state.counter = state.counter.wrapping_add(1);
        #[cfg(feature = "tracing")]
        if state.counter == SEQUENCE_SPACE + 1 {
            tracing::warn!(now_ms, "sequence wrapped within a single millisecond");
        }
        // `seq < 4096`
        seq as u16
    }

    #[cold]
    #[inline(never)]
    fn cold_clock_behind(_now_ms: u64, _last_ms: u64) {
        #[cfg(feature = "tracing")]
        tracing::warn!(
            now_ms = _now_ms,
            last_ms = _last_ms,
            "clock moved backwards; sequence restarted"
        );
    }
}
