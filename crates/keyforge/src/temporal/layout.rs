use alloc::string::String;

use crate::{alphabet::Codec, time::CalendarFields};

/// Length of every request id.
pub const REQUEST_ID_LEN: usize = 16;

/// Length of the short form returned by [`short_request_id`].
pub const SHORT_REQUEST_ID_LEN: usize = 8;

/// Number of leading event-id characters derived from the clock: six
/// calendar fields and a two-character sub-second fraction.
pub const EVENT_ID_TIME_LEN: usize = 8;

/// Sub-second resolution of event ids (two radix-62 characters).
pub(crate) const EVENT_FRACTION_STEPS: u32 = 62 * 62;

/// Sub-second resolution of request ids: the millisecond within the second,
/// so each step matches one sequence-counter millisecond.
pub(crate) const REQUEST_FRACTION_STEPS: u32 = 1000;

/// Request ids carry the low 10 bits of the sequence (two radix-32
/// characters).
pub(crate) const REQUEST_SEQUENCE_SPACE: u64 = 32 * 32;

pub(crate) const REQUEST_SECONDS_WIDTH: usize = 3;
pub(crate) const REQUEST_FRACTION_WIDTH: usize = 2;
pub(crate) const REQUEST_SEQUENCE_WIDTH: usize = 2;
pub(crate) const REQUEST_WORKER_WIDTH: usize = 2;
pub(crate) const REQUEST_TAIL_LEN: usize = 3;

/// Returns the same-day-sortable short form of a request id: hour, seconds
/// within the hour, sub-second fraction and sequence.
///
/// Returns `None` if `id` is too short to be a request id.
///
/// # Example
///
/// ```
/// use keyforge::short_request_id;
///
/// assert_eq!(short_request_id("69GD1Y0H0A0301ZT"), Some("D1Y0H0A0"));
/// assert_eq!(short_request_id("69G"), None);
/// ```
pub fn short_request_id(id: &str) -> Option<&str> {
    id.get(3..3 + SHORT_REQUEST_ID_LEN)
}

/// Appends the year (relative to the epoch year), month, day and hour as one
/// radix-62 character each.
pub(crate) fn push_date_hour(out: &mut String, base62: &Codec, fields: &CalendarFields, epoch_year: i32) {
    // epoch_year >= 1, and the wrap at 62 keeps the column one character wide
    let year = fields.year.rem_euclid(epoch_year).rem_euclid(62) as u32;
    for value in [year, fields.month, fields.day, fields.hour] {
        push_single(out, base62, value);
    }
}

/// Appends `value` as exactly one digit of `codec`.
pub(crate) fn push_single(out: &mut String, codec: &Codec, value: u32) {
    let radix = u32::from(codec.radix());
    let digit = (value % radix) as usize;
    if let Some(ch) = codec.alphabet().char_at(digit) {
        out.push(ch);
    }
}

/// Appends `value` left-padded to `width` digits of `codec`.
pub(crate) fn push_padded(out: &mut String, codec: &Codec, value: u64, width: usize) {
    out.push_str(&codec.encode_padded(value, width));
}
