use chrono::{DateTime, Datelike, Local, TimeZone, Timelike, Utc};

const NANOS_PER_SECOND: u64 = 1_000_000_000;

/// Which wall clock calendar fields are read from.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Default, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CalendarZone {
    /// Coordinated Universal Time.
    #[default]
    Utc,
    /// The host's local time zone.
    Local,
}

/// An instant broken down into calendar fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CalendarFields {
    /// Calendar year, e.g. `2026`.
    pub year: i32,
    /// Month, `1..=12`.
    pub month: u32,
    /// Day of the month, `1..=31`.
    pub day: u32,
    /// Hour, `0..=23`.
    pub hour: u32,
    /// Minute, `0..=59`.
    pub minute: u32,
    /// Second, `0..=59`.
    pub second: u32,
    /// Nanoseconds within the second. May exceed `999_999_999` during a leap
    /// second.
    pub nanosecond: u32,
}

impl CalendarFields {
    fn from_datetime<Tz: TimeZone>(at: &DateTime<Tz>) -> Self {
        Self {
            year: at.year(),
            month: at.month(),
            day: at.day(),
            hour: at.hour(),
            minute: at.minute(),
            second: at.second(),
            nanosecond: at.nanosecond(),
        }
    }

    /// Seconds elapsed since the start of the hour, `0..3600`.
    pub const fn seconds_in_hour(&self) -> u32 {
        self.minute * 60 + self.second
    }

    /// Scales the sub-second part onto `0..steps`.
    ///
    /// A leap second's overflow nanoseconds map to the last step.
    ///
    /// # Example
    ///
    /// ```
    /// use chrono::{TimeZone, Utc};
    /// use keyforge::CalendarZone;
    ///
    /// let at = Utc.timestamp_opt(0, 500_000_000).unwrap();
    /// let fields = CalendarZone::Utc.fields(at);
    /// assert_eq!(fields.fraction(62 * 62), 1922);
    /// ```
    pub fn fraction(&self, steps: u32) -> u32 {
        let nanos = u64::from(self.nanosecond).min(NANOS_PER_SECOND - 1);
        // nanos < 1e9, so the quotient is below `steps`
        (nanos * u64::from(steps) / NANOS_PER_SECOND) as u32
    }
}

impl CalendarZone {
    /// Breaks `at` down into calendar fields in this zone.
    pub fn fields(self, at: DateTime<Utc>) -> CalendarFields {
        match self {
            Self::Utc => CalendarFields::from_datetime(&at),
            Self::Local => CalendarFields::from_datetime(&at.with_timezone(&Local)),
        }
    }
}
