use alloc::{string::String, sync::Arc};

use chrono::{DateTime, Datelike, Utc};

use crate::{
    check::{CheckDigit, Crc32CheckDigit},
    config::{Config, EPOCH_MILLIS_ENV, MAX_WORKER_ID, SharedCheckDigit, WORKER_ID_ENV},
    error::{Error, Result},
    time::{CalendarZone, DEFAULT_EPOCH_MILLIS},
};

/// Builder for [`Config`].
///
/// Values are validated once, in [`ConfigBuilder::build`].
#[derive(Clone)]
pub struct ConfigBuilder {
    epoch_millis: i64,
    worker_id: u64,
    zone: CalendarZone,
    check_digit: SharedCheckDigit,
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self {
            epoch_millis: DEFAULT_EPOCH_MILLIS,
            worker_id: 0,
            zone: CalendarZone::Utc,
            check_digit: Arc::new(Crc32CheckDigit),
        }
    }
}

impl ConfigBuilder {
    /// Sets the epoch.
    #[must_use]
    pub fn epoch(mut self, epoch: DateTime<Utc>) -> Self {
        self.epoch_millis = epoch.timestamp_millis();
        self
    }

    /// Sets the epoch in milliseconds since the Unix epoch.
    #[must_use]
    pub const fn epoch_millis(mut self, millis: i64) -> Self {
        self.epoch_millis = millis;
        self
    }

    /// Sets the default worker id (`0..=1023`).
    #[must_use]
    pub fn worker_id(mut self, worker_id: u16) -> Self {
        self.worker_id = u64::from(worker_id);
        self
    }

    /// Sets the zone calendar fields are read in.
    #[must_use]
    pub const fn zone(mut self, zone: CalendarZone) -> Self {
        self.zone = zone;
        self
    }

    /// Replaces the default CRC-32 check-digit strategy.
    #[must_use]
    pub fn check_digit(mut self, strategy: impl CheckDigit + Send + Sync + 'static) -> Self {
        self.check_digit = Arc::new(strategy);
        self
    }

    /// Applies environment-style overrides for the worker id
    /// ([`WORKER_ID_ENV`]) and epoch ([`EPOCH_MILLIS_ENV`]).
    ///
    /// `lookup` returns the raw value of a variable, if set. Blank values are
    /// ignored.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidEnv`] if a value is not an unsigned (worker id)
    /// or signed (epoch) integer.
    ///
    /// # Example
    ///
    /// ```
    /// use keyforge::{Config, WORKER_ID_ENV};
    ///
    /// let config = Config::builder()
    ///     .with_overrides(|var| (var == WORKER_ID_ENV).then(|| "12".to_string()))
    ///     .unwrap()
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(config.worker_id(), 12);
    /// ```
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&'static str) -> Option<String>,
    {
        if let Some(value) = non_blank(lookup(WORKER_ID_ENV)) {
            self.worker_id = value.trim().parse().map_err(|_| Error::InvalidEnv {
                var: WORKER_ID_ENV,
                value: value.clone(),
            })?;
        }
        if let Some(value) = non_blank(lookup(EPOCH_MILLIS_ENV)) {
            self.epoch_millis = value.trim().parse().map_err(|_| Error::InvalidEnv {
                var: EPOCH_MILLIS_ENV,
                value: value.clone(),
            })?;
        }
        Ok(self)
    }

    /// Validates and freezes the configuration.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidWorkerId`] if the worker id exceeds 1023
    /// - [`Error::InvalidEpoch`] if the epoch is out of chrono's range or its
    ///   year is below 1
    pub fn build(self) -> Result<Config> {
        let worker_id = u16::try_from(self.worker_id)
            .ok()
            .filter(|&id| id <= MAX_WORKER_ID)
            .ok_or(Error::InvalidWorkerId {
                worker_id: self.worker_id,
            })?;
        let epoch = DateTime::from_timestamp_millis(self.epoch_millis)
            .filter(|epoch| epoch.year() >= 1)
            .ok_or(Error::InvalidEpoch {
                millis: self.epoch_millis,
            })?;
        Ok(Config {
            epoch,
            worker_id,
            zone: self.zone,
            check_digit: self.check_digit,
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    fn env(pairs: &'static [(&'static str, &'static str)]) -> impl Fn(&'static str) -> Option<String> {
        move |var| {
            pairs
                .iter()
                .find(|(k, _)| *k == var)
                .map(|(_, v)| (*v).to_string())
        }
    }

    #[test]
    fn defaults_are_2020_epoch_and_worker_zero() {
        let config = Config::builder().build().unwrap();
        assert_eq!(config.worker_id(), 0);
        assert_eq!(config.epoch_millis(), DEFAULT_EPOCH_MILLIS);
        assert_eq!(config.epoch_year(), 2020);
        assert_eq!(config.zone(), CalendarZone::Utc);
        assert_eq!(
            config.check_digit().compute("1234567890", 10).unwrap(),
            '5'
        );
    }

    #[test]
    fn build_rejects_worker_id_above_ten_bits() {
        assert!(Config::builder().worker_id(1023).build().is_ok());
        assert!(matches!(
            Config::builder().worker_id(1024).build(),
            Err(Error::InvalidWorkerId { worker_id: 1024 })
        ));
    }

    #[test]
    fn build_rejects_epoch_before_year_one() {
        let err = Config::builder().epoch_millis(-62_200_000_000_000).build();
        assert!(matches!(err, Err(Error::InvalidEpoch { .. })));
        let err = Config::builder().epoch_millis(i64::MAX).build();
        assert!(matches!(err, Err(Error::InvalidEpoch { .. })));
    }

    #[test]
    fn overrides_apply_worker_and_epoch() {
        let config = Config::builder()
            .with_overrides(env(&[
                (WORKER_ID_ENV, " 42 "),
                (EPOCH_MILLIS_ENV, "1288834974657"),
            ]))
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(config.worker_id(), 42);
        assert_eq!(config.epoch_millis(), 1_288_834_974_657);
    }

    #[test]
    fn blank_overrides_are_ignored() {
        let config = Config::builder()
            .worker_id(3)
            .with_overrides(env(&[(WORKER_ID_ENV, "  ")]))
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(config.worker_id(), 3);
    }

    #[test]
    fn malformed_overrides_are_reported() {
        let err = Config::builder()
            .with_overrides(env(&[(WORKER_ID_ENV, "seven")]))
            .err();
        assert_eq!(
            err,
            Some(Error::InvalidEnv {
                var: WORKER_ID_ENV,
                value: "seven".to_string(),
            })
        );

        let err = Config::builder()
            .with_overrides(env(&[(WORKER_ID_ENV, "5000")]))
            .unwrap()
            .build()
            .err();
        assert_eq!(err, Some(Error::InvalidWorkerId { worker_id: 5000 }));
    }

    #[test]
    fn custom_check_digit_is_installed() {
        let config = Config::builder()
            .check_digit(|_: &str, _: u8| '!')
            .build()
            .unwrap();
        assert_eq!(config.check_digit().compute("abc", 62).unwrap(), '!');
    }

    #[test]
    fn millis_since_epoch_clamps_before_epoch() {
        let config = Config::builder().epoch_millis(1_000).build().unwrap();
        let before = DateTime::from_timestamp_millis(500).unwrap();
        let after = DateTime::from_timestamp_millis(1_750).unwrap();
        assert_eq!(config.millis_since_epoch(before), 0);
        assert_eq!(config.millis_since_epoch(after), 750);
    }
}
