use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use keyforge::{
    CalendarZone, Config, EPOCH_MILLIS_ENV, SequenceCounter, SnowflakeGenerator,
    TemporalGenerator, WORKER_ID_ENV,
};

/// Environment variable selecting local time for calendar fields.
pub const LOCAL_TIME_ENV: &str = "KEYFORGE_LOCAL_TIME";

/// Command-line arguments for the `keyforge` binary.
///
/// Global flags fall back to environment variables, which may also be set in
/// a `.env` file in the working directory.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "keyforge",
    version,
    about = "Generate, inspect, encode and verify record identifiers"
)]
pub struct CliArgs {
    /// Default worker id embedded in Snowflake and request ids (`0..=1023`).
    ///
    /// Environment variable: `KEYFORGE_WORKER_ID`
    #[arg(long, global = true, env = WORKER_ID_ENV, default_value_t = 0)]
    pub worker_id: u16,

    /// Epoch in milliseconds since the Unix epoch. Defaults to
    /// 2020-01-01T00:00:00Z.
    ///
    /// Environment variable: `KEYFORGE_EPOCH_MILLIS`
    #[arg(long, global = true, env = EPOCH_MILLIS_ENV, allow_negative_numbers = true)]
    pub epoch_millis: Option<i64>,

    /// Read calendar fields in the host's local time zone instead of UTC.
    ///
    /// Environment variable: `KEYFORGE_LOCAL_TIME`
    #[arg(long, global = true, env = LOCAL_TIME_ENV, default_value_t = false)]
    pub local: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Supported subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Generate Snowflake ids.
    Snowflake {
        /// Output radix (10 prints plain decimal).
        #[arg(long, default_value_t = 10)]
        radix: u8,
        /// Fill the sequence field randomly instead of from the counter.
        #[arg(long)]
        random: bool,
        /// Number of ids to print, one per line.
        #[arg(long, default_value_t = 1)]
        count: usize,
    },
    /// Unpack a Snowflake id into its fields.
    Inspect {
        /// The encoded id.
        id: String,
        /// Radix the id is encoded in.
        #[arg(long, default_value_t = 10)]
        radix: u8,
    },
    /// Generate an event id.
    Event {
        /// Total length, including the check digit.
        #[arg(long, default_value_t = 16)]
        size: usize,
        /// Append a radix-62 check digit.
        #[arg(long)]
        check: bool,
    },
    /// Generate a 16-character request id.
    Request {
        /// Fill the sequence column randomly instead of from the counter.
        #[arg(long)]
        random: bool,
        /// Print only the 8-character short form.
        #[arg(long)]
        short: bool,
    },
    /// Encode an unsigned integer.
    Encode {
        value: u128,
        #[arg(long, default_value_t = 62)]
        radix: u8,
        /// Shuffle the alphabet with this seed.
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Decode text back into an unsigned integer.
    Decode {
        text: String,
        #[arg(long, default_value_t = 62)]
        radix: u8,
        /// Shuffle the alphabet with this seed.
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Append or verify check digits.
    Check {
        #[command(subcommand)]
        action: CheckAction,
    },
}

/// `check` subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum CheckAction {
    /// Print the id followed by its check digit.
    Append {
        id: String,
        #[arg(long, default_value_t = 10)]
        radix: u8,
    },
    /// Exit non-zero unless the last character is the check digit of the
    /// rest.
    Verify {
        id: String,
        #[arg(long, default_value_t = 10)]
        radix: u8,
    },
}

/// Validated runtime state shared by every subcommand.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub config: Arc<Config>,
    pub counter: Arc<SequenceCounter>,
}

impl AppConfig {
    pub fn snowflake(&self) -> SnowflakeGenerator {
        SnowflakeGenerator::new(Arc::clone(&self.config), Arc::clone(&self.counter))
    }

    pub fn temporal(&self) -> TemporalGenerator {
        TemporalGenerator::new(Arc::clone(&self.config), Arc::clone(&self.counter))
    }
}

impl TryFrom<&CliArgs> for AppConfig {
    type Error = anyhow::Error;

    fn try_from(args: &CliArgs) -> Result<Self, Self::Error> {
        let mut builder = Config::builder().worker_id(args.worker_id).zone(if args.local {
            CalendarZone::Local
        } else {
            CalendarZone::Utc
        });
        if let Some(millis) = args.epoch_millis {
            builder = builder.epoch_millis(millis);
        }
        let config = builder.build().context("invalid configuration")?;

        Ok(Self {
            config: Arc::new(config),
            counter: Arc::new(SequenceCounter::new()),
        })
    }
}
