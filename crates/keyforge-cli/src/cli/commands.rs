use std::io::Write;
use std::process::ExitCode;

use anyhow::Context;
use keyforge::{Codec, SequenceMethod, SnowflakeId, short_request_id};

use crate::cli::config::{AppConfig, CheckAction, Command};

/// How a successfully executed command ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Done,
    /// A check digit did not verify.
    Mismatch,
}

impl From<Outcome> for ExitCode {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Done => Self::SUCCESS,
            Outcome::Mismatch => Self::FAILURE,
        }
    }
}

/// Executes `command`, writing its output to `out`.
///
/// A failed check-digit verification is an [`Outcome::Mismatch`]; every other
/// failure is an error.
pub fn run(app: &AppConfig, command: &Command, out: &mut impl Write) -> anyhow::Result<Outcome> {
    match command {
        Command::Snowflake {
            radix,
            random,
            count,
        } => {
            let generator = app.snowflake();
            for _ in 0..*count {
                let id = generator
                    .generate_encoded(None, *radix, sequence_method(*random))
                    .with_context(|| format!("cannot encode snowflake id in radix {radix}"))?;
                writeln!(out, "{id}")?;
            }
        }
        Command::Inspect { id, radix } => {
            let parsed = SnowflakeId::decode(id, *radix)
                .with_context(|| format!("cannot decode {id:?} in radix {radix}"))?;
            let generator = app.snowflake();
            writeln!(out, "id:        {}", parsed.to_raw())?;
            writeln!(out, "timestamp: {}", parsed.timestamp())?;
            writeln!(out, "time:      {}", generator.timestamp_of(parsed).to_rfc3339())?;
            writeln!(out, "worker_id: {}", parsed.worker_id())?;
            writeln!(out, "sequence:  {}", parsed.sequence())?;
        }
        Command::Event { size, check } => {
            let id = app
                .temporal()
                .event_id(*size, *check)
                .context("cannot build event id")?;
            writeln!(out, "{id}")?;
        }
        Command::Request { random, short } => {
            let full = app
                .temporal()
                .request_id(sequence_method(*random))
                .context("cannot build request id")?;
            let id = if *short {
                short_request_id(&full).unwrap_or(full.as_str())
            } else {
                full.as_str()
            };
            writeln!(out, "{id}")?;
        }
        Command::Encode { value, radix, seed } => {
            let codec = codec(*radix, *seed)?;
            writeln!(out, "{}", codec.encode(*value))?;
        }
        Command::Decode { text, radix, seed } => {
            let codec = codec(*radix, *seed)?;
            let value = codec
                .decode(text)
                .with_context(|| format!("cannot decode {text:?} in radix {radix}"))?;
            writeln!(out, "{value}")?;
        }
        Command::Check { action } => return check(app, action, out),
    }
    Ok(Outcome::Done)
}

fn check(app: &AppConfig, action: &CheckAction, out: &mut impl Write) -> anyhow::Result<Outcome> {
    let strategy = app.config.check_digit();
    match action {
        CheckAction::Append { id, radix } => {
            let with_digit = strategy
                .append(id, *radix)
                .with_context(|| format!("cannot compute check digit in radix {radix}"))?;
            writeln!(out, "{with_digit}")?;
            Ok(Outcome::Done)
        }
        CheckAction::Verify { id, radix } => {
            if strategy.verify(id, *radix) {
                writeln!(out, "valid")?;
                Ok(Outcome::Done)
            } else {
                tracing::debug!(%id, radix, "check digit mismatch");
                writeln!(out, "invalid")?;
                Ok(Outcome::Mismatch)
            }
        }
    }
}

fn sequence_method(random: bool) -> SequenceMethod {
    if random {
        SequenceMethod::Random
    } else {
        SequenceMethod::Counter
    }
}

fn codec(radix: u8, seed: Option<u64>) -> anyhow::Result<Codec> {
    let codec = Codec::new(radix).with_context(|| format!("no alphabet for radix {radix}"))?;
    Ok(match seed {
        Some(seed) => codec.shuffled(seed),
        None => codec,
    })
}
