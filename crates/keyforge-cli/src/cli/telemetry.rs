//! Log output for the `keyforge` binary.
//!
//! Events are printed to stderr so generated ids on stdout stay pipeable.
//! Verbosity follows `RUST_LOG` and defaults to `warn`, which surfaces the
//! library's clock-regression and pre-epoch warnings.
//!
//! ```bash
//! RUST_LOG=keyforge=trace keyforge snowflake --count 3
//! ```

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

pub fn init_telemetry() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_line_number(false),
        )
        .try_init()?;
    Ok(())
}
