//! Log output for the `snowmint` binary.
//!
//! Events go to stderr so stdout carries only IDs and decoded output. The
//! filter is read from `RUST_LOG` and defaults to `info`; the library emits
//! warnings on clock faults and trace spans around generation.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

pub fn init_telemetry() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_thread_ids(true)
                .with_line_number(true)
                .with_target(false),
        )
        .try_init()?;

    Ok(())
}
