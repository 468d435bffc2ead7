//! Structured logging setup, grounded on the teacher's `tracing-subscriber`
//! init pattern: an `EnvFilter` driven by `RUST_LOG`/`GOVERNATOR_LOG`, with a
//! choice of human-readable or machine-readable output.

use tracing_subscriber::EnvFilter;

/// Output shape for log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
#[clap(rename_all = "lower")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
    Compact,
}

/// Initializes the global `tracing` subscriber. Safe to call once per
/// process; a second call is a no-op error that callers may ignore.
pub fn init(format: LogFormat) {
    let filter = EnvFilter::try_from_env("GOVERNATOR_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = tracing_subscriber::fmt().with_env_filter(filter);
    let result = match format {
        LogFormat::Pretty => subscriber.pretty().try_init(),
        LogFormat::Json => subscriber.json().try_init(),
        LogFormat::Compact => subscriber.compact().try_init(),
    };
    if let Err(err) = result {
        eprintln!("telemetry already initialized: {err}");
    }
}
