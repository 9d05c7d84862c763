use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Installs the stdout subscriber. `RUST_LOG` wins over the verbosity flag when set.
pub fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let stdout_layer = fmt::layer().with_writer(std::io::stdout).with_ansi(true).with_target(false);

    // A second call (tests, embedding) keeps the first subscriber
    let _ = tracing_subscriber::registry().with(filter).with(stdout_layer).try_init();
}
