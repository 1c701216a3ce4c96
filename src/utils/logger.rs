use tracing::Subscriber;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const CRATE_TARGET: &str = "shutter_trigger";

/// `RUST_LOG` wins; otherwise this crate at info, or debug when verbose.
fn crate_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new(format!("{}=debug,info", CRATE_TARGET))
        } else {
            EnvFilter::new(format!("{}=info", CRATE_TARGET))
        }
    })
}

fn plain_layer<S>() -> fmt::Layer<S>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
}

/// Compact lines on stdout, interleaved with the per-shot output.
pub fn init_cli_logger(verbose: bool) {
    tracing_subscriber::registry()
        .with(crate_filter(verbose))
        .with(plain_layer().compact())
        .init();
}

/// JSON lines on stderr, for running under a supervisor that collects logs.
pub fn init_json_logger(verbose: bool) {
    tracing_subscriber::registry()
        .with(crate_filter(verbose))
        .with(plain_layer().with_writer(std::io::stderr).json())
        .init();
}
