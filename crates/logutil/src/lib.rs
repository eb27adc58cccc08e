//! Utilities for logging.
use tracing::Level;
use tracing::subscriber::SetGlobalDefaultError;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::MakeWriter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    HumanReadable,
    Compact,
    Json,
}

/// Map a `-v` count onto a level, starting at `base`.
pub fn verbosity_level(base: Level, verbose: u8) -> Level {
    let levels = [
        Level::ERROR,
        Level::WARN,
        Level::INFO,
        Level::DEBUG,
        Level::TRACE,
    ];
    let start = levels.iter().position(|l| *l == base).unwrap_or(0);
    let idx = (start + verbose as usize).min(levels.len() - 1);
    levels[idx]
}

/// Build the env filter. `RUST_LOG` takes precedence over `default_level`.
fn env_filter(default_level: Level) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy()
}

/// Install the global subscriber.
///
/// Errors if a global subscriber has already been set.
pub fn try_configure_global_logger<W>(
    default_level: Level,
    format: LogFormat,
    writer: W,
) -> Result<(), SetGlobalDefaultError>
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter(default_level))
        .with_writer(writer);

    match format {
        LogFormat::HumanReadable => {
            let subscriber = builder
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true)
                .finish();
            tracing::subscriber::set_global_default(subscriber)
        }
        LogFormat::Compact => {
            let subscriber = builder.compact().with_target(false).finish();
            tracing::subscriber::set_global_default(subscriber)
        }
        LogFormat::Json => {
            let subscriber = builder.json().with_current_span(true).finish();
            tracing::subscriber::set_global_default(subscriber)
        }
    }
}

/// Install the global subscriber, ignoring an already installed one.
pub fn configure_global_logger<W>(default_level: Level, format: LogFormat, writer: W)
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    if try_configure_global_logger(default_level, format, writer).is_err() {
        tracing::debug!("global logger already configured");
    }
}

/// Logger for tests. Output is captured by the test harness.
pub fn init_test() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter(Level::DEBUG))
        .with_test_writer()
        .try_init();
}
