use clap::{ArgAction, Parser, ValueEnum};
use mysqlsrv::{DEFAULT_SERVER_VERSION, HandlerConfig};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum SourceKind {
    /// Tables loaded from a JSON file.
    #[default]
    Memory,
    /// Collections of a MongoDB database.
    Mongodb,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum LoggingMode {
    #[default]
    Human,
    Compact,
    Json,
}

impl From<LoggingMode> for logutil::LogFormat {
    fn from(mode: LoggingMode) -> Self {
        match mode {
            LoggingMode::Human => logutil::LogFormat::HumanReadable,
            LoggingMode::Compact => logutil::LogFormat::Compact,
            LoggingMode::Json => logutil::LogFormat::Json,
        }
    }
}

#[derive(Debug, Parser)]
#[clap(name = "sqlgate")]
#[clap(version)]
#[clap(about = "MySQL protocol gateway for document stores", long_about = None)]
pub struct Cli {
    /// Log verbosity.
    #[clap(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Format of log output.
    #[clap(long, value_enum, default_value_t, env = "SQLGATE_LOG_FORMAT")]
    pub log_format: LoggingMode,

    /// TCP address to bind to.
    #[clap(short, long, default_value = "127.0.0.1:3306", env = "SQLGATE_BIND")]
    pub bind: String,

    /// Version string announced to clients.
    #[clap(long, default_value = DEFAULT_SERVER_VERSION, env = "SQLGATE_SERVER_VERSION")]
    pub server_version: String,

    /// Where records are read from.
    #[clap(long, value_enum, default_value_t, env = "SQLGATE_SOURCE")]
    pub source: SourceKind,

    /// JSON file holding the tables of the memory source.
    #[clap(long, env = "SQLGATE_DATA_FILE")]
    pub data_file: Option<PathBuf>,

    /// Connection string of the mongodb source.
    #[clap(long, env = "SQLGATE_MONGODB_URI", required_if_eq("source", "mongodb"))]
    pub mongodb_uri: Option<String>,

    /// Database holding the collections of the mongodb source.
    #[clap(long, env = "SQLGATE_DATABASE", required_if_eq("source", "mongodb"))]
    pub database: Option<String>,

    /// Close connections idle for this many seconds.
    #[clap(long, env = "SQLGATE_IDLE_TIMEOUT_SECS")]
    pub idle_timeout_secs: Option<u64>,
}

impl Cli {
    pub fn log_level(&self) -> tracing::Level {
        logutil::verbosity_level(tracing::Level::INFO, self.verbose)
    }

    pub fn handler_config(&self) -> HandlerConfig {
        HandlerConfig {
            server_version: self.server_version.clone(),
            idle_timeout: self.idle_timeout_secs.map(Duration::from_secs),
            ..Default::default()
        }
    }
}
