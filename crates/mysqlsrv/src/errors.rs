use datasource::errors::DatasourceError;
use parser::errors::ParserError;
use std::borrow::Cow;
use std::io;
use translate::errors::TranslateError;

pub type Result<T, E = MysqlSrvError> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum MysqlSrvError {
    #[error(transparent)]
    Frame(#[from] FrameError),

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error("failed to generate salt: {0}")]
    Salt(getrandom::Error),
}

/// Errors in the framing or layout of a packet. Always fatal to the
/// connection.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FrameError {
    #[error("truncated frame: {declared} bytes declared, {available} available")]
    TruncatedFrame { declared: usize, available: usize },

    #[error("sequence mismatch: expected {expected}, got {got}")]
    SequenceMismatch { expected: u8, got: u8 },

    #[error("payload larger than a single frame: {0} bytes")]
    PayloadTooLarge(usize),

    #[error("malformed packet: {0}")]
    Malformed(&'static str),
}

/// Why a query couldn't be answered. Never fatal, the client receives an OK
/// instead of rows.
#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    #[error(transparent)]
    Parse(#[from] ParserError),

    #[error(transparent)]
    Translate(#[from] TranslateError),

    #[error(transparent)]
    Fetch(#[from] DatasourceError),
}

impl QueryError {
    pub fn kind(&self) -> &'static str {
        match self {
            QueryError::Parse(e) => e.kind(),
            QueryError::Translate(e) => e.kind(),
            QueryError::Fetch(e) => e.kind(),
        }
    }

    /// The part of the query responsible for the error. For store failures
    /// this is the failure itself.
    pub fn offending(&self) -> Cow<'_, str> {
        match self {
            QueryError::Parse(e) => Cow::Borrowed(e.offending()),
            QueryError::Translate(e) => Cow::Borrowed(e.offending()),
            QueryError::Fetch(e) => Cow::Owned(e.to_string()),
        }
    }
}
