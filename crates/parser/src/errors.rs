pub type Result<T, E = ParserError> = std::result::Result<T, E>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParserError {
    #[error("unrecognized input at position {position}: {text:?}")]
    Lex { position: usize, text: String },

    #[error("unexpected token: {unexpected}")]
    Parse { unexpected: String },

    #[error("unexpected end of statement")]
    UnexpectedEnd,

    #[error("expression nested deeper than {limit} levels")]
    TooDeep { limit: usize },

    #[error("unsupported projection: {text:?}")]
    UnsupportedProjection { text: String },

    #[error("unsupported source: {text:?}")]
    UnsupportedSource { text: String },
}

impl ParserError {
    pub(crate) fn unexpected(tok: impl ToString) -> Self {
        ParserError::Parse {
            unexpected: tok.to_string(),
        }
    }

    /// Short, stable name for the kind of error.
    pub fn kind(&self) -> &'static str {
        match self {
            ParserError::Lex { .. } => "lex",
            ParserError::Parse { .. } | ParserError::UnexpectedEnd => "parse",
            ParserError::TooDeep { .. } => "too_deep",
            ParserError::UnsupportedProjection { .. } => "unsupported_projection",
            ParserError::UnsupportedSource { .. } => "unsupported_source",
        }
    }

    /// The piece of input responsible for the error, if any.
    pub fn offending(&self) -> &str {
        match self {
            ParserError::Lex { text, .. } => text,
            ParserError::Parse { unexpected } => unexpected,
            ParserError::UnexpectedEnd | ParserError::TooDeep { .. } => "",
            ParserError::UnsupportedProjection { text } => text,
            ParserError::UnsupportedSource { text } => text,
        }
    }
}
