pub type Result<T, E = TranslateError> = std::result::Result<T, E>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TranslateError {
    #[error("operator cannot be expressed as a filter: {op}")]
    UnsupportedOperator { op: String },

    /// A comparison that isn't between exactly one column and one literal.
    #[error("unsupported comparison operands: {expr}")]
    UnsupportedOperand { expr: String },
}

impl TranslateError {
    pub fn kind(&self) -> &'static str {
        match self {
            TranslateError::UnsupportedOperator { .. } => "unsupported_operator",
            TranslateError::UnsupportedOperand { .. } => "unsupported_operand",
        }
    }

    pub fn offending(&self) -> &str {
        match self {
            TranslateError::UnsupportedOperator { op } => op,
            TranslateError::UnsupportedOperand { expr } => expr,
        }
    }
}
