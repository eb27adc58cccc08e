use crate::expr::Expr;

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Select(SelectStatement),
    /// Anything that isn't a query. Only the leading verb is kept.
    Other { verb: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct SelectStatement {
    pub projection: Projection,
    /// Table (collection) to read from.
    pub from: String,
    /// Optional WHERE clause.
    pub selection: Option<Expr>,
}

/// Columns a query asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Projection {
    /// `*`
    Wildcard,
    Columns(Vec<String>),
}

impl Projection {
    pub fn is_wildcard(&self) -> bool {
        matches!(self, Projection::Wildcard)
    }
}
