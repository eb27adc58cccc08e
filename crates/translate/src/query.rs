use crate::errors::{Result, TranslateError};
use crate::filter::{CompareOp, Filter};
use crate::value::Value;
use parser::expr::Expr;
use parser::operators::Operator;
use parser::statement::{Projection, SelectStatement};

/// A fetch request derived from a SELECT.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    pub table: String,
    pub projection: Projection,
    pub filter: Filter,
}

/// Translate a parsed SELECT into a fetch request. A missing WHERE clause
/// produces an empty filter.
pub fn translate_select(stmt: SelectStatement) -> Result<Query> {
    let filter = match &stmt.selection {
        Some(expr) => to_filter(expr)?,
        None => Filter::Empty,
    };
    Ok(Query {
        table: stmt.from,
        projection: stmt.projection,
        filter,
    })
}

/// Translate a WHERE expression into a filter.
///
/// Only comparisons between a column and a literal, combined with AND and
/// OR, are supported. Everything else is rejected rather than approximated.
pub fn to_filter(expr: &Expr) -> Result<Filter> {
    match expr {
        Expr::Nested(inner) => to_filter(inner),
        Expr::Binary {
            left,
            op: Operator::And,
            right,
        } => Ok(Filter::and(to_filter(left)?, to_filter(right)?)),
        Expr::Binary {
            left,
            op: Operator::Or,
            right,
        } => Ok(Filter::or(to_filter(left)?, to_filter(right)?)),
        Expr::Binary { left, op, right } => match CompareOp::from_operator(*op) {
            Some(cmp) => comparison(expr, cmp, left, right),
            None => Err(TranslateError::UnsupportedOperator { op: op.to_string() }),
        },
        Expr::Unary { op, .. } => Err(TranslateError::UnsupportedOperator { op: op.to_string() }),
        Expr::Ident(_) | Expr::Literal(_) => Err(TranslateError::UnsupportedOperand {
            expr: expr.to_string(),
        }),
    }
}

fn comparison(expr: &Expr, op: CompareOp, left: &Expr, right: &Expr) -> Result<Filter> {
    match (unnest(left), unnest(right)) {
        (Expr::Ident(field), Expr::Literal(lit)) => {
            Ok(Filter::comparison(field.as_str(), op, Value::from_literal(lit)))
        }
        (Expr::Literal(lit), Expr::Ident(field)) => Ok(Filter::comparison(
            field.as_str(),
            op.mirrored(),
            Value::from_literal(lit),
        )),
        _ => Err(TranslateError::UnsupportedOperand {
            expr: expr.to_string(),
        }),
    }
}

/// Strip redundant parentheses around an operand.
fn unnest(expr: &Expr) -> &Expr {
    match expr {
        Expr::Nested(inner) => unnest(inner),
        expr => expr,
    }
}
