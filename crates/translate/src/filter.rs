//! Store-side filter expressions.

use crate::record::Record;
use crate::value::Value;
use parser::operators::Operator;
use std::cmp::Ordering;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompareOp {
    Eq,
    NotEq,
    Gt,
    GtEq,
    Lt,
    LtEq,
}

impl CompareOp {
    /// The comparison an operator stands for, if any.
    pub fn from_operator(op: Operator) -> Option<CompareOp> {
        Some(match op {
            Operator::Eq => CompareOp::Eq,
            Operator::NotEq => CompareOp::NotEq,
            Operator::Gt => CompareOp::Gt,
            Operator::GtEq => CompareOp::GtEq,
            Operator::Lt => CompareOp::Lt,
            Operator::LtEq => CompareOp::LtEq,
            _ => return None,
        })
    }

    /// The comparison with its operands swapped, `5 < x` is `x > 5`.
    pub fn mirrored(self) -> CompareOp {
        match self {
            CompareOp::Gt => CompareOp::Lt,
            CompareOp::GtEq => CompareOp::LtEq,
            CompareOp::Lt => CompareOp::Gt,
            CompareOp::LtEq => CompareOp::GtEq,
            op => op,
        }
    }

    /// Whether an ordering satisfies the comparison. Incomparable values
    /// only satisfy `!=`.
    pub fn is_satisfied_by(self, ord: Option<Ordering>) -> bool {
        match ord {
            Some(ord) => match self {
                CompareOp::Eq => ord.is_eq(),
                CompareOp::NotEq => ord.is_ne(),
                CompareOp::Gt => ord.is_gt(),
                CompareOp::GtEq => ord.is_ge(),
                CompareOp::Lt => ord.is_lt(),
                CompareOp::LtEq => ord.is_le(),
            },
            None => self == CompareOp::NotEq,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CompareOp::Eq => "=",
            CompareOp::NotEq => "!=",
            CompareOp::Gt => ">",
            CompareOp::GtEq => ">=",
            CompareOp::Lt => "<",
            CompareOp::LtEq => "<=",
        }
    }
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// Matches every record.
    Empty,
    Comparison {
        field: String,
        op: CompareOp,
        value: Value,
    },
    And(Box<Filter>, Box<Filter>),
    Or(Box<Filter>, Box<Filter>),
}

impl Filter {
    pub fn comparison(field: impl Into<String>, op: CompareOp, value: impl Into<Value>) -> Filter {
        Filter::Comparison {
            field: field.into(),
            op,
            value: value.into(),
        }
    }

    pub fn and(left: Filter, right: Filter) -> Filter {
        Filter::And(Box::new(left), Box::new(right))
    }

    pub fn or(left: Filter, right: Filter) -> Filter {
        Filter::Or(Box::new(left), Box::new(right))
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Filter::Empty)
    }

    /// Evaluate the filter against a record.
    ///
    /// A missing field counts as NULL when compared against NULL, and is
    /// incomparable with anything else. This agrees with MongoDB, where
    /// `{field: null}` also matches documents without the field.
    pub fn matches(&self, record: &Record) -> bool {
        match self {
            Filter::Empty => true,
            Filter::Comparison { field, op, value } => {
                let field_value = match record.get(field) {
                    Some(v) => Some(v),
                    None if value.is_null() => Some(&Value::Null),
                    None => None,
                };
                let ord = field_value.and_then(|v| v.compare(value));
                op.is_satisfied_by(ord)
            }
            Filter::And(left, right) => left.matches(record) && right.matches(record),
            Filter::Or(left, right) => left.matches(record) || right.matches(record),
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Filter::Empty => write!(f, "TRUE"),
            Filter::Comparison {
                field,
                op,
                value: Value::Utf8(s),
            } => write!(f, "{field} {op} '{s}'"),
            Filter::Comparison {
                field,
                op,
                value: Value::Null,
            } => write!(f, "{field} {op} NULL"),
            Filter::Comparison { field, op, value } => write!(f, "{field} {op} {value}"),
            Filter::And(left, right) => write!(f, "({left} AND {right})"),
            Filter::Or(left, right) => write!(f, "({left} OR {right})"),
        }
    }
}
