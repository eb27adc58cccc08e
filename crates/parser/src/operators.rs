//! Operators and their binding strength.
//!
//! Precedence follows the MySQL operator precedence table. Higher values bind
//! tighter and end up further away from the root of an expression tree.

use std::fmt;

/// Precedence of leaves (identifiers, literals, parenthesized expressions).
pub const LEAF_PRECEDENCE: u8 = u8::MAX;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// `:=`
    Assign,
    /// `<=>`
    NullSafeEq,
    /// `<<`
    ShiftLeft,
    /// `>>`
    ShiftRight,
    /// `>=`
    GtEq,
    /// `<=`
    LtEq,
    /// `!=` or `<>`
    NotEq,
    /// `=`
    Eq,
    /// `>`
    Gt,
    /// `<`
    Lt,
    /// `!`
    Bang,
    /// `-`
    Minus,
    /// `+`
    Plus,
    /// `~`
    Tilde,
    /// `^`
    Caret,
    /// `*`
    Multiply,
    /// `/`
    Divide,
    /// `DIV`
    IntDiv,
    /// `%` or `MOD`
    Modulo,
    /// `&`
    BitwiseAnd,
    /// `|`
    BitwiseOr,
    /// `(`
    LeftParen,
    /// `)`
    RightParen,
    /// `.`
    Period,
    /// `,`
    Comma,
    /// `;`
    Semicolon,
    Interval,
    Binary,
    Collate,
    Is,
    Like,
    Regexp,
    In,
    Between,
    Case,
    When,
    Then,
    Else,
    Not,
    /// `AND` or `&&`
    And,
    Xor,
    /// `OR` or `||`
    Or,
}

/// Symbolic operators, ordered so that longer spellings are tried before
/// their single character prefixes.
pub const SYMBOL_OPERATORS: &[(&str, Operator)] = &[
    ("<=>", Operator::NullSafeEq),
    (":=", Operator::Assign),
    ("<<", Operator::ShiftLeft),
    (">>", Operator::ShiftRight),
    (">=", Operator::GtEq),
    ("<=", Operator::LtEq),
    ("<>", Operator::NotEq),
    ("!=", Operator::NotEq),
    ("&&", Operator::And),
    ("||", Operator::Or),
    ("=", Operator::Eq),
    (">", Operator::Gt),
    ("<", Operator::Lt),
    ("!", Operator::Bang),
    ("-", Operator::Minus),
    ("+", Operator::Plus),
    ("~", Operator::Tilde),
    ("^", Operator::Caret),
    ("*", Operator::Multiply),
    ("/", Operator::Divide),
    ("%", Operator::Modulo),
    ("&", Operator::BitwiseAnd),
    ("|", Operator::BitwiseOr),
    ("(", Operator::LeftParen),
    (")", Operator::RightParen),
    (".", Operator::Period),
    (",", Operator::Comma),
    (";", Operator::Semicolon),
];

/// Operators spelled as words. Matched case-insensitively on whole words.
pub const WORD_OPERATORS: &[(&str, Operator)] = &[
    ("INTERVAL", Operator::Interval),
    ("BINARY", Operator::Binary),
    ("COLLATE", Operator::Collate),
    ("DIV", Operator::IntDiv),
    ("MOD", Operator::Modulo),
    ("IS", Operator::Is),
    ("LIKE", Operator::Like),
    ("REGEXP", Operator::Regexp),
    ("IN", Operator::In),
    ("BETWEEN", Operator::Between),
    ("CASE", Operator::Case),
    ("WHEN", Operator::When),
    ("THEN", Operator::Then),
    ("ELSE", Operator::Else),
    ("NOT", Operator::Not),
    ("AND", Operator::And),
    ("XOR", Operator::Xor),
    ("OR", Operator::Or),
];

pub fn word_operator_from_str(s: &str) -> Option<Operator> {
    WORD_OPERATORS
        .iter()
        .find(|(word, _)| word.eq_ignore_ascii_case(s))
        .map(|(_, op)| *op)
}

impl Operator {
    /// Precedence when used between two operands, `None` if the operator
    /// can't be used that way.
    pub fn binary_precedence(&self) -> Option<u8> {
        Some(match self {
            Operator::Comma => 0,
            Operator::Assign => 1,
            Operator::Or => 2,
            Operator::Xor => 3,
            Operator::And => 4,
            Operator::Between
            | Operator::Case
            | Operator::When
            | Operator::Then
            | Operator::Else => 6,
            Operator::Eq
            | Operator::NullSafeEq
            | Operator::GtEq
            | Operator::Gt
            | Operator::LtEq
            | Operator::Lt
            | Operator::NotEq
            | Operator::Is
            | Operator::Like
            | Operator::Regexp
            | Operator::In => 7,
            Operator::BitwiseOr => 8,
            Operator::BitwiseAnd => 9,
            Operator::ShiftLeft | Operator::ShiftRight => 10,
            Operator::Minus | Operator::Plus => 11,
            Operator::Multiply | Operator::Divide | Operator::IntDiv | Operator::Modulo => 12,
            Operator::Caret => 13,
            Operator::Collate => 16,
            Operator::Period => 18,
            _ => return None,
        })
    }

    /// Precedence when used as a prefix operator, `None` if the operator can't
    /// be used that way.
    pub fn unary_precedence(&self) -> Option<u8> {
        Some(match self {
            Operator::Not => 5,
            Operator::Minus | Operator::Plus | Operator::Tilde => 14,
            Operator::Bang => 15,
            Operator::Binary => 16,
            Operator::Interval => 17,
            _ => return None,
        })
    }

    /// Only assignment groups right to left.
    pub fn is_right_associative(&self) -> bool {
        matches!(self, Operator::Assign)
    }

    pub fn as_str(&self) -> &'static str {
        if let Some((word, _)) = WORD_OPERATORS.iter().find(|(_, op)| op == self) {
            return *word;
        }
        SYMBOL_OPERATORS
            .iter()
            .find(|(_, op)| op == self)
            .map(|(sym, _)| *sym)
            .unwrap_or("?")
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
