//! Lexer and parser for the subset of MySQL's SQL dialect that can be
//! answered with a single filtered fetch.
pub mod errors;
pub mod expr;
pub mod keywords;
pub mod operators;
pub mod parser;
pub mod statement;
pub mod tokens;

pub use parser::parse_statement;
