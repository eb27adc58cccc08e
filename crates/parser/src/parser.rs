use crate::errors::{ParserError, Result};
use crate::expr::parse_expr;
use crate::keywords::Keyword;
use crate::operators::Operator;
use crate::statement::{Projection, SelectStatement, Statement};
use crate::tokens::{Token, TokenWithLocation, Tokenizer, tokens_to_string};

/// Clauses of a supported query, in the order they have to appear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Clause {
    Select = 0,
    From = 1,
    Where = 2,
}

impl Clause {
    fn from_token(tok: &Token) -> Option<Clause> {
        match tok {
            Token::Keyword(Keyword::SELECT) => Some(Clause::Select),
            Token::Keyword(Keyword::FROM) => Some(Clause::From),
            Token::Keyword(Keyword::WHERE) => Some(Clause::Where),
            _ => None,
        }
    }
}

/// Token spans for each clause, indexed by `Clause`.
type ClauseSpans = [Option<Vec<TokenWithLocation>>; 3];

/// Parse a single statement.
///
/// Only the leading verb of a non-SELECT statement is looked at, the rest of
/// it is never tokenized.
pub fn parse_statement(sql: &str) -> Result<Statement> {
    let mut tokenizer = Tokenizer::new(sql);
    let first = match tokenizer.next() {
        Some(tok) => tok?,
        None => {
            return Ok(Statement::Other {
                verb: String::new(),
            });
        }
    };

    if !first.token.is_keyword(Keyword::SELECT) {
        return Ok(Statement::Other {
            verb: first.token.to_string(),
        });
    }

    let toks = tokenizer.collect::<Result<Vec<_>>>()?;
    let [select, from, selection] = split_clauses(toks)?;

    let projection = parse_projection(&select.unwrap_or_default())?;
    let from = match from {
        Some(toks) => parse_source(&toks)?,
        None => {
            return Err(ParserError::UnsupportedSource {
                text: String::new(),
            });
        }
    };
    let selection = match selection {
        Some(toks) => Some(parse_expr(&toks)?),
        None => None,
    };

    Ok(Statement::Select(SelectStatement {
        projection,
        from,
        selection,
    }))
}

/// Split the tokens following the leading SELECT into clause spans.
///
/// Clause keywords are only recognized outside of parentheses. A terminating
/// semicolon ends the statement and must be the last token.
fn split_clauses(toks: Vec<TokenWithLocation>) -> Result<ClauseSpans> {
    let mut spans: ClauseSpans = [Some(Vec::new()), None, None];
    let mut current = Clause::Select;
    let mut depth = 0usize;
    let mut terminated = false;

    for tok in toks {
        if terminated {
            return Err(ParserError::unexpected(&tok));
        }

        if depth == 0 {
            if tok.token.is_operator(Operator::Semicolon) {
                terminated = true;
                continue;
            }
            if let Some(clause) = Clause::from_token(&tok.token) {
                if clause <= current {
                    return Err(ParserError::unexpected(&tok));
                }
                current = clause;
                spans[clause as usize] = Some(Vec::new());
                continue;
            }
        }

        match &tok.token {
            Token::Operator(Operator::LeftParen) => depth += 1,
            Token::Operator(Operator::RightParen) => depth = depth.saturating_sub(1),
            _ => (),
        }

        spans[current as usize]
            .get_or_insert_with(Vec::new)
            .push(tok);
    }

    Ok(spans)
}

/// Either a lone `*` or a comma separated list of column names.
fn parse_projection(toks: &[TokenWithLocation]) -> Result<Projection> {
    let unsupported = || ParserError::UnsupportedProjection {
        text: tokens_to_string(toks),
    };

    if let [tok] = toks {
        if tok.token.is_operator(Operator::Multiply) {
            return Ok(Projection::Wildcard);
        }
    }

    // Must alternate between names and commas, starting and ending with a
    // name.
    if toks.len() % 2 == 0 {
        return Err(unsupported());
    }

    let mut columns = Vec::with_capacity(toks.len() / 2 + 1);
    for (idx, tok) in toks.iter().enumerate() {
        match (&tok.token, idx % 2) {
            (Token::Ident(ident), 0) => columns.push(ident.value.clone()),
            (Token::Operator(Operator::Comma), 1) => (),
            _ => return Err(unsupported()),
        }
    }

    Ok(Projection::Columns(columns))
}

/// Exactly one table name.
fn parse_source(toks: &[TokenWithLocation]) -> Result<String> {
    match toks {
        [tok] => match &tok.token {
            Token::Ident(ident) => Ok(ident.value.clone()),
            _ => Err(ParserError::UnsupportedSource {
                text: tokens_to_string(toks),
            }),
        },
        _ => Err(ParserError::UnsupportedSource {
            text: tokens_to_string(toks),
        }),
    }
}
