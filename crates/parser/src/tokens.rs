use crate::errors::{ParserError, Result};
use crate::keywords::{Keyword, keyword_from_str};
use crate::operators::{Operator, SYMBOL_OPERATORS, word_operator_from_str};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Keyword(Keyword),
    Ident(Ident),
    Operator(Operator),
    Literal(Literal),
}

/// The broad category a token falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Keyword,
    Identifier,
    Operator,
    Literal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ident {
    pub value: String,
    /// If the identifier was wrapped in backticks.
    pub quoted: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Literal {
    /// Unparsed number literal.
    Number(String),
    /// Quoted string literal. `quote` is either `'` or `"`.
    String { value: String, quote: char },
}

impl Token {
    pub fn kind(&self) -> TokenKind {
        match self {
            Token::Keyword(_) => TokenKind::Keyword,
            Token::Ident(_) => TokenKind::Identifier,
            Token::Operator(_) => TokenKind::Operator,
            Token::Literal(_) => TokenKind::Literal,
        }
    }

    pub fn is_keyword(&self, keyword: Keyword) -> bool {
        matches!(self, Token::Keyword(kw) if *kw == keyword)
    }

    pub fn is_operator(&self, op: Operator) -> bool {
        matches!(self, Token::Operator(other) if *other == op)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Keyword(kw) => write!(f, "{kw}"),
            Token::Ident(ident) if ident.quoted => write!(f, "`{}`", ident.value),
            Token::Ident(ident) => write!(f, "{}", ident.value),
            Token::Operator(op) => write!(f, "{op}"),
            Token::Literal(Literal::Number(n)) => write!(f, "{n}"),
            Token::Literal(Literal::String { value, quote }) => write!(f, "{quote}{value}{quote}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenWithLocation {
    pub token: Token,
    /// Byte offset of the token in the statement.
    pub offset: usize,
}

impl fmt::Display for TokenWithLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.token.fmt(f)
    }
}

/// Render a token span back into (normalized) text.
pub fn tokens_to_string(toks: &[TokenWithLocation]) -> String {
    toks.iter()
        .map(|t| t.token.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Splits a statement into tokens.
///
/// At each position matches are attempted in a fixed order: symbolic
/// operators (longest first), word operators, keywords, literals,
/// identifiers, then whitespace. Whitespace never produces a token.
///
/// Tokens are produced lazily through the `Iterator` impl. Iteration stops
/// after the first error.
#[derive(Debug)]
pub struct Tokenizer<'a> {
    sql: &'a str,
    /// Byte offset of the next unread character.
    pos: usize,
    failed: bool,
}

impl<'a> Tokenizer<'a> {
    pub fn new(sql: &'a str) -> Self {
        Tokenizer {
            sql,
            pos: 0,
            failed: false,
        }
    }

    /// Eagerly tokenize the full statement.
    pub fn tokenize(self) -> Result<Vec<TokenWithLocation>> {
        self.collect()
    }

    fn rest(&self) -> &'a str {
        &self.sql[self.pos..]
    }

    fn next_token(&mut self) -> Result<Option<TokenWithLocation>> {
        loop {
            let rest = self.rest();
            let c = match rest.chars().next() {
                Some(c) => c,
                None => return Ok(None),
            };
            let offset = self.pos;

            if let Some((sym, op)) = SYMBOL_OPERATORS.iter().find(|(sym, _)| rest.starts_with(sym)) {
                self.pos += sym.len();
                return Ok(Some(TokenWithLocation {
                    token: Token::Operator(*op),
                    offset,
                }));
            }

            if is_word_char(c) {
                let token = self.word();
                return Ok(Some(TokenWithLocation { token, offset }));
            }

            match c {
                '\'' | '"' => {
                    let value = self.delimited(c)?;
                    return Ok(Some(TokenWithLocation {
                        token: Token::Literal(Literal::String { value, quote: c }),
                        offset,
                    }));
                }
                '`' => {
                    let value = self.delimited(c)?;
                    return Ok(Some(TokenWithLocation {
                        token: Token::Ident(Ident {
                            value,
                            quoted: true,
                        }),
                        offset,
                    }));
                }
                c if c.is_ascii_whitespace() => {
                    self.pos += c.len_utf8();
                    continue;
                }
                c => {
                    return Err(ParserError::Lex {
                        position: offset,
                        text: c.to_string(),
                    });
                }
            }
        }
    }

    /// Consume a bareword and classify it.
    fn word(&mut self) -> Token {
        let rest = self.rest();
        let len = rest.find(|c: char| !is_word_char(c)).unwrap_or(rest.len());
        let word = &rest[..len];
        self.pos += len;

        if let Some(op) = word_operator_from_str(word) {
            return Token::Operator(op);
        }
        if let Some(kw) = keyword_from_str(word) {
            return Token::Keyword(kw);
        }

        if word.bytes().all(|b| b.is_ascii_digit()) {
            // Possibly a decimal, e.g. `3.14`.
            let rest = self.rest();
            let mut number = word.to_string();
            if let Some(frac) = rest.strip_prefix('.') {
                let frac_len = frac
                    .find(|c: char| !c.is_ascii_digit())
                    .unwrap_or(frac.len());
                let trailing = frac[frac_len..].chars().next();
                if frac_len > 0 && !trailing.is_some_and(is_word_char) {
                    number.push('.');
                    number.push_str(&frac[..frac_len]);
                    self.pos += 1 + frac_len;
                }
            }
            return Token::Literal(Literal::Number(number));
        }

        Token::Ident(Ident {
            value: word.to_string(),
            quoted: false,
        })
    }

    /// Consume text between two `delim` characters. No escapes are
    /// recognized, the next `delim` always terminates.
    fn delimited(&mut self, delim: char) -> Result<String> {
        let start = self.pos;
        let body = &self.rest()[delim.len_utf8()..];
        match body.find(delim) {
            Some(end) => {
                let value = body[..end].to_string();
                self.pos += delim.len_utf8() * 2 + end;
                Ok(value)
            }
            None => Err(ParserError::Lex {
                position: start,
                text: self.sql[start..].to_string(),
            }),
        }
    }
}

impl Iterator for Tokenizer<'_> {
    type Item = Result<TokenWithLocation>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        match self.next_token() {
            Ok(Some(tok)) => Some(Ok(tok)),
            Ok(None) => None,
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '$'
}
