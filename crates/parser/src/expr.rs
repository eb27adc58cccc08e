//! Expression trees for a single clause.
//!
//! Trees are built incrementally, one token at a time, in an index-addressed
//! arena. Every node knows its parent while building so that operators can be
//! spliced in above already placed nodes. Once all tokens are consumed the
//! arena is frozen into an owned `Expr` tree which has no parent links.

use crate::errors::{ParserError, Result};
use crate::keywords::Keyword;
use crate::operators::{LEAF_PRECEDENCE, Operator};
use crate::tokens::{self, Token, TokenWithLocation};
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// Unparsed number literal, possibly negative.
    Number(String),
    String(String),
    Boolean(bool),
    Null,
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Number(n) => write!(f, "{n}"),
            Literal::String(s) => write!(f, "'{s}'"),
            Literal::Boolean(true) => write!(f, "TRUE"),
            Literal::Boolean(false) => write!(f, "FALSE"),
            Literal::Null => write!(f, "NULL"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Column identifier.
    Ident(String),
    Literal(Literal),
    /// A prefix operator, e.g. `NOT a`.
    Unary { op: Operator, expr: Box<Expr> },
    /// A binary expression, e.g. `a + b`.
    Binary {
        left: Box<Expr>,
        op: Operator,
        right: Box<Expr>,
    },
    /// A parenthesized expression.
    Nested(Box<Expr>),
}

impl Expr {
    /// Binding strength of the node. Leaves and parenthesized expressions are
    /// never displaced by an operator.
    pub fn precedence(&self) -> u8 {
        match self {
            Expr::Binary { op, .. } => op.binary_precedence().unwrap_or(LEAF_PRECEDENCE),
            Expr::Unary { op, .. } => op.unary_precedence().unwrap_or(LEAF_PRECEDENCE),
            _ => LEAF_PRECEDENCE,
        }
    }

    pub fn binary(left: Expr, op: Operator, right: Expr) -> Expr {
        Expr::Binary {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }

    pub fn ident(s: impl Into<String>) -> Expr {
        Expr::Ident(s.into())
    }
}

/// In-order rendering of the tree.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Ident(s) => write!(f, "{s}"),
            Expr::Literal(lit) => write!(f, "{lit}"),
            Expr::Unary { op, expr } => write!(f, "{op} {expr}"),
            Expr::Binary { left, op, right } => write!(f, "{left} {op} {right}"),
            Expr::Nested(expr) => write!(f, "({expr})"),
        }
    }
}

/// Deepest expression tree accepted, counting parenthesized groups as a
/// level. Everything walking an `Expr` recurses, so deeper input is rejected
/// instead of being built.
pub const MAX_EXPR_DEPTH: usize = 256;

/// Parse the tokens of a single clause into an expression tree.
pub fn parse_expr(toks: &[TokenWithLocation]) -> Result<Expr> {
    let mut iter = toks.iter();
    let (expr, _) = ExprBuilder::build(&mut iter, 0)?;
    Ok(expr)
}

type NodeId = usize;

#[derive(Debug)]
enum NodeKind {
    /// Taken when freezing.
    Leaf(Option<Expr>),
    Unary(Operator),
    Binary(Operator),
}

#[derive(Debug)]
struct Node {
    kind: NodeKind,
    /// Height of a leaf's own subtree, 1 unless parenthesized.
    height: usize,
    left: Option<NodeId>,
    right: Option<NodeId>,
    parent: Option<NodeId>,
}

impl Node {
    fn precedence(&self) -> u8 {
        match &self.kind {
            NodeKind::Leaf(_) => LEAF_PRECEDENCE,
            NodeKind::Unary(op) => op.unary_precedence().unwrap_or(LEAF_PRECEDENCE),
            NodeKind::Binary(op) => op.binary_precedence().unwrap_or(LEAF_PRECEDENCE),
        }
    }
}

#[derive(Debug, Default)]
struct ExprBuilder {
    nodes: Vec<Node>,
    root: Option<NodeId>,
    /// Most recently inserted node.
    last: Option<NodeId>,
}

impl ExprBuilder {
    /// Consume tokens until the end of input, or until the closing paren when
    /// inside parentheses (`nesting > 0`). Returns the tree and its height.
    fn build<'a>(
        iter: &mut impl Iterator<Item = &'a TokenWithLocation>,
        nesting: usize,
    ) -> Result<(Expr, usize)> {
        let nested = nesting > 0;
        let mut builder = ExprBuilder::default();

        while let Some(tok) = iter.next() {
            match &tok.token {
                Token::Operator(Operator::LeftParen) => {
                    if !builder.expects_operand() {
                        return Err(ParserError::unexpected(tok));
                    }
                    if nesting >= MAX_EXPR_DEPTH {
                        return Err(ParserError::TooDeep {
                            limit: MAX_EXPR_DEPTH,
                        });
                    }
                    let (inner, height) = Self::build(iter, nesting + 1)?;
                    builder.push_leaf(Expr::Nested(Box::new(inner)), height + 1);
                }
                Token::Operator(Operator::RightParen) => {
                    if nested {
                        return builder.finish();
                    }
                    return Err(ParserError::unexpected(tok));
                }
                Token::Operator(op) => {
                    if builder.expects_operand() {
                        if op.unary_precedence().is_none() {
                            return Err(ParserError::unexpected(tok));
                        }
                        builder.push_unary(*op);
                    } else {
                        if op.binary_precedence().is_none() {
                            return Err(ParserError::unexpected(tok));
                        }
                        builder.push_binary(*op);
                    }
                }
                Token::Keyword(kw) => {
                    let lit = match kw {
                        Keyword::TRUE => Literal::Boolean(true),
                        Keyword::FALSE => Literal::Boolean(false),
                        Keyword::NULL => Literal::Null,
                        _ => return Err(ParserError::unexpected(tok)),
                    };
                    builder.push_operand(Expr::Literal(lit), tok)?;
                }
                Token::Ident(ident) => {
                    builder.push_operand(Expr::Ident(ident.value.clone()), tok)?;
                }
                Token::Literal(tokens::Literal::Number(n)) => {
                    builder.push_operand(Expr::Literal(Literal::Number(n.clone())), tok)?;
                }
                Token::Literal(tokens::Literal::String { value, .. }) => {
                    builder.push_operand(Expr::Literal(Literal::String(value.clone())), tok)?;
                }
            }
        }

        if nested {
            // Missing closing paren.
            return Err(ParserError::UnexpectedEnd);
        }
        builder.finish()
    }

    /// An operand is expected when the tree is empty or the last node is an
    /// operator still missing its right side.
    fn expects_operand(&self) -> bool {
        match self.last {
            None => true,
            Some(id) => !matches!(self.nodes[id].kind, NodeKind::Leaf(_)),
        }
    }

    fn alloc(&mut self, kind: NodeKind) -> NodeId {
        self.nodes.push(Node {
            kind,
            height: 1,
            left: None,
            right: None,
            parent: None,
        });
        self.nodes.len() - 1
    }

    /// Attach a node as the right child of `last`, or as the root if the tree
    /// is empty.
    fn attach_right(&mut self, id: NodeId) {
        match self.last {
            None => self.root = Some(id),
            Some(last) => {
                self.nodes[last].right = Some(id);
                self.nodes[id].parent = Some(last);
            }
        }
        self.last = Some(id);
    }

    fn push_operand(&mut self, expr: Expr, tok: &TokenWithLocation) -> Result<()> {
        if !self.expects_operand() {
            // Two values in a row.
            return Err(ParserError::unexpected(tok));
        }
        self.push_leaf(expr, 1);
        Ok(())
    }

    fn push_leaf(&mut self, expr: Expr, height: usize) {
        let id = self.alloc(NodeKind::Leaf(Some(expr)));
        self.nodes[id].height = height;
        self.attach_right(id);
    }

    fn push_unary(&mut self, op: Operator) {
        let id = self.alloc(NodeKind::Unary(op));
        self.attach_right(id);
    }

    /// Splice a binary operator into the tree.
    ///
    /// Walks up from `last` while the ancestor binds tighter than `op` (or
    /// equally tight for left associative operators), then places `op` above
    /// the node reached, taking that node as its left child.
    fn push_binary(&mut self, op: Operator) {
        let prec = op.binary_precedence().unwrap_or(LEAF_PRECEDENCE);
        let right_assoc = op.is_right_associative();

        let mut cur = match self.last {
            Some(id) => id,
            None => {
                // Unreachable with `expects_operand` checked by the caller.
                let id = self.alloc(NodeKind::Binary(op));
                self.root = Some(id);
                self.last = Some(id);
                return;
            }
        };

        while let Some(parent) = self.nodes[cur].parent {
            let parent_prec = self.nodes[parent].precedence();
            if parent_prec > prec || (parent_prec == prec && !right_assoc) {
                cur = parent;
            } else {
                break;
            }
        }

        let id = self.alloc(NodeKind::Binary(op));
        let parent = self.nodes[cur].parent;
        self.nodes[id].left = Some(cur);
        self.nodes[id].parent = parent;
        self.nodes[cur].parent = Some(id);
        match parent {
            Some(parent) => self.nodes[parent].right = Some(id),
            None => self.root = Some(id),
        }
        self.last = Some(id);
    }

    fn finish(mut self) -> Result<(Expr, usize)> {
        if self.expects_operand() {
            return Err(ParserError::UnexpectedEnd);
        }
        let root = self.root.ok_or(ParserError::UnexpectedEnd)?;
        let height = self.height(root)?;
        Ok((self.freeze(root)?, height))
    }

    /// Height of the tree under `root`, walked without recursion. Errors once
    /// it exceeds `MAX_EXPR_DEPTH`.
    fn height(&self, root: NodeId) -> Result<usize> {
        let mut max = 0;
        let mut stack = vec![(root, 1)];
        while let Some((id, depth)) = stack.pop() {
            let node = &self.nodes[id];
            let reached = depth + node.height - 1;
            if reached > MAX_EXPR_DEPTH {
                return Err(ParserError::TooDeep {
                    limit: MAX_EXPR_DEPTH,
                });
            }
            max = max.max(reached);
            stack.extend(node.left.map(|child| (child, depth + 1)));
            stack.extend(node.right.map(|child| (child, depth + 1)));
        }
        Ok(max)
    }

    fn freeze(&mut self, id: NodeId) -> Result<Expr> {
        let (left, right) = (self.nodes[id].left, self.nodes[id].right);
        match &mut self.nodes[id].kind {
            NodeKind::Leaf(expr) => expr.take().ok_or(ParserError::UnexpectedEnd),
            NodeKind::Unary(op) => {
                let op = *op;
                let expr = self.freeze(right.ok_or(ParserError::UnexpectedEnd)?)?;
                Ok(match (op, expr) {
                    // Fold negative number literals.
                    (Operator::Minus, Expr::Literal(Literal::Number(n))) if !n.starts_with('-') => {
                        Expr::Literal(Literal::Number(format!("-{n}")))
                    }
                    (op, expr) => Expr::Unary {
                        op,
                        expr: Box::new(expr),
                    },
                })
            }
            NodeKind::Binary(op) => {
                let op = *op;
                let left = self.freeze(left.ok_or(ParserError::UnexpectedEnd)?)?;
                let right = self.freeze(right.ok_or(ParserError::UnexpectedEnd)?)?;
                Ok(Expr::binary(left, op, right))
            }
        }
    }
}
