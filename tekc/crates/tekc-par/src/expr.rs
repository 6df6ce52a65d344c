//! Expression parsing using the Pratt precedence ladder.
//!
//! A prefix form is parsed at the atom level, then infix forms are
//! folded in while their precedence stays at or above the requested
//! minimum. Left-associative operators recurse one level tighter on
//! their right-hand side; the right-associative `**` and `=` recurse at
//! their own level.

use tekc_lex::TokenKind;
use tekc_util::{Diagnostic, Stage};

use crate::ast::*;
use crate::prec;
use crate::Parser;

impl<'a> Parser<'a> {
    /// Parses a complete expression.
    pub fn parse_expression(&mut self) -> Option<Node> {
        self.parse_precedence(prec::ASSIGNMENT)
    }

    /// Pratt core: parses a prefix form, then greedily consumes infix
    /// forms whose precedence is at least `min`.
    pub(crate) fn parse_precedence(&mut self, min: u8) -> Option<Node> {
        let mut left = self.parse_prefix()?;

        while let Some(precedence) = prec::infix_precedence(self.kind()) {
            if precedence < min {
                break;
            }
            left = self.parse_infix(left, precedence)?;
        }

        Some(left)
    }

    // =========================================================================
    // PREFIX FORMS
    // =========================================================================

    /// Parses one prefix form at the cursor.
    fn parse_prefix(&mut self) -> Option<Node> {
        match self.kind() {
            TokenKind::Number => Some(self.parse_literal(LiteralKind::Number)),
            TokenKind::Str => Some(self.parse_literal(LiteralKind::Str)),
            TokenKind::True => Some(self.parse_literal(LiteralKind::True)),
            TokenKind::False => Some(self.parse_literal(LiteralKind::False)),
            TokenKind::Null => Some(self.parse_literal(LiteralKind::Null)),
            TokenKind::Identifier => {
                let ident = self.expect_identifier("a name")?;
                Some(Node::Identifier(ident))
            },
            TokenKind::This => {
                let span = self.current().span;
                self.advance();
                Some(Node::This(This { span }))
            },
            TokenKind::Super => {
                let span = self.current().span;
                self.advance();
                Some(Node::Super(SuperExpr { span }))
            },
            TokenKind::LParen => self.parse_wrapped(),
            TokenKind::LBracket => self.parse_array(),
            TokenKind::LBrace => self.parse_object(),
            TokenKind::New => self.parse_new(),
            TokenKind::Async => {
                let start = self.current().span;
                self.advance();
                let expr = self.parse_precedence(prec::CALL)?;
                let span = self.span_from(start);
                Some(Node::Async(AsyncExpr {
                    expr: Box::new(expr),
                    span,
                }))
            },
            TokenKind::Minus => self.parse_unary(UnaryOp::Minus),
            TokenKind::Not => self.parse_unary(UnaryOp::Not),
            _ => {
                self.error_expected("an expression");
                None
            },
        }
    }

    /// Consumes the current token as a literal.
    fn parse_literal(&mut self, kind: LiteralKind) -> Node {
        let token = self.current();
        let node = Node::Literal(Literal {
            kind,
            lexeme: token.lexeme.clone(),
            span: token.span,
        });
        self.advance();
        node
    }

    /// Parses a prefix `-` or `not`.
    fn parse_unary(&mut self, op: UnaryOp) -> Option<Node> {
        let start = self.current().span;
        self.advance();
        let operand = self.parse_precedence(prec::UNARY)?;
        let span = start.merge(operand.span());
        Some(Node::Unary(UnaryExpr {
            op,
            operand: Box::new(operand),
            span,
        }))
    }

    /// Parses a parenthesised expression.
    fn parse_wrapped(&mut self) -> Option<Node> {
        let start = self.current().span;
        self.advance();
        self.ignore_newlines();
        let expr = self.parse_expression()?;
        self.ignore_newlines();
        self.expect(TokenKind::RParen, "')'")?;
        let span = self.span_from(start);
        Some(Node::Wrapped(WrappedExpr {
            expr: Box::new(expr),
            span,
        }))
    }

    /// Parses an array literal.
    fn parse_array(&mut self) -> Option<Node> {
        let start = self.current().span;
        self.advance();
        let elements = self.parse_expression_list(TokenKind::RBracket, "']'")?;
        let span = self.span_from(start);
        Some(Node::Array(ArrayExpr { elements, span }))
    }

    /// Parses an object literal of `identifier : expression` entries.
    fn parse_object(&mut self) -> Option<Node> {
        let start = self.current().span;
        self.advance();
        self.ignore_newlines();

        let mut props = Vec::new();
        if !self.at(TokenKind::RBrace) {
            loop {
                let key = self.expect_identifier("a property name")?;
                self.expect(TokenKind::Colon, "':'")?;
                let value = self.parse_expression()?;
                let span = key.span.merge(value.span());
                props.push(ObjectProperty { key, value, span });

                if !self.match_ignore_newline(TokenKind::Comma) {
                    break;
                }
                self.ignore_newlines();
            }
            self.ignore_newlines();
        }
        self.expect(TokenKind::RBrace, "'}'")?;

        let span = self.span_from(start);
        Some(Node::Object(ObjectExpr { props, span }))
    }

    /// Parses a `new` expression.
    ///
    /// The constructed object is restricted to an identifier or a member
    /// chain with identifier leaves. Generic arguments are optional; the
    /// argument list is not.
    fn parse_new(&mut self) -> Option<Node> {
        let start = self.current().span;
        self.advance();

        let first = self.expect_identifier("a class name")?;
        let mut object = Node::Identifier(first);
        while self.match_kind(TokenKind::Dot) {
            let property = self.expect_identifier("a property name")?;
            let span = object.span().merge(property.span);
            object = Node::Member(MemberExpr {
                object: Box::new(object),
                property,
                span,
            });
        }

        let mut generics = Vec::new();
        if self.match_kind(TokenKind::Lt) {
            generics = self.parse_type_list()?;
            self.expect(TokenKind::Gt, "'>'")?;
        }

        if !self.at(TokenKind::LParen) {
            let current = self.current();
            self.emit(
                Diagnostic::error(
                    Stage::Parser,
                    format!("expected '(' but found {}", crate::describe(current)),
                    current.span,
                )
                .with_info("add a '(' after this class", object.span()),
            );
            return None;
        }
        self.advance();
        let args = self.parse_expression_list(TokenKind::RParen, "')'")?;

        let span = self.span_from(start);
        Some(Node::New(NewExpr {
            object: Box::new(object),
            generics,
            args,
            span,
        }))
    }

    // =========================================================================
    // INFIX FORMS
    // =========================================================================

    /// Parses the infix form starting at the cursor, with `left` as its
    /// left-hand side and `precedence` its table entry.
    fn parse_infix(&mut self, left: Node, precedence: u8) -> Option<Node> {
        match self.kind() {
            TokenKind::LParen => {
                self.advance();
                let args = self.parse_expression_list(TokenKind::RParen, "')'")?;
                let span = left.span().merge(self.previous_span());
                Some(Node::Call(CallExpr {
                    callee: Box::new(left),
                    args,
                    span,
                }))
            },
            TokenKind::LBracket => {
                self.advance();
                self.ignore_newlines();
                let index = self.parse_expression()?;
                self.ignore_newlines();
                self.expect(TokenKind::RBracket, "']'")?;
                let span = left.span().merge(self.previous_span());
                Some(Node::Index(IndexExpr {
                    object: Box::new(left),
                    index: Box::new(index),
                    span,
                }))
            },
            TokenKind::Dot => {
                self.advance();
                let property = self.expect_identifier("a property name")?;
                let span = left.span().merge(property.span);
                Some(Node::Member(MemberExpr {
                    object: Box::new(left),
                    property,
                    span,
                }))
            },
            TokenKind::Instanceof => {
                self.advance();
                let ty = self.parse_type()?;
                let span = left.span().merge(ty.span);
                Some(Node::InstanceOf(InstanceOfExpr {
                    object: Box::new(left),
                    ty,
                    span,
                }))
            },
            kind => {
                let op = binary_op(kind)?;
                if op == BinaryOp::Assign && !is_assignment_target(&left) {
                    // Best-effort: report at the left-hand side and keep
                    // building the assignment node anyway.
                    self.handler.error("invalid assignment target", left.span());
                }
                self.advance();
                let next_min = if prec::is_right_associative(kind) {
                    precedence
                } else {
                    precedence + 1
                };
                let right = self.parse_precedence(next_min)?;
                let span = left.span().merge(right.span());
                Some(Node::Binary(BinaryExpr {
                    op,
                    left: Box::new(left),
                    right: Box::new(right),
                    span,
                }))
            },
        }
    }

    // =========================================================================
    // SHARED PIECES
    // =========================================================================

    /// Parses a comma-separated expression list and its closing token.
    ///
    /// Newlines are ignored inside the list, so arguments and array
    /// elements may continue across lines.
    pub(crate) fn parse_expression_list(
        &mut self,
        close: TokenKind,
        close_desc: &str,
    ) -> Option<Vec<Node>> {
        self.ignore_newlines();
        let mut items = Vec::new();

        if !self.at(close) {
            loop {
                items.push(self.parse_expression()?);
                if !self.match_ignore_newline(TokenKind::Comma) {
                    break;
                }
                self.ignore_newlines();
            }
            self.ignore_newlines();
        }
        self.expect(close, close_desc)?;

        Some(items)
    }
}

/// Maps an infix token kind to its binary operator.
fn binary_op(kind: TokenKind) -> Option<BinaryOp> {
    match kind {
        TokenKind::Eq => Some(BinaryOp::Assign),
        TokenKind::Or => Some(BinaryOp::Or),
        TokenKind::And => Some(BinaryOp::And),
        TokenKind::EqEq => Some(BinaryOp::EqEq),
        TokenKind::BangEq => Some(BinaryOp::BangEq),
        TokenKind::Is => Some(BinaryOp::Is),
        TokenKind::IsNot => Some(BinaryOp::IsNot),
        TokenKind::Lt => Some(BinaryOp::Lt),
        TokenKind::LtEq => Some(BinaryOp::LtEq),
        TokenKind::Gt => Some(BinaryOp::Gt),
        TokenKind::GtEq => Some(BinaryOp::GtEq),
        TokenKind::IsLessThan => Some(BinaryOp::IsLessThan),
        TokenKind::IsGreaterThan => Some(BinaryOp::IsGreaterThan),
        TokenKind::Plus => Some(BinaryOp::Plus),
        TokenKind::Minus => Some(BinaryOp::Minus),
        TokenKind::Star => Some(BinaryOp::Star),
        TokenKind::Slash => Some(BinaryOp::Slash),
        TokenKind::Percent => Some(BinaryOp::Percent),
        TokenKind::StarStar => Some(BinaryOp::StarStar),
        _ => None,
    }
}

/// True for the node kinds allowed on the left of `=`.
fn is_assignment_target(node: &Node) -> bool {
    matches!(node, Node::Identifier(_) | Node::Member(_) | Node::Index(_))
}
