//! tekc-par - Pratt Parser
//!
//! This crate turns the tokenizer's output into an AST. The engine is a
//! Pratt recursive-descent parser: a prefix form is consumed at the atom
//! level, then infix forms are folded in while their precedence stays at
//! or above the caller's minimum. The precedence table lives in
//! [`prec`] as a plain value.
//!
//! The parser keeps a cursor over the token stream and allocates nothing
//! beyond the AST it returns and the diagnostic list.
//!
//! # Whitespace policy
//!
//! `Newline`, `Indent` and `Outdent` are structural tokens. Statement
//! parsing is newline-sensitive: a `Newline` terminates the statement at
//! hand. Inside bracketed constructs the parser skips newline runs, so
//! argument lists and literals may continue across lines.
//!
//! # Error recovery
//!
//! On an unexpected token the parser records a diagnostic (optionally
//! with `info` notes pointing at related prior spans), discards the
//! partially built statement, and synchronises to the next `Newline` or
//! the end of the enclosing block before resuming. The returned program
//! therefore covers everything that could be parsed.
//!
//! # Example
//!
//! ```
//! use tekc_lex::tokenize;
//! use tekc_par::{parse, Node};
//!
//! let tokens = tokenize("var x: Int = 1 + 2").tokens;
//! let parsed = parse(&tokens);
//! assert!(parsed.diagnostics.is_empty());
//! assert!(matches!(parsed.program.body[0], Node::VariableDecl(_)));
//! ```

pub mod ast;
mod expr;
pub mod prec;
mod stmt;
mod types;

#[cfg(test)]
mod edge_cases;

pub use ast::*;

use tekc_lex::{Token, TokenKind};
use tekc_util::{Diagnostic, Handler, Span, Stage};

/// Result of parsing one token stream.
///
/// The program is best-effort: statements that failed to parse are
/// absent from the body, and their problems are in `diagnostics`.
#[derive(Debug)]
pub struct ParsedProgram {
    /// The parsed AST root
    pub program: Program,
    /// Diagnostics recorded while parsing
    pub diagnostics: Vec<Diagnostic>,
}

/// Parses a token stream ending in `Eof`.
///
/// `parse` is a pure function of its input tokens.
pub fn parse(tokens: &[Token]) -> ParsedProgram {
    Parser::new(tokens).run()
}

/// Pratt recursive-descent parser.
pub struct Parser<'a> {
    /// Input tokens, ending in `Eof`.
    tokens: &'a [Token],

    /// Cursor into `tokens`.
    pos: usize,

    /// Diagnostic sink for this phase.
    handler: Handler,
}

/// Fallback token for input that is missing its terminating `Eof`.
static EOF_TOKEN: Token = Token {
    kind: TokenKind::Eof,
    lexeme: String::new(),
    span: Span::DUMMY,
};

impl<'a> Parser<'a> {
    /// Creates a parser over a token stream.
    pub fn new(tokens: &'a [Token]) -> Self {
        Self {
            tokens,
            pos: 0,
            handler: Handler::new(Stage::Parser),
        }
    }

    /// Parses the whole stream into a program.
    pub fn run(mut self) -> ParsedProgram {
        let mut body = Vec::new();

        self.ignore_newlines();
        while !self.at(TokenKind::Eof) {
            match self.kind() {
                TokenKind::Indent | TokenKind::Outdent => {
                    self.error_expected("a statement");
                    self.advance();
                },
                _ => {
                    if let Some(stmt) = self.parse_statement() {
                        body.push(stmt);
                    }
                },
            }
            self.ignore_newlines();
        }

        let span = match (body.first(), body.last()) {
            (Some(first), Some(last)) => first.span().merge(last.span()),
            _ => Span::DUMMY,
        };

        ParsedProgram {
            program: Program { body, span },
            diagnostics: self.handler.take(),
        }
    }

    // =========================================================================
    // CURSOR PRIMITIVES
    // =========================================================================

    /// The token at the cursor.
    ///
    /// A well-formed stream ends in `Eof`, so the cursor never runs off
    /// the end; truncated input is tolerated anyway.
    pub(crate) fn current(&self) -> &'a Token {
        self.tokens
            .get(self.pos)
            .or_else(|| self.tokens.last())
            .unwrap_or(&EOF_TOKEN)
    }

    /// The kind of the token at the cursor.
    pub(crate) fn kind(&self) -> TokenKind {
        self.current().kind
    }

    /// True if the cursor sits on `kind`.
    pub(crate) fn at(&self, kind: TokenKind) -> bool {
        self.kind() == kind
    }

    /// Advances the cursor by one token.
    pub(crate) fn advance(&mut self) {
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
    }

    /// The span of the most recently consumed token.
    pub(crate) fn previous_span(&self) -> Span {
        if self.pos == 0 {
            Span::DUMMY
        } else {
            self.tokens[self.pos - 1].span
        }
    }

    /// Consumes the current token if it has the given kind.
    pub(crate) fn match_kind(&mut self, kind: TokenKind) -> bool {
        if self.at(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Skips any run of newlines at the cursor.
    pub(crate) fn ignore_newlines(&mut self) {
        while self.at(TokenKind::Newline) {
            self.advance();
        }
    }

    /// Looks past a run of newlines; if the token after it matches,
    /// consumes the newlines and the token. Otherwise the cursor is left
    /// untouched.
    pub(crate) fn match_ignore_newline(&mut self, kind: TokenKind) -> bool {
        let mut look = self.pos;
        while look < self.tokens.len() && self.tokens[look].kind == TokenKind::Newline {
            look += 1;
        }
        if look < self.tokens.len() && self.tokens[look].kind == kind {
            self.pos = look + 1;
            true
        } else {
            false
        }
    }

    // =========================================================================
    // EXPECTATIONS AND RECOVERY
    // =========================================================================

    /// Consumes a token of the given kind or reports what was expected.
    pub(crate) fn expect(&mut self, kind: TokenKind, what: &str) -> Option<&'a Token> {
        if self.at(kind) {
            let token = self.current();
            self.advance();
            Some(token)
        } else {
            self.error_expected(what);
            None
        }
    }

    /// Consumes an identifier token into an [`Identifier`] node.
    pub(crate) fn expect_identifier(&mut self, what: &str) -> Option<Identifier> {
        let token = self.expect(TokenKind::Identifier, what)?;
        Some(Identifier {
            name: token.lexeme.clone(),
            span: token.span,
        })
    }

    /// Records an expected-token diagnostic at the current token.
    pub(crate) fn error_expected(&self, what: &str) {
        let current = self.current();
        self.handler.error(
            format!("expected {} but found {}", what, describe(current)),
            current.span,
        );
    }

    /// Emits a pre-built diagnostic (used for errors carrying `info`
    /// notes).
    pub(crate) fn emit(&self, diagnostic: Diagnostic) {
        self.handler.emit(diagnostic);
    }

    /// Panic-mode recovery: skips to just after the next `Newline`, or
    /// stops in front of the end of the enclosing block.
    pub(crate) fn synchronize(&mut self) {
        loop {
            match self.kind() {
                TokenKind::Newline => {
                    self.advance();
                    return;
                },
                TokenKind::Outdent | TokenKind::Eof => return,
                _ => self.advance(),
            }
        }
    }

    /// Terminates a simple statement: consumes the `Newline`, or accepts
    /// the end of the block or input. Anything else is an error followed
    /// by synchronisation.
    pub(crate) fn end_of_statement(&mut self) {
        match self.kind() {
            TokenKind::Newline => self.advance(),
            TokenKind::Outdent | TokenKind::Eof => {},
            _ => {
                self.error_expected("end of line");
                self.synchronize();
            },
        }
    }

    /// Extends `start` to the end of the most recently consumed token.
    pub(crate) fn span_from(&self, start: Span) -> Span {
        start.merge(self.previous_span())
    }
}

/// Renders a token for an error message.
fn describe(token: &Token) -> String {
    match token.kind {
        TokenKind::Eof => "end of input".to_string(),
        TokenKind::Newline => "end of line".to_string(),
        TokenKind::Indent => "an indented block".to_string(),
        TokenKind::Outdent => "end of block".to_string(),
        _ => format!("'{}'", token.lexeme),
    }
}
