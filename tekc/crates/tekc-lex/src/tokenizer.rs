//! Tokenizer for Tek source text.
//!
//! The tokenizer is line-oriented: source text is split on `\r?\n` and
//! each line is scanned independently. The only state carried between
//! lines is the running indentation depth, measured in leading tabs.
//! Changes in depth synthesise `Indent`/`Outdent` tokens, and every
//! non-blank, non-comment line is terminated by a `Newline` token.
//!
//! Errors never abort scanning. Each error is recorded against the
//! handler and the scanner skips just far enough to continue: one
//! character for a stray byte, one word for a bare `less`/`greater`/
//! `than`, the rest of the line for an unterminated string.

use tekc_util::{Diagnostic, FxHashMap, Handler, Position, Span, Stage};

use crate::scanner::LineScanner;
use crate::token::{Comment, Token, TokenKind, CHAR_TOKENS, WORD_TOKENS};

/// Everything the tokenizer produces for one source text.
///
/// The token stream is complete even when diagnostics are present; the
/// parser consumes it regardless.
#[derive(Debug)]
pub struct TokenizedSource {
    /// Tokens in source order, terminated by a single `Eof`
    pub tokens: Vec<Token>,
    /// Comments, captured out-of-band in source order
    pub comments: Vec<Comment>,
    /// Diagnostics recorded while scanning
    pub diagnostics: Vec<Diagnostic>,
}

/// Tokenizes a source text.
///
/// # Example
///
/// ```
/// use tekc_lex::{tokenize, TokenKind};
///
/// let result = tokenize("var x = 1");
/// assert!(result.diagnostics.is_empty());
/// assert_eq!(result.tokens.first().unwrap().kind, TokenKind::Var);
/// assert_eq!(result.tokens.last().unwrap().kind, TokenKind::Eof);
/// ```
pub fn tokenize(source: &str) -> TokenizedSource {
    Tokenizer::new(source).run()
}

/// Tokenizer state machine.
///
/// Holds the reserved-word and operator tables and accumulates tokens,
/// comments and diagnostics while the line loop runs.
pub struct Tokenizer<'a> {
    /// Source text being tokenized.
    source: &'a str,

    /// Reserved words to token kinds.
    word_tokens: FxHashMap<&'static str, TokenKind>,

    /// Single-character operators and punctuation.
    char_tokens: FxHashMap<u8, TokenKind>,

    /// Running indentation depth in leading tabs.
    indent: u32,

    /// Accumulated tokens.
    tokens: Vec<Token>,

    /// Accumulated comments.
    comments: Vec<Comment>,

    /// Diagnostic sink for this phase.
    handler: Handler,
}

impl<'a> Tokenizer<'a> {
    /// Creates a tokenizer for the given source text.
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            word_tokens: WORD_TOKENS.iter().copied().collect(),
            char_tokens: CHAR_TOKENS.iter().copied().collect(),
            indent: 0,
            tokens: Vec::new(),
            comments: Vec::new(),
            handler: Handler::new(Stage::Tokenizer),
        }
    }

    /// Runs the tokenizer to completion.
    ///
    /// Scans every line, flushes the trailing `Outdent`s and appends the
    /// final `Eof` token.
    pub fn run(mut self) -> TokenizedSource {
        let source = self.source;
        let mut line_count = 0u32;
        for (line_no, raw) in source.split('\n').enumerate() {
            let line = raw.strip_suffix('\r').unwrap_or(raw);
            self.scan_line(line_no as u32, line);
            line_count = line_no as u32 + 1;
        }

        let end = Position::new(line_count, 0);
        for _ in 0..self.indent {
            self.tokens
                .push(Token::virtual_token(TokenKind::Outdent, Span::point(end)));
        }
        self.tokens
            .push(Token::virtual_token(TokenKind::Eof, Span::point(end)));

        TokenizedSource {
            tokens: self.tokens,
            comments: self.comments,
            diagnostics: self.handler.take(),
        }
    }

    /// Scans one line of source.
    ///
    /// Blank lines and comment-only lines produce no tokens and leave
    /// the indentation depth untouched.
    fn scan_line(&mut self, line_no: u32, line: &str) {
        let mut scanner = LineScanner::new(line_no, line);

        // Leading tabs are the indent level; stray spaces in the leading
        // whitespace are skipped and never counted.
        let tabs = scanner.eat_while(|b| b == b'\t') as u32;
        scanner.eat_horizontal_whitespace();

        if scanner.at_end() {
            return;
        }
        if scanner.peek() == Some(b'#') {
            self.capture_comment(&mut scanner);
            return;
        }

        self.emit_indentation(line_no, tabs);

        let first_token = self.tokens.len();
        loop {
            scanner.eat_horizontal_whitespace();
            if scanner.at_end() {
                break;
            }
            if scanner.peek() == Some(b'#') {
                self.capture_comment(&mut scanner);
                break;
            }
            self.scan_token(&mut scanner);
        }

        // The newline sits immediately after the last content token, or
        // at the scan position when the whole line was erroneous.
        let newline_at = self.tokens[first_token..]
            .last()
            .map(|t| t.span.end)
            .unwrap_or_else(|| scanner.position());
        self.tokens
            .push(Token::virtual_token(TokenKind::Newline, Span::point(newline_at)));
    }

    /// Emits `Indent`/`Outdent` tokens for a change in leading-tab depth.
    fn emit_indentation(&mut self, line_no: u32, tabs: u32) {
        if tabs > self.indent {
            let span = Span::from_parts(line_no, 0, line_no, tabs - self.indent);
            for _ in 0..(tabs - self.indent) {
                self.tokens
                    .push(Token::virtual_token(TokenKind::Indent, span));
            }
        } else if tabs < self.indent {
            let span = Span::from_parts(line_no, 0, line_no, tabs);
            for _ in 0..(self.indent - tabs) {
                self.tokens
                    .push(Token::virtual_token(TokenKind::Outdent, span));
            }
        }
        self.indent = tabs;
    }

    /// Captures a rest-of-line comment into the out-of-band list.
    fn capture_comment(&mut self, scanner: &mut LineScanner<'_>) {
        let start = scanner.position();
        let offset = scanner.offset();
        scanner.eat_while(|_| true);
        self.comments.push(Comment {
            text: scanner.slice_from(offset).to_string(),
            span: Span::new(start, scanner.position()),
        });
    }

    /// Scans a single token at the cursor.
    ///
    /// The cursor is guaranteed to sit on a non-whitespace byte.
    fn scan_token(&mut self, scanner: &mut LineScanner<'_>) {
        let start = scanner.position();
        let offset = scanner.offset();
        let b = scanner.peek().expect("scan_token at end of line");

        match b {
            b'=' if scanner.peek_at(1) == Some(b'=') => {
                scanner.bump();
                scanner.bump();
                self.push_token(TokenKind::EqEq, scanner, offset, start);
            },
            b'!' if scanner.peek_at(1) == Some(b'=') => {
                scanner.bump();
                scanner.bump();
                self.push_token(TokenKind::BangEq, scanner, offset, start);
            },
            b'<' if scanner.peek_at(1) == Some(b'=') => {
                scanner.bump();
                scanner.bump();
                self.push_token(TokenKind::LtEq, scanner, offset, start);
            },
            b'>' if scanner.peek_at(1) == Some(b'=') => {
                scanner.bump();
                scanner.bump();
                self.push_token(TokenKind::GtEq, scanner, offset, start);
            },
            b'*' if scanner.peek_at(1) == Some(b'*') => {
                scanner.bump();
                scanner.bump();
                self.push_token(TokenKind::StarStar, scanner, offset, start);
            },
            _ if self.char_tokens.contains_key(&b) => {
                let kind = self.char_tokens[&b];
                scanner.bump();
                self.push_token(kind, scanner, offset, start);
            },
            b'0'..=b'9' => self.scan_number(scanner, offset, start),
            b'\'' => self.scan_string(scanner, offset, start),
            b'A'..=b'Z' | b'a'..=b'z' | b'_' => self.scan_word(scanner, offset, start),
            _ => {
                scanner.bump();
                let c = scanner.slice_from(offset);
                self.handler.error(
                    format!("unexpected character '{}'", c.escape_debug()),
                    Span::new(start, scanner.position()),
                );
            },
        }
    }

    /// Scans a numeric literal.
    ///
    /// Digits with `_` separators and an optional fractional part whose
    /// first character must be a digit. No exponent syntax.
    fn scan_number(&mut self, scanner: &mut LineScanner<'_>, offset: usize, start: Position) {
        scanner.eat_while(is_digit_or_separator);
        if scanner.peek() == Some(b'.') && scanner.peek_at(1).is_some_and(|b| b.is_ascii_digit()) {
            scanner.bump();
            scanner.eat_while(is_digit_or_separator);
        }
        self.push_token(TokenKind::Number, scanner, offset, start);
    }

    /// Scans a single-quoted string literal.
    ///
    /// Strings never span lines. On a missing closing quote the error is
    /// recorded and the cursor is left at the end of the line.
    fn scan_string(&mut self, scanner: &mut LineScanner<'_>, offset: usize, start: Position) {
        scanner.bump();

        loop {
            match scanner.peek() {
                None => {
                    self.handler.error(
                        "unterminated string literal",
                        Span::new(start, scanner.position()),
                    );
                    return;
                },
                Some(b'\'') => {
                    scanner.bump();
                    self.push_token(TokenKind::Str, scanner, offset, start);
                    return;
                },
                Some(b'\\') => {
                    scanner.bump();
                    if scanner.at_end() {
                        self.handler.error(
                            "unterminated string literal",
                            Span::new(start, scanner.position()),
                        );
                        return;
                    }
                    scanner.bump();
                },
                Some(_) => scanner.bump(),
            }
        }
    }

    /// Scans a word and resolves it to a keyword, an identifier, a
    /// multi-word operator starting at `is`, or a bare-word error.
    fn scan_word(&mut self, scanner: &mut LineScanner<'_>, offset: usize, start: Position) {
        scanner.eat_while(is_word_continue);
        let word = scanner.slice_from(offset);

        match word {
            "is" => {
                let kind = self.try_extended_is(scanner).unwrap_or(TokenKind::Is);
                self.push_token(kind, scanner, offset, start);
            },
            "less" | "greater" => {
                self.handler.error(
                    format!("'{}' must come after 'is'", word),
                    Span::new(start, scanner.position()),
                );
            },
            "than" => {
                self.handler.error(
                    "'than' must come after 'is less' or 'is greater'",
                    Span::new(start, scanner.position()),
                );
            },
            _ => {
                let kind = self
                    .word_tokens
                    .get(word)
                    .copied()
                    .unwrap_or(TokenKind::Identifier);
                self.push_token(kind, scanner, offset, start);
            },
        }
    }

    /// Attempts to extend a scanned `is` into `is not`, `is less than`
    /// or `is greater than`.
    ///
    /// The internal whitespace must be horizontal whitespace on the same
    /// line. On failure the cursor is rewound to just after `is`.
    fn try_extended_is(&mut self, scanner: &mut LineScanner<'_>) -> Option<TokenKind> {
        let save = scanner.offset();

        if scanner.eat_horizontal_whitespace() == 0 {
            return None;
        }
        let word_start = scanner.offset();
        scanner.eat_while(is_word_continue);

        match scanner.slice_from(word_start) {
            "not" => Some(TokenKind::IsNot),
            word @ ("less" | "greater") => {
                let kind = if word == "less" {
                    TokenKind::IsLessThan
                } else {
                    TokenKind::IsGreaterThan
                };
                if scanner.eat_horizontal_whitespace() > 0 {
                    let than_start = scanner.offset();
                    scanner.eat_while(is_word_continue);
                    if scanner.slice_from(than_start) == "than" {
                        return Some(kind);
                    }
                }
                scanner.rewind(save);
                None
            },
            _ => {
                scanner.rewind(save);
                None
            },
        }
    }

    /// Pushes a token whose lexeme runs from `offset` to the cursor.
    fn push_token(
        &mut self,
        kind: TokenKind,
        scanner: &LineScanner<'_>,
        offset: usize,
        start: Position,
    ) {
        self.tokens.push(Token::new(
            kind,
            scanner.slice_from(offset),
            Span::new(start, scanner.position()),
        ));
    }
}

/// Returns true for bytes that may continue a word: `[A-Za-z0-9_]`.
fn is_word_continue(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// Returns true for digits and the `_` separator.
fn is_digit_or_separator(b: u8) -> bool {
    b.is_ascii_digit() || b == b'_'
}
