//! Token definitions for the Tek tokenizer.
//!
//! This module defines the closed set of lexical token kinds, the
//! [`Token`] record the tokenizer emits, and the fixed tables mapping
//! reserved words and single-character operators to their kinds.

use tekc_util::Span;

/// Lexical token kind
///
/// Each variant is one entry of the closed lexical vocabulary. Virtual
/// tokens ([`Newline`](TokenKind::Newline), [`Indent`](TokenKind::Indent),
/// [`Outdent`](TokenKind::Outdent), [`Eof`](TokenKind::Eof)) carry an
/// empty lexeme.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // =========================================================================
    // KEYWORDS
    // =========================================================================
    /// "var" - Variable declaration
    Var,
    /// "function" - Function declaration
    Function,
    /// "class" - Class declaration
    Class,
    /// "new" - Object construction
    New,
    /// "import" - Module import
    Import,
    /// "as" - Import alias
    As,
    /// "if" - Conditional
    If,
    /// "else" - Alternative branch
    Else,
    /// "switch" - Multi-way branch
    Switch,
    /// "case" - Switch arm
    Case,
    /// "default" - Switch fallback arm
    Default,
    /// "fallthrough" - Continue into the next switch arm
    Fallthrough,
    /// "for" - Iterator loop
    For,
    /// "in" - Loop source separator
    In,
    /// "while" - Conditional loop
    While,
    /// "repeat" - Counted loop
    Repeat,
    /// "try" - Exception guard
    Try,
    /// "catch" - Exception handler
    Catch,
    /// "finally" - Cleanup block
    Finally,
    /// "throw" - Raise an exception
    Throw,
    /// "return" - Function return
    Return,
    /// "break" - Loop/switch exit
    Break,
    /// "continue" - Next loop iteration
    Continue,
    /// "static" - Class member modifier
    Static,
    /// "extends" - Superclass clause
    Extends,
    /// "this" - Current instance
    This,
    /// "super" - Superclass reference
    Super,
    /// "instanceof" - Type test operator
    Instanceof,
    /// "async" - Asynchronous expression prefix
    Async,
    /// "true" - Boolean literal
    True,
    /// "false" - Boolean literal
    False,
    /// "null" - Null literal
    Null,
    /// "and" - Logical and
    And,
    /// "or" - Logical or
    Or,
    /// "not" - Logical negation
    Not,
    /// "is" - Equality operator
    Is,

    // =========================================================================
    // MULTI-WORD OPERATORS
    // =========================================================================
    /// "is not" - Inequality operator
    IsNot,
    /// "is less than" - Comparison operator
    IsLessThan,
    /// "is greater than" - Comparison operator
    IsGreaterThan,

    // =========================================================================
    // PUNCTUATION
    // =========================================================================
    /// "("
    LParen,
    /// ")"
    RParen,
    /// "["
    LBracket,
    /// "]"
    RBracket,
    /// "{"
    LBrace,
    /// "}"
    RBrace,
    /// ","
    Comma,
    /// "."
    Dot,
    /// ":"
    Colon,

    // =========================================================================
    // OPERATORS
    // =========================================================================
    /// "+"
    Plus,
    /// "-"
    Minus,
    /// "*"
    Star,
    /// "/"
    Slash,
    /// "%"
    Percent,
    /// "**"
    StarStar,
    /// "="
    Eq,
    /// "=="
    EqEq,
    /// "!="
    BangEq,
    /// "<"
    Lt,
    /// "<="
    LtEq,
    /// ">"
    Gt,
    /// ">="
    GtEq,

    // =========================================================================
    // LITERALS AND NAMES
    // =========================================================================
    /// Numeric literal
    Number,
    /// Single-quoted string literal
    Str,
    /// Name chosen by the programmer
    Identifier,
    /// Rest-of-line comment (captured out-of-band, never in the stream)
    Comment,

    // =========================================================================
    // VIRTUAL TOKENS
    // =========================================================================
    /// End of a non-blank, non-comment line
    Newline,
    /// Leading-tab depth increased by one
    Indent,
    /// Leading-tab depth decreased by one
    Outdent,
    /// End of input, always the final token
    Eof,
}

impl TokenKind {
    /// Returns true for tokens synthesised by the tokenizer rather than
    /// read from the source text.
    pub fn is_virtual(self) -> bool {
        matches!(
            self,
            TokenKind::Newline | TokenKind::Indent | TokenKind::Outdent | TokenKind::Eof
        )
    }
}

/// Reserved words and the kinds they resolve to.
///
/// A scanned word not present here is an [`TokenKind::Identifier`]. The
/// bare words `less`, `greater` and `than` are deliberately absent: they
/// are only legal inside the multi-word comparison operators and the
/// tokenizer reports them as errors on their own.
pub const WORD_TOKENS: &[(&str, TokenKind)] = &[
    ("var", TokenKind::Var),
    ("function", TokenKind::Function),
    ("class", TokenKind::Class),
    ("new", TokenKind::New),
    ("import", TokenKind::Import),
    ("as", TokenKind::As),
    ("if", TokenKind::If),
    ("else", TokenKind::Else),
    ("switch", TokenKind::Switch),
    ("case", TokenKind::Case),
    ("default", TokenKind::Default),
    ("fallthrough", TokenKind::Fallthrough),
    ("for", TokenKind::For),
    ("in", TokenKind::In),
    ("while", TokenKind::While),
    ("repeat", TokenKind::Repeat),
    ("try", TokenKind::Try),
    ("catch", TokenKind::Catch),
    ("finally", TokenKind::Finally),
    ("throw", TokenKind::Throw),
    ("return", TokenKind::Return),
    ("break", TokenKind::Break),
    ("continue", TokenKind::Continue),
    ("static", TokenKind::Static),
    ("extends", TokenKind::Extends),
    ("this", TokenKind::This),
    ("super", TokenKind::Super),
    ("instanceof", TokenKind::Instanceof),
    ("async", TokenKind::Async),
    ("true", TokenKind::True),
    ("false", TokenKind::False),
    ("null", TokenKind::Null),
    ("and", TokenKind::And),
    ("or", TokenKind::Or),
    ("not", TokenKind::Not),
    ("is", TokenKind::Is),
];

/// Single-character operators and punctuation.
///
/// Two-character operators (`==`, `!=`, `<=`, `>=`, `**`) are matched
/// greedily by the tokenizer before this table is consulted.
pub const CHAR_TOKENS: &[(u8, TokenKind)] = &[
    (b'(', TokenKind::LParen),
    (b')', TokenKind::RParen),
    (b'[', TokenKind::LBracket),
    (b']', TokenKind::RBracket),
    (b'{', TokenKind::LBrace),
    (b'}', TokenKind::RBrace),
    (b',', TokenKind::Comma),
    (b'.', TokenKind::Dot),
    (b':', TokenKind::Colon),
    (b'+', TokenKind::Plus),
    (b'-', TokenKind::Minus),
    (b'*', TokenKind::Star),
    (b'/', TokenKind::Slash),
    (b'%', TokenKind::Percent),
    (b'=', TokenKind::Eq),
    (b'<', TokenKind::Lt),
    (b'>', TokenKind::Gt),
];

/// A lexical token
///
/// Carries the token kind, the exact source substring it was read from
/// (empty for virtual tokens) and its source span.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    /// Kind from the closed lexical vocabulary
    pub kind: TokenKind,
    /// Exact source substring, empty for virtual tokens
    pub lexeme: String,
    /// Source location
    pub span: Span,
}

impl Token {
    /// Create a new token
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            span,
        }
    }

    /// Create a virtual token with an empty lexeme
    pub fn virtual_token(kind: TokenKind, span: Span) -> Self {
        Self {
            kind,
            lexeme: String::new(),
            span,
        }
    }
}

/// A source comment, captured out-of-band
///
/// Comments never appear in the token stream; the tokenizer collects
/// them separately for tooling that wants them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Comment {
    /// Comment text including the leading '#'
    pub text: String,
    /// Source location
    pub span: Span,
}
