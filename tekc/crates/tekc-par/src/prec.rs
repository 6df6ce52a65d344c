//! Operator precedence ladder for Pratt parsing.
//!
//! The table is a value: each token kind maps to the precedence of the
//! infix form it introduces, and the parser's precedence loop consumes
//! infix forms whose precedence is at least its argument.
//!
//! # Precedence ladder (lowest to highest)
//!
//! | Level | Operators |
//! |-------|-----------|
//! | 1  | `=` |
//! | 2  | `or` |
//! | 3  | `and` |
//! | 4  | `==`, `!=`, `is`, `is not` |
//! | 5  | `<`, `<=`, `>`, `>=`, `is less than`, `is greater than` |
//! | 6  | `+`, `-` |
//! | 7  | `*`, `/`, `%` |
//! | 8  | `**` |
//! | 9  | prefix `-`, `not` |
//! | 10 | `instanceof` |
//! | 11 | call `(`, index `[`, member `.` |
//! | 12 | atoms |
//!
//! All infix operators bind left-associatively except `**` and `=`,
//! which are right-associative.

use tekc_lex::TokenKind;

/// `=`
pub const ASSIGNMENT: u8 = 1;

/// `or`
pub const LOGICAL_OR: u8 = 2;

/// `and`
pub const LOGICAL_AND: u8 = 3;

/// `==`, `!=`, `is`, `is not`
pub const EQUALITY: u8 = 4;

/// `<`, `<=`, `>`, `>=`, `is less than`, `is greater than`
pub const COMPARISON: u8 = 5;

/// `+`, `-`
pub const ADDITIVE: u8 = 6;

/// `*`, `/`, `%`
pub const MULTIPLICATIVE: u8 = 7;

/// `**`
pub const EXPONENT: u8 = 8;

/// Prefix `-`, `not`
pub const UNARY: u8 = 9;

/// `instanceof`
pub const INSTANCEOF: u8 = 10;

/// Call, index and member access
pub const CALL: u8 = 11;

/// Atoms: literals, names, `this`, `super`, `new`, `async`, brackets
pub const PRIMARY: u8 = 12;

/// Returns the precedence of the infix form a token introduces, or
/// `None` if the token starts no infix form.
pub fn infix_precedence(kind: TokenKind) -> Option<u8> {
    match kind {
        TokenKind::Eq => Some(ASSIGNMENT),
        TokenKind::Or => Some(LOGICAL_OR),
        TokenKind::And => Some(LOGICAL_AND),
        TokenKind::EqEq | TokenKind::BangEq | TokenKind::Is | TokenKind::IsNot => Some(EQUALITY),
        TokenKind::Lt
        | TokenKind::LtEq
        | TokenKind::Gt
        | TokenKind::GtEq
        | TokenKind::IsLessThan
        | TokenKind::IsGreaterThan => Some(COMPARISON),
        TokenKind::Plus | TokenKind::Minus => Some(ADDITIVE),
        TokenKind::Star | TokenKind::Slash | TokenKind::Percent => Some(MULTIPLICATIVE),
        TokenKind::StarStar => Some(EXPONENT),
        TokenKind::Instanceof => Some(INSTANCEOF),
        TokenKind::LParen | TokenKind::LBracket | TokenKind::Dot => Some(CALL),
        _ => None,
    }
}

/// Returns true for the right-associative infix operators.
pub fn is_right_associative(kind: TokenKind) -> bool {
    matches!(kind, TokenKind::Eq | TokenKind::StarStar)
}
