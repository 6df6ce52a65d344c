//! tekc-lex - Indentation-Sensitive Tokenizer
//!
//! This crate turns Tek source text into a token stream. Tek is
//! indentation-structured, so alongside the ordinary keywords, operators
//! and literals the tokenizer synthesises three virtual token kinds:
//!
//! - `Newline` terminates every non-blank, non-comment line,
//! - `Indent`/`Outdent` mark changes in leading-tab depth between lines.
//!
//! The stream always ends in a single `Eof`, with enough trailing
//! `Outdent`s before it to return to depth zero. Comments never enter
//! the stream; they are captured out-of-band.
//!
//! Tek also has three multi-word operators (`is not`, `is less than`,
//! `is greater than`) which the tokenizer recognises as single tokens
//! spanning all of their words.
//!
//! # Example
//!
//! ```
//! use tekc_lex::{tokenize, TokenKind};
//!
//! let result = tokenize("if x is less than y\n\treturn");
//! let op = result
//!     .tokens
//!     .iter()
//!     .find(|t| t.kind == TokenKind::IsLessThan)
//!     .unwrap();
//! assert_eq!(op.lexeme, "is less than");
//! ```

pub mod scanner;
pub mod token;
pub mod tokenizer;

pub use token::{Comment, Token, TokenKind};
pub use tokenizer::{tokenize, TokenizedSource, Tokenizer};
