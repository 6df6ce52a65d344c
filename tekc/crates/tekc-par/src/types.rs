//! Type reference parsing.
//!
//! Types live in a parallel mini-grammar:
//!
//! ```text
//! Type     = IDENT ('.' IDENT)* ('<' TypeList '>')?
//! TypeList = Type (',' Type)*
//! ```
//!
//! Used in variable annotations, function return types, class `extends`
//! clauses, `instanceof` right-hand sides and the generic argument
//! position of `new`.

use tekc_lex::TokenKind;

use crate::ast::{Identifier, TypeRef};
use crate::Parser;

impl<'a> Parser<'a> {
    /// Parses a type reference at the cursor.
    pub(crate) fn parse_type(&mut self) -> Option<TypeRef> {
        let first = self.expect_identifier("a type name")?;
        let start = first.span;

        let mut segments: Vec<Identifier> = vec![first];
        while self.match_kind(TokenKind::Dot) {
            segments.push(self.expect_identifier("a type name")?);
        }

        let mut generics = Vec::new();
        if self.match_kind(TokenKind::Lt) {
            generics = self.parse_type_list()?;
            self.expect(TokenKind::Gt, "'>'")?;
        }

        let span = self.span_from(start);
        Some(TypeRef {
            segments,
            generics,
            span,
        })
    }

    /// Parses a comma-separated type list, stopping in front of the
    /// closing token.
    pub(crate) fn parse_type_list(&mut self) -> Option<Vec<TypeRef>> {
        let mut types = vec![self.parse_type()?];
        while self.match_kind(TokenKind::Comma) {
            types.push(self.parse_type()?);
        }
        Some(types)
    }
}
