//! Edge case tests for tekc-par

#[cfg(test)]
mod tests {
    use crate::test_util::*;
    use crate::*;

    // ==================== RECOVERY ====================

    /// A bad statement is dropped; the statements around it survive.
    #[test]
    fn test_recovery_resumes_at_next_statement() {
        let parsed = parse_source("var x = 1\nvar = 2\nvar y = 3");
        assert!(!parsed.diagnostics.is_empty());
        assert_eq!(parsed.program.body.len(), 2);
        assert!(matches!(&parsed.program.body[0],
            Node::VariableDecl(d) if d.name.name == "x"));
        assert!(matches!(&parsed.program.body[1],
            Node::VariableDecl(d) if d.name.name == "y"));
    }

    /// Junk after a complete statement is reported but the node is kept.
    #[test]
    fn test_trailing_junk_keeps_statement() {
        let parsed = parse_source("var x = 1 2");
        assert_eq!(parsed.diagnostics.len(), 1);
        assert!(parsed.diagnostics[0].message.contains("end of line"));
        assert_eq!(parsed.program.body.len(), 1);
    }

    /// Recovery inside a body does not consume the rest of the block.
    #[test]
    fn test_recovery_inside_body() {
        let source = "function f()\n\tvar = 1\n\treturn 2";
        let parsed = parse_source(source);
        assert!(!parsed.diagnostics.is_empty());
        let func = match &parsed.program.body[0] {
            Node::FunctionDecl(f) => f,
            other => panic!("expected a function, got {:?}", other.kind()),
        };
        assert_eq!(func.body.len(), 1);
        assert!(matches!(func.body[0], Node::Return(_)));
    }

    /// An unclosed paren reports the expected token.
    #[test]
    fn test_unclosed_paren() {
        let parsed = parse_source("fn(1, 2");
        assert!(parsed
            .diagnostics
            .iter()
            .any(|d| d.message.contains("')'")));
    }

    /// Errors in one statement do not suppress later, unrelated errors.
    #[test]
    fn test_multiple_errors_reported() {
        let parsed = parse_source("var = 1\nfn(\nvar = 2");
        assert!(parsed.diagnostics.len() >= 2);
    }

    /// Spans of surviving statements stay non-decreasing after recovery.
    #[test]
    fn test_spans_monotone_after_recovery() {
        let parsed = parse_source("var a = 1\nvar = oops\nvar b = 2\nfn(b)");
        let mut last = None;
        for stmt in &parsed.program.body {
            if let Some(prev) = last {
                assert!(stmt.span().start >= prev);
            }
            last = Some(stmt.span().start);
        }
    }

    // ==================== STRUCTURAL ODDITIES ====================

    /// A stray indented block at the top level is reported and skipped.
    #[test]
    fn test_stray_indent_at_top_level() {
        let parsed = parse_source("var a = 1\n\tfn()");
        assert!(!parsed.diagnostics.is_empty());
        assert!(matches!(parsed.program.body[0], Node::VariableDecl(_)));
    }

    /// A keyword in expression position is an expected-expression error.
    #[test]
    fn test_keyword_in_expression_position() {
        let parsed = parse_source("var x = else");
        assert!(parsed
            .diagnostics
            .iter()
            .any(|d| d.message.contains("an expression")));
    }

    /// A missing body after a block header is reported.
    #[test]
    fn test_missing_body() {
        let parsed = parse_source("if x");
        assert!(!parsed.diagnostics.is_empty());
        assert!(parsed.program.body.is_empty());
    }

    /// Deeply nested expressions parse without issue.
    #[test]
    fn test_deep_nesting() {
        let source = format!("fn({}1{})", "(".repeat(40), ")".repeat(40));
        let parsed = parse_source(&source);
        assert!(parsed.diagnostics.is_empty());
        assert_eq!(parsed.program.body.len(), 1);
    }

    /// Statement at end of input without a trailing newline terminates
    /// cleanly.
    #[test]
    fn test_no_trailing_newline() {
        let parsed = parse_source("return 1");
        assert!(parsed.diagnostics.is_empty());
        assert!(matches!(parsed.program.body[0], Node::Return(_)));
    }
}
