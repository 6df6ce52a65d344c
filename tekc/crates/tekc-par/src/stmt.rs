//! Statement parsing - declarations, control flow and bodies.
//!
//! Statement parsing is newline-sensitive. Simple statements consume the
//! `Newline` that terminates them; block statements end having consumed
//! the `Outdent` that closes their last body, so no trailing newline
//! remains. Bodies are always `NEWLINE INDENT statements OUTDENT`.

use tekc_lex::TokenKind;
use tekc_util::Span;

use crate::ast::*;
use crate::Parser;

impl<'a> Parser<'a> {
    /// Parses one statement at the cursor.
    ///
    /// Returns `None` when the statement could not be built; the cursor
    /// is then already synchronised to the next statement boundary and
    /// the partial node has been discarded.
    pub fn parse_statement(&mut self) -> Option<Node> {
        match self.kind() {
            TokenKind::Var => self.parse_variable_decl(),
            TokenKind::Function => self.parse_function_decl(),
            TokenKind::Class => self.parse_class_decl(),
            TokenKind::Import => self.parse_import_decl(),
            TokenKind::If => self.parse_if(),
            TokenKind::Switch => self.parse_switch(),
            TokenKind::For => self.parse_for(),
            TokenKind::While => self.parse_while(),
            TokenKind::Repeat => self.parse_repeat(),
            TokenKind::Try => self.parse_try(),
            TokenKind::Throw => self.parse_throw(),
            TokenKind::Return => self.parse_return(),
            TokenKind::Break => self.parse_simple(|span| Node::Break(BreakStmt { span })),
            TokenKind::Continue => self.parse_simple(|span| Node::Continue(ContinueStmt { span })),
            TokenKind::Fallthrough => {
                self.parse_simple(|span| Node::Fallthrough(FallthroughStmt { span }))
            },
            _ => self.parse_expression_statement(),
        }
    }

    /// Parses an indented body: `NEWLINE INDENT statements OUTDENT`.
    pub(crate) fn parse_body(&mut self) -> Option<Vec<Node>> {
        let parsed = self.expect(TokenKind::Newline, "end of line").is_some();
        if !parsed {
            self.synchronize();
        }
        self.expect(TokenKind::Indent, "an indented block")?;

        let mut body = Vec::new();
        while !self.at(TokenKind::Outdent) && !self.at(TokenKind::Eof) {
            if let Some(stmt) = self.parse_statement() {
                body.push(stmt);
            }
        }
        self.expect(TokenKind::Outdent, "end of block")?;

        Some(body)
    }

    // =========================================================================
    // DECLARATIONS
    // =========================================================================

    /// `var IDENT [: Type] [= expr]`
    fn parse_variable_decl(&mut self) -> Option<Node> {
        let start = self.current().span;
        self.advance();

        let node = self.recover(|p| {
            let name = p.expect_identifier("a variable name")?;
            let ty = if p.match_kind(TokenKind::Colon) {
                Some(p.parse_type()?)
            } else {
                None
            };
            if p.match_kind(TokenKind::Eq) {
                let init = p.parse_expression()?;
                let span = start.merge(init.span());
                Some(Node::VariableDecl(VariableDecl {
                    name,
                    ty,
                    init: Box::new(init),
                    span,
                }))
            } else {
                let span = p.span_from(start);
                Some(Node::EmptyVariableDecl(EmptyVariableDecl { name, ty, span }))
            }
        })?;

        self.end_of_statement();
        Some(node)
    }

    /// `function IDENT ( params ) [: Type]` followed by a body
    fn parse_function_decl(&mut self) -> Option<Node> {
        let start = self.current().span;
        self.advance();

        let (name, params, return_type) = self.recover(Self::expect_function_header)?;
        let body = self.parse_body()?;

        let span = self.span_from(start);
        Some(Node::FunctionDecl(FunctionDecl {
            name,
            params,
            return_type,
            body,
            span,
        }))
    }

    /// The `IDENT ( params ) [: Type]` part of a function declaration.
    fn expect_function_header(&mut self) -> Option<(Identifier, Vec<Param>, Option<TypeRef>)> {
        let name = self.expect_identifier("a function name")?;
        self.expect(TokenKind::LParen, "'('")?;

        self.ignore_newlines();
        let mut params = Vec::new();
        if !self.at(TokenKind::RParen) {
            loop {
                let param_name = self.expect_identifier("a parameter name")?;
                let ty = if self.match_kind(TokenKind::Colon) {
                    Some(self.parse_type()?)
                } else {
                    None
                };
                let span = match &ty {
                    Some(ty) => param_name.span.merge(ty.span),
                    None => param_name.span,
                };
                params.push(Param {
                    name: param_name,
                    ty,
                    span,
                });
                if !self.match_ignore_newline(TokenKind::Comma) {
                    break;
                }
                self.ignore_newlines();
            }
            self.ignore_newlines();
        }
        self.expect(TokenKind::RParen, "')'")?;

        let return_type = if self.match_kind(TokenKind::Colon) {
            Some(self.parse_type()?)
        } else {
            None
        };

        Some((name, params, return_type))
    }

    /// `class IDENT [extends Type]` followed by member lines
    ///
    /// Member lines may be prefixed with `static`; either way any
    /// statement is accepted here and the declarations-only rule is left
    /// to the linter.
    fn parse_class_decl(&mut self) -> Option<Node> {
        let start = self.current().span;
        self.advance();

        let (name, extends) = self.recover(|p| {
            let name = p.expect_identifier("a class name")?;
            let extends = if p.match_kind(TokenKind::Extends) {
                Some(p.parse_type()?)
            } else {
                None
            };
            Some((name, extends))
        })?;

        self.expect(TokenKind::Newline, "end of line")?;
        self.expect(TokenKind::Indent, "an indented block")?;

        let mut static_body = Vec::new();
        let mut instance_body = Vec::new();
        while !self.at(TokenKind::Outdent) && !self.at(TokenKind::Eof) {
            let is_static = self.match_kind(TokenKind::Static);
            if let Some(member) = self.parse_statement() {
                if is_static {
                    static_body.push(member);
                } else {
                    instance_body.push(member);
                }
            }
        }
        self.expect(TokenKind::Outdent, "end of block")?;

        let span = self.span_from(start);
        Some(Node::ClassDecl(ClassDecl {
            name,
            extends,
            static_body,
            instance_body,
            span,
        }))
    }

    /// `import IDENT ('.' IDENT)* ['as' IDENT]`
    fn parse_import_decl(&mut self) -> Option<Node> {
        let start = self.current().span;
        self.advance();

        let node = self.recover(|p| {
            let mut path = vec![p.expect_identifier("a module name")?];
            while p.match_kind(TokenKind::Dot) {
                path.push(p.expect_identifier("a module name")?);
            }
            let alias = if p.match_kind(TokenKind::As) {
                Some(p.expect_identifier("an import alias")?)
            } else {
                None
            };
            let span = p.span_from(start);
            Some(Node::ImportDecl(ImportDecl { path, alias, span }))
        })?;

        self.end_of_statement();
        Some(node)
    }

    // =========================================================================
    // CONTROL FLOW
    // =========================================================================

    /// `if expr` with a body and an optional `else`/`else if` chain
    fn parse_if(&mut self) -> Option<Node> {
        let start = self.current().span;
        self.advance();

        let condition = self.recover(Self::parse_expression)?;
        let body = self.parse_body()?;

        let else_body = if self.match_kind(TokenKind::Else) {
            if self.at(TokenKind::If) {
                // An else-if chain nests as a single-statement else body
                let nested = self.parse_if()?;
                Some(vec![nested])
            } else {
                Some(self.parse_body()?)
            }
        } else {
            None
        };

        let span = self.span_from(start);
        Some(Node::If(IfStmt {
            condition: Box::new(condition),
            body,
            else_body,
            span,
        }))
    }

    /// `switch expr` over one or more `case` arms and an optional
    /// `default`
    fn parse_switch(&mut self) -> Option<Node> {
        let start = self.current().span;
        self.advance();

        let discriminant = self.recover(Self::parse_expression)?;
        self.expect(TokenKind::Newline, "end of line")?;
        self.expect(TokenKind::Indent, "an indented block")?;

        let mut cases = Vec::new();
        while self.at(TokenKind::Case) {
            let case_start = self.current().span;
            self.advance();
            let test = self.recover(Self::parse_expression)?;
            let body = self.parse_body()?;
            let span = self.span_from(case_start);
            cases.push(Node::SwitchCase(SwitchCase {
                test: Box::new(test),
                body,
                span,
            }));
        }
        if cases.is_empty() {
            self.error_expected("'case'");
        }

        let default_body = if self.match_kind(TokenKind::Default) {
            Some(self.parse_body()?)
        } else {
            None
        };

        self.expect(TokenKind::Outdent, "end of block")?;

        let span = self.span_from(start);
        Some(Node::Switch(SwitchStmt {
            discriminant: Box::new(discriminant),
            cases,
            default_body,
            span,
        }))
    }

    /// `for IDENT in expr` with a body
    fn parse_for(&mut self) -> Option<Node> {
        let start = self.current().span;
        self.advance();

        let header = self.recover(|p| {
            let binding = p.expect_identifier("a loop variable")?;
            p.expect(TokenKind::In, "'in'")?;
            let iterable = p.parse_expression()?;
            Some((binding, iterable))
        })?;
        let (binding, iterable) = header;
        let body = self.parse_body()?;

        let span = self.span_from(start);
        Some(Node::For(ForStmt {
            binding,
            iterable: Box::new(iterable),
            body,
            span,
        }))
    }

    /// `while expr` with a body
    fn parse_while(&mut self) -> Option<Node> {
        let start = self.current().span;
        self.advance();

        let condition = self.recover(Self::parse_expression)?;
        let body = self.parse_body()?;

        let span = self.span_from(start);
        Some(Node::While(WhileStmt {
            condition: Box::new(condition),
            body,
            span,
        }))
    }

    /// `repeat expr` with a body
    fn parse_repeat(&mut self) -> Option<Node> {
        let start = self.current().span;
        self.advance();

        let count = self.recover(Self::parse_expression)?;
        let body = self.parse_body()?;

        let span = self.span_from(start);
        Some(Node::Repeat(RepeatStmt {
            count: Box::new(count),
            body,
            span,
        }))
    }

    /// `try` body, `catch IDENT` body, optional `finally` body
    fn parse_try(&mut self) -> Option<Node> {
        let start = self.current().span;
        self.advance();

        let body = self.parse_body()?;
        self.expect(TokenKind::Catch, "'catch'")?;
        let catch_binding = self.recover(|p| p.expect_identifier("an exception name"))?;
        let catch_body = self.parse_body()?;

        let finally_body = if self.match_kind(TokenKind::Finally) {
            Some(self.parse_body()?)
        } else {
            None
        };

        let span = self.span_from(start);
        Some(Node::Try(TryStmt {
            body,
            catch_binding,
            catch_body,
            finally_body,
            span,
        }))
    }

    /// `throw expr`
    fn parse_throw(&mut self) -> Option<Node> {
        let start = self.current().span;
        self.advance();

        let value = self.recover(Self::parse_expression)?;
        let span = start.merge(value.span());
        self.end_of_statement();
        Some(Node::Throw(ThrowStmt {
            value: Box::new(value),
            span,
        }))
    }

    /// `return [expr]`
    fn parse_return(&mut self) -> Option<Node> {
        let start = self.current().span;
        self.advance();

        let value = match self.kind() {
            TokenKind::Newline | TokenKind::Outdent | TokenKind::Eof => None,
            _ => Some(Box::new(self.recover(Self::parse_expression)?)),
        };

        let span = match &value {
            Some(value) => start.merge(value.span()),
            None => start,
        };
        self.end_of_statement();
        Some(Node::Return(ReturnStmt { value, span }))
    }

    /// A bare keyword statement: `break`, `continue`, `fallthrough`.
    fn parse_simple(&mut self, build: impl FnOnce(Span) -> Node) -> Option<Node> {
        let span = self.current().span;
        self.advance();
        self.end_of_statement();
        Some(build(span))
    }

    /// An expression in statement position.
    fn parse_expression_statement(&mut self) -> Option<Node> {
        let expr = self.recover(Self::parse_expression)?;
        let span = expr.span();
        self.end_of_statement();
        Some(Node::ExpressionStmt(ExpressionStmt {
            expr: Box::new(expr),
            span,
        }))
    }

    /// Runs a sub-parse and synchronises to the next statement boundary
    /// when it fails, discarding the partial statement.
    pub(crate) fn recover<T>(&mut self, parse: impl FnOnce(&mut Self) -> Option<T>) -> Option<T> {
        match parse(self) {
            Some(value) => Some(value),
            None => {
                self.synchronize();
                None
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::test_util::*;
    use crate::*;

    #[test]
    fn test_variable_decl_full() {
        // var x: Int = 1 + 2
        let node = parse_single("var x: Int = 1 + 2");
        let decl = match node {
            Node::VariableDecl(d) => d,
            other => panic!("expected a variable declaration, got {:?}", other.kind()),
        };
        assert_eq!(decl.name.name, "x");
        assert_eq!(decl.ty.as_ref().unwrap().segments[0].name, "Int");
        match &*decl.init {
            Node::Binary(b) => {
                assert_eq!(b.op, BinaryOp::Plus);
                assert!(matches!(&*b.left, Node::Literal(l) if l.lexeme == "1"));
                assert!(matches!(&*b.right, Node::Literal(l) if l.lexeme == "2"));
            },
            other => panic!("expected a binary initialiser, got {:?}", other.kind()),
        }
    }

    #[test]
    fn test_variable_decl_untyped() {
        let node = parse_single("var x = 'hi'");
        assert!(matches!(node, Node::VariableDecl(_)));
    }

    #[test]
    fn test_empty_variable_decl() {
        let node = parse_single("var x: Int");
        let decl = match node {
            Node::EmptyVariableDecl(d) => d,
            other => panic!("expected an empty declaration, got {:?}", other.kind()),
        };
        assert_eq!(decl.name.name, "x");
        assert!(decl.ty.is_some());
    }

    #[test]
    fn test_function_decl() {
        let node = parse_single("function add(a: Int, b: Int): Int\n\treturn a + b");
        let decl = match node {
            Node::FunctionDecl(d) => d,
            other => panic!("expected a function, got {:?}", other.kind()),
        };
        assert_eq!(decl.name.name, "add");
        assert_eq!(decl.params.len(), 2);
        assert_eq!(decl.params[0].name.name, "a");
        assert_eq!(decl.return_type.as_ref().unwrap().segments[0].name, "Int");
        assert_eq!(decl.body.len(), 1);
        assert!(matches!(decl.body[0], Node::Return(_)));
    }

    #[test]
    fn test_function_decl_no_params_no_type() {
        let node = parse_single("function tick()\n\tcount = count + 1");
        let decl = match node {
            Node::FunctionDecl(d) => d,
            _ => panic!("expected a function"),
        };
        assert!(decl.params.is_empty());
        assert!(decl.return_type.is_none());
    }

    #[test]
    fn test_class_decl_bodies() {
        let source = "class Counter extends Base\n\tstatic var total: Int = 0\n\tvar count: Int = 0\n\tfunction bump()\n\t\tthis.count = this.count + 1";
        let node = parse_single(source);
        let class = match node {
            Node::ClassDecl(c) => c,
            other => panic!("expected a class, got {:?}", other.kind()),
        };
        assert_eq!(class.name.name, "Counter");
        assert_eq!(class.extends.as_ref().unwrap().segments[0].name, "Base");
        assert_eq!(class.static_body.len(), 1);
        assert_eq!(class.instance_body.len(), 2);
        assert!(matches!(class.static_body[0], Node::VariableDecl(_)));
        assert!(matches!(class.instance_body[1], Node::FunctionDecl(_)));
    }

    #[test]
    fn test_class_accepts_statements_structurally() {
        // The declarations-only rule is the linter's, not the parser's
        let node = parse_single("class C\n\tx = 1");
        let class = match node {
            Node::ClassDecl(c) => c,
            _ => panic!("expected a class"),
        };
        assert_eq!(class.instance_body.len(), 1);
        assert!(matches!(class.instance_body[0], Node::ExpressionStmt(_)));
    }

    #[test]
    fn test_import_decl() {
        let node = parse_single("import geo.shapes as shapes");
        let import = match node {
            Node::ImportDecl(i) => i,
            other => panic!("expected an import, got {:?}", other.kind()),
        };
        assert_eq!(import.path.len(), 2);
        assert_eq!(import.path[0].name, "geo");
        assert_eq!(import.alias.as_ref().unwrap().name, "shapes");
    }

    #[test]
    fn test_if_else_chain() {
        let source = "if a\n\tfn()\nelse if b\n\tgn()\nelse\n\thn()";
        let node = parse_single(source);
        let stmt = match node {
            Node::If(i) => i,
            other => panic!("expected an if, got {:?}", other.kind()),
        };
        assert_eq!(stmt.body.len(), 1);

        let else_body = stmt.else_body.unwrap();
        assert_eq!(else_body.len(), 1);
        let nested = match &else_body[0] {
            Node::If(i) => i,
            other => panic!("expected a nested if, got {:?}", other.kind()),
        };
        assert!(nested.else_body.is_some());
    }

    #[test]
    fn test_switch() {
        let source = "switch x\n\tcase 1\n\t\tfn()\n\tcase 2\n\t\tgn()\n\t\tfallthrough\n\tdefault\n\t\thn()";
        let node = parse_single(source);
        let switch = match node {
            Node::Switch(s) => s,
            other => panic!("expected a switch, got {:?}", other.kind()),
        };
        assert_eq!(switch.cases.len(), 2);
        assert!(switch.default_body.is_some());
        match &switch.cases[1] {
            Node::SwitchCase(case) => {
                assert_eq!(case.body.len(), 2);
                assert!(matches!(case.body[1], Node::Fallthrough(_)));
            },
            other => panic!("expected a switch case, got {:?}", other.kind()),
        }
    }

    #[test]
    fn test_switch_requires_a_case() {
        let parsed = parse_source("switch x\n\tdefault\n\t\tfn()");
        assert!(parsed
            .diagnostics
            .iter()
            .any(|d| d.message.contains("'case'")));
    }

    #[test]
    fn test_for_loop() {
        let node = parse_single("for item in items\n\tfn(item)");
        let stmt = match node {
            Node::For(f) => f,
            other => panic!("expected a for, got {:?}", other.kind()),
        };
        assert_eq!(stmt.binding.name, "item");
        assert!(matches!(&*stmt.iterable, Node::Identifier(i) if i.name == "items"));
        assert_eq!(stmt.body.len(), 1);
    }

    #[test]
    fn test_while_loop() {
        let node = parse_single("while x is less than 10\n\tx = x + 1");
        let stmt = match node {
            Node::While(w) => w,
            other => panic!("expected a while, got {:?}", other.kind()),
        };
        assert!(matches!(&*stmt.condition, Node::Binary(b) if b.op == BinaryOp::IsLessThan));
    }

    #[test]
    fn test_repeat_loop() {
        let node = parse_single("repeat 3\n\tfn()");
        assert!(matches!(node, Node::Repeat(_)));
    }

    #[test]
    fn test_try_catch_finally() {
        let source = "try\n\trisky()\ncatch err\n\tlog(err)\nfinally\n\tcleanup()";
        let node = parse_single(source);
        let stmt = match node {
            Node::Try(t) => t,
            other => panic!("expected a try, got {:?}", other.kind()),
        };
        assert_eq!(stmt.catch_binding.name, "err");
        assert_eq!(stmt.catch_body.len(), 1);
        assert_eq!(stmt.finally_body.as_ref().unwrap().len(), 1);
    }

    #[test]
    fn test_throw() {
        let node = parse_single("throw makeError('boom')");
        assert!(matches!(node, Node::Throw(_)));
    }

    #[test]
    fn test_return_with_and_without_value() {
        let node = parse_single("return x + 1");
        let stmt = match node {
            Node::Return(r) => r,
            _ => panic!("expected a return"),
        };
        assert!(stmt.value.is_some());

        let node = parse_single("return");
        assert!(matches!(node, Node::Return(r) if r.value.is_none()));
    }

    #[test]
    fn test_bare_statements() {
        assert!(matches!(parse_single("break"), Node::Break(_)));
        assert!(matches!(parse_single("continue"), Node::Continue(_)));
        assert!(matches!(parse_single("fallthrough"), Node::Fallthrough(_)));
    }

    #[test]
    fn test_nested_bodies() {
        let source = "function outer()\n\tif a\n\t\twhile b\n\t\t\tfn()\n\treturn";
        let node = parse_single(source);
        let func = match node {
            Node::FunctionDecl(f) => f,
            _ => panic!("expected a function"),
        };
        assert_eq!(func.body.len(), 2);
        let inner_if = match &func.body[0] {
            Node::If(i) => i,
            other => panic!("expected an if, got {:?}", other.kind()),
        };
        assert!(matches!(inner_if.body[0], Node::While(_)));
    }

    #[test]
    fn test_statement_span_monotonicity_in_bodies() {
        let source = "function f()\n\tvar a = 1\n\tvar b = 2\n\treturn a";
        let node = parse_single(source);
        let func = match node {
            Node::FunctionDecl(f) => f,
            _ => panic!("expected a function"),
        };
        let mut last = None;
        for stmt in &func.body {
            if let Some(prev) = last {
                assert!(stmt.span().start >= prev);
            }
            last = Some(stmt.span().start);
        }
    }
}
