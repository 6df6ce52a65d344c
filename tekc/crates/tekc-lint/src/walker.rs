//! Depth-first AST walker with per-kind callbacks.
//!
//! Rules register enter and leave callbacks keyed by [`NodeKind`]. The
//! walker visits every node depth-first: enter callbacks run in
//! registration order before the children, leave callbacks run in
//! registration order after the subtree is fully visited. The walker
//! itself is stateless aside from this ordering; rules that need
//! ancestor context keep their own stacks or counters inside their
//! closures.
//!
//! Callbacks receive the node and a [`Reporter`] bound to the rule's
//! severity level; `report(message, span)` records a linter diagnostic.

use tekc_par::{Node, NodeKind};
use tekc_util::{Diagnostic, FxHashMap, Level, Span, Stage};

/// The diagnostic sink handed to rule callbacks.
///
/// Bound to the severity level the callback was registered with, so a
/// rule only ever decides *where* and *what*, never *how loud*.
pub struct Reporter<'a> {
    level: Level,
    out: &'a mut Vec<Diagnostic>,
}

impl Reporter<'_> {
    /// Records a linter diagnostic at the callback's registered level.
    pub fn report(&mut self, message: impl Into<String>, span: Span) {
        self.out
            .push(Diagnostic::new(self.level, Stage::Linter, message, span));
    }
}

/// A rule callback.
pub type Callback = Box<dyn FnMut(&Node, &mut Reporter)>;

/// One registered callback with the level its diagnostics carry.
struct Registered {
    level: Level,
    callback: Callback,
}

/// Depth-first traversal driver.
///
/// # Example
///
/// ```
/// use tekc_lint::Walker;
/// use tekc_par::NodeKind;
/// use tekc_util::Level;
///
/// let mut walker = Walker::new();
/// walker.on_enter(NodeKind::Return, Level::Error, |node, reporter| {
///     reporter.report("no returns allowed here", node.span());
/// });
/// ```
#[derive(Default)]
pub struct Walker {
    enter: FxHashMap<NodeKind, Vec<Registered>>,
    leave: FxHashMap<NodeKind, Vec<Registered>>,
    diagnostics: Vec<Diagnostic>,
}

impl Walker {
    /// Creates a walker with no registered callbacks.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a callback to run when a node of `kind` is entered,
    /// before its children are visited.
    pub fn on_enter(
        &mut self,
        kind: NodeKind,
        level: Level,
        callback: impl FnMut(&Node, &mut Reporter) + 'static,
    ) {
        self.enter.entry(kind).or_default().push(Registered {
            level,
            callback: Box::new(callback),
        });
    }

    /// Registers a callback to run when a node of `kind` is left, after
    /// its subtree is fully visited.
    pub fn on_leave(
        &mut self,
        kind: NodeKind,
        level: Level,
        callback: impl FnMut(&Node, &mut Reporter) + 'static,
    ) {
        self.leave.entry(kind).or_default().push(Registered {
            level,
            callback: Box::new(callback),
        });
    }

    /// Walks the tree rooted at `root` and returns the diagnostics the
    /// callbacks reported, in report order.
    pub fn walk(mut self, root: &Node) -> Vec<Diagnostic> {
        self.visit(root);
        self.diagnostics
    }

    fn visit(&mut self, node: &Node) {
        Self::run_callbacks(&mut self.enter, node, &mut self.diagnostics);
        for_each_child(node, &mut |child| self.visit(child));
        Self::run_callbacks(&mut self.leave, node, &mut self.diagnostics);
    }

    fn run_callbacks(
        callbacks: &mut FxHashMap<NodeKind, Vec<Registered>>,
        node: &Node,
        out: &mut Vec<Diagnostic>,
    ) {
        if let Some(list) = callbacks.get_mut(&node.kind()) {
            for registered in list {
                let mut reporter = Reporter {
                    level: registered.level,
                    out,
                };
                (registered.callback)(node, &mut reporter);
            }
        }
    }
}

/// Applies `f` to every direct child of `node`, in source order.
///
/// Class members run static body first, then instance body, matching the
/// order the node stores them in.
pub fn for_each_child<'n>(node: &'n Node, f: &mut dyn FnMut(&'n Node)) {
    match node {
        Node::Program(program) => program.body.iter().for_each(f),
        Node::VariableDecl(decl) => f(&decl.init),
        Node::EmptyVariableDecl(_) => {},
        Node::FunctionDecl(decl) => decl.body.iter().for_each(f),
        Node::ClassDecl(class) => {
            class.static_body.iter().for_each(&mut *f);
            class.instance_body.iter().for_each(f);
        },
        Node::ImportDecl(_) => {},
        Node::Literal(_) | Node::Identifier(_) | Node::This(_) | Node::Super(_) => {},
        Node::Unary(unary) => f(&unary.operand),
        Node::Binary(binary) => {
            f(&binary.left);
            f(&binary.right);
        },
        Node::Wrapped(wrapped) => f(&wrapped.expr),
        Node::Call(call) => {
            f(&call.callee);
            call.args.iter().for_each(f);
        },
        Node::Index(index) => {
            f(&index.object);
            f(&index.index);
        },
        Node::Member(member) => f(&member.object),
        Node::New(new) => {
            f(&new.object);
            new.args.iter().for_each(f);
        },
        Node::InstanceOf(test) => f(&test.object),
        Node::Async(node) => f(&node.expr),
        Node::Array(array) => array.elements.iter().for_each(f),
        Node::Object(object) => {
            for prop in &object.props {
                f(&prop.value);
            }
        },
        Node::If(stmt) => {
            f(&stmt.condition);
            stmt.body.iter().for_each(&mut *f);
            if let Some(else_body) = &stmt.else_body {
                else_body.iter().for_each(f);
            }
        },
        Node::Switch(stmt) => {
            f(&stmt.discriminant);
            stmt.cases.iter().for_each(&mut *f);
            if let Some(default_body) = &stmt.default_body {
                default_body.iter().for_each(f);
            }
        },
        Node::SwitchCase(case) => {
            f(&case.test);
            case.body.iter().for_each(f);
        },
        Node::For(stmt) => {
            f(&stmt.iterable);
            stmt.body.iter().for_each(f);
        },
        Node::While(stmt) => {
            f(&stmt.condition);
            stmt.body.iter().for_each(f);
        },
        Node::Repeat(stmt) => {
            f(&stmt.count);
            stmt.body.iter().for_each(f);
        },
        Node::Try(stmt) => {
            stmt.body.iter().for_each(&mut *f);
            stmt.catch_body.iter().for_each(&mut *f);
            if let Some(finally_body) = &stmt.finally_body {
                finally_body.iter().for_each(f);
            }
        },
        Node::Throw(stmt) => f(&stmt.value),
        Node::Return(stmt) => {
            if let Some(value) = &stmt.value {
                f(value);
            }
        },
        Node::Break(_) | Node::Continue(_) | Node::Fallthrough(_) => {},
        Node::ExpressionStmt(stmt) => f(&stmt.expr),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;
    use tekc_lex::tokenize;
    use tekc_par::parse;

    fn parse_root(source: &str) -> Node {
        let tokens = tokenize(source).tokens;
        Node::Program(parse(&tokens).program)
    }

    fn preorder_kinds(root: &Node) -> Vec<NodeKind> {
        let mut kinds = Vec::new();
        fn collect(node: &Node, kinds: &mut Vec<NodeKind>) {
            kinds.push(node.kind());
            for_each_child(node, &mut |child| collect(child, kinds));
        }
        collect(root, &mut kinds);
        kinds
    }

    #[test]
    fn test_enter_callbacks_run_in_registration_order() {
        let root = parse_root("x");
        let order = Rc::new(RefCell::new(Vec::new()));

        let mut walker = Walker::new();
        let first = Rc::clone(&order);
        walker.on_enter(NodeKind::Identifier, Level::Warning, move |_, _| {
            first.borrow_mut().push("first");
        });
        let second = Rc::clone(&order);
        walker.on_enter(NodeKind::Identifier, Level::Warning, move |_, _| {
            second.borrow_mut().push("second");
        });

        walker.walk(&root);
        assert_eq!(*order.borrow(), vec!["first", "second"]);
    }

    #[test]
    fn test_enter_descend_leave_ordering() {
        let root = parse_root("fn(x)");
        let events = Rc::new(RefCell::new(Vec::new()));

        let mut walker = Walker::new();
        for kind in [NodeKind::Call, NodeKind::Identifier] {
            let enter = Rc::clone(&events);
            walker.on_enter(kind, Level::Warning, move |node, _| {
                enter.borrow_mut().push(("enter", node.kind()));
            });
            let leave = Rc::clone(&events);
            walker.on_leave(kind, Level::Warning, move |node, _| {
                leave.borrow_mut().push(("leave", node.kind()));
            });
        }

        walker.walk(&root);
        assert_eq!(
            *events.borrow(),
            vec![
                ("enter", NodeKind::Call),
                ("enter", NodeKind::Identifier),
                ("leave", NodeKind::Identifier),
                ("enter", NodeKind::Identifier),
                ("leave", NodeKind::Identifier),
                ("leave", NodeKind::Call),
            ]
        );
    }

    #[test]
    fn test_report_is_tagged_linter_at_registered_level() {
        let root = parse_root("x");

        let mut walker = Walker::new();
        walker.on_enter(NodeKind::Identifier, Level::Warning, |node, reporter| {
            reporter.report("flagged", node.span());
        });

        let diagnostics = walker.walk(&root);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].level, Level::Warning);
        assert_eq!(diagnostics[0].stage, Stage::Linter);
        assert_eq!(diagnostics[0].message, "flagged");
    }

    #[test]
    fn test_walk_visits_nested_bodies() {
        let source = "function f()\n\tif a\n\t\treturn 1\nclass C\n\tvar x: Int = 0";
        let root = parse_root(source);
        let kinds = preorder_kinds(&root);
        assert!(kinds.contains(&NodeKind::Return));
        assert!(kinds.contains(&NodeKind::VariableDecl));
        assert!(kinds.contains(&NodeKind::If));
    }

    #[test]
    fn test_preorder_is_stable_across_walks() {
        let source = "switch x\n\tcase 1\n\t\tfn([1, 2])\n\tdefault\n\t\tthrow e";
        let root = parse_root(source);
        assert_eq!(preorder_kinds(&root), preorder_kinds(&root));
    }

    #[test]
    fn test_walker_without_callbacks_reports_nothing() {
        let root = parse_root("var x = fn(1)[2].y");
        let diagnostics = Walker::new().walk(&root);
        assert!(diagnostics.is_empty());
    }
}
