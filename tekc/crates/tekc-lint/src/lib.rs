//! tekc-lint - Rule-Based AST Validation
//!
//! The linter performs the context-sensitive checks the grammar cannot
//! express: `return` only inside functions, declarations-only class
//! bodies, and so on. It is built from two pieces:
//!
//! - a [`Walker`] that drives a depth-first traversal and dispatches
//!   per-kind enter/leave callbacks in registration order, and
//! - [`Rule`]s, each a named check with a severity level and a
//!   registration function binding callbacks onto the walker.
//!
//! Violations never stop the traversal; the full diagnostic list comes
//! back when the walk completes.
//!
//! # Example
//!
//! ```
//! use tekc_lex::tokenize;
//! use tekc_lint::{default_rules, lint};
//! use tekc_par::{parse, Node};
//!
//! let tokens = tokenize("return").tokens;
//! let root = Node::Program(parse(&tokens).program);
//! let diagnostics = lint(&root, &default_rules());
//! assert_eq!(
//!     diagnostics[0].message,
//!     "You can only place return inside a function"
//! );
//! ```

mod rules;
mod walker;

pub use rules::{DeclarationsInClass, InvalidControlStatement, Rule};
pub use walker::{for_each_child, Callback, Reporter, Walker};

use indexmap::IndexMap;
use tekc_par::Node;
use tekc_util::Diagnostic;

/// The registry type rules are collected in: rule name to rule, in
/// registration order.
pub type RuleSet = IndexMap<&'static str, Box<dyn Rule>>;

/// The built-in rules, in a deterministic order.
pub fn default_rules() -> RuleSet {
    let rules: [Box<dyn Rule>; 2] = [
        Box::new(DeclarationsInClass),
        Box::new(InvalidControlStatement),
    ];

    let mut set = RuleSet::default();
    for rule in rules {
        set.insert(rule.name(), rule);
    }
    set
}

/// Walks `root` with every rule in `rules` registered and returns the
/// diagnostics they reported.
pub fn lint(root: &Node, rules: &RuleSet) -> Vec<Diagnostic> {
    let mut walker = Walker::new();
    for rule in rules.values() {
        rule.register(&mut walker);
    }
    walker.walk(root)
}
