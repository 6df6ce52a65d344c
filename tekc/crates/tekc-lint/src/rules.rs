//! Built-in lint rules.
//!
//! A rule is a named unit with a severity level and a registration
//! function that binds walker callbacks. Rules that need ancestor
//! context share counters between their enter and leave closures
//! through an `Rc<RefCell<..>>`; the walker itself carries no state for
//! them.

use std::cell::RefCell;
use std::rc::Rc;

use tekc_par::{Node, NodeKind};
use tekc_util::Level;

use crate::walker::Walker;

/// A linter rule.
pub trait Rule {
    /// Stable rule name, e.g. `declarations-in-class`.
    fn name(&self) -> &'static str;

    /// One-line description of what the rule enforces.
    fn description(&self) -> &'static str;

    /// Severity of the diagnostics this rule reports.
    fn level(&self) -> Level;

    /// Binds the rule's callbacks onto the walker.
    fn register(&self, walker: &mut Walker);
}

/// Class bodies may only contain declarations.
///
/// Both the static and the instance sequence of a class are checked;
/// any entry that is not a declaration node is reported at its own
/// span.
pub struct DeclarationsInClass;

impl Rule for DeclarationsInClass {
    fn name(&self) -> &'static str {
        "declarations-in-class"
    }

    fn description(&self) -> &'static str {
        "class bodies may only contain declarations"
    }

    fn level(&self) -> Level {
        Level::Error
    }

    fn register(&self, walker: &mut Walker) {
        walker.on_enter(NodeKind::ClassDecl, self.level(), |node, reporter| {
            if let Node::ClassDecl(class) = node {
                for member in class.static_body.iter().chain(&class.instance_body) {
                    if !member.is_declaration() {
                        reporter.report(
                            "You can only put declarations in a class body",
                            member.span(),
                        );
                    }
                }
            }
        });
    }
}

/// `return`, `break`, `continue` and `fallthrough` only where they mean
/// something.
///
/// The walk maintains four counters: in-function, in-loop, in-switch
/// and in-case. Each control statement checks the counter it needs at
/// the moment it is entered.
pub struct InvalidControlStatement;

/// Shared counters for [`InvalidControlStatement`].
#[derive(Default)]
struct ControlContext {
    functions: u32,
    loops: u32,
    switches: u32,
    cases: u32,
}

impl Rule for InvalidControlStatement {
    fn name(&self) -> &'static str {
        "invalid-control-statement"
    }

    fn description(&self) -> &'static str {
        "control statements must appear inside a matching construct"
    }

    fn level(&self) -> Level {
        Level::Error
    }

    fn register(&self, walker: &mut Walker) {
        let context = Rc::new(RefCell::new(ControlContext::default()));
        let level = self.level();

        // Counter maintenance: enter increments, leave decrements.
        let counters: [(NodeKind, fn(&mut ControlContext) -> &mut u32); 6] = [
            (NodeKind::FunctionDecl, |c| &mut c.functions),
            (NodeKind::For, |c| &mut c.loops),
            (NodeKind::While, |c| &mut c.loops),
            (NodeKind::Repeat, |c| &mut c.loops),
            (NodeKind::Switch, |c| &mut c.switches),
            (NodeKind::SwitchCase, |c| &mut c.cases),
        ];
        for (kind, field) in counters {
            let on_enter = Rc::clone(&context);
            walker.on_enter(kind, level, move |_, _| {
                *field(&mut on_enter.borrow_mut()) += 1;
            });
            let on_leave = Rc::clone(&context);
            walker.on_leave(kind, level, move |_, _| {
                *field(&mut on_leave.borrow_mut()) -= 1;
            });
        }

        let returns = Rc::clone(&context);
        walker.on_enter(NodeKind::Return, level, move |node, reporter| {
            if returns.borrow().functions == 0 {
                reporter.report("You can only place return inside a function", node.span());
            }
        });

        let breaks = Rc::clone(&context);
        walker.on_enter(NodeKind::Break, level, move |node, reporter| {
            let context = breaks.borrow();
            if context.loops == 0 && context.cases == 0 {
                reporter.report(
                    "You can only place break inside a loop or switch case",
                    node.span(),
                );
            }
        });

        let continues = Rc::clone(&context);
        walker.on_enter(NodeKind::Continue, level, move |node, reporter| {
            if continues.borrow().loops == 0 {
                reporter.report("You can only place continue inside a loop", node.span());
            }
        });

        let fallthroughs = Rc::clone(&context);
        walker.on_enter(NodeKind::Fallthrough, level, move |node, reporter| {
            if fallthroughs.borrow().cases == 0 {
                reporter.report(
                    "You can only place fallthrough inside a switch case",
                    node.span(),
                );
            }
        });
    }
}
