//! Diagnostic module - Error and warning reporting infrastructure.
//!
//! Every phase of the front-end reports problems through the same record
//! type. A [`Diagnostic`] carries a severity [`Level`], the [`Stage`]
//! that produced it, a message, a span, and zero or more secondary
//! [`DiagnosticInfo`] notes pointing at related locations.
//!
//! Phases collect diagnostics through a [`Handler`], an append-only sink
//! that the phase drains when it returns. No diagnostic is ever fatal at
//! the library boundary: each phase returns its best-effort artifact
//! alongside whatever it collected.
//!
//! # Examples
//!
//! ```
//! use tekc_util::diagnostic::{Handler, Stage};
//! use tekc_util::Span;
//!
//! let handler = Handler::new(Stage::Parser);
//! handler.error("expected a ')'", Span::DUMMY);
//!
//! assert!(handler.has_errors());
//! assert_eq!(handler.take().len(), 1);
//! ```

use crate::Span;
use std::cell::RefCell;
use std::fmt;

/// Diagnostic severity level
///
/// # Examples
///
/// ```
/// use tekc_util::diagnostic::Level;
///
/// assert_eq!(format!("{}", Level::Error), "error");
/// assert_eq!(format!("{}", Level::Warning), "warning");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Level {
    /// A violation of the language rules
    Error,
    /// A suspicious construct that does not prevent compilation
    Warning,
    /// Additional information about another diagnostic
    Info,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::Error => write!(f, "error"),
            Level::Warning => write!(f, "warning"),
            Level::Info => write!(f, "info"),
        }
    }
}

/// The front-end stage a diagnostic originated from
///
/// The stage is part of the stable diagnostic record so callers can
/// group or filter reports without parsing messages.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    /// Character stream to token stream
    Tokenizer,
    /// Token stream to AST
    Parser,
    /// AST validation rules
    Linter,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Tokenizer => write!(f, "tokenizer"),
            Stage::Parser => write!(f, "parser"),
            Stage::Linter => write!(f, "linter"),
        }
    }
}

/// A secondary note attached to a diagnostic
///
/// Info entries point at prior related spans, e.g. the class header a
/// stray expression belongs to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiagnosticInfo {
    /// Note text
    pub message: String,
    /// Location the note refers to
    pub span: Span,
}

/// A diagnostic message with severity, origin and location
///
/// # Examples
///
/// ```
/// use tekc_util::diagnostic::{Diagnostic, Level, Stage};
/// use tekc_util::Span;
///
/// let diag = Diagnostic::error(Stage::Tokenizer, "unexpected character '@'", Span::DUMMY);
/// assert_eq!(diag.level, Level::Error);
/// assert_eq!(diag.stage, Stage::Tokenizer);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    /// Diagnostic severity level
    pub level: Level,
    /// Front-end stage that produced the diagnostic
    pub stage: Stage,
    /// Main diagnostic message
    pub message: String,
    /// Source location
    pub span: Span,
    /// Secondary notes at related locations
    pub info: Vec<DiagnosticInfo>,
}

impl Diagnostic {
    /// Create a new diagnostic
    pub fn new(level: Level, stage: Stage, message: impl Into<String>, span: Span) -> Self {
        Self {
            level,
            stage,
            message: message.into(),
            span,
            info: Vec::new(),
        }
    }

    /// Create an error diagnostic
    pub fn error(stage: Stage, message: impl Into<String>, span: Span) -> Self {
        Self::new(Level::Error, stage, message, span)
    }

    /// Create a warning diagnostic
    pub fn warning(stage: Stage, message: impl Into<String>, span: Span) -> Self {
        Self::new(Level::Warning, stage, message, span)
    }

    /// Attach a secondary note at a related span
    ///
    /// # Examples
    ///
    /// ```
    /// use tekc_util::diagnostic::{Diagnostic, Stage};
    /// use tekc_util::Span;
    ///
    /// let diag = Diagnostic::error(Stage::Parser, "expected a '(' after this", Span::DUMMY)
    ///     .with_info("the call starts here", Span::DUMMY);
    /// assert_eq!(diag.info.len(), 1);
    /// ```
    pub fn with_info(mut self, message: impl Into<String>, span: Span) -> Self {
        self.info.push(DiagnosticInfo {
            message: message.into(),
            span,
        });
        self
    }
}

/// Handler for collecting diagnostics during a single phase
///
/// The handler is an append-only sink. It uses interior mutability so a
/// phase can report through a shared reference while its cursor state is
/// mutably borrowed.
///
/// # Examples
///
/// ```
/// use tekc_util::diagnostic::{Handler, Stage};
/// use tekc_util::Span;
///
/// let handler = Handler::new(Stage::Linter);
/// handler.warning("unused variable", Span::DUMMY);
/// assert_eq!(handler.warning_count(), 1);
/// assert!(!handler.has_errors());
/// ```
pub struct Handler {
    /// Stage stamped onto every collected diagnostic
    stage: Stage,
    /// Collected diagnostics, in report order
    diagnostics: RefCell<Vec<Diagnostic>>,
}

impl Handler {
    /// Create a new handler for the given stage
    pub fn new(stage: Stage) -> Self {
        Self {
            stage,
            diagnostics: RefCell::new(Vec::new()),
        }
    }

    /// The stage this handler reports for
    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Report an error
    pub fn error(&self, message: impl Into<String>, span: Span) {
        self.emit(Diagnostic::error(self.stage, message, span));
    }

    /// Report a warning
    pub fn warning(&self, message: impl Into<String>, span: Span) {
        self.emit(Diagnostic::warning(self.stage, message, span));
    }

    /// Emit a pre-built diagnostic
    pub fn emit(&self, diagnostic: Diagnostic) {
        self.diagnostics.borrow_mut().push(diagnostic);
    }

    /// Check if any errors have been reported
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .borrow()
            .iter()
            .any(|d| d.level == Level::Error)
    }

    /// Get the number of errors
    pub fn error_count(&self) -> usize {
        self.diagnostics
            .borrow()
            .iter()
            .filter(|d| d.level == Level::Error)
            .count()
    }

    /// Get the number of warnings
    pub fn warning_count(&self) -> usize {
        self.diagnostics
            .borrow()
            .iter()
            .filter(|d| d.level == Level::Warning)
            .count()
    }

    /// Get a copy of all collected diagnostics
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.diagnostics.borrow().clone()
    }

    /// Drain the collected diagnostics, leaving the handler empty
    pub fn take(&self) -> Vec<Diagnostic> {
        std::mem::take(&mut *self.diagnostics.borrow_mut())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_display() {
        assert_eq!(format!("{}", Level::Error), "error");
        assert_eq!(format!("{}", Level::Warning), "warning");
        assert_eq!(format!("{}", Level::Info), "info");
    }

    #[test]
    fn test_stage_display() {
        assert_eq!(format!("{}", Stage::Tokenizer), "tokenizer");
        assert_eq!(format!("{}", Stage::Parser), "parser");
        assert_eq!(format!("{}", Stage::Linter), "linter");
    }

    #[test]
    fn test_diagnostic_error() {
        let diag = Diagnostic::error(Stage::Parser, "test", Span::DUMMY);
        assert_eq!(diag.level, Level::Error);
        assert_eq!(diag.stage, Stage::Parser);
        assert_eq!(diag.message, "test");
        assert!(diag.info.is_empty());
    }

    #[test]
    fn test_diagnostic_with_info() {
        let diag = Diagnostic::error(Stage::Parser, "test", Span::DUMMY)
            .with_info("first note", Span::DUMMY)
            .with_info("second note", Span::DUMMY);
        assert_eq!(diag.info.len(), 2);
        assert_eq!(diag.info[0].message, "first note");
        assert_eq!(diag.info[1].message, "second note");
    }

    #[test]
    fn test_handler_counts() {
        let handler = Handler::new(Stage::Tokenizer);
        handler.error("first", Span::DUMMY);
        handler.warning("second", Span::DUMMY);
        handler.error("third", Span::DUMMY);

        assert!(handler.has_errors());
        assert_eq!(handler.error_count(), 2);
        assert_eq!(handler.warning_count(), 1);
    }

    #[test]
    fn test_handler_stamps_stage() {
        let handler = Handler::new(Stage::Linter);
        handler.error("oops", Span::DUMMY);
        assert_eq!(handler.diagnostics()[0].stage, Stage::Linter);
    }

    #[test]
    fn test_handler_take_drains() {
        let handler = Handler::new(Stage::Parser);
        handler.error("one", Span::DUMMY);
        let drained = handler.take();
        assert_eq!(drained.len(), 1);
        assert!(handler.diagnostics().is_empty());
        assert!(!handler.has_errors());
    }

    #[test]
    fn test_handler_preserves_order() {
        let handler = Handler::new(Stage::Parser);
        handler.error("a", Span::DUMMY);
        handler.warning("b", Span::DUMMY);
        handler.error("c", Span::DUMMY);

        let messages: Vec<_> = handler.take().into_iter().map(|d| d.message).collect();
        assert_eq!(messages, vec!["a", "b", "c"]);
    }
}
