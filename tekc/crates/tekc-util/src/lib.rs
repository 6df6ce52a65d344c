//! tekc-util - Core Utilities and Foundation Types
//!
//! This crate provides the foundation types shared by every phase of the
//! Tek front-end: source positions and spans, and the diagnostic
//! primitives each phase reports through.
//!
//! The types here are deliberately small and copyable. A [`Span`] is a
//! pair of `(line, column)` positions, a [`Diagnostic`] is a plain record
//! the caller may render however it wishes, and a [`Handler`] is an
//! append-only sink a phase writes into while it runs.

pub mod diagnostic;
pub mod span;

pub use diagnostic::{Diagnostic, DiagnosticInfo, Handler, Level, Stage};
pub use span::{Position, Span};

// Re-export commonly used types
pub use rustc_hash::FxHashMap;
pub use rustc_hash::FxHashSet;
