//! tekc-drv - Front-End Driver
//!
//! The driver composes the three front-end phases and hosts the `tekc`
//! binary. The pipeline is strictly staged:
//!
//! ```text
//! source text ──► tokenize ──► parse ──► lint ──► diagnostics
//! ```
//!
//! Every stage runs regardless of what the stage before it reported:
//! the parser always receives the token stream and the linter always
//! receives the AST. The final diagnostic list is the concatenation of
//! each stage's list in pipeline order. No diagnostic is fatal at the
//! library boundary; the binary treats error-level diagnostics as a
//! failed compile.

use std::fmt::Write as _;
use std::path::PathBuf;

use thiserror::Error;

use tekc_lex::tokenize;
use tekc_lint::{default_rules, lint};
use tekc_par::{parse, Node};
use tekc_util::{Diagnostic, Level};

/// Result of running the full front-end over one source text.
#[derive(Debug)]
pub struct FrontEnd {
    /// The program root, always a [`Node::Program`]
    pub ast: Node,
    /// All diagnostics, in pipeline order
    pub diagnostics: Vec<Diagnostic>,
}

/// Runs tokenizer, parser and linter over a source text.
///
/// # Example
///
/// ```
/// use tekc_drv::compile_front_end;
///
/// let result = compile_front_end("var x: Int = 1 + 2");
/// assert!(result.diagnostics.is_empty());
/// ```
pub fn compile_front_end(source: &str) -> FrontEnd {
    let lexed = tokenize(source);
    let parsed = parse(&lexed.tokens);
    let ast = Node::Program(parsed.program);

    let mut diagnostics = lexed.diagnostics;
    diagnostics.extend(parsed.diagnostics);
    diagnostics.extend(lint(&ast, &default_rules()));

    FrontEnd { ast, diagnostics }
}

/// Errors the driver itself can fail with, as opposed to diagnostics in
/// the compiled source.
#[derive(Debug, Error)]
pub enum DriverError {
    /// The input file could not be read
    #[error("failed to read {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The command line was not understood
    #[error("usage: tekc [--emit-tokens | --emit-ast] <file.tek>")]
    Usage,

    /// The source compiled with error-level diagnostics
    #[error("compilation failed with {0} error(s)")]
    CompilationFailed(usize),
}

/// What the binary should print.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Emit {
    /// Diagnostics only (the default)
    #[default]
    Diagnostics,
    /// The token stream, then diagnostics
    Tokens,
    /// The AST debug dump, then diagnostics
    Ast,
}

/// Driver configuration parsed from the command line.
#[derive(Debug)]
pub struct Config {
    /// Input source file
    pub input: PathBuf,
    /// What to print
    pub emit: Emit,
}

impl Config {
    /// Parses a command line (without the program name).
    pub fn from_args(args: impl IntoIterator<Item = String>) -> Result<Self, DriverError> {
        let mut emit = Emit::Diagnostics;
        let mut input = None;

        for arg in args {
            match arg.as_str() {
                "--emit-tokens" => emit = Emit::Tokens,
                "--emit-ast" => emit = Emit::Ast,
                _ if arg.starts_with("--") => return Err(DriverError::Usage),
                _ => {
                    if input.replace(PathBuf::from(arg)).is_some() {
                        return Err(DriverError::Usage);
                    }
                },
            }
        }

        Ok(Config {
            input: input.ok_or(DriverError::Usage)?,
            emit,
        })
    }
}

/// Runs the driver: reads the input, compiles it and prints what the
/// configuration asks for.
///
/// Diagnostics go to stdout. Returns an error when any error-level
/// diagnostic was produced, so the binary exits non-zero.
pub fn run(config: &Config) -> Result<(), DriverError> {
    let source = std::fs::read_to_string(&config.input).map_err(|source| {
        DriverError::ReadFailed {
            path: config.input.clone(),
            source,
        }
    })?;

    let diagnostics = match config.emit {
        Emit::Tokens => {
            let lexed = tokenize(&source);
            for token in &lexed.tokens {
                println!("{:?} {:?} @ {}", token.kind, token.lexeme, token.span);
            }
            lexed.diagnostics
        },
        Emit::Ast => {
            let result = compile_front_end(&source);
            println!("{:#?}", result.ast);
            result.diagnostics
        },
        Emit::Diagnostics => compile_front_end(&source).diagnostics,
    };

    for diagnostic in &diagnostics {
        println!("{}", render_diagnostic(diagnostic));
    }

    let errors = diagnostics
        .iter()
        .filter(|d| d.level == Level::Error)
        .count();
    if errors > 0 {
        return Err(DriverError::CompilationFailed(errors));
    }
    Ok(())
}

/// Renders one diagnostic as plain text.
///
/// The format is `level[stage]: message @ start`, with each `info` note
/// on an indented line of its own. Anything richer is the caller's
/// business; the stable record is the [`Diagnostic`] itself.
pub fn render_diagnostic(diagnostic: &Diagnostic) -> String {
    let mut text = format!(
        "{}[{}]: {} @ {}",
        diagnostic.level, diagnostic.stage, diagnostic.message, diagnostic.span.start
    );
    for info in &diagnostic.info {
        write!(text, "\n  note: {} @ {}", info.message, info.span.start).unwrap();
    }
    text
}
