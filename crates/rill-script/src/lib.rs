//! The rill run-script language.
//!
//! A tiny line-oriented surface for driving headless simulations: load a
//! level, advance ticks (or wall-clock milliseconds, rounded up to whole
//! ticks), and add or remove walls mid-run. The interpreter owns no
//! simulation logic — every command maps onto the engine's `tick` or the
//! world's wall primitives — so scripted runs behave exactly like
//! interactive ones.
//!
//! ```text
//! level corridor
//! wait 6          # let the stream reach the sink
//! add 4,1         # split it mid-flow
//! wait 1          # the severed fragment is pruned
//! ```

/// Command AST.
pub mod command;
/// Rendering of script errors as annotated reports.
pub mod diagnostics;
/// Error types for the crate.
pub mod error;
/// Token definitions and the logos lexer.
pub mod lexer;
/// The statement parser.
pub mod parser;
/// The command interpreter.
pub mod runner;

/// Re-exports of [`command::Command`] and [`command::SpannedCommand`].
pub use command::{Command, SpannedCommand};
/// Re-export of [`diagnostics::render_script_error`].
pub use diagnostics::render_script_error;
/// Re-exports of [`error::ScriptError`] and [`error::ScriptResult`].
pub use error::{ScriptError, ScriptResult};
/// Re-export of [`parser::parse`].
pub use parser::parse;
/// Re-export of [`runner::ScriptRunner`].
pub use runner::ScriptRunner;
