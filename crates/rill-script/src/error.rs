use std::ops::Range;

use rill_core::CoreError;

/// Alias for `Result<T, ScriptError>`.
pub type ScriptResult<T> = Result<T, ScriptError>;

/// Errors raised while lexing, parsing, or executing a run-script.
///
/// Syntax errors carry a byte span into the script source so they can be
/// rendered as annotated reports; they abort the run at the offending line.
#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    /// The lexer hit a character outside the script alphabet.
    #[error("unexpected character {text:?}")]
    UnexpectedCharacter {
        /// The offending source text.
        text: String,
        /// Byte range of the offending text.
        span: Range<usize>,
    },

    /// A statement began with something that is not a command word.
    #[error("expected a command name")]
    ExpectedCommand {
        /// Byte range of the unexpected token.
        span: Range<usize>,
    },

    /// The command word is not part of the script language.
    #[error("unknown script command '{name}'")]
    UnknownCommand {
        /// The unrecognized command word.
        name: String,
        /// Byte range of the command word.
        span: Range<usize>,
    },

    /// A command's argument was missing, malformed, or superfluous.
    #[error("{message}")]
    BadArgument {
        /// What was expected instead.
        message: String,
        /// Byte range of the problem.
        span: Range<usize>,
    },

    /// A `level` command named a level that failed to load.
    #[error(transparent)]
    Level(#[from] CoreError),
}

impl ScriptError {
    /// The source span this error points at, if it is a syntax error.
    pub fn span(&self) -> Option<Range<usize>> {
        match self {
            Self::UnexpectedCharacter { span, .. }
            | Self::ExpectedCommand { span }
            | Self::UnknownCommand { span, .. }
            | Self::BadArgument { span, .. } => Some(span.clone()),
            Self::Level(_) => None,
        }
    }
}
