use thiserror::Error;

use crate::command::Action;

/// Everything a handler can fail with. The dispatcher turns each of these
/// into an error notice using its `Display` text.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("{action}: missing argument {position}")]
    MissingArgument { action: Action, position: usize },

    #[error("echo: expected '>' followed by a file name")]
    MissingRedirect,

    #[error("chmod: invalid mode: '{mode}'")]
    InvalidMode { mode: String },

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{stderr}")]
    Subprocess { stderr: String },
}

pub type CommandResult<T> = Result<T, CommandError>;
