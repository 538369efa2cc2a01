use log::{debug, info, warn};
use thiserror::Error;

use crate::command::{Action, ParsedCommand};
use crate::error::CommandResult;
use crate::handlers;
use crate::notice::{Notice, Reporter};
use crate::session::Session;

pub type Handler = fn(&mut Session, &ParsedCommand) -> CommandResult<Notice>;

const HANDLERS: [(Action, Handler); 14] = [
    (Action::Pwd, handlers::pwd as Handler),
    (Action::Cd, handlers::cd as Handler),
    (Action::Mv, handlers::mv as Handler),
    (Action::Cp, handlers::cp as Handler),
    (Action::Rm, handlers::rm as Handler),
    (Action::Touch, handlers::touch as Handler),
    (Action::Cat, handlers::cat as Handler),
    (Action::Echo, handlers::echo as Handler),
    (Action::Whoami, handlers::whoami as Handler),
    (Action::Chmod, handlers::chmod as Handler),
    (Action::Mkdir, handlers::mkdir as Handler),
    (Action::Rmdir, handlers::rmdir as Handler),
    (Action::Head, handlers::head as Handler),
    (Action::Tail, handlers::tail as Handler),
];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TableError {
    #[error("no handler registered for `{0}`")]
    Missing(Action),
    #[error("more than one handler registered for `{0}`")]
    Duplicate(Action),
}

/// What happened to a submitted line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatched {
    Empty,
    Unknown,
    Ran { action: Action, succeeded: bool },
}

/// Maps every [`Action`] to exactly one handler.
pub struct DispatchTable {
    handlers: Vec<Handler>,
}

impl DispatchTable {
    pub fn new() -> Result<Self, TableError> {
        Self::from_entries(&HANDLERS)
    }

    pub fn from_entries(entries: &[(Action, Handler)]) -> Result<Self, TableError> {
        let mut slots: [Option<Handler>; 14] = [None; 14];
        for &(action, handler) in entries {
            let slot = &mut slots[action as usize];
            if slot.is_some() {
                return Err(TableError::Duplicate(action));
            }
            *slot = Some(handler);
        }

        let mut handlers = Vec::with_capacity(Action::ALL.len());
        for action in Action::ALL {
            handlers.push(slots[action as usize].ok_or(TableError::Missing(action))?);
        }
        Ok(Self { handlers })
    }

    /// Runs one command line against the session. Every failure ends up at
    /// the reporter; nothing propagates to the caller.
    pub fn process_command(
        &self,
        session: &mut Session,
        raw: &str,
        reporter: &mut dyn Reporter,
    ) -> Dispatched {
        let Some(command) = ParsedCommand::parse(raw) else {
            return Dispatched::Empty;
        };
        let Some(action) = command.action() else {
            debug!("ignoring unknown action `{}`", command.action_token());
            return Dispatched::Unknown;
        };

        info!("{} {:?}", action, command.args());
        let handler = self.handlers[action as usize];
        let result = handler(session, &command).and_then(|notice| {
            if action.refreshes_listing() {
                session.refresh_listing()?;
            }
            Ok(notice)
        });

        match result {
            Ok(notice) => {
                reporter.report(notice);
                Dispatched::Ran {
                    action,
                    succeeded: true,
                }
            }
            Err(err) => {
                warn!("{} failed: {}", action, err);
                reporter.report(Notice::error(err.to_string()));
                Dispatched::Ran {
                    action,
                    succeeded: false,
                }
            }
        }
    }
}
