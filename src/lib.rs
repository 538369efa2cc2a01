//! A file explorer driven by a handful of Unix-style commands.
//!
//! Everything except [`app`] is UI-independent: commands run against a
//! [`session::Session`] and report their outcome through a
//! [`notice::Reporter`].

pub mod app;
pub mod command;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod handlers;
pub mod history;
pub mod notice;
pub mod session;

pub use app::ExplorerApp;
pub use command::{syntax_hint, Action, ParsedCommand};
pub use config::AppConfig;
pub use dispatch::{DispatchTable, Dispatched};
pub use error::CommandError;
pub use notice::{Notice, NoticeQueue, Reporter, Severity};
pub use session::Session;
