use std::fmt;
use std::str::FromStr;

/// Shown in the syntax box when the first token is not a known action.
pub const NOT_RECOGNIZED: &str = "Command not recognized.";

/// The fourteen actions the explorer understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Pwd,
    Cd,
    Mv,
    Cp,
    Rm,
    Touch,
    Cat,
    Echo,
    Whoami,
    Chmod,
    Mkdir,
    Rmdir,
    Head,
    Tail,
}

impl Action {
    pub const ALL: [Action; 14] = [
        Action::Pwd,
        Action::Cd,
        Action::Mv,
        Action::Cp,
        Action::Rm,
        Action::Touch,
        Action::Cat,
        Action::Echo,
        Action::Whoami,
        Action::Chmod,
        Action::Mkdir,
        Action::Rmdir,
        Action::Head,
        Action::Tail,
    ];

    pub fn keyword(self) -> &'static str {
        match self {
            Action::Pwd => "pwd",
            Action::Cd => "cd",
            Action::Mv => "mv",
            Action::Cp => "cp",
            Action::Rm => "rm",
            Action::Touch => "touch",
            Action::Cat => "cat",
            Action::Echo => "echo",
            Action::Whoami => "whoami",
            Action::Chmod => "chmod",
            Action::Mkdir => "mkdir",
            Action::Rmdir => "rmdir",
            Action::Head => "head",
            Action::Tail => "tail",
        }
    }

    pub fn usage(self) -> &'static str {
        match self {
            Action::Pwd => "Usage: pwd",
            Action::Cd => "Usage: cd <directory_path>",
            Action::Mv => "Usage: mv <source> <destination>",
            Action::Cp => "Usage: cp <source> <destination>",
            Action::Rm => "Usage: rm <file_path>",
            Action::Touch => "Usage: touch <file_name>",
            Action::Cat => "Usage: cat <file_name>",
            Action::Echo => "Usage: echo 'text' > <file_name>",
            Action::Whoami => "Usage: whoami",
            Action::Chmod => "Usage: chmod <mode> <file_path>",
            Action::Mkdir => "Usage: mkdir <directory_name>",
            Action::Rmdir => "Usage: rmdir <directory_name>",
            Action::Head => "Usage: head <file_name>",
            Action::Tail => "Usage: tail <file_name>",
        }
    }

    /// Whether a successful run changes what the directory listing shows.
    pub fn refreshes_listing(self) -> bool {
        matches!(
            self,
            Action::Cd
                | Action::Mv
                | Action::Cp
                | Action::Rm
                | Action::Touch
                | Action::Echo
                | Action::Mkdir
                | Action::Rmdir
        )
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownAction(pub String);

impl FromStr for Action {
    type Err = UnknownAction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Action::ALL
            .iter()
            .copied()
            .find(|action| action.keyword() == s)
            .ok_or_else(|| UnknownAction(s.to_string()))
    }
}

/// One submitted command line, split on whitespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommand {
    raw: String,
    tokens: Vec<String>,
}

impl ParsedCommand {
    /// Returns `None` when the line holds no tokens at all.
    pub fn parse(raw: &str) -> Option<Self> {
        let tokens: Vec<String> = raw.split_whitespace().map(str::to_string).collect();
        if tokens.is_empty() {
            return None;
        }
        Some(Self {
            raw: raw.to_string(),
            tokens,
        })
    }

    pub fn action_token(&self) -> &str {
        &self.tokens[0]
    }

    pub fn action(&self) -> Option<Action> {
        self.action_token().parse().ok()
    }

    /// Argument `position`, counting from 1 like the tokens after the action.
    pub fn arg(&self, position: usize) -> Option<&str> {
        if position == 0 {
            return None;
        }
        self.tokens.get(position).map(String::as_str)
    }

    pub fn args(&self) -> &[String] {
        &self.tokens[1..]
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }
}

/// Usage line for whatever the user has typed so far.
pub fn syntax_hint(input: &str) -> &'static str {
    input
        .split_whitespace()
        .next()
        .and_then(|token| token.parse::<Action>().ok())
        .map(Action::usage)
        .unwrap_or(NOT_RECOGNIZED)
}
