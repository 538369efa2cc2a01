use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// State the window renders: where we are, what is here, and the output box.
#[derive(Debug)]
pub struct Session {
    cwd: PathBuf,
    listing: Vec<String>,
    output: Vec<String>,
}

impl Session {
    /// Starts from the process working directory.
    pub fn new() -> io::Result<Self> {
        let mut session = Self {
            cwd: env::current_dir()?,
            listing: Vec::new(),
            output: Vec::new(),
        };
        session.refresh_listing()?;
        Ok(session)
    }

    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    pub fn listing(&self) -> &[String] {
        &self.listing
    }

    pub fn output(&self) -> &[String] {
        &self.output
    }

    pub fn path_label(&self) -> String {
        format!("Current Directory: {}", self.cwd.display())
    }

    /// Changes the OS working directory and mirrors it. On failure nothing
    /// about the session changes.
    pub fn change_dir(&mut self, path: &Path) -> io::Result<&Path> {
        env::set_current_dir(path)?;
        self.cwd = env::current_dir()?;
        Ok(&self.cwd)
    }

    /// Re-reads the working directory in whatever order the OS returns.
    /// A failed read leaves the listing empty, never showing another directory.
    pub fn refresh_listing(&mut self) -> io::Result<()> {
        self.listing.clear();
        let mut listing = Vec::new();
        for entry in fs::read_dir(&self.cwd)? {
            let entry = entry?;
            listing.push(entry.file_name().to_string_lossy().into_owned());
        }
        self.listing = listing;
        Ok(())
    }

    pub fn set_output<I, S>(&mut self, lines: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.output = lines.into_iter().map(Into::into).collect();
    }
}
