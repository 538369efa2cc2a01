use std::collections::VecDeque;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Status bar only.
    Info,
    Success,
    Error,
}

/// The outcome of one command as shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub severity: Severity,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Info,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
        }
    }

    pub fn title(&self) -> &'static str {
        match self.severity {
            Severity::Info => "Info",
            Severity::Success => "Success",
            Severity::Error => "Error",
        }
    }

    /// Success and error outcomes block the window until acknowledged.
    pub fn is_modal(&self) -> bool {
        self.severity != Severity::Info
    }
}

/// Where command outcomes go. The window shows them as dialogs; tests
/// just collect them.
pub trait Reporter {
    fn report(&mut self, notice: Notice);
}

/// FIFO of outcomes waiting to be shown, plus the last status line.
#[derive(Debug)]
pub struct NoticeQueue {
    pending: VecDeque<Notice>,
    status: String,
}

impl Default for NoticeQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl NoticeQueue {
    pub fn new() -> Self {
        Self {
            pending: VecDeque::new(),
            status: "Ready".to_string(),
        }
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    /// The dialog that should currently be on screen.
    pub fn current(&self) -> Option<&Notice> {
        self.pending.front()
    }

    pub fn dismiss(&mut self) -> Option<Notice> {
        self.pending.pop_front()
    }

    pub fn is_blocking(&self) -> bool {
        !self.pending.is_empty()
    }
}

impl Reporter for NoticeQueue {
    fn report(&mut self, notice: Notice) {
        self.status = notice.message.clone();
        if notice.is_modal() {
            self.pending.push_back(notice);
        }
    }
}

impl Reporter for Vec<Notice> {
    fn report(&mut self, notice: Notice) {
        self.push(notice);
    }
}
