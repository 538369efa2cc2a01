/// Previously submitted lines, walked with the arrow keys.
#[derive(Debug, Clone)]
pub struct CommandHistory {
    entries: Vec<String>,
    index: Option<usize>,
    limit: usize,
}

impl CommandHistory {
    pub fn new(limit: usize) -> Self {
        Self {
            entries: Vec::new(),
            index: None,
            limit: limit.max(1),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Records a submitted line and resets navigation.
    pub fn push(&mut self, line: &str) {
        self.index = None;
        if line.trim().is_empty() || self.entries.last().map(String::as_str) == Some(line) {
            return;
        }
        self.entries.push(line.to_string());
        if self.entries.len() > self.limit {
            let overflow = self.entries.len() - self.limit;
            self.entries.drain(..overflow);
        }
    }

    /// One step older. Sticks at the oldest entry.
    pub fn older(&mut self) -> Option<&str> {
        if self.entries.is_empty() {
            return None;
        }
        let index = match self.index {
            None => self.entries.len() - 1,
            Some(index) => index.saturating_sub(1),
        };
        self.index = Some(index);
        self.entries.get(index).map(String::as_str)
    }

    /// One step newer. Past the newest returns `Some("")` so the field clears.
    pub fn newer(&mut self) -> Option<&str> {
        let index = self.index?;
        if index + 1 >= self.entries.len() {
            self.index = None;
            return Some("");
        }
        self.index = Some(index + 1);
        self.entries.get(index + 1).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_older_walks_back_and_sticks() {
        let mut history = CommandHistory::new(10);
        history.push("pwd");
        history.push("cd /tmp");
        assert_eq!(history.older(), Some("cd /tmp"));
        assert_eq!(history.older(), Some("pwd"));
        assert_eq!(history.older(), Some("pwd"));
    }

    #[test]
    fn test_newer_returns_to_empty() {
        let mut history = CommandHistory::new(10);
        history.push("pwd");
        history.push("whoami");
        assert_eq!(history.newer(), None);
        history.older();
        history.older();
        assert_eq!(history.newer(), Some("whoami"));
        assert_eq!(history.newer(), Some(""));
        assert_eq!(history.newer(), None);
    }

    #[test]
    fn test_consecutive_duplicates_and_blanks_skipped() {
        let mut history = CommandHistory::new(10);
        history.push("pwd");
        history.push("pwd");
        history.push("   ");
        history.push("whoami");
        history.push("pwd");
        assert_eq!(history.len(), 3);
    }

    #[test]
    fn test_limit_drops_oldest() {
        let mut history = CommandHistory::new(2);
        history.push("one");
        history.push("two");
        history.push("three");
        assert_eq!(history.len(), 2);
        assert_eq!(history.older(), Some("three"));
        assert_eq!(history.older(), Some("two"));
        assert_eq!(history.older(), Some("two"));
    }

    #[test]
    fn test_push_resets_navigation() {
        let mut history = CommandHistory::new(10);
        history.push("one");
        history.push("two");
        history.older();
        history.older();
        history.push("three");
        assert_eq!(history.older(), Some("three"));
    }
}
