//! The height-bounded scroll-back buffer.
//!
//! Capacity equals the visible log height, so the buffer never holds more
//! than one screen of history. All mutation happens on the session task;
//! the inbound pipeline reaches the buffer only through that task's
//! channel, so a render always observes whole updates.

use std::collections::VecDeque;

/// One rendered chat line. Private lines carry the flag that selects the
/// highlight attribute at render time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct LogLine {
    pub text: String,
    pub private: bool,
}

impl LogLine {
    pub fn public(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            private: false,
        }
    }

    pub fn private(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            private: true,
        }
    }
}

#[derive(Debug)]
pub(crate) struct ScrollBack {
    lines: VecDeque<LogLine>,
    capacity: usize,
}

impl ScrollBack {
    pub fn new(capacity: usize) -> Self {
        Self {
            lines: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn append(&mut self, line: LogLine) {
        self.lines.push_back(line);
        self.evict();
    }

    /// Appends a batch as one logical update. Eviction runs once at the
    /// end, so the oldest lines fall off the front even when the batch is
    /// larger than the remaining headroom.
    pub fn append_many(&mut self, lines: impl IntoIterator<Item = LogLine>) {
        for line in lines {
            self.lines.push_back(line);
        }
        self.evict();
    }

    /// Up to `count` most recent lines, oldest first.
    pub fn window(&self, count: usize) -> impl Iterator<Item = &LogLine> + '_ {
        let count = count.min(self.lines.len());
        self.lines.iter().skip(self.lines.len() - count)
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    fn evict(&mut self) {
        while self.lines.len() > self.capacity {
            self.lines.pop_front();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered(n: usize) -> LogLine {
        LogLine::public(format!("line {n}"))
    }

    #[test]
    fn append_never_exceeds_capacity() {
        let mut buffer = ScrollBack::new(3);
        for n in 0..10 {
            buffer.append(numbered(n));
            assert!(buffer.len() <= 3);
        }
        let texts: Vec<&str> = buffer.window(3).map(|l| l.text.as_str()).collect();
        assert_eq!(texts, vec!["line 7", "line 8", "line 9"]);
    }

    #[test]
    fn eviction_removes_oldest_first() {
        let mut buffer = ScrollBack::new(2);
        buffer.append(LogLine::public("first"));
        buffer.append(LogLine::public("second"));
        buffer.append(LogLine::public("third"));
        let texts: Vec<&str> = buffer.window(2).map(|l| l.text.as_str()).collect();
        assert_eq!(texts, vec!["second", "third"]);
    }

    #[test]
    fn bulk_append_evicts_down_to_capacity() {
        let mut buffer = ScrollBack::new(3);
        buffer.append(LogLine::public("old"));
        buffer.append_many((0..5).map(numbered));
        assert_eq!(buffer.len(), 3);
        let texts: Vec<&str> = buffer.window(10).map(|l| l.text.as_str()).collect();
        assert_eq!(texts, vec!["line 2", "line 3", "line 4"]);
    }

    #[test]
    fn window_clamps_count() {
        let mut buffer = ScrollBack::new(5);
        buffer.append_many((0..3).map(numbered));
        assert_eq!(buffer.window(0).count(), 0);
        assert_eq!(buffer.window(2).count(), 2);
        assert_eq!(buffer.window(100).count(), 3);
    }

    #[test]
    fn window_orders_oldest_first() {
        let mut buffer = ScrollBack::new(5);
        buffer.append_many((0..3).map(numbered));
        let texts: Vec<&str> = buffer.window(2).map(|l| l.text.as_str()).collect();
        assert_eq!(texts, vec!["line 1", "line 2"]);
    }

    #[test]
    fn clear_truncates() {
        let mut buffer = ScrollBack::new(5);
        buffer.append_many((0..3).map(numbered));
        buffer.clear();
        assert!(buffer.is_empty());
        assert_eq!(buffer.window(5).count(), 0);
    }
}
