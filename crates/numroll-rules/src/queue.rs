//! The message under construction.

use numroll_core::MessageMode;

/// Ordered text segments, optionally seeded with the default message at
/// position 0. Blank text is never enqueued.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageQueue {
    segments: Vec<String>,
    has_seed: bool,
}

fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

impl MessageQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue holding only `seed`, or an empty queue when `seed` is blank.
    pub fn seeded(seed: &str) -> Self {
        if is_blank(seed) {
            return Self::new();
        }
        Self {
            segments: vec![seed.to_string()],
            has_seed: true,
        }
    }

    pub fn add(&mut self, text: &str) {
        if is_blank(text) {
            return;
        }
        self.segments.push(text.to_string());
    }

    /// Replace the most recent segment, which may be the seed.
    pub fn replace_last(&mut self, text: &str) {
        if is_blank(text) {
            return;
        }
        if self.segments.pop().is_some() && self.segments.is_empty() {
            self.has_seed = false;
        }
        self.segments.push(text.to_string());
    }

    /// Keep only the seed (if still present), then append.
    pub fn replace_except_default(&mut self, text: &str) {
        if is_blank(text) {
            return;
        }
        self.segments.truncate(usize::from(self.has_seed));
        self.segments.push(text.to_string());
    }

    /// Drop everything including the seed, then append.
    pub fn replace_all(&mut self, text: &str) {
        if is_blank(text) {
            return;
        }
        self.segments.clear();
        self.has_seed = false;
        self.segments.push(text.to_string());
    }

    pub fn apply(&mut self, mode: MessageMode, text: &str) {
        match mode {
            MessageMode::Add => self.add(text),
            MessageMode::ReplaceLast => self.replace_last(text),
            MessageMode::ReplaceExceptDefault => self.replace_except_default(text),
            MessageMode::ReplaceAll => self.replace_all(text),
        }
    }

    /// Segments joined by single spaces.
    pub fn render(&self) -> String {
        self.segments.join(" ")
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Whether the seed segment is still at position 0.
    pub fn has_seed(&self) -> bool {
        self.has_seed
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}
