//! Per-frame input fed in by the front-end.

/// Logical actions held this frame, plus characters typed since the last
/// frame (consumed by the easter-egg matcher).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InputState {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub fire: bool,
    pub pause: bool,
    pub typed: Vec<char>,
}

impl InputState {
    pub fn idle() -> Self {
        Self::default()
    }
}

/// Rolling buffer of the last few typed digits and dashes.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct KeySequence {
    buffer: String,
}

impl KeySequence {
    const CAPACITY: usize = 3;

    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one character. Returns true when the buffer now spells the
    /// secret (`67`, or `6-7` anywhere in it).
    pub fn push(&mut self, c: char) -> bool {
        if !(c.is_ascii_digit() || c == '-') {
            return false;
        }
        self.buffer.push(c);
        let excess = self.buffer.len().saturating_sub(Self::CAPACITY);
        self.buffer.drain(..excess);
        self.buffer.ends_with("67") || self.buffer.contains("6-7")
    }

    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }
}
