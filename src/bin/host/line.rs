//! Line assembly for bytes received from the monitor.
//!
//! Serial reads return arbitrary chunks. `LineAssembler` buffers them into
//! complete lines, drops the `\r` of `\r\n` endings and strips ANSI escape
//! sequences (the banner starts with a clear-screen sequence).

/// Longest line kept before it is flushed unterminated.
const MAX_LINE: usize = 1024;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum State {
    Normal,

    /// Saw ESC
    Escape,

    /// Inside ESC [ ... (control sequence)
    ControlSequence,
}

#[derive(Debug)]
pub struct LineAssembler {
    state: State,
    buffer: Vec<u8>,
}

impl LineAssembler {
    pub fn new() -> Self {
        Self {
            state: State::Normal,
            buffer: Vec::new(),
        }
    }

    /// Feed received bytes; returns the lines completed by them.
    ///
    /// Empty lines are skipped.
    pub fn feed(&mut self, bytes: &[u8]) -> Vec<String> {
        let mut lines = Vec::new();
        for &byte in bytes {
            if let Some(line) = self.push(byte) {
                lines.push(line);
            }
        }
        lines
    }

    fn push(&mut self, byte: u8) -> Option<String> {
        match self.state {
            State::Normal => self.push_normal(byte),
            State::Escape => {
                self.state = if byte == b'[' {
                    State::ControlSequence
                } else {
                    State::Normal
                };
                None
            }
            State::ControlSequence => {
                // Parameter and intermediate bytes continue, a final byte ends
                if (0x40..=0x7e).contains(&byte) {
                    self.state = State::Normal;
                }
                None
            }
        }
    }

    fn push_normal(&mut self, byte: u8) -> Option<String> {
        match byte {
            0x1b => {
                self.state = State::Escape;
                None
            }
            b'\n' => self.take_line(),
            b'\t' => {
                self.buffer.push(b' ');
                None
            }
            // Remaining control characters, including \r
            b if b < 0x20 || b == 0x7f => None,
            b => {
                self.buffer.push(b);
                if self.buffer.len() >= MAX_LINE {
                    self.take_line()
                } else {
                    None
                }
            }
        }
    }

    fn take_line(&mut self) -> Option<String> {
        let line = String::from_utf8_lossy(&self.buffer).trim().to_string();
        self.buffer.clear();
        if line.is_empty() { None } else { Some(line) }
    }
}

impl Default for LineAssembler {
    fn default() -> Self {
        Self::new()
    }
}
