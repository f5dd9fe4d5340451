//! Quit-command detection over line-oriented input.
//!
//! A line asks the process to quit when it contains `q` or `exit`, compared
//! ASCII case-insensitively. Input arrives in arbitrary chunks, so the tail of
//! an unterminated line is carried into the next chunk.

const EXIT: &[u8] = b"exit";
/// Longest prefix of `exit` that can end a chunk without completing a match.
const CARRY: usize = EXIT.len() - 1;

#[derive(Debug, Default, Clone)]
pub struct QuitScanner {
    tail: [u8; CARRY],
    tail_len: usize,
}

impl QuitScanner {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            tail: [0; CARRY],
            tail_len: 0,
        }
    }

    /// Scan one chunk. Returns true if any line touched by it asks to quit.
    ///
    /// Line terminators are never part of a match.
    pub fn feed(&mut self, chunk: &[u8]) -> bool {
        let mut quit = false;
        let mut segments = chunk.split(|&b| b == b'\n').peekable();

        while let Some(segment) = segments.next() {
            quit |= self.scan_segment(segment);
            if segments.peek().is_some() {
                // A terminator follows this segment; the next one starts a new line.
                self.tail_len = 0;
            } else {
                self.remember_tail(segment);
            }
        }

        quit
    }

    /// Forget any partial line.
    pub fn reset(&mut self) {
        self.tail_len = 0;
    }

    fn scan_segment(&self, segment: &[u8]) -> bool {
        if contains_quit(segment) {
            return true;
        }
        if self.tail_len == 0 {
            return false;
        }

        // A match spanning the chunk boundary uses at least one carried byte.
        let head = &segment[..segment.len().min(CARRY)];
        let mut joined = [0u8; CARRY * 2];
        joined[..self.tail_len].copy_from_slice(&self.tail[..self.tail_len]);
        joined[self.tail_len..self.tail_len + head.len()].copy_from_slice(head);
        contains_quit(&joined[..self.tail_len + head.len()])
    }

    fn remember_tail(&mut self, segment: &[u8]) {
        let mut line = [0u8; CARRY * 2];
        let mut len = 0;
        let segment_tail = &segment[segment.len().saturating_sub(CARRY)..];
        for &b in self.tail[..self.tail_len].iter().chain(segment_tail) {
            line[len] = b;
            len += 1;
        }
        let keep = len.min(CARRY);
        self.tail[..keep].copy_from_slice(&line[len - keep..len]);
        self.tail_len = keep;
    }
}

fn contains_quit(line: &[u8]) -> bool {
    line.iter().any(|b| b.eq_ignore_ascii_case(&b'q'))
        || line.windows(EXIT.len()).any(|w| w.eq_ignore_ascii_case(EXIT))
}
