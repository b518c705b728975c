//! The byte-driven parser state machine: classifies incoming PTY bytes as
//! text, C0 control, ESC/CSI/OSC introducers, charset designation, or UTF-8
//! continuation, and emits a [`Command`] each time a sequence completes.
//!
//! Deliberately hand-rolled rather than built on a VT-parsing crate, so the
//! transition table in this file is the full truth of the state machine and
//! can be driven byte-by-byte from tests without any PTY or executor
//! involved.

use tracing::trace;

/// One decoded unit of the incoming byte stream, ready for the executor to
/// apply to the grid and rendition state.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    Print(char),
    CarriageReturn,
    Backspace,
    Bell,
    Tab,
    LineFeed,
    SetApplicationKeypad(bool),
    SaveCursor,
    /// `ESC 8` (DECRC) — pairs with `SaveCursor`.
    RestoreCursor,
    /// `ESC E` (NEL) — carriage return then line feed.
    NextLine,
    /// `ESC c` (RIS) — full reset.
    FullReset,
    ReverseIndex,
    /// A complete CSI sequence: accumulated parameter bytes, an optional
    /// leading private/secondary marker (`?` for DEC private modes, `>` for
    /// Secondary DA), and the final byte that terminated it.
    Csi { params: String, marker: Option<u8>, final_byte: u8 },
    /// A complete OSC sequence's payload (excluding the `ESC ]` introducer
    /// and the terminating BEL or ST).
    OscComplete(String),
    /// A single designated charset byte following `ESC (`.
    CharsetDesignate(u8),
    /// Raised instead of a `Command` when the parser itself detects a
    /// malformed sequence (e.g. an invalid UTF-8 lead byte). Left to the
    /// caller to log/fatal per the executor's strict/lenient mode.
    MalformedUtf8,
}

#[derive(Clone, Debug, PartialEq)]
enum State {
    Ground,
    Escape,
    Csi,
    Osc,
    CharsetDesignate,
    Utf8Continuation { needed: usize, buf: Vec<u8> },
}

/// The parser's own progress state: everything here is scratch the parser
/// owns between bytes; it has no view of the grid or rendition.
pub struct Parser {
    state: State,
    csi_buf: String,
    csi_marker: Option<u8>,
    osc_buf: String,
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser {
    pub fn new() -> Self {
        Self {
            state: State::Ground,
            csi_buf: String::new(),
            csi_marker: None,
            osc_buf: String::new(),
        }
    }

    /// Feed one byte, returning zero or one commands. The parser never
    /// blocks and never looks beyond the byte it is given, so callers may
    /// freely interleave calls with other I/O between bytes.
    pub fn feed(&mut self, byte: u8) -> Option<Command> {
        match &mut self.state {
            State::Ground => self.feed_ground(byte),
            State::Escape => self.feed_escape(byte),
            State::Csi => self.feed_csi(byte),
            State::Osc => self.feed_osc(byte),
            State::CharsetDesignate => {
                self.state = State::Ground;
                Some(Command::CharsetDesignate(byte))
            }
            State::Utf8Continuation { .. } => self.feed_utf8_continuation(byte),
        }
    }

    fn feed_ground(&mut self, byte: u8) -> Option<Command> {
        match byte {
            0x1B => {
                self.state = State::Escape;
                None
            }
            0x0D => Some(Command::CarriageReturn),
            0x08 => Some(Command::Backspace),
            0x07 => Some(Command::Bell),
            0x09 => Some(Command::Tab),
            0x0A => Some(Command::LineFeed),
            b if b & 0x80 == 0 => Some(Command::Print(b as char)),
            b if b & 0xE0 == 0xC0 => {
                self.state = State::Utf8Continuation { needed: 1, buf: vec![b] };
                None
            }
            b if b & 0xF0 == 0xE0 => {
                self.state = State::Utf8Continuation { needed: 2, buf: vec![b] };
                None
            }
            b if b & 0xF8 == 0xF0 => {
                self.state = State::Utf8Continuation { needed: 3, buf: vec![b] };
                None
            }
            b => {
                trace!(byte = b, "ground: unrecognized high-bit byte");
                Some(Command::MalformedUtf8)
            }
        }
    }

    fn feed_utf8_continuation(&mut self, byte: u8) -> Option<Command> {
        let State::Utf8Continuation { needed, buf } = &mut self.state else {
            unreachable!("feed_utf8_continuation called outside Utf8Continuation state");
        };
        buf.push(byte);
        *needed -= 1;
        if *needed == 0 {
            let State::Utf8Continuation { buf, .. } =
                std::mem::replace(&mut self.state, State::Ground)
            else {
                unreachable!()
            };
            match std::str::from_utf8(&buf).ok().and_then(|s| s.chars().next()) {
                Some(scalar) => Some(Command::Print(scalar)),
                None => {
                    trace!(?buf, "utf8 continuation: invalid sequence");
                    Some(Command::MalformedUtf8)
                }
            }
        } else {
            None
        }
    }

    fn feed_escape(&mut self, byte: u8) -> Option<Command> {
        match byte {
            b'[' => {
                self.csi_buf.clear();
                self.csi_marker = None;
                self.state = State::Csi;
                None
            }
            b']' => {
                self.osc_buf.clear();
                self.state = State::Osc;
                None
            }
            b'=' => {
                self.state = State::Ground;
                Some(Command::SetApplicationKeypad(true))
            }
            b'>' => {
                self.state = State::Ground;
                Some(Command::SetApplicationKeypad(false))
            }
            b'(' => {
                self.state = State::CharsetDesignate;
                None
            }
            b'7' => {
                self.state = State::Ground;
                Some(Command::SaveCursor)
            }
            b'8' => {
                self.state = State::Ground;
                Some(Command::RestoreCursor)
            }
            b'D' => {
                self.state = State::Ground;
                Some(Command::LineFeed)
            }
            b'E' => {
                self.state = State::Ground;
                Some(Command::NextLine)
            }
            b'M' => {
                self.state = State::Ground;
                Some(Command::ReverseIndex)
            }
            b'c' => {
                self.state = State::Ground;
                Some(Command::FullReset)
            }
            0x5C => {
                self.state = State::Ground;
                let payload = std::mem::take(&mut self.osc_buf);
                Some(Command::OscComplete(payload))
            }
            b => {
                trace!(byte = b, "escape: unrecognized intermediate");
                self.state = State::Ground;
                None
            }
        }
    }

    fn feed_csi(&mut self, byte: u8) -> Option<Command> {
        if self.csi_buf.is_empty() && self.csi_marker.is_none() && matches!(byte, b'?' | b'>' | b'=') {
            self.csi_marker = Some(byte);
            return None;
        }
        if (0x40..=0x7C).contains(&byte) {
            self.state = State::Ground;
            let params = std::mem::take(&mut self.csi_buf);
            let marker = self.csi_marker.take();
            Some(Command::Csi { params, marker, final_byte: byte })
        } else {
            self.csi_buf.push(byte as char);
            None
        }
    }

    fn feed_osc(&mut self, byte: u8) -> Option<Command> {
        match byte {
            0x07 => {
                self.state = State::Ground;
                let payload = std::mem::take(&mut self.osc_buf);
                Some(Command::OscComplete(payload))
            }
            // ESC, possibly the start of a `ESC \` (ST) terminator. The
            // osc_buf is left intact so `feed_escape`'s `\` branch can
            // complete it; any other follow-up byte just resumes Ground.
            0x1B => {
                self.state = State::Escape;
                None
            }
            _ => {
                self.osc_buf.push(byte as char);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(bytes: &[u8]) -> Vec<Command> {
        let mut parser = Parser::new();
        bytes.iter().filter_map(|&b| parser.feed(b)).collect()
    }

    #[test]
    fn plain_ascii_prints() {
        assert_eq!(run(b"hi"), vec![Command::Print('h'), Command::Print('i')]);
    }

    #[test]
    fn csi_sgr_sequence() {
        let cmds = run(b"\x1b[31m");
        assert_eq!(
            cmds,
            vec![Command::Csi { params: "31".into(), marker: None, final_byte: b'm' }]
        );
    }

    #[test]
    fn csi_private_mode() {
        let cmds = run(b"\x1b[?1049h");
        assert_eq!(
            cmds,
            vec![Command::Csi { params: "1049".into(), marker: Some(b'?'), final_byte: b'h' }]
        );
    }

    #[test]
    fn csi_secondary_da_marker() {
        let cmds = run(b"\x1b[>c");
        assert_eq!(cmds, vec![Command::Csi { params: String::new(), marker: Some(b'>'), final_byte: b'c' }]);
    }

    #[test]
    fn osc_terminated_by_bel() {
        let cmds = run(b"\x1b]0;title\x07");
        assert_eq!(cmds, vec![Command::OscComplete("0;title".into())]);
    }

    #[test]
    fn osc_terminated_by_st() {
        let cmds = run(b"\x1b]0;title\x1b\\");
        assert_eq!(cmds, vec![Command::OscComplete("0;title".into())]);
    }

    #[test]
    fn utf8_three_byte_euro_sign() {
        let cmds = run(&[0xE2, 0x82, 0xAC]);
        assert_eq!(cmds, vec![Command::Print('\u{20AC}')]);
    }

    #[test]
    fn application_keypad_toggle() {
        assert_eq!(run(b"\x1b="), vec![Command::SetApplicationKeypad(true)]);
        assert_eq!(run(b"\x1b>"), vec![Command::SetApplicationKeypad(false)]);
    }

    #[test]
    fn linefeed_suppressed_by_just_wrapped_is_not_the_parsers_job() {
        // The parser always emits LineFeed for 0x0A; suppression based on
        // just_wrapped happens downstream in the executor, which owns the
        // grid state the flag lives on.
        assert_eq!(run(b"\n"), vec![Command::LineFeed]);
    }

    /// Property 7: feeding a sequence whole, byte-by-byte, or split at
    /// arbitrary points produces the same command stream.
    #[test]
    fn prefix_split_invariance() {
        let input: &[u8] = b"hello\x1b[2;5Hworld\x1b]0;t\x07\xE2\x82\xAC\x1b[31mred";

        let whole = run(input);

        let mut byte_by_byte = Vec::new();
        let mut parser = Parser::new();
        for &b in input {
            byte_by_byte.extend(parser.feed(b));
        }
        assert_eq!(whole, byte_by_byte);

        for split_at in [1, 3, 7, 13, input.len() - 2] {
            let mut parser = Parser::new();
            let mut out = Vec::new();
            for &b in &input[..split_at] {
                out.extend(parser.feed(b));
            }
            for &b in &input[split_at..] {
                out.extend(parser.feed(b));
            }
            assert_eq!(whole, out, "mismatch splitting at {split_at}");
        }
    }
}
