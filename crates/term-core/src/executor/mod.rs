//! Applies parsed [`Command`]s to [`Grid`] + [`Rendition`], using the
//! [`Palette`] to resolve SGR color indices, and produces bytes to write
//! back to the PTY master for status reports (§4.3, §6).

mod csi;
mod sgr;
mod types;

pub use types::{ExecutorMode, ProtocolError, Reply};

use crate::grid::Grid;
use crate::palette::Palette;
use crate::parser::Command;
use crate::rendition::Rendition;

/// Owns the grid and rendition state exclusively (§3 "Ownership") and holds
/// the immutable, once-resolved palette it consults for SGR color lookups.
pub struct Executor {
    grid: Grid,
    rendition: Rendition,
    palette: Palette,
    mode: ExecutorMode,
    /// Set by `ESC =` / `ESC >` and by DEC private mode 1; consulted by the
    /// Input Encoder (term-platform) when encoding arrow keys (§4.8).
    application_keypad: bool,
}

impl Executor {
    pub fn new(width: usize, height: usize, palette: Palette, mode: ExecutorMode) -> Self {
        let rendition = Rendition::new(palette.default_fg(), palette.default_bg());
        Self {
            grid: Grid::new(width, height, palette.default_fg(), palette.default_bg()),
            rendition,
            palette,
            mode,
            application_keypad: false,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    pub fn rendition(&self) -> &Rendition {
        &self.rendition
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn mode(&self) -> ExecutorMode {
        self.mode
    }

    pub fn application_keypad(&self) -> bool {
        self.application_keypad
    }

    /// Apply one parsed command. Returns bytes to write back to the PTY
    /// master, if any (DA2/DSR replies). On a protocol error: in
    /// [`ExecutorMode::Lenient`] this logs and returns `Ok(None)`, leaving
    /// the grid untouched by the offending sequence; in
    /// [`ExecutorMode::Strict`] it returns `Err`, which `term-app` turns
    /// into a process exit (§7).
    #[track_caller]
    pub fn execute(&mut self, cmd: Command) -> Result<Option<Reply>, ProtocolError> {
        match cmd {
            Command::Print(ch) => {
                self.grid.print(ch, &self.rendition);
                Ok(None)
            }
            Command::CarriageReturn => {
                self.grid.carriage_return();
                Ok(None)
            }
            Command::Backspace => {
                self.grid.backspace();
                Ok(None)
            }
            Command::Bell => Ok(None), // no audible/visual bell is modeled
            Command::Tab => {
                self.grid.tab();
                Ok(None)
            }
            Command::LineFeed => {
                self.grid.line_feed();
                Ok(None)
            }
            Command::SetApplicationKeypad(on) => {
                self.application_keypad = on;
                Ok(None)
            }
            Command::SaveCursor => {
                self.grid.save_cursor();
                Ok(None)
            }
            Command::RestoreCursor => {
                self.grid.restore_cursor();
                Ok(None)
            }
            Command::NextLine => {
                self.grid.carriage_return();
                self.grid.line_feed();
                Ok(None)
            }
            Command::FullReset => {
                self.grid.reset();
                self.rendition.reset(self.palette.default_fg(), self.palette.default_bg());
                self.application_keypad = false;
                Ok(None)
            }
            Command::ReverseIndex => {
                self.grid.reverse_index();
                Ok(None)
            }
            Command::CharsetDesignate(_) => Ok(None), // charset switching is accepted and discarded
            Command::OscComplete(_) => Ok(None), // no OSC semantics are modeled (see DESIGN.md)
            Command::MalformedUtf8 => self.protocol_error("malformed UTF-8 sequence from PTY"),
            Command::Csi { params, marker, final_byte } => self.dispatch_csi(&params, marker, final_byte),
        }
    }

    #[track_caller]
    fn protocol_error(&self, message: impl Into<String>) -> Result<Option<Reply>, ProtocolError> {
        let err = ProtocolError::new(message);
        match self.mode {
            ExecutorMode::Lenient => {
                tracing::warn!(error = %err, "protocol error, continuing");
                Ok(None)
            }
            ExecutorMode::Strict => {
                tracing::error!(error = %err, "protocol error, exiting");
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::{ColorSource, Pixel};
    use crate::parser::Parser;

    struct IdentitySource;
    impl ColorSource for IdentitySource {
        fn alloc(&mut self, rgb: (u8, u8, u8)) -> Pixel {
            Pixel(u32::from_be_bytes([0xFF, rgb.0, rgb.1, rgb.2]))
        }
    }

    fn executor(width: usize, height: usize) -> Executor {
        let mut src = IdentitySource;
        let palette = Palette::build(&mut src, (255, 255, 255), (0, 0, 0));
        Executor::new(width, height, palette, ExecutorMode::Lenient)
    }

    fn feed(e: &mut Executor, bytes: &[u8]) -> Vec<u8> {
        let mut parser = Parser::new();
        let mut replies = Vec::new();
        for &b in bytes {
            if let Some(cmd) = parser.feed(b) {
                if let Ok(Some(reply)) = e.execute(cmd) {
                    replies.extend(reply.as_bytes());
                }
            }
        }
        replies
    }

    /// §8 scenario 1: SGR red then 'x'.
    #[test]
    fn scenario_sgr_red_then_x() {
        let mut e = executor(80, 25);
        feed(&mut e, b"\x1b[31mx");
        let cell = e.grid().cell(0, 0);
        assert_eq!(cell.glyph, 'x');
        assert!(!cell.bold);
        assert!(!cell.italic);
        assert!(cell.dirty);
        assert_eq!(e.grid().cursor(), (1, 0));
    }

    /// §8 scenario 2: cursor position then query.
    #[test]
    fn scenario_cup_then_dsr() {
        let mut e = executor(80, 25);
        let replies = feed(&mut e, b"\x1b[5;7H\x1b[6n");
        assert_eq!(e.grid().cursor(), (6, 4));
        assert_eq!(replies, b"\x1b[5;7R");
    }

    /// §8 scenario 3: wrap suppression.
    #[test]
    fn scenario_wrap_suppression() {
        let mut e = executor(4, 4);
        feed(&mut e, b"ABCD\nE");
        assert_eq!(e.grid().cell(0, 0).glyph, 'A');
        assert_eq!(e.grid().cell(0, 3).glyph, 'D');
        assert_eq!(e.grid().cell(1, 0).glyph, 'E');
        assert_eq!(e.grid().cursor(), (1, 1));
    }

    /// §8 scenario 4: insert characters.
    #[test]
    fn scenario_insert_characters() {
        let mut e = executor(8, 2);
        feed(&mut e, b"abcdef\n");
        e.grid_mut().move_cursor(2, 0);
        feed(&mut e, b"\x1b[2@");
        assert_eq!(e.grid().cell(0, 0).glyph, 'a');
        assert_eq!(e.grid().cell(0, 1).glyph, 'b');
        assert_eq!(e.grid().cell(0, 2).glyph, ' ');
        assert_eq!(e.grid().cell(0, 3).glyph, ' ');
        assert_eq!(e.grid().cell(0, 4).glyph, 'c');
        assert_eq!(e.grid().cell(0, 5).glyph, 'd');
    }

    /// §8 scenario 5: DECSET 1049 round-trip.
    #[test]
    fn scenario_alternate_screen_round_trip() {
        let mut e = executor(4, 4);
        feed(&mut e, b"****");
        feed(&mut e, b"\x1b[?1049h");
        for x in 0..4 {
            assert_eq!(e.grid().cell(0, x).glyph, ' ');
            assert!(e.grid().cell(0, x).dirty);
        }
        feed(&mut e, b"\x1b[?1049l");
        for x in 0..4 {
            assert_eq!(e.grid().cell(0, x).glyph, '*');
        }
    }

    /// §8 scenario 6: UTF-8 decode.
    #[test]
    fn scenario_utf8_euro_sign() {
        let mut e = executor(80, 25);
        feed(&mut e, &[0xE2, 0x82, 0xAC]);
        assert_eq!(e.grid().cell(0, 0).glyph, '\u{20AC}');
        assert_eq!(e.grid().cursor(), (1, 0));
    }

    #[test]
    fn secondary_da_reply_is_bit_exact() {
        let mut e = executor(80, 25);
        let replies = feed(&mut e, b"\x1b[>c");
        assert_eq!(replies, b"\x1b[>77;20805;0c");
    }

    #[test]
    fn dsr_status_ok_reply() {
        let mut e = executor(80, 25);
        let replies = feed(&mut e, b"\x1b[5n");
        assert_eq!(replies, b"\x1b[0n");
    }

    #[test]
    fn strict_mode_errors_on_unknown_csi() {
        let mut src = IdentitySource;
        let palette = Palette::build(&mut src, (255, 255, 255), (0, 0, 0));
        let mut e = Executor::new(10, 5, palette, ExecutorMode::Strict);
        let result = e.execute(Command::Csi { params: String::new(), marker: None, final_byte: b'!' });
        assert!(result.is_err());
    }

    #[test]
    fn lenient_mode_continues_on_unknown_csi() {
        let mut e = executor(10, 5);
        let result = e.execute(Command::Csi { params: String::new(), marker: None, final_byte: b'!' });
        assert_eq!(result.unwrap(), None);
    }

    #[test]
    fn application_keypad_toggle_tracked_for_input_encoder() {
        let mut e = executor(10, 5);
        assert!(!e.application_keypad());
        e.execute(Command::SetApplicationKeypad(true)).unwrap();
        assert!(e.application_keypad());
        feed(&mut e, b"\x1b[?1h");
        // ESC> resets via the ESC path too.
        e.execute(Command::SetApplicationKeypad(false)).unwrap();
        assert!(!e.application_keypad());
    }

    #[test]
    fn full_reset_clears_grid_and_rendition() {
        let mut e = executor(10, 5);
        feed(&mut e, b"\x1b[31mhello");
        e.execute(Command::FullReset).unwrap();
        assert_eq!(e.grid().cell(0, 0).glyph, ' ');
        assert_eq!(e.grid().cursor(), (0, 0));
        assert_eq!(e.rendition().fg, e.palette().default_fg());
    }

    #[test]
    fn save_restore_cursor_via_esc() {
        let mut e = executor(20, 10);
        feed(&mut e, b"\x1b[5;10H\x1b7\x1b[1;1H\x1b8");
        assert_eq!(e.grid().cursor(), (9, 4));
    }
}
