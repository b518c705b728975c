//! CSI dispatch: cursor movement, erase, insert/delete, scrolling, scroll
//! region, cursor save/restore, status reports, and DEC private modes.
//!
//! @module term-core/executor/csi

use tracing::trace;

use super::types::{Params, ProtocolError, Reply};
use super::Executor;

/// Fixed DA2 (secondary device attributes) reply.
const SECONDARY_DA_REPLY: &[u8] = b"\x1b[>77;20805;0c";

impl Executor {
    #[track_caller]
    pub(super) fn dispatch_csi(
        &mut self,
        params: &str,
        marker: Option<u8>,
        final_byte: u8,
    ) -> Result<Option<Reply>, ProtocolError> {
        let p = Params::parse(params);

        match (marker, final_byte) {
            (None, b'@') => {
                self.grid.insert_blank_chars(p.count(0) as usize);
                Ok(None)
            }
            (None, b'A') => {
                self.grid.move_cursor_relative(0, -p.count(0));
                Ok(None)
            }
            (None, b'B') => {
                self.grid.move_cursor_relative(0, p.count(0));
                Ok(None)
            }
            (None, b'C') => {
                self.grid.move_cursor_relative(p.count(0), 0);
                Ok(None)
            }
            (None, b'D') => {
                self.grid.move_cursor_relative(-p.count(0), 0);
                Ok(None)
            }
            // CNL: cursor down n rows, then column 0.
            (None, b'E') => {
                self.grid.move_cursor_relative(0, p.count(0));
                self.grid.carriage_return();
                Ok(None)
            }
            // CPL: cursor up n rows, then column 0.
            (None, b'F') => {
                self.grid.move_cursor_relative(0, -p.count(0));
                self.grid.carriage_return();
                Ok(None)
            }
            // CHA: absolute column, row unchanged.
            (None, b'G') => {
                let (_, y) = self.grid.cursor();
                let col = p.count(0) as usize - 1;
                self.grid.move_cursor(col, y);
                Ok(None)
            }
            (None, b'H') | (None, b'f') => {
                let row = p.count(0) as usize - 1;
                let col = p.count(1) as usize - 1;
                self.grid.move_cursor(col, row);
                Ok(None)
            }
            (None, b'J') => {
                self.grid.erase_in_display(p.raw(0, 0) as u16);
                Ok(None)
            }
            (None, b'K') => {
                self.grid.erase_in_line(p.raw(0, 0) as u16);
                Ok(None)
            }
            (None, b'L') => {
                self.grid.insert_lines(p.count(0) as usize);
                Ok(None)
            }
            (None, b'M') => {
                self.grid.delete_lines(p.count(0) as usize);
                Ok(None)
            }
            (None, b'P') => {
                self.grid.delete_chars(p.count(0) as usize);
                Ok(None)
            }
            (None, b'S') => {
                self.grid.scroll_up(p.count(0) as usize);
                Ok(None)
            }
            (None, b'T') => {
                self.grid.scroll_down(p.count(0) as usize);
                Ok(None)
            }
            (None, b'X') => {
                self.grid.erase_chars(p.count(0) as usize);
                Ok(None)
            }
            // VPA: absolute row, column unchanged.
            (None, b'd') => {
                let (x, _) = self.grid.cursor();
                let row = p.count(0) as usize - 1;
                self.grid.move_cursor(x, row);
                Ok(None)
            }
            (None, b'm') => self.dispatch_sgr(&p),
            (None, b'n') => Ok(self.device_status_report(p.raw(0, 0))),
            (Some(b'>'), b'c') => Ok(Some(Reply(SECONDARY_DA_REPLY.to_vec()))),
            (None, b'r') => {
                self.set_scroll_region(&p);
                Ok(None)
            }
            (None, b's') => {
                self.grid.save_cursor();
                Ok(None)
            }
            (None, b'u') => {
                self.grid.restore_cursor();
                Ok(None)
            }
            (None, b't') => Ok(None), // window manipulation: ignored
            (Some(b'?'), b'h') | (Some(b'?'), b's') => {
                for code in p.all() {
                    self.apply_dec_set(*code);
                }
                Ok(None)
            }
            (Some(b'?'), b'l') => {
                for code in p.all() {
                    self.apply_dec_reset(*code);
                }
                Ok(None)
            }
            _ => self.protocol_error(format!(
                "unsupported CSI: marker={marker:?} params={params:?} final={}",
                final_byte as char
            )),
        }
    }

    fn device_status_report(&self, mode: i64) -> Option<Reply> {
        match mode {
            5 => Some(Reply(b"\x1b[0n".to_vec())),
            6 => {
                let (x, y) = self.grid.cursor();
                Some(format!("\x1b[{};{}R", y + 1, x + 1).into())
            }
            _ => None,
        }
    }

    /// `CSI r`: no params resets to the full grid height; a lone top param
    /// defaults the bottom to the last row.
    fn set_scroll_region(&mut self, p: &Params) {
        if p.get(0).is_none() && p.get(1).is_none() {
            self.grid.reset_scroll_region();
            self.grid.move_cursor(0, 0);
            return;
        }
        let top = p.count(0) as usize - 1;
        let bottom = match p.get(1) {
            None | Some(0) => self.grid.height().saturating_sub(1),
            Some(v) => v as usize - 1,
        };
        self.grid.set_scroll_region(top, bottom);
        self.grid.move_cursor(0, 0);
    }

    fn apply_dec_set(&mut self, code: i64) {
        match code {
            1 => self.application_keypad = true,
            5 => {}    // reverse video: accepted, no-op
            12 => {}   // blinking cursor: accepted, no-op
            25 => self.grid.set_cursor_visible(true),
            1002 | 1006 | 2004 => {} // mouse/bracketed paste: accepted, no-op
            1049 => self.grid.enter_alternate_screen(),
            _ => trace!(code, "unhandled DEC private set mode"),
        }
    }

    fn apply_dec_reset(&mut self, code: i64) {
        match code {
            1 => self.application_keypad = false,
            5 => {}
            12 => {}
            25 => self.grid.set_cursor_visible(false),
            1002 | 1006 | 2004 => {}
            1049 => self.grid.exit_alternate_screen(),
            _ => trace!(code, "unhandled DEC private reset mode"),
        }
    }
}
