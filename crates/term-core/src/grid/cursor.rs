//! Cursor movement, save/restore, and the single-character control codes
//! (carriage return, backspace, tab) of §4.6.

use super::core::Grid;

impl Grid {
    /// Absolute move, clamped to grid bounds. Used by CUP/HVP and the
    /// supplemented CHA/VPA.
    pub fn move_cursor(&mut self, x: usize, y: usize) {
        let x = x.min(self.width.saturating_sub(1));
        let y = y.min(self.height.saturating_sub(1));
        let screen = self.active_screen_mut();
        screen.cursor_x = x;
        screen.cursor_y = y;
        self.just_wrapped = false;
    }

    /// Relative move, clamped to grid bounds. Used by CUU/CUD/CUF/CUB and the
    /// supplemented CNL/CPL.
    pub fn move_cursor_relative(&mut self, dx: i64, dy: i64) {
        let screen = self.active_screen_mut();
        let x = (screen.cursor_x as i64 + dx).clamp(0, self.width.saturating_sub(1) as i64);
        let y = (screen.cursor_y as i64 + dy).clamp(0, self.height.saturating_sub(1) as i64);
        let screen = self.active_screen_mut();
        screen.cursor_x = x as usize;
        screen.cursor_y = y as usize;
        self.just_wrapped = false;
    }

    /// DECSC / `CSI s`: remember the active screen's cursor.
    pub fn save_cursor(&mut self) {
        let (x, y) = self.cursor();
        self.saved_cursor = Some((x, y));
    }

    /// DECRC / `CSI u`: restore a previously saved cursor, clamped in case
    /// the save predates a reset. A no-op if nothing was ever saved.
    pub fn restore_cursor(&mut self) {
        if let Some((x, y)) = self.saved_cursor {
            self.move_cursor(x, y);
        }
    }

    pub fn carriage_return(&mut self) {
        self.active_screen_mut().cursor_x = 0;
    }

    pub fn backspace(&mut self) {
        let screen = self.active_screen_mut();
        screen.cursor_x = screen.cursor_x.saturating_sub(1);
    }

    /// `cursor_x <- cursor_x + (8 - cursor_x mod 8)`, clamped to `W - 1`.
    pub fn tab(&mut self) {
        let screen = self.active_screen_mut();
        let advance = 8 - screen.cursor_x % 8;
        screen.cursor_x = (screen.cursor_x + advance).min(self.width.saturating_sub(1));
    }
}
