//! The `Print` writer, `LineFeed`, and reverse index — §4.6 and §4.7.

use super::core::Grid;
use crate::rendition::Rendition;

impl Grid {
    /// Write one glyph at the cursor with the given rendition, handling the
    /// delayed-wrap flag set by a previous `print` that filled the last
    /// column.
    pub fn print(&mut self, glyph: char, rendition: &Rendition) {
        if self.just_wrapped {
            self.just_wrapped = false;
            self.active_screen_mut().cursor_x = 0;
            let cursor_y = self.active_screen().cursor_y;
            if cursor_y >= self.scr_end {
                self.scroll_up(1);
                self.active_screen_mut().cursor_y = self.scr_end;
            } else {
                self.active_screen_mut().cursor_y = cursor_y + 1;
            }
        }

        let (x, y) = self.cursor();
        self.put(y, x, glyph, rendition);

        let screen = self.active_screen_mut();
        screen.cursor_x += 1;
        if screen.cursor_x >= self.width {
            screen.cursor_x = self.width.saturating_sub(1);
            self.just_wrapped = true;
        }
    }

    /// `LineFeed`: a no-op if a `print` just wrapped the cursor off the last
    /// column (the parser still emits the command; this is what suppresses
    /// the double-advance). Otherwise moves to column 0 of the next row,
    /// scrolling the region if already at its bottom.
    pub fn line_feed(&mut self) {
        if self.just_wrapped {
            return;
        }
        self.active_screen_mut().cursor_x = 0;
        let cursor_y = self.active_screen().cursor_y;
        if cursor_y >= self.scr_end {
            self.scroll_up(1);
            self.active_screen_mut().cursor_y = self.scr_end;
        } else {
            self.active_screen_mut().cursor_y = cursor_y + 1;
        }
    }

    /// `ESC M` (reverse index): at row 0, insert a blank line at the top of
    /// the scroll region; otherwise move the cursor up one row.
    pub fn reverse_index(&mut self) {
        if self.active_screen().cursor_y == 0 {
            self.scroll_down(1);
        } else {
            self.active_screen_mut().cursor_y -= 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::Pixel;

    fn grid(w: usize, h: usize) -> Grid {
        Grid::new(w, h, Pixel(0), Pixel(9))
    }

    #[test]
    fn wrap_suppresses_following_linefeed() {
        let mut g = grid(4, 4);
        let r = Rendition::new(Pixel(1), Pixel(9));
        for ch in "ABCD".chars() {
            g.print(ch, &r);
        }
        assert_eq!(g.cursor(), (3, 0));
        g.line_feed();
        assert_eq!(g.cursor(), (3, 0));
        g.print('E', &r);
        assert_eq!(g.cell(0, 0).glyph, 'A');
        assert_eq!(g.cell(0, 3).glyph, 'D');
        assert_eq!(g.cell(1, 0).glyph, 'E');
        assert_eq!(g.cursor(), (1, 1));
    }

    #[test]
    fn line_feed_scrolls_at_region_bottom() {
        let mut g = grid(4, 3);
        let r = Rendition::new(Pixel(1), Pixel(9));
        g.put(0, 0, 'a', &r);
        g.move_cursor(0, 2);
        g.line_feed();
        assert_eq!(g.cursor(), (0, 2));
        assert_eq!(g.cell(0, 0).glyph, ' ');
    }

    #[test]
    fn reverse_index_moves_up_when_not_at_top() {
        let mut g = grid(4, 3);
        g.move_cursor(0, 2);
        g.reverse_index();
        assert_eq!(g.cursor(), (0, 1));
    }

    #[test]
    fn reverse_index_scrolls_down_at_row_zero() {
        let mut g = grid(4, 3);
        let r = Rendition::new(Pixel(1), Pixel(9));
        g.put(0, 0, 'x', &r);
        g.reverse_index();
        assert_eq!(g.cell(1, 0).glyph, 'x');
        assert_eq!(g.cell(0, 0).glyph, ' ');
    }
}
