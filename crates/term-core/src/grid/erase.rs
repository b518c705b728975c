//! Erase in display (`CSI J`), erase in line (`CSI K`), and erase characters
//! (`CSI X`). Modes 0/1 follow the ECMA-48 defaults; mode 2/3 additionally
//! home the cursor to (0, 0).

use super::core::Grid;

impl Grid {
    /// `CSI J`. 0: cursor to end of screen. 1: start of screen to cursor
    /// inclusive. 2 or 3: entire screen, cursor moves to (0, 0).
    pub fn erase_in_display(&mut self, mode: u16) {
        let (x, y) = self.cursor();
        match mode {
            0 => {
                let start = self.idx(y, x);
                let end = self.width * self.height;
                self.clear_range(start..end);
            }
            1 => {
                let end = self.idx(y, x) + 1;
                self.clear_range(0..end);
            }
            2 | 3 => {
                let end = self.width * self.height;
                self.clear_range(0..end);
                self.move_cursor(0, 0);
            }
            _ => {}
        }
    }

    /// `CSI K`. 0 (default): cursor to end of line inclusive. 1: start of
    /// line to cursor inclusive. 2: entire line.
    pub fn erase_in_line(&mut self, mode: u16) {
        let (x, y) = self.cursor();
        let row_start = self.idx(y, 0);
        match mode {
            0 => self.clear_range(self.idx(y, x)..row_start + self.width),
            1 => self.clear_range(row_start..self.idx(y, x) + 1),
            2 => self.clear_range(row_start..row_start + self.width),
            _ => {}
        }
    }

    /// `CSI X` (ECH): blank `n` characters starting at the cursor, without
    /// shifting the remainder of the row.
    pub fn erase_chars(&mut self, n: usize) {
        let (x, y) = self.cursor();
        let row_end = self.idx(y, 0) + self.width;
        let start = self.idx(y, x);
        let end = (start + n).min(row_end);
        self.clear_range(start..end);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::Pixel;
    use crate::rendition::Rendition;

    fn filled_grid(w: usize, h: usize) -> Grid {
        let mut g = Grid::new(w, h, Pixel(0), Pixel(9));
        let r = Rendition::new(Pixel(1), Pixel(9));
        for y in 0..h {
            for x in 0..w {
                g.put(y, x, 'x', &r);
            }
        }
        g
    }

    #[test]
    fn erase_in_display_full_clears_and_homes_cursor() {
        let mut g = filled_grid(3, 2);
        g.move_cursor(2, 1);
        g.erase_in_display(2);
        assert_eq!(g.cursor(), (0, 0));
        for y in 0..2 {
            for x in 0..3 {
                assert_eq!(g.cell(y, x).glyph, ' ');
            }
        }
    }

    #[test]
    fn erase_in_display_from_cursor_leaves_earlier_rows() {
        let mut g = filled_grid(3, 2);
        g.move_cursor(1, 1);
        g.erase_in_display(0);
        assert_eq!(g.cell(1, 0).glyph, 'x');
        assert_eq!(g.cell(1, 1).glyph, ' ');
        assert_eq!(g.cell(1, 2).glyph, ' ');
        assert_eq!(g.cell(0, 0).glyph, 'x');
    }

    #[test]
    fn erase_in_line_default_mode_clears_to_end() {
        let mut g = filled_grid(4, 1);
        g.move_cursor(1, 0);
        g.erase_in_line(0);
        assert_eq!(g.cell(0, 0).glyph, 'x');
        assert_eq!(g.cell(0, 1).glyph, ' ');
        assert_eq!(g.cell(0, 3).glyph, ' ');
    }

    #[test]
    fn erase_chars_does_not_shift() {
        let mut g = filled_grid(5, 1);
        g.move_cursor(1, 0);
        g.erase_chars(2);
        assert_eq!(g.cell(0, 0).glyph, 'x');
        assert_eq!(g.cell(0, 1).glyph, ' ');
        assert_eq!(g.cell(0, 2).glyph, ' ');
        assert_eq!(g.cell(0, 3).glyph, 'x');
    }
}
