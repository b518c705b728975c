//! Insert/delete characters (`CSI @` / `CSI P`) and insert/delete lines
//! (`CSI L` / `CSI M`), confined to the cursor row and the scroll region
//! respectively.

use super::core::Grid;

impl Grid {
    /// `CSI @` (ICH): shift `[cursor..line_end-n]` right by `n` within the
    /// cursor row; clear the `n` newly vacated cells at the cursor.
    pub fn insert_blank_chars(&mut self, n: usize) {
        let (x, y) = self.cursor();
        let n = n.min(self.width.saturating_sub(x));
        if n == 0 {
            return;
        }
        let row_start = self.idx(y, 0);
        let src_end = row_start + self.width - n;
        if src_end > self.idx(y, x) {
            self.shift_block(self.idx(y, x)..src_end, self.idx(y, x) + n);
        }
        self.clear_range(self.idx(y, x)..self.idx(y, x) + n);
    }

    /// `CSI P` (DCH): shift `[cursor+n..line_end]` left to the cursor; clear
    /// the last `n` cells of the row.
    pub fn delete_chars(&mut self, n: usize) {
        let (x, y) = self.cursor();
        let n = n.min(self.width.saturating_sub(x));
        if n == 0 {
            return;
        }
        let row_start = self.idx(y, 0);
        let row_end = row_start + self.width;
        let src_start = self.idx(y, x) + n;
        if src_start < row_end {
            self.shift_block(src_start..row_end, self.idx(y, x));
        }
        self.clear_range(row_end - n..row_end);
    }

    /// `CSI L` (IL): within `[cursor_row..scr_end]`, shift rows down by `n`;
    /// clear the `n` newly vacated rows at the cursor. No-op if the cursor
    /// is outside the scroll region.
    pub fn insert_lines(&mut self, n: usize) {
        let (_, y) = self.cursor();
        if y < self.scr_begin || y > self.scr_end {
            return;
        }
        let region_rows = self.scr_end - y + 1;
        let n = n.min(region_rows);
        if n == 0 {
            return;
        }
        if n < region_rows {
            let src_start = self.idx(y, 0);
            let src_end = self.idx(self.scr_end - n, 0) + self.width;
            self.shift_block(src_start..src_end, self.idx(y + n, 0));
        }
        let clear_start = self.idx(y, 0);
        let clear_end = self.idx(y + n - 1, 0) + self.width;
        self.clear_range(clear_start..clear_end);
    }

    /// `CSI M` (DL): within `[cursor_row..scr_end]`, shift rows up by `n`;
    /// clear the last `n` rows of the region. No-op if the cursor is
    /// outside the scroll region.
    pub fn delete_lines(&mut self, n: usize) {
        let (_, y) = self.cursor();
        if y < self.scr_begin || y > self.scr_end {
            return;
        }
        let region_rows = self.scr_end - y + 1;
        let n = n.min(region_rows);
        if n == 0 {
            return;
        }
        if n < region_rows {
            let src_start = self.idx(y + n, 0);
            let src_end = self.idx(self.scr_end, 0) + self.width;
            self.shift_block(src_start..src_end, self.idx(y, 0));
        }
        let clear_start = self.idx(self.scr_end - n + 1, 0);
        let clear_end = self.idx(self.scr_end, 0) + self.width;
        self.clear_range(clear_start..clear_end);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::Pixel;
    use crate::rendition::Rendition;

    fn row_filled_grid(w: usize, h: usize) -> Grid {
        let mut g = Grid::new(w, h, Pixel(0), Pixel(9));
        let r = Rendition::new(Pixel(1), Pixel(9));
        for (x, ch) in "abcdef".chars().take(w).enumerate() {
            g.put(0, x, ch, &r);
        }
        g
    }

    #[test]
    fn insert_chars_shifts_right_and_clears_gap() {
        let mut g = row_filled_grid(8, 1);
        g.move_cursor(2, 0);
        g.insert_blank_chars(2);
        assert_eq!(g.cell(0, 0).glyph, 'a');
        assert_eq!(g.cell(0, 1).glyph, 'b');
        assert_eq!(g.cell(0, 2).glyph, ' ');
        assert_eq!(g.cell(0, 3).glyph, ' ');
        assert_eq!(g.cell(0, 4).glyph, 'c');
    }

    #[test]
    fn delete_chars_shifts_left_and_clears_tail() {
        let mut g = row_filled_grid(8, 1);
        g.move_cursor(1, 0);
        g.delete_chars(2);
        assert_eq!(g.cell(0, 0).glyph, 'a');
        assert_eq!(g.cell(0, 1).glyph, 'd');
        assert_eq!(g.cell(0, 5).glyph, ' ');
        assert_eq!(g.cell(0, 6).glyph, ' ');
    }

    #[test]
    fn insert_lines_pushes_rows_down_within_region() {
        let mut g = Grid::new(3, 4, Pixel(0), Pixel(9));
        let r = Rendition::new(Pixel(1), Pixel(9));
        g.put(1, 0, 'a', &r);
        g.put(2, 0, 'b', &r);
        g.move_cursor(0, 1);
        g.insert_lines(1);
        assert_eq!(g.cell(1, 0).glyph, ' ');
        assert_eq!(g.cell(2, 0).glyph, 'a');
        assert_eq!(g.cell(3, 0).glyph, 'b');
    }

    #[test]
    fn delete_lines_pulls_rows_up_within_region() {
        let mut g = Grid::new(3, 4, Pixel(0), Pixel(9));
        let r = Rendition::new(Pixel(1), Pixel(9));
        g.put(1, 0, 'a', &r);
        g.put(2, 0, 'b', &r);
        g.move_cursor(0, 1);
        g.delete_lines(1);
        assert_eq!(g.cell(1, 0).glyph, 'b');
        assert_eq!(g.cell(2, 0).glyph, ' ');
    }

    #[test]
    fn line_edit_outside_scroll_region_is_noop() {
        let mut g = Grid::new(3, 4, Pixel(0), Pixel(9));
        g.set_scroll_region(1, 2);
        let r = Rendition::new(Pixel(1), Pixel(9));
        g.put(0, 0, 'z', &r);
        g.move_cursor(0, 0);
        g.insert_lines(1);
        assert_eq!(g.cell(0, 0).glyph, 'z');
    }
}
