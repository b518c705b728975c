//! Scrolling, the scroll region, and DEC 1049 alternate-screen switching.

use super::core::Grid;

impl Grid {
    /// Scroll the active scroll region up by `n` rows: row `scr_begin + n`
    /// becomes row `scr_begin`, and so on; the bottom `n` rows are cleared.
    /// `n` beyond the region's height just clears the whole region.
    pub fn scroll_up(&mut self, n: usize) {
        let (top, bot) = (self.scr_begin, self.scr_end);
        if top > bot {
            return;
        }
        let region_rows = bot - top + 1;
        let n = n.min(region_rows);
        if n == 0 {
            return;
        }
        if n < region_rows {
            let src_start = self.idx(top + n, 0);
            let src_end = self.idx(bot, 0) + self.width;
            let dst_start = self.idx(top, 0);
            self.shift_block(src_start..src_end, dst_start);
        }
        let clear_start = self.idx(bot - n + 1, 0);
        let clear_end = self.idx(bot, 0) + self.width;
        self.clear_range(clear_start..clear_end);
    }

    /// Scroll the active scroll region down by `n` rows: mirror of
    /// [`Grid::scroll_up`], used by the supplemented `CSI T` and by reverse
    /// index's insert-blank-line-at-top behavior.
    pub fn scroll_down(&mut self, n: usize) {
        let (top, bot) = (self.scr_begin, self.scr_end);
        if top > bot {
            return;
        }
        let region_rows = bot - top + 1;
        let n = n.min(region_rows);
        if n == 0 {
            return;
        }
        if n < region_rows {
            let src_start = self.idx(top, 0);
            let src_end = self.idx(bot - n, 0) + self.width;
            let dst_start = self.idx(top + n, 0);
            self.shift_block(src_start..src_end, dst_start);
        }
        let clear_start = self.idx(top, 0);
        let clear_end = self.idx(top + n - 1, 0) + self.width;
        self.clear_range(clear_start..clear_end);
    }

    /// `CSI r`: set the scroll region; no-params resets it to the full grid.
    pub fn set_scroll_region(&mut self, begin: usize, end: usize) {
        let end = end.min(self.height.saturating_sub(1));
        if begin <= end {
            self.scr_begin = begin;
            self.scr_end = end;
        }
    }

    pub fn reset_scroll_region(&mut self) {
        self.scr_begin = 0;
        self.scr_end = self.height.saturating_sub(1);
    }

    /// DEC private mode 1049 set: swap to the alternate buffer, then clear
    /// and mark it fully dirty.
    pub fn enter_alternate_screen(&mut self) {
        if self.active == super::types::Active::Alternate {
            return;
        }
        self.swap_buffers();
        let len = self.width * self.height;
        self.clear_range(0..len);
        self.dirty_all();
    }

    /// DEC private mode 1049 reset: swap back to the primary buffer.
    pub fn exit_alternate_screen(&mut self) {
        if self.active == super::types::Active::Primary {
            return;
        }
        self.swap_buffers();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::Pixel;
    use crate::rendition::Rendition;

    fn grid() -> Grid {
        Grid::new(4, 3, Pixel(0), Pixel(9))
    }

    #[test]
    fn scroll_up_moves_rows_toward_top_and_clears_bottom() {
        let mut g = grid(); // 4x3
        let r = Rendition::new(Pixel(1), Pixel(9));
        g.put(0, 0, 'a', &r);
        g.put(1, 0, 'b', &r);
        g.put(2, 0, 'c', &r);
        g.scroll_up(1);
        assert_eq!(g.cell(0, 0).glyph, 'b');
        assert_eq!(g.cell(1, 0).glyph, 'c');
        assert_eq!(g.cell(2, 0).glyph, ' ');
    }

    #[test]
    fn scroll_down_moves_rows_toward_bottom_and_clears_top() {
        let mut g = grid(); // 4x3
        let r = Rendition::new(Pixel(1), Pixel(9));
        g.put(0, 0, 'a', &r);
        g.put(1, 0, 'b', &r);
        g.scroll_down(1);
        assert_eq!(g.cell(0, 0).glyph, ' ');
        assert_eq!(g.cell(1, 0).glyph, 'a');
        assert_eq!(g.cell(2, 0).glyph, 'b');
    }

    #[test]
    fn alternate_screen_round_trip_preserves_primary() {
        let mut g = grid();
        let r = Rendition::new(Pixel(1), Pixel(9));
        g.put(0, 0, '*', &r);
        g.enter_alternate_screen();
        assert_eq!(g.cell(0, 0).glyph, ' ');
        g.put(1, 1, 'x', &r);
        g.exit_alternate_screen();
        assert_eq!(g.cell(0, 0).glyph, '*');
    }

    #[test]
    fn double_swap_is_identity() {
        let mut g = grid();
        let r = Rendition::new(Pixel(1), Pixel(9));
        g.put(0, 0, '*', &r);
        g.move_cursor(2, 1);
        g.swap_buffers();
        g.swap_buffers();
        assert_eq!(g.cell(0, 0).glyph, '*');
        assert_eq!(g.cursor(), (2, 1));
    }
}
