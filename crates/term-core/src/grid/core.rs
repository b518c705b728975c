//! Grid struct definition, construction, and the primitive operations
//! (`clear`, `put`, `copy`, `shift_block`, `clear_range`, `dirty_all`,
//! `swap_buffers`) everything else in this module is built from.

use super::types::{Active, Cell, Screen};
use crate::palette::Pixel;
use crate::rendition::Rendition;

pub struct Grid {
    pub(crate) width: usize,
    pub(crate) height: usize,
    pub(crate) primary: Screen,
    pub(crate) alternate: Screen,
    pub(crate) active: Active,
    /// `[scr_begin, scr_end]`, inclusive, applies to the active matrix only.
    pub(crate) scr_begin: usize,
    pub(crate) scr_end: usize,
    pub(crate) default_fg: Pixel,
    pub(crate) default_bg: Pixel,
    /// Set once a `Print` has advanced the cursor past the last column;
    /// consumed by the next `Print` or `LineFeed`.
    pub(crate) just_wrapped: bool,
    /// DECSC/DECRC save slot for the *active* screen's cursor.
    pub(crate) saved_cursor: Option<(usize, usize)>,
    pub(crate) cursor_visible: bool,
}

impl Grid {
    pub fn new(width: usize, height: usize, default_fg: Pixel, default_bg: Pixel) -> Self {
        Self {
            width,
            height,
            primary: Screen::blank(width, height, default_fg, default_bg),
            alternate: Screen::blank(width, height, default_fg, default_bg),
            active: Active::Primary,
            scr_begin: 0,
            scr_end: height.saturating_sub(1),
            default_fg,
            default_bg,
            just_wrapped: false,
            saved_cursor: None,
            cursor_visible: true,
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn cursor(&self) -> (usize, usize) {
        (self.active_screen().cursor_x, self.active_screen().cursor_y)
    }

    #[inline]
    pub fn scroll_region(&self) -> (usize, usize) {
        (self.scr_begin, self.scr_end)
    }

    #[inline]
    pub fn cursor_visible(&self) -> bool {
        self.cursor_visible
    }

    pub fn set_cursor_visible(&mut self, visible: bool) {
        self.cursor_visible = visible;
    }

    #[inline]
    pub fn active(&self) -> super::types::Active {
        self.active
    }

    #[inline]
    pub(crate) fn active_screen(&self) -> &Screen {
        match self.active {
            Active::Primary => &self.primary,
            Active::Alternate => &self.alternate,
        }
    }

    #[inline]
    pub(crate) fn active_screen_mut(&mut self) -> &mut Screen {
        match self.active {
            Active::Primary => &mut self.primary,
            Active::Alternate => &mut self.alternate,
        }
    }

    #[inline]
    pub(crate) fn idx(&self, row: usize, col: usize) -> usize {
        row * self.width + col
    }

    pub fn cell(&self, row: usize, col: usize) -> &Cell {
        &self.active_screen().cells[self.idx(row, col)]
    }

    // -- §4.1 primitives -----------------------------------------------

    /// `clear(cell)`: blank one cell; dirty only if content actually changed.
    pub fn clear(&mut self, row: usize, col: usize) {
        let (fg, bg) = (self.default_fg, self.default_bg);
        let i = self.idx(row, col);
        let blank = Cell::blank(fg, bg);
        let cells = &mut self.active_screen_mut().cells;
        let changed = cells[i] != blank;
        cells[i].glyph = blank.glyph;
        cells[i].fg = blank.fg;
        cells[i].bg = blank.bg;
        cells[i].bold = blank.bold;
        cells[i].italic = blank.italic;
        if changed {
            cells[i].dirty = true;
        }
    }

    /// `put(cell, glyph)`: write with the current rendition; always dirty.
    pub fn put(&mut self, row: usize, col: usize, glyph: char, rendition: &Rendition) {
        let i = self.idx(row, col);
        let cell = &mut self.active_screen_mut().cells[i];
        cell.glyph = glyph;
        cell.fg = rendition.fg;
        cell.bg = rendition.bg;
        cell.bold = rendition.bold;
        cell.italic = rendition.italic;
        cell.dirty = true;
    }

    /// `copy(dst, src)`: overwrite dst's content from src; dirty iff changed.
    pub fn copy(&mut self, dst: (usize, usize), src: (usize, usize)) {
        let si = self.idx(src.0, src.1);
        let di = self.idx(dst.0, dst.1);
        if si == di {
            return;
        }
        let src_cell = self.active_screen().cells[si];
        let cells = &mut self.active_screen_mut().cells;
        let changed = cells[di] != src_cell;
        cells[di].glyph = src_cell.glyph;
        cells[di].fg = src_cell.fg;
        cells[di].bg = src_cell.bg;
        cells[di].bold = src_cell.bold;
        cells[di].italic = src_cell.italic;
        if changed {
            cells[di].dirty = true;
        }
    }

    /// `shift_block(src_range, dst_start)`: stable copy of a contiguous
    /// row-major range, direction chosen to avoid self-overlap damage.
    pub fn shift_block(&mut self, src_range: std::ops::Range<usize>, dst_start: usize) {
        let len = src_range.len();
        if len == 0 || dst_start == src_range.start {
            return;
        }
        if dst_start < src_range.start {
            for i in 0..len {
                self.copy_index(dst_start + i, src_range.start + i);
            }
        } else {
            for i in (0..len).rev() {
                self.copy_index(dst_start + i, src_range.start + i);
            }
        }
    }

    fn copy_index(&mut self, dst: usize, src: usize) {
        if dst == src {
            return;
        }
        let src_cell = self.active_screen().cells[src];
        let cells = &mut self.active_screen_mut().cells;
        let changed = cells[dst] != src_cell;
        cells[dst].glyph = src_cell.glyph;
        cells[dst].fg = src_cell.fg;
        cells[dst].bg = src_cell.bg;
        cells[dst].bold = src_cell.bold;
        cells[dst].italic = src_cell.italic;
        if changed {
            cells[dst].dirty = true;
        }
    }

    /// `clear_range(range)`: apply `clear` to every cell in a row-major range.
    pub fn clear_range(&mut self, range: std::ops::Range<usize>) {
        let (fg, bg) = (self.default_fg, self.default_bg);
        let blank = Cell::blank(fg, bg);
        let cells = &mut self.active_screen_mut().cells;
        for i in range {
            let changed = cells[i] != blank;
            cells[i].glyph = blank.glyph;
            cells[i].fg = blank.fg;
            cells[i].bg = blank.bg;
            cells[i].bold = blank.bold;
            cells[i].italic = blank.italic;
            if changed {
                cells[i].dirty = true;
            }
        }
    }

    /// Mark one cell as drawn: the renderer calls this after painting a
    /// non-cursor cell so it is not redrawn again until it changes.
    pub fn mark_drawn(&mut self, row: usize, col: usize) {
        let i = self.idx(row, col);
        self.active_screen_mut().cells[i].dirty = false;
    }

    /// `dirty_all()`: force every cell's dirty flag true (used on expose).
    pub fn dirty_all(&mut self) {
        for cell in &mut self.active_screen_mut().cells {
            cell.dirty = true;
        }
    }

    /// `swap_buffers()`: exchange the `(cells, cursor_x, cursor_y)` triple
    /// between primary and alternate. The scroll region is not part of the
    /// swapped triple — it stays in effect for whichever screen becomes
    /// active.
    pub fn swap_buffers(&mut self) {
        self.active = match self.active {
            Active::Primary => Active::Alternate,
            Active::Alternate => Active::Primary,
        };
    }

    /// Full reset (`ESC c` / RIS): re-initialize both screens, the scroll
    /// region, and the save slot; preserve dimensions and palette defaults.
    pub fn reset(&mut self) {
        *self = Self::new(self.width, self.height, self.default_fg, self.default_bg);
    }
}
