//! The double-buffered cell grid: two W×H matrices (primary, alternate),
//! each with its own cursor, a single scroll region that follows whichever
//! is active, and the primitive + line-editing operations the Executor
//! drives off of.

mod content;
mod core;
mod cursor;
mod erase;
mod line_edit;
mod scroll;
mod types;

pub use core::Grid;
pub use types::{Active, Cell};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::Pixel;
    use crate::rendition::Rendition;

    #[test]
    fn clear_is_idempotent_on_dirty() {
        let mut g = Grid::new(4, 4, Pixel(0), Pixel(9));
        g.clear(0, 0);
        g.mark_drawn(0, 0);
        g.clear(0, 0);
        assert!(!g.cell(0, 0).dirty);
    }

    #[test]
    fn copy_equal_content_does_not_dirty() {
        let mut g = Grid::new(4, 4, Pixel(0), Pixel(9));
        let r = Rendition::new(Pixel(1), Pixel(9));
        g.put(0, 0, 'a', &r);
        g.put(0, 1, 'a', &r);
        g.mark_drawn(0, 1);
        g.copy((0, 1), (0, 0));
        assert!(!g.cell(0, 1).dirty);
    }

    #[test]
    fn new_grid_has_full_width_scroll_region() {
        let g = Grid::new(10, 20, Pixel(0), Pixel(9));
        assert_eq!(g.scroll_region(), (0, 19));
    }

    #[test]
    fn swap_buffers_round_trip_restores_state() {
        let mut g = Grid::new(4, 4, Pixel(0), Pixel(9));
        let r = Rendition::new(Pixel(1), Pixel(9));
        g.put(0, 0, '*', &r);
        g.move_cursor(2, 2);
        let region_before = g.scroll_region();
        g.swap_buffers();
        g.swap_buffers();
        assert_eq!(g.cell(0, 0).glyph, '*');
        assert_eq!(g.cursor(), (2, 2));
        assert_eq!(g.scroll_region(), region_before);
    }
}
