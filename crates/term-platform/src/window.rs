//! Trait boundary between `term-core`'s grid/executor state and a concrete
//! windowing + GPU backend (`term-renderer` implements these for a real
//! window; tests can implement them against a plain buffer). Mirrors the
//! `Visualizer` trait seam the renderer crate already draws around its own
//! GPU collaborators, generalized to §6's "Renderer" and "Window System"
//! external interfaces.
//!
//! @module term-platform/window

use term_core::palette::Pixel;

/// Monospace cell dimensions a backend measures once at startup and the
/// run loop uses to convert pixel-space window events into grid columns
/// and rows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellMetrics {
    pub cell_width: f32,
    pub cell_height: f32,
}

impl CellMetrics {
    /// Convert a window size in physical pixels to a grid size, always
    /// keeping at least a 1x1 grid.
    pub fn grid_size(&self, width_px: u32, height_px: u32) -> (usize, usize) {
        let cols = ((width_px as f32 / self.cell_width).floor() as usize).max(1);
        let rows = ((height_px as f32 / self.cell_height).floor() as usize).max(1);
        (cols, rows)
    }
}

/// Which of the three font faces a glyph should be drawn with. The parser
/// and grid only ever carry `bold`/`italic` booleans on [`Rendition`]
/// (term_core::rendition::Rendition); a backend resolves those into a
/// concrete face via this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FontStyle {
    #[default]
    Regular,
    Bold,
    Italic,
    BoldItalic,
}

impl FontStyle {
    pub fn from_attrs(bold: bool, italic: bool) -> Self {
        match (bold, italic) {
            (false, false) => FontStyle::Regular,
            (true, false) => FontStyle::Bold,
            (false, true) => FontStyle::Italic,
            (true, true) => FontStyle::BoldItalic,
        }
    }
}

/// Events the window system surfaces to the run loop (§5 "window
/// connection"). Deliberately minimal: no mouse, no resize-while-typing
/// state machine — just enough to repaint and forward keys.
#[derive(Debug, Clone, PartialEq)]
pub enum WindowEvent {
    /// The window wants a redraw (e.g. after an OS expose event).
    RedrawRequested,
    /// A key was pressed; carries the platform-independent classification
    /// the input encoder consumes.
    KeyPress(crate::input_encoder::Key),
    /// The window was resized to the given physical pixel dimensions.
    Resized { width: u32, height: u32 },
    /// The user asked to close the window.
    CloseRequested,
}

/// What a concrete backend must provide to paint a grid of cells.
///
/// `term-renderer`'s wgpu+glyphon backend is the production implementation;
/// a test double only needs to record calls, since term-core never touches
/// this trait directly (it is a term-app / term-platform concern).
pub trait Renderer {
    /// Allocate (or look up) the device-native color for an RGB triple.
    /// Called once per distinct color during palette resolution (§4 "the
    /// Palette is resolved once at startup").
    fn alloc_color(&mut self, rgb: (u8, u8, u8)) -> Pixel;

    /// The measured cell metrics for the active font.
    fn cell_metrics(&self) -> CellMetrics;

    /// Fill one cell's background.
    fn fill_rect(&mut self, col: usize, row: usize, color: Pixel);

    /// Draw one cell's glyph over whatever background is already painted.
    fn draw_text(&mut self, col: usize, row: usize, glyph: char, fg: Pixel, style: FontStyle);

    /// Present the accumulated frame.
    fn present(&mut self);
}

/// What a concrete backend must provide to pump window events and expose
/// a readiness primitive the run loop can treat uniformly with the PTY
/// master and stdin fds (§5).
pub trait WindowSystem {
    /// Drain and return window events accumulated since the last call.
    /// Non-blocking: returns an empty vec if nothing happened.
    fn poll_events(&mut self) -> Vec<WindowEvent>;

    /// A file descriptor the run loop can register for readability,
    /// signalling that `poll_events` has something to return.
    #[cfg(unix)]
    fn raw_fd(&self) -> std::os::unix::io::RawFd;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_size_floors_and_floors_to_at_least_one() {
        let metrics = CellMetrics {
            cell_width: 10.0,
            cell_height: 20.0,
        };
        assert_eq!(metrics.grid_size(805, 402), (80, 20));
        assert_eq!(metrics.grid_size(1, 1), (1, 1));
    }

    #[test]
    fn font_style_from_attrs_covers_all_combinations() {
        assert_eq!(FontStyle::from_attrs(false, false), FontStyle::Regular);
        assert_eq!(FontStyle::from_attrs(true, false), FontStyle::Bold);
        assert_eq!(FontStyle::from_attrs(false, true), FontStyle::Italic);
        assert_eq!(FontStyle::from_attrs(true, true), FontStyle::BoldItalic);
    }
}
