//! Current graphic-rendition state: the attributes stamped into newly
//! written cells.
//!
//! @module term-core/rendition

use crate::palette::Pixel;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rendition {
    pub fg: Pixel,
    pub bg: Pixel,
    pub bold: bool,
    pub italic: bool,
}

impl Rendition {
    pub fn new(default_fg: Pixel, default_bg: Pixel) -> Self {
        Self {
            fg: default_fg,
            bg: default_bg,
            bold: false,
            italic: false,
        }
    }

    /// SGR 0: reset to the default fg/bg with no attributes.
    pub fn reset(&mut self, default_fg: Pixel, default_bg: Pixel) {
        self.fg = default_fg;
        self.bg = default_bg;
        self.bold = false;
        self.italic = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_uses_defaults() {
        let r = Rendition::new(Pixel(1), Pixel(2));
        assert_eq!(r.fg, Pixel(1));
        assert_eq!(r.bg, Pixel(2));
        assert!(!r.bold);
        assert!(!r.italic);
    }

    #[test]
    fn reset_restores_defaults() {
        let mut r = Rendition::new(Pixel(1), Pixel(2));
        r.fg = Pixel(9);
        r.bold = true;
        r.italic = true;
        r.reset(Pixel(1), Pixel(2));
        assert_eq!(r.fg, Pixel(1));
        assert_eq!(r.bg, Pixel(2));
        assert!(!r.bold);
        assert!(!r.italic);
    }
}
