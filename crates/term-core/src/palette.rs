//! Static SGR color tables, resolved once at startup into renderer-pixel
//! values obtained from the display backend.
//!
//! @module term-core/palette

/// An opaque renderer-pixel value. Rendition and Grid cells only ever carry
/// `Pixel`s, never color names or indices — the mapping happens once, here,
/// at startup.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Hash)]
pub struct Pixel(pub u32);

/// The display backend's color allocator. `term-renderer` implements this;
/// `term-core` only depends on the trait.
pub trait ColorSource {
    /// Resolve an (r, g, b) triple to a renderer-pixel value.
    fn alloc(&mut self, rgb: (u8, u8, u8)) -> Pixel;
}

/// Standard ANSI 16-color palette (indices 0-15) as `(r, g, b)`.
pub const ANSI_COLORS: [(u8, u8, u8); 16] = [
    (0x00, 0x00, 0x00), // 0  Black
    (0xCD, 0x00, 0x00), // 1  Red
    (0x00, 0xCD, 0x00), // 2  Green
    (0xCD, 0xCD, 0x00), // 3  Yellow
    (0x00, 0x00, 0xEE), // 4  Blue
    (0xCD, 0x00, 0xCD), // 5  Magenta
    (0x00, 0xCD, 0xCD), // 6  Cyan
    (0xE5, 0xE5, 0xE5), // 7  White
    (0x7F, 0x7F, 0x7F), // 8  Bright Black
    (0xFF, 0x00, 0x00), // 9  Bright Red
    (0x00, 0xFF, 0x00), // 10 Bright Green
    (0xFF, 0xFF, 0x00), // 11 Bright Yellow
    (0x5C, 0x5C, 0xFF), // 12 Bright Blue
    (0xFF, 0x00, 0xFF), // 13 Bright Magenta
    (0x00, 0xFF, 0xFF), // 14 Bright Cyan
    (0xFF, 0xFF, 0xFF), // 15 Bright White
];

/// Resolve an indexed color (0-255) to `(r, g, b)`.
///
/// - 0-15: standard ANSI palette
/// - 16-231: 6x6x6 color cube
/// - 232-255: 24-step grayscale ramp
pub fn indexed_to_rgb(idx: u8) -> (u8, u8, u8) {
    match idx {
        0..=15 => ANSI_COLORS[idx as usize],
        16..=231 => {
            let i = idx - 16;
            let r = (i / 36) % 6;
            let g = (i / 6) % 6;
            let b = i % 6;
            let to_val = |c: u8| if c == 0 { 0 } else { 55 + c * 40 };
            (to_val(r), to_val(g), to_val(b))
        }
        232..=255 => {
            let v = 8 + (idx - 232) * 10;
            (v, v, v)
        }
    }
}

/// The full 256-entry SGR color table plus the default foreground and
/// background, resolved once at startup and never mutated afterward.
pub struct Palette {
    entries: [Pixel; 256],
    default_fg: Pixel,
    default_bg: Pixel,
}

impl Palette {
    /// Build the palette by resolving all 256 indexed colors plus the
    /// default fg/bg through `source`.
    pub fn build(source: &mut impl ColorSource, default_fg_rgb: (u8, u8, u8), default_bg_rgb: (u8, u8, u8)) -> Self {
        let mut entries = [Pixel::default(); 256];
        for (idx, entry) in entries.iter_mut().enumerate() {
            *entry = source.alloc(indexed_to_rgb(idx as u8));
        }
        Self {
            entries,
            default_fg: source.alloc(default_fg_rgb),
            default_bg: source.alloc(default_bg_rgb),
        }
    }

    #[inline]
    pub fn get(&self, idx: u8) -> Pixel {
        self.entries[idx as usize]
    }

    #[inline]
    pub fn default_fg(&self) -> Pixel {
        self.default_fg
    }

    #[inline]
    pub fn default_bg(&self) -> Pixel {
        self.default_bg
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct IdentitySource;
    impl ColorSource for IdentitySource {
        fn alloc(&mut self, rgb: (u8, u8, u8)) -> Pixel {
            Pixel(u32::from_be_bytes([0xFF, rgb.0, rgb.1, rgb.2]))
        }
    }

    #[test]
    fn ansi_black_is_zero() {
        assert_eq!(indexed_to_rgb(0), (0x00, 0x00, 0x00));
    }

    #[test]
    fn ansi_bright_white_is_ff() {
        assert_eq!(indexed_to_rgb(15), (0xFF, 0xFF, 0xFF));
    }

    #[test]
    fn color_cube_index_16_is_black() {
        assert_eq!(indexed_to_rgb(16), (0, 0, 0));
    }

    #[test]
    fn color_cube_index_196_is_red() {
        // 196 = 16 + 5*36 + 0*6 + 0 -> r=5, g=0, b=0
        assert_eq!(indexed_to_rgb(196), (255, 0, 0));
    }

    #[test]
    fn grayscale_232_is_dark() {
        assert_eq!(indexed_to_rgb(232), (8, 8, 8));
    }

    #[test]
    fn grayscale_255_is_light() {
        assert_eq!(indexed_to_rgb(255), (238, 238, 238));
    }

    #[test]
    fn palette_resolves_all_256_entries() {
        let mut src = IdentitySource;
        let palette = Palette::build(&mut src, (255, 255, 255), (0, 0, 0));
        for idx in 0..=255u8 {
            let (r, g, b) = indexed_to_rgb(idx);
            assert_eq!(palette.get(idx), Pixel(u32::from_be_bytes([0xFF, r, g, b])));
        }
    }

    #[test]
    fn palette_fixed_after_init() {
        let mut src = IdentitySource;
        let palette = Palette::build(&mut src, (1, 2, 3), (4, 5, 6));
        assert_eq!(palette.default_fg(), Pixel(u32::from_be_bytes([0xFF, 1, 2, 3])));
        assert_eq!(palette.default_bg(), Pixel(u32::from_be_bytes([0xFF, 4, 5, 6])));
    }
}
