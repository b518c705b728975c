//! SGR (Select Graphic Rendition) — §4.4.
//!
//! @module term-core/executor/sgr

use super::types::{Params, ProtocolError, Reply};
use super::Executor;

impl Executor {
    pub(super) fn dispatch_sgr(&mut self, params: &Params) -> Result<Option<Reply>, ProtocolError> {
        let codes = params.all();
        // An empty parameter list means SGR 0.
        if codes.is_empty() {
            self.rendition.reset(self.palette.default_fg(), self.palette.default_bg());
            return Ok(None);
        }

        let mut i = 0;
        while i < codes.len() {
            match codes[i] {
                0 => self.rendition.reset(self.palette.default_fg(), self.palette.default_bg()),
                1 => self.rendition.bold = true,
                3 => self.rendition.italic = true,
                30..=37 => self.rendition.fg = self.palette.get((codes[i] - 30) as u8),
                38 => {
                    if codes.get(i + 1) == Some(&5) {
                        if let Some(&n) = codes.get(i + 2) {
                            self.rendition.fg = self.palette.get(n as u8);
                        }
                        i += 2;
                    }
                }
                40..=47 => self.rendition.bg = self.palette.get((codes[i] - 40) as u8),
                48 => {
                    if codes.get(i + 1) == Some(&5) {
                        if let Some(&n) = codes.get(i + 2) {
                            self.rendition.bg = self.palette.get(n as u8);
                        }
                        i += 2;
                    }
                }
                90..=97 => self.rendition.fg = self.palette.get((codes[i] - 90 + 8) as u8),
                101..=107 => self.rendition.bg = self.palette.get((codes[i] - 100 + 8) as u8),
                _ => {} // unsupported SGR codes are ignored, not errors
            }
            i += 1;
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use crate::executor::{Executor, ExecutorMode};
    use crate::palette::{indexed_to_rgb, ColorSource, Palette, Pixel};

    struct IdentitySource;
    impl ColorSource for IdentitySource {
        fn alloc(&mut self, rgb: (u8, u8, u8)) -> Pixel {
            Pixel(u32::from_be_bytes([0xFF, rgb.0, rgb.1, rgb.2]))
        }
    }

    fn executor() -> Executor {
        let mut src = IdentitySource;
        let palette = Palette::build(&mut src, (255, 255, 255), (0, 0, 0));
        Executor::new(10, 5, palette, ExecutorMode::Lenient)
    }

    fn pixel_for(idx: u8) -> Pixel {
        let (r, g, b) = indexed_to_rgb(idx);
        Pixel(u32::from_be_bytes([0xFF, r, g, b]))
    }

    #[test]
    fn sgr_sets_fg_bold_italic() {
        let mut e = executor();
        e.execute(crate::parser::Command::Csi { params: "1;3;31".into(), marker: None, final_byte: b'm' }).unwrap();
        assert!(e.rendition().bold);
        assert!(e.rendition().italic);
        assert_eq!(e.rendition().fg, pixel_for(1));
    }

    #[test]
    fn sgr_256_color() {
        let mut e = executor();
        e.execute(crate::parser::Command::Csi { params: "38;5;196".into(), marker: None, final_byte: b'm' }).unwrap();
        assert_eq!(e.rendition().fg, pixel_for(196));
    }

    #[test]
    fn sgr_reset_clears_attributes() {
        let mut e = executor();
        e.execute(crate::parser::Command::Csi { params: "1;31".into(), marker: None, final_byte: b'm' }).unwrap();
        e.execute(crate::parser::Command::Csi { params: "0".into(), marker: None, final_byte: b'm' }).unwrap();
        assert!(!e.rendition().bold);
        assert_eq!(e.rendition().fg, e.palette().default_fg());
    }

    #[test]
    fn sgr_bright_fg_and_bg() {
        let mut e = executor();
        e.execute(crate::parser::Command::Csi { params: "90".into(), marker: None, final_byte: b'm' }).unwrap();
        assert_eq!(e.rendition().fg, pixel_for(8));
        e.execute(crate::parser::Command::Csi { params: "107".into(), marker: None, final_byte: b'm' }).unwrap();
        assert_eq!(e.rendition().bg, pixel_for(15));
    }
}
