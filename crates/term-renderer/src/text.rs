//! GPU glyph rendering backed by glyphon, batching same-color runs per row
//! the way the prior renderer's grid preparation did.

use glyphon::{
    Attrs, Buffer as TextBuffer, Cache, Color as GlyphonColor, Family, FontSystem, Metrics,
    Resolution, Shaping, SwashCache, TextArea, TextAtlas, TextBounds,
    TextRenderer as GlyphonRenderer, Viewport, Weight,
};

use term_platform::window::FontStyle;

/// One resolved glyph, accumulated during a frame and flushed in
/// [`TextRenderer::prepare_cells`].
pub struct GlyphCell {
    pub col: usize,
    pub row: usize,
    pub ch: char,
    pub color: GlyphonColor,
    pub style: FontStyle,
}

pub struct TextRenderer {
    font_system: FontSystem,
    swash_cache: SwashCache,
    cache: Cache,
    atlas: TextAtlas,
    viewport: Viewport,
    renderer: GlyphonRenderer,
    cell_width: f32,
    cell_height: f32,
    font_size: f32,
    line_height: f32,
}

impl TextRenderer {
    pub fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        format: wgpu::TextureFormat,
        font_size: f32,
        line_height_multiplier: f32,
    ) -> Self {
        let mut font_system = FontSystem::new();
        let swash_cache = SwashCache::new();
        let cache = Cache::new(device);
        let mut atlas = TextAtlas::new(device, queue, &cache, format);
        let viewport = Viewport::new(device, &cache);
        let renderer =
            GlyphonRenderer::new(&mut atlas, device, wgpu::MultisampleState::default(), None);

        let line_height = font_size * line_height_multiplier;
        let (cell_width, cell_height) = measure_cell(&mut font_system, font_size, line_height);

        Self {
            font_system,
            swash_cache,
            cache,
            atlas,
            viewport,
            renderer,
            cell_width,
            cell_height,
            font_size,
            line_height,
        }
    }

    pub fn cell_size(&self) -> (f32, f32) {
        (self.cell_width, self.cell_height)
    }

    /// Batch same-color, same-style runs per row and hand them to glyphon.
    pub fn prepare_cells(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        cells: &[GlyphCell],
        viewport_width: f32,
        viewport_height: f32,
    ) {
        self.viewport.update(
            queue,
            Resolution {
                width: viewport_width as u32,
                height: viewport_height as u32,
            },
        );
        self.atlas.trim();

        let mut by_row: std::collections::BTreeMap<usize, Vec<&GlyphCell>> =
            std::collections::BTreeMap::new();
        for cell in cells {
            by_row.entry(cell.row).or_default().push(cell);
        }

        let metrics = Metrics::new(self.font_size, self.line_height);
        let mut buffers: Vec<(usize, TextBuffer)> = Vec::with_capacity(by_row.len());

        for (row, mut row_cells) in by_row {
            row_cells.sort_by_key(|c| c.col);
            let mut buffer = TextBuffer::new(&mut self.font_system, metrics);
            buffer.set_size(&mut self.font_system, Some(viewport_width), Some(self.line_height));

            let mut text = String::with_capacity(row_cells.len());
            let mut spans: Vec<(usize, usize, GlyphonColor, FontStyle)> = Vec::new();
            let mut run_start = 0;
            let mut run_color = None;
            let mut run_style = None;

            for cell in &row_cells {
                if run_color != Some(cell.color) || run_style != Some(cell.style) {
                    if let (Some(color), Some(style)) = (run_color, run_style) {
                        spans.push((run_start, text.len(), color, style));
                    }
                    run_start = text.len();
                    run_color = Some(cell.color);
                    run_style = Some(cell.style);
                }
                text.push(cell.ch);
            }
            if let (Some(color), Some(style)) = (run_color, run_style) {
                spans.push((run_start, text.len(), color, style));
            }

            if spans.is_empty() {
                buffer.set_text(&mut self.font_system, " ", Attrs::new().family(Family::Monospace), Shaping::Basic);
            } else {
                let rich: Vec<(&str, Attrs)> = spans
                    .iter()
                    .map(|(s, e, color, style)| {
                        (&text[*s..*e], attrs_for_style(*style).color(*color))
                    })
                    .collect();
                buffer.set_rich_text(
                    &mut self.font_system,
                    rich,
                    Attrs::new().family(Family::Monospace),
                    Shaping::Basic,
                );
            }
            buffer.shape_until_scroll(&mut self.font_system, false);
            buffers.push((row, buffer));
        }

        let text_areas: Vec<TextArea> = buffers
            .iter()
            .map(|(row, buffer)| TextArea {
                buffer,
                left: 0.0,
                top: *row as f32 * self.line_height,
                scale: 1.0,
                bounds: TextBounds {
                    left: 0,
                    top: 0,
                    right: viewport_width as i32,
                    bottom: viewport_height as i32,
                },
                default_color: GlyphonColor::rgba(255, 255, 255, 255),
                custom_glyphs: &[],
            })
            .collect();

        self.renderer
            .prepare(
                device,
                queue,
                &mut self.font_system,
                &mut self.atlas,
                &self.viewport,
                text_areas,
                &mut self.swash_cache,
            )
            .unwrap_or_else(|e| tracing::warn!("glyphon prepare error: {:?}", e));
    }

    pub fn render<'pass>(&'pass self, pass: &mut wgpu::RenderPass<'pass>) {
        self.renderer
            .render(&self.atlas, &self.viewport, pass)
            .unwrap_or_else(|e| tracing::warn!("glyphon render error: {:?}", e));
    }
}

fn attrs_for_style(style: FontStyle) -> Attrs<'static> {
    let attrs = Attrs::new().family(Family::Monospace);
    match style {
        FontStyle::Regular => attrs,
        FontStyle::Bold => attrs.weight(Weight::BOLD),
        FontStyle::Italic => attrs.style(cosmic_text::Style::Italic),
        FontStyle::BoldItalic => attrs.weight(Weight::BOLD).style(cosmic_text::Style::Italic),
    }
}

fn measure_cell(font_system: &mut FontSystem, font_size: f32, line_height: f32) -> (f32, f32) {
    let metrics = Metrics::new(font_size, line_height);
    let mut buffer = TextBuffer::new(font_system, metrics);
    buffer.set_size(font_system, Some(font_size * 10.0), Some(line_height * 2.0));
    buffer.set_text(font_system, "M", Attrs::new().family(Family::Monospace), Shaping::Advanced);
    buffer.shape_until_scroll(font_system, false);

    let mut width = font_size * 0.6;
    if let Some(run) = buffer.layout_runs().next() {
        if let Some(glyph) = run.glyphs.iter().next() {
            width = glyph.w;
        }
    }
    (width, line_height)
}
