//! Concrete `Renderer` implementation combining [`GpuContext`], the quad
//! pipeline, and the glyphon text pipeline into one frame.

use std::sync::Arc;

use glyphon::Color as GlyphonColor;
use winit::window::Window;

use term_core::palette::Pixel;
use term_platform::window::{CellMetrics, FontStyle, Renderer};

use crate::gpu::{GpuContext, RendererError};
use crate::quad::{QuadInstance, QuadRenderer};
use crate::text::{GlyphCell, TextRenderer};

pub struct GpuRenderer {
    gpu: GpuContext,
    quad: QuadRenderer,
    text: TextRenderer,
    cell_metrics: CellMetrics,
    pending_rects: Vec<QuadInstance>,
    pending_glyphs: Vec<GlyphCell>,
    clear_color: wgpu::Color,
}

const FONT_SIZE: f32 = 16.0;
const LINE_HEIGHT_MULTIPLIER: f32 = 1.2;

impl GpuRenderer {
    pub async fn new(window: Arc<Window>) -> Result<Self, RendererError> {
        let gpu = GpuContext::new(window).await?;
        let quad = QuadRenderer::new(&gpu.device, gpu.format());
        let text = TextRenderer::new(&gpu.device, &gpu.queue, gpu.format(), FONT_SIZE, LINE_HEIGHT_MULTIPLIER);
        let (cell_width, cell_height) = text.cell_size();

        Ok(Self {
            gpu,
            quad,
            text,
            cell_metrics: CellMetrics {
                cell_width,
                cell_height,
            },
            pending_rects: Vec::new(),
            pending_glyphs: Vec::new(),
            clear_color: wgpu::Color {
                r: 0.0,
                g: 0.0,
                b: 0.0,
                a: 1.0,
            },
        })
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.gpu.resize(width, height);
    }
}

impl Renderer for GpuRenderer {
    fn alloc_color(&mut self, _rgb: (u8, u8, u8)) -> Pixel {
        let (r, g, b) = _rgb;
        Pixel(u32::from_be_bytes([0xFF, r, g, b]))
    }

    fn cell_metrics(&self) -> CellMetrics {
        self.cell_metrics
    }

    fn fill_rect(&mut self, col: usize, row: usize, color: Pixel) {
        let [_, r, g, b] = color.0.to_be_bytes();
        self.pending_rects.push(QuadInstance {
            rect: [
                col as f32 * self.cell_metrics.cell_width,
                row as f32 * self.cell_metrics.cell_height,
                self.cell_metrics.cell_width,
                self.cell_metrics.cell_height,
            ],
            color: [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0],
        });
    }

    fn draw_text(&mut self, col: usize, row: usize, glyph: char, fg: Pixel, style: FontStyle) {
        let [_, r, g, b] = fg.0.to_be_bytes();
        self.pending_glyphs.push(GlyphCell {
            col,
            row,
            ch: glyph,
            color: GlyphonColor::rgba(r, g, b, 255),
            style,
        });
    }

    fn present(&mut self) {
        let width = self.gpu.size.width as f32;
        let height = self.gpu.size.height as f32;

        self.quad.prepare(&self.gpu.queue, &self.pending_rects, width, height);
        self.text
            .prepare_cells(&self.gpu.device, &self.gpu.queue, &self.pending_glyphs, width, height);

        let frame = match self.gpu.current_texture() {
            Ok(f) => f,
            Err(e) => {
                tracing::warn!("failed to acquire surface texture: {e}");
                self.pending_rects.clear();
                self.pending_glyphs.clear();
                return;
            }
        };
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("term frame encoder"),
            });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("term frame pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            self.quad.render(&mut pass);
            self.text.render(&mut pass);
        }

        self.gpu.queue.submit(Some(encoder.finish()));
        frame.present();

        self.pending_rects.clear();
        self.pending_glyphs.clear();
    }
}
