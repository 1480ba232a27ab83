//! Condition icon: PNG bytes decoded once, drawn with half-block cells.

use image::{Rgba, RgbaImage, imageops::FilterType};
use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    style::Color,
    widgets::Widget,
};
use tracing::warn;

/// Pixels below this alpha are left to the background.
const ALPHA_CUTOFF: u8 = 128;

#[derive(Clone, Debug)]
pub struct IconImage {
    image: RgbaImage,
}

impl IconImage {
    /// `None` for bytes that are not a supported image; the caller shows a blank icon.
    pub fn decode(bytes: &[u8]) -> Option<Self> {
        match image::load_from_memory(bytes) {
            Ok(img) => Some(Self::from_rgba(img.to_rgba8())),
            Err(e) => {
                warn!(error = %e, len = bytes.len(), "could not decode icon");
                None
            }
        }
    }

    pub fn from_rgba(image: RgbaImage) -> Self {
        Self { image }
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }
}

/// Renders an [`IconImage`] scaled to fill its area. Each cell carries two
/// vertically stacked pixels: foreground on top, background below.
pub struct IconWidget<'a> {
    icon: &'a IconImage,
}

impl<'a> IconWidget<'a> {
    pub fn new(icon: &'a IconImage) -> Self {
        Self { icon }
    }
}

impl Widget for IconWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }

        let scaled = image::imageops::resize(
            &self.icon.image,
            u32::from(area.width),
            u32::from(area.height) * 2,
            FilterType::Triangle,
        );

        for row in 0..area.height {
            for col in 0..area.width {
                let x = u32::from(col);
                let y = u32::from(row) * 2;
                let top = opaque_color(scaled.get_pixel(x, y));
                let bottom = opaque_color(scaled.get_pixel(x, y + 1));

                let Some(cell) = buf.cell_mut(Position::new(area.x + col, area.y + row)) else {
                    continue;
                };
                match (top, bottom) {
                    (Some(top), Some(bottom)) => {
                        cell.set_char('▀').set_fg(top).set_bg(bottom);
                    }
                    (Some(top), None) => {
                        cell.set_char('▀').set_fg(top);
                    }
                    (None, Some(bottom)) => {
                        cell.set_char('▄').set_fg(bottom);
                    }
                    (None, None) => {}
                }
            }
        }
    }
}

fn opaque_color(pixel: &Rgba<u8>) -> Option<Color> {
    let [r, g, b, a] = pixel.0;
    (a >= ALPHA_CUTOFF).then_some(Color::Rgb(r, g, b))
}
