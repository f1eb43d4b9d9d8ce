//! Conversions between the `tiny_skia` canvas and `image` buffers.

use image::{Rgba, RgbaImage};
use resvg::tiny_skia::{Color, Paint, Pixmap};

use crate::error::IconError;

/// Allocates a square canvas filled with `background`.
pub fn solid_canvas(size: u32, background: Rgba<u8>) -> Result<Pixmap, IconError> {
    let mut pixmap = Pixmap::new(size, size).ok_or(IconError::CanvasAllocation { size })?;
    pixmap.fill(to_skia_color(background));
    Ok(pixmap)
}

pub fn to_skia_color(color: Rgba<u8>) -> Color {
    let [r, g, b, a] = color.0;
    Color::from_rgba8(r, g, b, a)
}

/// A solid paint without anti-aliasing.
///
/// Coverage is either zero or full, so painting a color over the same color
/// leaves the pixels bit-identical.
pub fn solid_paint(color: Rgba<u8>) -> Paint<'static> {
    let mut paint = Paint {
        anti_alias: false,
        ..Paint::default()
    };
    paint.set_color(to_skia_color(color));
    paint
}

/// Hex form of an opaque color, as used in SVG attributes.
pub fn hex_rgb(color: Rgba<u8>) -> String {
    let [r, g, b, _] = color.0;
    format!("#{:02x}{:02x}{:02x}", r, g, b)
}

/// Converts a tiny_skia Pixmap to an image::RgbaImage.
pub fn pixmap_to_rgba_image(pixmap: &Pixmap) -> RgbaImage {
    let width = pixmap.width();
    let mut img = RgbaImage::new(width, pixmap.height());

    for (i, pixel) in pixmap.pixels().iter().enumerate() {
        let x = i as u32 % width;
        let y = i as u32 / width;
        // tiny_skia stores premultiplied alpha
        let (r, g, b, a) = unpremultiply(pixel.red(), pixel.green(), pixel.blue(), pixel.alpha());
        img.put_pixel(x, y, Rgba([r, g, b, a]));
    }

    img
}

/// Unpremultiplies a premultiplied alpha pixel.
fn unpremultiply(r: u8, g: u8, b: u8, a: u8) -> (u8, u8, u8, u8) {
    match a {
        0 => (0, 0, 0, 0),
        255 => (r, g, b, a),
        _ => {
            let a_f = a as f32 / 255.0;
            (
                (r as f32 / a_f).round().min(255.0) as u8,
                (g as f32 / a_f).round().min(255.0) as u8,
                (b as f32 / a_f).round().min(255.0) as u8,
                a,
            )
        }
    }
}
