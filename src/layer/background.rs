//! Circular background layer.

use image::Rgba;
use resvg::tiny_skia::{FillRule, PathBuilder, Rect, Transform};

use super::{LayerEffect, RenderContext};
use crate::icon::RectPx;
use crate::raster::solid_paint;

/// Fills a circle spanning the whole canvas.
///
/// The canvas starts out in the same color, so the fill does not change any
/// pixel today. It stays as the step that defines the icon's shape, so a
/// different canvas fill keeps the circular look.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BackgroundLayer {
    pub color: Rgba<u8>,
}

impl BackgroundLayer {
    pub fn new(color: Rgba<u8>) -> Self {
        Self { color }
    }

    /// Bounding box of the circle: the full canvas.
    pub fn bounds(size: u32) -> RectPx {
        RectPx::from_size(size, size)
    }
}

impl LayerEffect for BackgroundLayer {
    fn transform(&self, ctx: &mut RenderContext) {
        let bounds = Self::bounds(ctx.size());
        let Some(oval) = Rect::from_xywh(
            bounds.x as f32,
            bounds.y as f32,
            bounds.width as f32,
            bounds.height as f32,
        ) else {
            return;
        };
        let Some(path) = PathBuilder::from_oval(oval) else {
            return;
        };

        ctx.canvas.fill_path(
            &path,
            &solid_paint(self.color),
            FillRule::Winding,
            Transform::identity(),
            None,
        );
    }
}
