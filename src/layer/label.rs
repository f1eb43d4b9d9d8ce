//! Centered text label layer.

use super::{LayerEffect, RenderContext};
use crate::font::TextLayout;
use crate::icon::TextPlacement;

/// Draws a measured label at the center of the canvas.
///
/// # Emitted Properties
///
/// - [`TextPlacement`]: origin and extent of the drawn label.
pub struct LabelLayer {
    layout: TextLayout,
}

impl LabelLayer {
    pub fn new(layout: TextLayout) -> Self {
        Self { layout }
    }

    /// Where the label lands on a canvas of side `size`.
    pub fn placement(&self, size: u32) -> TextPlacement {
        TextPlacement::centered(size, self.layout.extent())
    }
}

impl LayerEffect for LabelLayer {
    fn transform(&self, ctx: &mut RenderContext) {
        let placement = self.placement(ctx.size());
        if !placement.fits_within(ctx.size()) {
            tracing::debug!(
                x = placement.x,
                y = placement.y,
                width = placement.extent.width,
                height = placement.extent.height,
                "label exceeds canvas, clipping"
            );
        }
        self.layout.draw(&mut ctx.canvas, placement.x, placement.y);
    }

    fn emit(&self, ctx: &mut RenderContext) {
        let placement = self.placement(ctx.size());
        ctx.set(placement);
    }
}
