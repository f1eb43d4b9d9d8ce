//! Drawing layers applied to an icon canvas.
//!
//! An icon is produced by running a fixed [`LayerPipeline`] over a
//! [`RenderContext`]:
//!
//! ```text
//! Solid canvas (background color)
//!     │
//!     ▼
//! ┌────────────┐
//! │ Background │ ◄── circle spanning the full canvas
//! └─────┬──────┘
//!       │
//!       ▼
//! ┌────────────┐
//! │   Label    │ ◄── centered text, emits TextPlacement
//! └────────────┘
//! ```
//!
//! Each layer implements [`LayerEffect`]: it transforms the canvas and may
//! emit typed properties that later layers or the caller can read.

pub mod background;
pub mod label;

pub use background::BackgroundLayer;
pub use label::LabelLayer;

use std::any::{Any, TypeId};
use std::collections::HashMap;

use image::Rgba;
use resvg::tiny_skia::Pixmap;

use crate::error::IconError;
use crate::icon::{RenderedIcon, TextPlacement};
use crate::raster::{pixmap_to_rgba_image, solid_canvas};

// ============================================================================
// Render Context
// ============================================================================

/// Context that flows through the rendering pipeline.
///
/// Holds the canvas being drawn on and a typed property bag for values
/// emitted by layers.
pub struct RenderContext {
    /// Square canvas, premultiplied RGBA.
    pub canvas: Pixmap,

    properties: HashMap<TypeId, Box<dyn Any + Send + Sync>>,
}

impl RenderContext {
    /// Creates a context with a square canvas filled with `background`.
    pub fn new(size: u32, background: Rgba<u8>) -> Result<Self, IconError> {
        Ok(Self {
            canvas: solid_canvas(size, background)?,
            properties: HashMap::new(),
        })
    }

    /// Side length of the canvas.
    pub fn size(&self) -> u32 {
        self.canvas.width()
    }

    /// Sets a typed property that downstream layers can read.
    pub fn set<T: Any + Send + Sync>(&mut self, value: T) {
        self.properties.insert(TypeId::of::<T>(), Box::new(value));
    }

    /// Gets a typed property set by an upstream layer.
    pub fn get<T: Any + Send + Sync>(&self) -> Option<&T> {
        self.properties
            .get(&TypeId::of::<T>())
            .and_then(|b| b.downcast_ref())
    }

    /// Finishes rendering, converting the canvas to a straight-alpha image.
    pub fn into_icon(self) -> RenderedIcon {
        let placement = self.get::<TextPlacement>().copied().unwrap_or_default();
        RenderedIcon::new(pixmap_to_rgba_image(&self.canvas), placement)
    }
}

// ============================================================================
// Layer Trait
// ============================================================================

/// A self-contained drawing step.
///
/// The separation of [`transform`](Self::transform) and [`emit`](Self::emit)
/// keeps property emission in one place.
pub trait LayerEffect {
    /// Draws onto `ctx.canvas`.
    fn transform(&self, ctx: &mut RenderContext);

    /// Emits properties for downstream consumers. Called after
    /// [`transform`](Self::transform).
    fn emit(&self, _ctx: &mut RenderContext) {}

    /// Runs [`transform`](Self::transform) then [`emit`](Self::emit).
    fn apply(&self, ctx: &mut RenderContext) {
        self.transform(ctx);
        self.emit(ctx);
    }
}

// ============================================================================
// Layer Pipeline
// ============================================================================

/// The fixed sequence of layers making up an icon.
pub struct LayerPipeline {
    pub background: BackgroundLayer,
    pub label: LabelLayer,
}

impl LayerPipeline {
    pub fn new(background: BackgroundLayer, label: LabelLayer) -> Self {
        Self { background, label }
    }

    /// Allocates a canvas of side `size` and runs every layer over it.
    pub fn render(&self, size: u32) -> Result<RenderedIcon, IconError> {
        let mut ctx = RenderContext::new(size, self.background.color)?;

        self.background.apply(&mut ctx);
        self.label.apply(&mut ctx);

        Ok(ctx.into_icon())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Marker(u32);

    #[test]
    fn context_properties_are_typed() {
        let mut ctx = RenderContext::new(4, Rgba([0, 0, 0, 255])).unwrap();
        assert!(ctx.get::<Marker>().is_none());

        ctx.set(Marker(7));
        assert_eq!(ctx.get::<Marker>(), Some(&Marker(7)));
        assert!(ctx.get::<TextPlacement>().is_none());
    }

    #[test]
    fn zero_sized_canvas_cannot_be_allocated() {
        assert!(matches!(
            RenderContext::new(0, Rgba([0, 0, 0, 255])),
            Err(IconError::CanvasAllocation { size: 0 })
        ));
    }

    #[test]
    fn into_icon_defaults_placement_when_no_label_ran() {
        let ctx = RenderContext::new(8, Rgba([1, 2, 3, 255])).unwrap();
        let icon = ctx.into_icon();
        assert_eq!(icon.placement, TextPlacement::default());
        assert_eq!(icon.data.get_pixel(7, 7).0, [1, 2, 3, 255]);
    }
}
