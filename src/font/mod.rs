//! Font resolution with graceful fallback.
//!
//! A [`FontChain`] holds an ordered list of [`FontProvider`]s and always ends
//! with the embedded [`BuiltinFace`]. Each render call walks the chain:
//!
//! 1. ask the provider for a [`FontHandle`] at the requested point size,
//! 2. lay the label out with that handle,
//! 3. on a [`FontResolutionError`] at either step, move on to the next provider.
//!
//! Only resolution failures are recovered. The builtin face never returns
//! an error, so the chain always produces a drawable [`TextLayout`].
//!
//! Providers are injected rather than looked up globally, which keeps the
//! renderer testable with a fake provider.

pub mod builtin;
mod outline;
pub mod system;

pub use builtin::{BuiltinFace, NATIVE_POINT_SIZE};
pub use outline::{FontHandle, OutlineText};
pub use system::NamedFontProvider;

use image::Rgba;
use resvg::tiny_skia::Pixmap;

use crate::error::FontResolutionError;
use crate::icon::SizePx;

// ============================================================================
// FontProvider
// ============================================================================

/// A source of fonts that may or may not be available on this host.
pub trait FontProvider: Send + Sync {
    /// Short description used in log output.
    fn describe(&self) -> String;

    /// Resolves a drawable font at `point_size`.
    fn resolve(&self, point_size: f32) -> Result<FontHandle, FontResolutionError>;
}

// ============================================================================
// TextLayout
// ============================================================================

/// A measured label, ready to be drawn at any origin.
pub enum TextLayout {
    /// Nothing to draw; the extent is zero.
    Empty,
    Outline(OutlineText),
}

impl TextLayout {
    /// Width and height of the label's ink box.
    pub fn extent(&self) -> SizePx {
        match self {
            Self::Empty => SizePx::default(),
            Self::Outline(text) => text.extent(),
        }
    }

    /// Draws the label with its ink box's top-left corner at `(x, y)`.
    ///
    /// Parts falling outside the pixmap are clipped.
    pub fn draw(&self, pixmap: &mut Pixmap, x: i32, y: i32) {
        match self {
            Self::Empty => {}
            Self::Outline(text) => text.draw(pixmap, x, y),
        }
    }
}

// ============================================================================
// FontChain
// ============================================================================

/// Ordered fallback list of font providers, terminated by the builtin face.
pub struct FontChain {
    providers: Vec<Box<dyn FontProvider>>,
    builtin: BuiltinFace,
}

impl Default for FontChain {
    /// The named system font `Arial`, then the builtin face.
    fn default() -> Self {
        Self::builtin_only().with_provider(NamedFontProvider::system_family("Arial"))
    }
}

impl FontChain {
    /// A chain that always uses the builtin face.
    pub fn builtin_only() -> Self {
        Self {
            providers: Vec::new(),
            builtin: BuiltinFace::new(),
        }
    }

    /// Appends a provider, tried after the ones already in the chain and
    /// before the builtin face.
    pub fn with_provider(mut self, provider: impl FontProvider + 'static) -> Self {
        self.providers.push(Box::new(provider));
        self
    }

    /// Resolves a font and lays `label` out with it.
    ///
    /// A provider that resolves but then fails to lay the label out is
    /// skipped the same way as one that does not resolve.
    pub fn layout(&self, point_size: f32, label: &str, color: Rgba<u8>) -> TextLayout {
        for provider in &self.providers {
            let layout = provider.resolve(point_size).and_then(|handle| {
                tracing::debug!(
                    family = handle.family(),
                    point_size = handle.point_size(),
                    "resolved font"
                );
                handle.layout(label, color)
            });

            match layout {
                Ok(layout) => return layout,
                Err(e) => {
                    tracing::debug!(provider = %provider.describe(), error = %e, "font unavailable, falling back");
                }
            }
        }
        self.builtin.layout(label, color)
    }
}
