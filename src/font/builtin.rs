//! The embedded default face.
//!
//! This is the last entry of every [`FontChain`](super::FontChain). The font
//! ships inside the binary and draws at its native size only; requested
//! point sizes are ignored.

use std::sync::Arc;

use image::Rgba;
use resvg::usvg::fontdb::Database;

use super::{FontHandle, TextLayout};

/// Embedded font data for the default face (Tuffy, public domain).
static FONT_DATA: &[u8] = include_bytes!("../../assets/fonts/Tuffy.ttf");

const FAMILY: &str = "Tuffy";

/// Size the default face is drawn at, whatever the icon size.
pub const NATIVE_POINT_SIZE: f32 = 11.0;

/// Loads the embedded font into a fresh database.
pub(crate) fn embedded_database() -> Arc<Database> {
    let mut db = Database::new();
    db.load_font_data(FONT_DATA.to_vec());
    Arc::new(db)
}

/// The font used when no other provider can draw the label.
#[derive(Debug, Clone)]
pub struct BuiltinFace {
    handle: FontHandle,
}

impl Default for BuiltinFace {
    fn default() -> Self {
        Self::new()
    }
}

impl BuiltinFace {
    pub fn new() -> Self {
        Self {
            handle: FontHandle::new(embedded_database(), FAMILY, NATIVE_POINT_SIZE),
        }
    }

    pub fn point_size(&self) -> f32 {
        self.handle.point_size()
    }

    /// Lays `label` out at the native size.
    ///
    /// Never fails: a label the face cannot draw at all is left blank.
    pub fn layout(&self, label: &str, color: Rgba<u8>) -> TextLayout {
        self.handle.layout(label, color).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "default face cannot draw label, leaving it blank");
            TextLayout::Empty
        })
    }
}
