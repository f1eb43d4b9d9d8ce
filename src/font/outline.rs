//! Outline text layout through usvg's text-to-path conversion.

use std::sync::Arc;

use image::Rgba;
use resvg::tiny_skia::{Pixmap, Rect, Transform};
use resvg::usvg::fontdb::Database;
use resvg::usvg::{Node, Options, Tree};

use super::TextLayout;
use crate::error::FontResolutionError;
use crate::icon::SizePx;
use crate::raster::hex_rgb;

// ============================================================================
// FontHandle
// ============================================================================

/// A resolved, drawable font at a fixed point size.
///
/// Handles are created per render call and never shared between icon sizes.
#[derive(Debug, Clone)]
pub struct FontHandle {
    db: Arc<Database>,
    family: String,
    point_size: f32,
}

impl FontHandle {
    pub(crate) fn new(db: Arc<Database>, family: impl Into<String>, point_size: f32) -> Self {
        Self {
            db,
            family: family.into(),
            point_size,
        }
    }

    pub fn family(&self) -> &str {
        &self.family
    }

    /// The point size the handle draws at.
    pub fn point_size(&self) -> f32 {
        self.point_size
    }

    /// Converts `label` to glyph outlines and measures their ink box.
    ///
    /// Labels without any visible character lay out as [`TextLayout::Empty`].
    pub fn layout(&self, label: &str, color: Rgba<u8>) -> Result<TextLayout, FontResolutionError> {
        if label.trim().is_empty() {
            return Ok(TextLayout::Empty);
        }

        let svg = self.text_svg(label, color);
        let mut opts = Options::default();
        opts.fontdb = Arc::clone(&self.db);

        let tree = Tree::from_str(&svg, &opts)
            .map_err(|e| FontResolutionError::Layout(e.to_string()))?;

        let ink = ink_bounds(&tree).ok_or_else(|| {
            FontResolutionError::Layout(format!(
                "family '{}' produced no glyphs for {label:?}",
                self.family
            ))
        })?;

        Ok(TextLayout::Outline(OutlineText {
            left: ink.left(),
            top: ink.top(),
            extent: SizePx::new(ink.width().ceil() as u32, ink.height().ceil() as u32),
            tree,
        }))
    }

    fn text_svg(&self, label: &str, color: Rgba<u8>) -> String {
        let size = self.point_size;
        let width = (size * (label.chars().count() as f32 + 1.0)).ceil();
        let height = (size * 2.0).ceil();

        format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}"><text x="0" y="{size}" font-family="'{family}'" font-size="{size}" fill="{fill}">{text}</text></svg>"#,
            family = escape_xml(&self.family),
            fill = hex_rgb(color),
            text = escape_xml(label),
        )
    }
}

/// Tight box around the glyph outlines, in tree coordinates.
///
/// The `Text` node's own bounding box spans the line metrics (ascent to
/// descent plus side bearings), so the flattened paths are measured instead.
fn ink_bounds(tree: &Tree) -> Option<Rect> {
    tree.root()
        .children()
        .iter()
        .find_map(|node| match node {
            Node::Text(text) if text.flattened().has_children() => text
                .flattened()
                .bounding_box()
                .transform(text.abs_transform()),
            _ => None,
        })
        .filter(|ink| ink.width() > 0.0 && ink.height() > 0.0)
}

fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

// ============================================================================
// OutlineText
// ============================================================================

/// A label converted to outlines, with its ink bounding box.
pub struct OutlineText {
    tree: Tree,
    left: f32,
    top: f32,
    extent: SizePx,
}

impl OutlineText {
    pub fn extent(&self) -> SizePx {
        self.extent
    }

    /// Draws the outlines so the ink box's top-left corner lands on `(x, y)`.
    pub fn draw(&self, pixmap: &mut Pixmap, x: i32, y: i32) {
        let transform = Transform::from_translate(x as f32 - self.left, y as f32 - self.top);
        resvg::render(&self.tree, transform, &mut pixmap.as_mut());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::builtin::embedded_database;
    use crate::icon::TextPlacement;
    use crate::raster::{pixmap_to_rgba_image, solid_canvas};

    const BLUE: Rgba<u8> = Rgba([102, 126, 234, 255]);
    const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

    fn tuffy(point_size: f32) -> FontHandle {
        FontHandle::new(embedded_database(), "Tuffy", point_size)
    }

    fn outline(layout: TextLayout) -> OutlineText {
        match layout {
            TextLayout::Outline(text) => text,
            TextLayout::Empty => panic!("expected glyphs"),
        }
    }

    /// Smallest box containing every pixel that differs from `background`,
    /// as `(left, top, right, bottom)` with exclusive right and bottom.
    fn inked_box(image: &image::RgbaImage, background: Rgba<u8>) -> (u32, u32, u32, u32) {
        let mut bounds = (u32::MAX, u32::MAX, 0, 0);
        for (x, y, pixel) in image.enumerate_pixels() {
            if *pixel != background {
                bounds.0 = bounds.0.min(x);
                bounds.1 = bounds.1.min(y);
                bounds.2 = bounds.2.max(x + 1);
                bounds.3 = bounds.3.max(y + 1);
            }
        }
        bounds
    }

    #[test]
    fn extent_is_the_glyph_box_not_the_line_box() {
        let text = outline(tuffy(42.0).layout("HE", WHITE).unwrap());
        let extent = text.extent();

        // cap height only: no descender, no line gap
        assert!(extent.height > 20, "{extent:?}");
        assert!(extent.height < 42, "{extent:?}");
        assert!(extent.width > extent.height);
    }

    #[test]
    fn ink_lands_on_the_placement_origin() {
        let text = outline(tuffy(42.0).layout("HE", WHITE).unwrap());
        let placement = TextPlacement::centered(128, text.extent());

        let mut pixmap = solid_canvas(128, BLUE).unwrap();
        text.draw(&mut pixmap, placement.x, placement.y);
        let (left, top, right, bottom) = inked_box(&pixmap_to_rgba_image(&pixmap), BLUE);

        assert_eq!(left as i32, placement.x);
        assert_eq!(top as i32, placement.y);
        let far_x = placement.x + placement.extent.width as i32;
        let far_y = placement.y + placement.extent.height as i32;
        assert!((far_x - 1..=far_x).contains(&(right as i32)), "{right} vs {far_x}");
        assert!((far_y - 1..=far_y).contains(&(bottom as i32)), "{bottom} vs {far_y}");
    }

    #[test]
    fn flat_stem_is_fully_inked() {
        let text = outline(tuffy(42.0).layout("H", WHITE).unwrap());
        let mut pixmap = solid_canvas(64, BLUE).unwrap();
        text.draw(&mut pixmap, 10, 10);

        let image = pixmap_to_rgba_image(&pixmap);
        assert_eq!(*image.get_pixel(10, 20), WHITE);
        assert_eq!(*image.get_pixel(9, 20), BLUE);
    }

    #[test]
    fn layout_is_deterministic() {
        let render = || {
            let text = outline(tuffy(16.0).layout("XD", WHITE).unwrap());
            let placement = TextPlacement::centered(48, text.extent());
            let mut pixmap = solid_canvas(48, BLUE).unwrap();
            text.draw(&mut pixmap, placement.x, placement.y);
            (placement, pixmap_to_rgba_image(&pixmap))
        };
        assert_eq!(render(), render());
    }

    #[test]
    fn blank_labels_are_empty() {
        assert!(matches!(tuffy(16.0).layout("", WHITE), Ok(TextLayout::Empty)));
        assert!(matches!(tuffy(16.0).layout("   ", WHITE), Ok(TextLayout::Empty)));
    }

    #[test]
    fn unknown_family_produces_no_glyphs() {
        let handle = FontHandle::new(embedded_database(), "Nonexistent Sans", 16.0);
        assert!(matches!(
            handle.layout("XD", WHITE),
            Err(FontResolutionError::Layout(_))
        ));
    }

    #[test]
    fn labels_are_escaped_for_svg() {
        assert_eq!(escape_xml("a<b & 'c'"), "a&lt;b &amp; &apos;c&apos;");
    }
}
