//! Icon types: render inputs, rendered buffers and the required size set.

use std::num::NonZeroU32;
use std::path::{Path, PathBuf};

use image::{Rgba, RgbaImage};

use crate::error::IconError;

/// Default circle fill, `#667eea`.
pub const DEFAULT_BACKGROUND: Rgba<u8> = Rgba([102, 126, 234, 255]);

/// Default label color.
pub const DEFAULT_TEXT_COLOR: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Default label drawn on every icon.
pub const DEFAULT_LABEL: &str = "XD";

/// A rectangle defined in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RectPx {
    /// X offset from the left edge of the image
    pub x: u32,
    /// Y offset from the top edge of the image
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl RectPx {
    /// Creates a rectangle starting at origin (0, 0) with the given dimensions.
    pub fn from_size(width: u32, height: u32) -> Self {
        Self { x: 0, y: 0, width, height }
    }
}

/// A 2D size in pixel units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SizePx {
    pub width: u32,
    pub height: u32,
}

impl SizePx {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

// ============================================================================
// IconSpec
// ============================================================================

/// Immutable description of one icon to render.
#[derive(Debug, Clone, PartialEq)]
pub struct IconSpec {
    /// Side length of the square icon in pixels.
    pub size: NonZeroU32,

    /// Text drawn at the center of the icon. May be empty.
    pub label: String,

    /// Fill of the canvas and the circle.
    pub background: Rgba<u8>,

    pub text_color: Rgba<u8>,
}

impl IconSpec {
    /// Creates a spec with the default colors.
    ///
    /// Fails with [`IconError::InvalidSize`] when `size` is zero.
    pub fn new(size: u32, label: impl Into<String>) -> Result<Self, IconError> {
        let size = NonZeroU32::new(size).ok_or(IconError::InvalidSize)?;
        Ok(Self {
            size,
            label: label.into(),
            background: DEFAULT_BACKGROUND,
            text_color: DEFAULT_TEXT_COLOR,
        })
    }

    /// Sets the canvas and circle fill. Alpha is forced to opaque.
    pub fn with_background(mut self, color: Rgba<u8>) -> Self {
        self.background = opaque(color);
        self
    }

    /// Sets the label color. Alpha is forced to opaque.
    pub fn with_text_color(mut self, color: Rgba<u8>) -> Self {
        self.text_color = opaque(color);
        self
    }

    /// Side length in pixels.
    pub fn side(&self) -> u32 {
        self.size.get()
    }

    /// Point size requested from the font chain: one third of the icon side,
    /// rounded down.
    pub fn point_size(&self) -> f32 {
        (self.side() / 3) as f32
    }
}

// ============================================================================
// TextPlacement
// ============================================================================

/// Where the label ended up on the canvas.
///
/// The origin is the top-left corner of the label's measured box. It can be
/// negative when the label is larger than the canvas; the label is clipped in
/// that case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextPlacement {
    pub x: i32,
    pub y: i32,
    pub extent: SizePx,
}

impl TextPlacement {
    /// Centers a label of the given extent on a square canvas.
    ///
    /// Uses floor division, so an odd remainder biases the label one pixel
    /// towards the top-left, and negative remainders round down.
    pub fn centered(canvas: u32, extent: SizePx) -> Self {
        let canvas = canvas as i64;
        let x = (canvas - extent.width as i64).div_euclid(2);
        let y = (canvas - extent.height as i64).div_euclid(2);
        Self {
            x: clamp_i32(x),
            y: clamp_i32(y),
            extent,
        }
    }

    /// Returns true if the whole label box lies inside a `canvas` sized square.
    pub fn fits_within(&self, canvas: u32) -> bool {
        let canvas = canvas as i64;
        self.x >= 0
            && self.y >= 0
            && self.x as i64 + self.extent.width as i64 <= canvas
            && self.y as i64 + self.extent.height as i64 <= canvas
    }
}

fn opaque(color: Rgba<u8>) -> Rgba<u8> {
    let [r, g, b, _] = color.0;
    Rgba([r, g, b, 255])
}

fn clamp_i32(value: i64) -> i32 {
    value.clamp(i32::MIN as i64, i32::MAX as i64) as i32
}

// ============================================================================
// RenderedIcon
// ============================================================================

/// A rendered square RGBA icon, owned by the caller until persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedIcon {
    /// The image data in RGBA format.
    pub data: RgbaImage,

    /// Placement of the label that was drawn.
    pub placement: TextPlacement,
}

impl RenderedIcon {
    pub fn new(data: RgbaImage, placement: TextPlacement) -> Self {
        Self { data, placement }
    }

    /// Returns the pixel dimensions of the image.
    pub fn dimensions(&self) -> SizePx {
        SizePx::new(self.data.width(), self.data.height())
    }
}

// ============================================================================
// IconSet
// ============================================================================

/// The ordered set of icon sizes a browser extension package needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IconSet {
    sizes: &'static [u32],
}

impl IconSet {
    /// Sizes required by the extension packaging convention.
    pub const REQUIRED_SIZES: [u32; 3] = [16, 48, 128];

    /// The fixed `{16, 48, 128}` set.
    pub fn required() -> Self {
        Self {
            sizes: &Self::REQUIRED_SIZES,
        }
    }

    /// Returns the number of sizes in the set.
    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }

    /// File name for one size, e.g. `icon48.png`.
    pub fn file_name(size: u32) -> String {
        format!("icon{size}.png")
    }

    /// Path of one size inside `dir`.
    pub fn path_in(dir: &Path, size: u32) -> PathBuf {
        dir.join(Self::file_name(size))
    }
}

impl Default for IconSet {
    fn default() -> Self {
        Self::required()
    }
}

impl IntoIterator for IconSet {
    type Item = u32;
    type IntoIter = std::iter::Copied<std::slice::Iter<'static, u32>>;

    fn into_iter(self) -> Self::IntoIter {
        self.sizes.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spec_rejects_zero_size() {
        assert!(matches!(IconSpec::new(0, "XD"), Err(IconError::InvalidSize)));
    }

    #[test]
    fn spec_colors_are_always_opaque() {
        let spec = IconSpec::new(16, "XD")
            .unwrap()
            .with_background(Rgba([10, 20, 30, 0]))
            .with_text_color(Rgba([200, 100, 50, 128]));

        assert_eq!(spec.background, Rgba([10, 20, 30, 255]));
        assert_eq!(spec.text_color, Rgba([200, 100, 50, 255]));
        assert_eq!(IconSpec::new(16, "XD").unwrap().background.0[3], 255);
    }

    #[test]
    fn spec_point_size_is_a_third() {
        assert_eq!(IconSpec::new(16, "XD").unwrap().point_size(), 5.0);
        assert_eq!(IconSpec::new(48, "XD").unwrap().point_size(), 16.0);
        assert_eq!(IconSpec::new(128, "XD").unwrap().point_size(), 42.0);
        assert_eq!(IconSpec::new(2, "XD").unwrap().point_size(), 0.0);
    }

    #[test]
    fn centered_placement_uses_floor_division() {
        let placement = TextPlacement::centered(16, SizePx::new(11, 7));
        assert_eq!((placement.x, placement.y), (2, 4));
        assert!(placement.fits_within(16));
    }

    #[test]
    fn centered_placement_for_empty_extent_is_canvas_center() {
        let placement = TextPlacement::centered(48, SizePx::default());
        assert_eq!((placement.x, placement.y), (24, 24));
    }

    #[test]
    fn oversized_label_gets_negative_origin() {
        let placement = TextPlacement::centered(16, SizePx::new(35, 7));
        // (16 - 35) / 2 floors to -10, not -9
        assert_eq!(placement.x, -10);
        assert_eq!(placement.y, 4);
        assert!(!placement.fits_within(16));
    }

    #[test]
    fn icon_set_is_fixed_and_ordered() {
        let sizes: Vec<u32> = IconSet::required().into_iter().collect();
        assert_eq!(sizes, vec![16, 48, 128]);
        assert_eq!(IconSet::default().len(), 3);
        assert_eq!(IconSet::file_name(48), "icon48.png");
        assert_eq!(
            IconSet::path_in(Path::new("icons"), 16),
            Path::new("icons").join("icon16.png")
        );
    }
}
