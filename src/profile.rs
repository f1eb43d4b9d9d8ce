//! Serializable icon profile: label, colors, font and output directory.
//!
//! # Example
//!
//! ```
//! use extension_icons::{FontSource, IconProfile};
//!
//! let profile = IconProfile::from_json(r##"{ "label": "AB", "textColor": "#000" }"##).unwrap();
//! assert_eq!(profile.label, "AB");
//! assert_eq!(profile.text_color.rgba().0, [0, 0, 0, 255]);
//! assert_eq!(profile.font, FontSource::Family("Arial".into()));
//! ```

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use image::Rgba;
use palette::Srgb;
use serde::{Deserialize, Serialize};

use crate::error::ProfileError;
use crate::font::{FontChain, NamedFontProvider};
use crate::icon::{DEFAULT_BACKGROUND, DEFAULT_LABEL, DEFAULT_TEXT_COLOR};
use crate::raster::hex_rgb;

/// Default directory the icons are written to, relative to the working
/// directory.
pub const DEFAULT_OUTPUT_DIR: &str = "icons";

// ============================================================================
// HexColor
// ============================================================================

/// An opaque color written as `#rgb` or `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor(Rgba<u8>);

impl HexColor {
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self(Rgba([r, g, b, 255]))
    }

    pub fn rgba(&self) -> Rgba<u8> {
        self.0
    }
}

impl FromStr for HexColor {
    type Err = ProfileError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let rgb: Srgb<u8> = value.trim().parse().map_err(|_| ProfileError::InvalidColor {
            value: value.to_string(),
        })?;
        Ok(Self::new(rgb.red, rgb.green, rgb.blue))
    }
}

impl TryFrom<String> for HexColor {
    type Error = ProfileError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<HexColor> for String {
    fn from(color: HexColor) -> Self {
        color.to_string()
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex_rgb(self.0))
    }
}

// ============================================================================
// FontSource
// ============================================================================

/// The preferred font, tried before the builtin face.
///
/// Serializes as `{ "family": "Arial" }` or `{ "file": "/path/to/font.ttf" }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FontSource {
    Family(String),
    File(PathBuf),
}

impl Default for FontSource {
    fn default() -> Self {
        Self::Family("Arial".into())
    }
}

impl FontSource {
    /// Builds the fallback chain: this font, then the builtin face.
    pub fn chain(&self) -> FontChain {
        let provider = match self {
            Self::Family(family) => NamedFontProvider::system_family(family.clone()),
            Self::File(path) => NamedFontProvider::file(path.clone()),
        };
        FontChain::builtin_only().with_provider(provider)
    }
}

// ============================================================================
// IconProfile
// ============================================================================

/// Everything configurable about the generated icon set.
///
/// The size set itself is fixed and not part of the profile.
///
/// # JSON Format
///
/// ```json
/// {
///   "label": "XD",
///   "backgroundColor": "#667eea",
///   "textColor": "#ffffff",
///   "font": { "family": "Arial" },
///   "outputDir": "icons"
/// }
/// ```
///
/// Every field is optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IconProfile {
    pub label: String,
    pub background_color: HexColor,
    pub text_color: HexColor,
    pub font: FontSource,
    pub output_dir: PathBuf,
}

impl Default for IconProfile {
    fn default() -> Self {
        Self {
            label: DEFAULT_LABEL.to_string(),
            background_color: HexColor(DEFAULT_BACKGROUND),
            text_color: HexColor(DEFAULT_TEXT_COLOR),
            font: FontSource::default(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
        }
    }
}

impl IconProfile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_font(mut self, font: FontSource) -> Self {
        self.font = font;
        self
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Serializes the profile to a JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Reads a profile from a JSON file.
    pub fn load(path: &Path) -> Result<Self, ProfileError> {
        let json = std::fs::read_to_string(path).map_err(|source| ProfileError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::from_json(&json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_profile_uses_defaults() {
        let profile = IconProfile::from_json("{}").unwrap();
        assert_eq!(profile, IconProfile::default());
        assert_eq!(profile.label, "XD");
        assert_eq!(profile.background_color.rgba().0, [102, 126, 234, 255]);
        assert_eq!(profile.output_dir, PathBuf::from("icons"));
    }

    #[test]
    fn profile_json_format() {
        let json = IconProfile::default().to_json_pretty().unwrap();

        assert!(json.contains("\"backgroundColor\": \"#667eea\""));
        assert!(json.contains("\"textColor\": \"#ffffff\""));
        assert!(json.contains("\"family\": \"Arial\""));
        assert!(json.contains("\"outputDir\": \"icons\""));
    }

    #[test]
    fn font_file_source_deserializes() {
        let profile =
            IconProfile::from_json(r#"{ "font": { "file": "/fonts/Arial.ttf" } }"#).unwrap();
        assert_eq!(profile.font, FontSource::File("/fonts/Arial.ttf".into()));
    }

    #[test]
    fn short_hex_colors_expand() {
        let color: HexColor = "#fa0".parse().unwrap();
        assert_eq!(color.rgba().0, [0xff, 0xaa, 0x00, 255]);
        assert_eq!(color.to_string(), "#ffaa00");
    }

    #[test]
    fn invalid_color_is_rejected() {
        assert!(matches!(
            "not-a-color".parse::<HexColor>(),
            Err(ProfileError::InvalidColor { .. })
        ));
        assert!(IconProfile::from_json(r##"{ "textColor": "#12345" }"##).is_err());
    }

    #[test]
    fn load_reports_missing_file() {
        let err = IconProfile::load(Path::new("/nonexistent/profile.json")).unwrap_err();
        assert!(matches!(err, ProfileError::Io { .. }));
    }

    #[test]
    fn load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("icons.json");
        std::fs::write(&path, r#"{ "label": "QQ", "outputDir": "out" }"#).unwrap();

        let profile = IconProfile::load(&path).unwrap();
        assert_eq!(profile.label, "QQ");
        assert_eq!(profile.output_dir, PathBuf::from("out"));
    }
}
