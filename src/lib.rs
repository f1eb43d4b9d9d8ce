//! extension-icons: icon generation and package checks for browser extensions
//!
//! This crate renders the fixed set of extension icons (16, 48 and 128
//! pixels): a solid circle with a centered text label. Fonts are resolved
//! through an injectable fallback chain that always ends with an embedded
//! default font, so rendering never fails because a font is missing.
//!
//! It also validates an unpacked extension directory: required files,
//! `manifest.json` fields, file sizes and the icons directory.
//!
//! # Example
//!
//! ```
//! use extension_icons::{FontChain, IconRenderer, IconSet};
//!
//! let dir = tempfile::tempdir().unwrap();
//! let renderer = IconRenderer::new(FontChain::builtin_only());
//!
//! let report = renderer.generate_into(dir.path()).unwrap();
//! assert_eq!(report.icons.len(), IconSet::required().len());
//! assert!(dir.path().join("icon128.png").is_file());
//! ```
//!
//! # Validating a package
//!
//! ```no_run
//! use extension_icons::PackageValidator;
//!
//! let report = PackageValidator::new(".").validate();
//! print!("{report}");
//! if !report.passed {
//!     std::process::exit(1);
//! }
//! ```

mod error;
mod font;
mod icon;
mod layer;
mod profile;
mod raster;
mod renderer;
mod validator;

pub use error::{FontResolutionError, GenerateError, IconError, ManifestError, ProfileError};
pub use font::{
    BuiltinFace, FontChain, FontHandle, FontProvider, NamedFontProvider, OutlineText,
    TextLayout, NATIVE_POINT_SIZE,
};
pub use icon::{
    IconSet, IconSpec, RectPx, RenderedIcon, SizePx, TextPlacement, DEFAULT_BACKGROUND,
    DEFAULT_LABEL, DEFAULT_TEXT_COLOR,
};
pub use layer::{BackgroundLayer, LabelLayer, LayerEffect, LayerPipeline, RenderContext};
pub use profile::{FontSource, HexColor, IconProfile, DEFAULT_OUTPUT_DIR};
pub use renderer::{Configurable, GeneratedIcon, GenerationReport, IconRenderer};
pub use validator::{
    Diagnostic, Level, Manifest, PackageValidator, ValidationReport, REQUIRED_FIELDS,
    REQUIRED_FILES,
};
