//! Icon rendering engine and the icon set driving loop.

use std::fs;
use std::path::{Path, PathBuf};

use image::ImageFormat;

use crate::error::{GenerateError, IconError};
use crate::font::FontChain;
use crate::icon::{IconSet, IconSpec, RenderedIcon};
use crate::layer::{BackgroundLayer, LabelLayer, LayerPipeline};
use crate::profile::IconProfile;

// ============================================================================
// Configurable Trait
// ============================================================================

/// Trait for types that can be configured from an [`IconProfile`].
pub trait Configurable {
    /// Applies a profile's settings to this instance.
    fn apply_profile(&mut self, profile: &IconProfile);

    /// Exports the current settings as a profile.
    fn export_profile(&self) -> IconProfile;
}

// ============================================================================
// IconRenderer
// ============================================================================

/// Renders extension icons and writes them to disk.
///
/// The renderer owns an [`IconProfile`] (label, colors, output directory) and
/// a [`FontChain`]. The chain is injected so tests and embedders can control
/// which fonts are considered available.
///
/// # Example
///
/// ```
/// use extension_icons::{FontChain, IconRenderer, IconSpec};
///
/// let renderer = IconRenderer::new(FontChain::builtin_only());
/// let icon = renderer.render(&IconSpec::new(48, "XD").unwrap()).unwrap();
/// assert_eq!(icon.dimensions().width, 48);
/// ```
pub struct IconRenderer {
    profile: IconProfile,
    fonts: FontChain,
}

impl Default for IconRenderer {
    /// Default profile with the system `Arial` font, then the builtin face.
    fn default() -> Self {
        Self::from_profile(IconProfile::default())
    }
}

impl IconRenderer {
    /// Creates a renderer with the default profile and the given font chain.
    pub fn new(fonts: FontChain) -> Self {
        Self {
            profile: IconProfile::default(),
            fonts,
        }
    }

    /// Creates a renderer whose font chain is built from `profile.font`.
    pub fn from_profile(profile: IconProfile) -> Self {
        let fonts = profile.font.chain();
        Self { profile, fonts }
    }

    /// Replaces the font chain, keeping the profile.
    pub fn with_fonts(mut self, fonts: FontChain) -> Self {
        self.fonts = fonts;
        self
    }

    pub fn profile(&self) -> &IconProfile {
        &self.profile
    }

    /// Builds the spec for one size from the current profile.
    pub fn spec(&self, size: u32) -> Result<IconSpec, IconError> {
        Ok(IconSpec::new(size, self.profile.label.clone())?
            .with_background(self.profile.background_color.rgba())
            .with_text_color(self.profile.text_color.rgba()))
    }

    /// Renders one icon.
    ///
    /// Oversized and empty labels are not errors: the former are clipped,
    /// the latter leave only the background.
    pub fn render(&self, spec: &IconSpec) -> Result<RenderedIcon, IconError> {
        let layout = self
            .fonts
            .layout(spec.point_size(), &spec.label, spec.text_color);

        let pipeline = LayerPipeline::new(
            BackgroundLayer::new(spec.background),
            LabelLayer::new(layout),
        );
        let icon = pipeline.render(spec.side())?;

        tracing::debug!(
            size = spec.side(),
            x = icon.placement.x,
            y = icon.placement.y,
            "rendered icon"
        );
        Ok(icon)
    }

    /// Writes `icon` as a PNG file, creating missing parent directories.
    pub fn persist(icon: &RenderedIcon, path: &Path) -> Result<(), IconError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|source| IconError::DirectoryCreation {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        icon.data
            .save_with_format(path, ImageFormat::Png)
            .map_err(|source| IconError::Encode {
                path: path.to_path_buf(),
                source,
            })
    }

    /// Renders and writes every required size into the profile's output
    /// directory.
    pub fn generate(&self) -> Result<GenerationReport, GenerateError> {
        self.generate_into(&self.profile.output_dir)
    }

    /// Renders and writes every required size into `dir`.
    ///
    /// Every size is attempted even if an earlier one fails; the call fails
    /// if any size did, and the error still lists the icons that were
    /// written.
    pub fn generate_into(&self, dir: &Path) -> Result<GenerationReport, GenerateError> {
        fs::create_dir_all(dir).map_err(|source| GenerateError::DirectoryCreation {
            path: dir.to_path_buf(),
            source,
        })?;

        let mut icons = Vec::new();
        let mut failures = Vec::new();

        for size in IconSet::required() {
            let path = IconSet::path_in(dir, size);
            let result = self
                .spec(size)
                .and_then(|spec| self.render(&spec))
                .and_then(|icon| Self::persist(&icon, &path));

            match result {
                Ok(()) => {
                    tracing::info!(size, path = %path.display(), "created icon");
                    icons.push(GeneratedIcon { size, path });
                }
                Err(e) => {
                    tracing::warn!(size, error = %e, "failed to create icon");
                    failures.push((size, e));
                }
            }
        }

        let failed: Vec<u32> = failures.iter().map(|(size, _)| *size).collect();
        match failures.into_iter().next() {
            None => Ok(GenerationReport { icons }),
            Some((_, first)) => Err(GenerateError::Failed {
                failed,
                written: icons,
                first,
            }),
        }
    }
}

impl Configurable for IconRenderer {
    /// Replaces the profile and rebuilds the font chain from it.
    fn apply_profile(&mut self, profile: &IconProfile) {
        if profile.font != self.profile.font {
            self.fonts = profile.font.chain();
        }
        self.profile = profile.clone();
    }

    fn export_profile(&self) -> IconProfile {
        self.profile.clone()
    }
}

// ============================================================================
// GenerationReport
// ============================================================================

/// One icon file written by the driving loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedIcon {
    pub size: u32,
    pub path: PathBuf,
}

/// Result of a successful [`IconRenderer::generate`] run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GenerationReport {
    /// Written icons, in size order.
    pub icons: Vec<GeneratedIcon>,
}

impl GenerationReport {
    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.icons.iter().map(|icon| icon.path.as_path())
    }
}

// ============================================================================
// Tests
// ============================================================================
