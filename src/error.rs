//! Error types for icon rendering, configuration and package validation.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::renderer::GeneratedIcon;

/// A font could not be resolved at the requested point size.
///
/// Raised by [`FontProvider`](crate::FontProvider) implementations and
/// recovered by [`FontChain`](crate::FontChain); it never reaches callers of
/// [`IconRenderer::render`](crate::IconRenderer::render).
#[derive(Debug, Error)]
pub enum FontResolutionError {
    #[error("font family '{family}' not found")]
    NotFound { family: String },

    #[error("invalid point size {0}")]
    InvalidPointSize(f32),

    #[error("failed to load font file '{}': {source}", .path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("font file '{}' contains no usable faces", .path.display())]
    EmptyFontFile { path: PathBuf },

    /// The text backend rejected the label.
    #[error("text layout failed: {0}")]
    Layout(String),
}

/// Errors produced while rendering or persisting a single icon.
#[derive(Debug, Error)]
pub enum IconError {
    #[error("icon size must be positive")]
    InvalidSize,

    #[error("cannot allocate a {size}x{size} canvas")]
    CanvasAllocation { size: u32 },

    #[error("cannot create directory '{}': {source}", .path.display())]
    DirectoryCreation {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot write '{}': {source}", .path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// Errors produced by the icon set driving loop.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("cannot create icons directory '{}': {source}", .path.display())]
    DirectoryCreation {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// At least one size failed; every size was still attempted.
    #[error("failed to generate icon sizes {failed:?}: {first}")]
    Failed {
        failed: Vec<u32>,
        /// Icons written before and after the failures.
        written: Vec<GeneratedIcon>,
        #[source]
        first: IconError,
    },
}

/// Errors produced while loading an [`IconProfile`](crate::IconProfile).
#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("cannot read profile '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid profile JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid color '{value}', expected #rgb or #rrggbb")]
    InvalidColor { value: String },
}

/// Problems found with an extension manifest.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("cannot read manifest.json: {0}")]
    Read(#[from] io::Error),

    #[error("manifest.json is malformed: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("manifest.json must contain a JSON object")]
    NotAnObject,

    #[error("manifest.json is missing fields: {}", .0.join(", "))]
    MissingFields(Vec<String>),
}
