//! Named fonts resolved through a `fontdb` database.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use resvg::usvg::fontdb::{Database, Family, Query};

use super::{FontHandle, FontProvider};
use crate::error::FontResolutionError;

#[derive(Debug, Clone)]
enum FontLocation {
    /// A family name looked up in the font database.
    Family(String),
    /// A font file, loaded on every resolution.
    File(PathBuf),
}

/// Resolves one specific font, either by family name or from a file.
#[derive(Debug, Clone)]
pub struct NamedFontProvider {
    location: FontLocation,
    db: Arc<Database>,
}

impl NamedFontProvider {
    /// Looks `family` up in the host's installed fonts.
    pub fn system_family(family: impl Into<String>) -> Self {
        let mut db = Database::new();
        db.load_system_fonts();
        tracing::debug!(faces = db.len(), "loaded system fonts");
        Self::family_in(family, Arc::new(db))
    }

    /// Looks `family` up in an existing database.
    pub fn family_in(family: impl Into<String>, db: Arc<Database>) -> Self {
        Self {
            location: FontLocation::Family(family.into()),
            db,
        }
    }

    /// Loads the first face found in the font file at `path`.
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self {
            location: FontLocation::File(path.into()),
            db: Arc::new(Database::new()),
        }
    }

    fn resolve_family(
        &self,
        family: &str,
        point_size: f32,
    ) -> Result<FontHandle, FontResolutionError> {
        let query = Query {
            families: &[Family::Name(family)],
            ..Query::default()
        };
        self.db
            .query(&query)
            .ok_or_else(|| FontResolutionError::NotFound {
                family: family.to_string(),
            })?;

        Ok(FontHandle::new(Arc::clone(&self.db), family, point_size))
    }

    fn resolve_file(
        &self,
        path: &Path,
        point_size: f32,
    ) -> Result<FontHandle, FontResolutionError> {
        let mut db = Database::new();
        db.load_font_file(path)
            .map_err(|source| FontResolutionError::Load {
                path: path.to_path_buf(),
                source,
            })?;

        let family = db
            .faces()
            .find_map(|face| face.families.first().map(|(name, _)| name.clone()))
            .ok_or_else(|| FontResolutionError::EmptyFontFile {
                path: path.to_path_buf(),
            })?;

        Ok(FontHandle::new(Arc::new(db), family, point_size))
    }
}

impl FontProvider for NamedFontProvider {
    fn describe(&self) -> String {
        match &self.location {
            FontLocation::Family(family) => format!("family '{family}'"),
            FontLocation::File(path) => format!("file '{}'", path.display()),
        }
    }

    fn resolve(&self, point_size: f32) -> Result<FontHandle, FontResolutionError> {
        if !point_size.is_finite() || point_size <= 0.0 {
            return Err(FontResolutionError::InvalidPointSize(point_size));
        }

        match &self.location {
            FontLocation::Family(family) => self.resolve_family(family, point_size),
            FontLocation::File(path) => self.resolve_file(path, point_size),
        }
    }
}
