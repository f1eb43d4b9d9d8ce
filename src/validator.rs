//! Checks that an extension directory is complete enough to be loaded.
//!
//! Validation runs in order and stops at the first hard failure:
//!
//! 1. every required file is present,
//! 2. `manifest.json` parses as a JSON object with the required fields,
//! 3. file sizes are reported,
//! 4. the optional icons directory is listed,
//! 5. installation steps are appended.
//!
//! Steps 3 to 5 only add information; they never fail validation.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::error::ManifestError;
use crate::profile::DEFAULT_OUTPUT_DIR;

/// Files an unpacked extension must ship.
pub const REQUIRED_FILES: [&str; 5] = [
    "manifest.json",
    "popup.html",
    "popup.js",
    "content.js",
    "background.js",
];

/// Fields `manifest.json` must define.
pub const REQUIRED_FIELDS: [&str; 4] = ["manifest_version", "name", "version", "permissions"];

const MANIFEST_FILE: &str = "manifest.json";

const INSTALL_STEPS: [&str; 5] = [
    "1. Open Chrome",
    "2. Go to chrome://extensions/",
    "3. Enable developer mode",
    "4. Click \"Load unpacked\"",
    "5. Select this directory",
];

// ============================================================================
// Diagnostics
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Ok,
    Info,
    Warning,
    Error,
}

impl Level {
    fn marker(self) -> &'static str {
        match self {
            Self::Ok => "✅",
            Self::Info => "  ",
            Self::Warning => "⚠️ ",
            Self::Error => "❌",
        }
    }
}

/// One human-readable line of a validation report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub level: Level,
    pub message: String,
}

impl Diagnostic {
    fn new(level: Level, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.level.marker(), self.message)
    }
}

/// Outcome of [`PackageValidator::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationReport {
    pub passed: bool,
    pub diagnostics: Vec<Diagnostic>,
    /// `version` from the manifest, when it was read.
    pub manifest_version: Option<String>,
}

impl ValidationReport {
    fn push(&mut self, level: Level, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic::new(level, message));
    }

    fn fail(mut self, message: impl Into<String>) -> Self {
        self.push(Level::Error, message);
        self.passed = false;
        self
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.with_level(Level::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.with_level(Level::Warning)
    }

    fn with_level(&self, level: Level) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(move |d| d.level == level)
    }

    /// Returns true if any line contains `needle`.
    pub fn mentions(&self, needle: &str) -> bool {
        self.diagnostics.iter().any(|d| d.message.contains(needle))
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for diagnostic in &self.diagnostics {
            writeln!(f, "{diagnostic}")?;
        }
        Ok(())
    }
}

// ============================================================================
// Manifest
// ============================================================================

/// A parsed `manifest.json`.
#[derive(Debug, Clone, PartialEq)]
pub struct Manifest(Map<String, Value>);

impl Manifest {
    pub fn from_json(json: &str) -> Result<Self, ManifestError> {
        match serde_json::from_str(json)? {
            Value::Object(fields) => Ok(Self(fields)),
            _ => Err(ManifestError::NotAnObject),
        }
    }

    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        Self::from_json(&fs::read_to_string(path)?)
    }

    /// Fails with every required field that is absent.
    pub fn require_fields(&self, fields: &[&str]) -> Result<(), ManifestError> {
        let missing: Vec<String> = fields
            .iter()
            .filter(|field| !self.0.contains_key(**field))
            .map(|field| field.to_string())
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(ManifestError::MissingFields(missing))
        }
    }

    /// The `version` field as text, if present.
    pub fn version(&self) -> Option<String> {
        self.0.get("version").map(|value| match value {
            Value::String(text) => text.clone(),
            other => other.to_string(),
        })
    }
}

// ============================================================================
// PackageValidator
// ============================================================================

/// Validates an unpacked extension directory.
#[derive(Debug, Clone)]
pub struct PackageValidator {
    root: PathBuf,
    required_files: Vec<String>,
    icons_dir: String,
}

impl PackageValidator {
    /// Validator for `root` with the default required files.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            required_files: REQUIRED_FILES.iter().map(|f| f.to_string()).collect(),
            icons_dir: DEFAULT_OUTPUT_DIR.to_string(),
        }
    }

    pub fn with_icons_dir(mut self, dir: impl Into<String>) -> Self {
        self.icons_dir = dir.into();
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn validate(&self) -> ValidationReport {
        let mut report = ValidationReport {
            passed: true,
            ..ValidationReport::default()
        };

        let missing = self.check_files(&mut report);
        if !missing.is_empty() {
            return report.fail(format!("missing files: {}", missing.join(", ")));
        }

        let manifest = match self.check_manifest() {
            Ok(manifest) => manifest,
            Err(ManifestError::MissingFields(fields)) => {
                for field in &fields {
                    report.push(Level::Error, format!("manifest.json is missing field: {field}"));
                }
                report.passed = false;
                return report;
            }
            Err(e) => return report.fail(e.to_string()),
        };

        let version = manifest.version();
        report.push(
            Level::Ok,
            format!(
                "manifest.json is valid (version: {})",
                version.as_deref().unwrap_or("unknown")
            ),
        );
        report.manifest_version = version;

        self.report_sizes(&mut report);
        self.report_icons(&mut report);

        report.push(Level::Info, "");
        report.push(Level::Info, "Installation steps:");
        for step in INSTALL_STEPS {
            report.push(Level::Info, step);
        }

        tracing::debug!(root = %self.root.display(), "package validated");
        report
    }

    /// Reports present files and returns the missing ones.
    fn check_files(&self, report: &mut ValidationReport) -> Vec<String> {
        let mut missing = Vec::new();
        for file in &self.required_files {
            if self.root.join(file).exists() {
                report.push(Level::Ok, file.as_str());
            } else {
                missing.push(file.clone());
            }
        }
        missing
    }

    fn check_manifest(&self) -> Result<Manifest, ManifestError> {
        let manifest = Manifest::load(&self.root.join(MANIFEST_FILE))?;
        manifest.require_fields(&REQUIRED_FIELDS)?;
        Ok(manifest)
    }

    fn report_sizes(&self, report: &mut ValidationReport) {
        report.push(Level::Info, "");
        report.push(Level::Info, "File sizes:");

        let mut total = 0u64;
        for file in &self.required_files {
            match fs::metadata(self.root.join(file)) {
                Ok(meta) => {
                    total += meta.len();
                    report.push(
                        Level::Info,
                        format!("  {file}: {} bytes", group_thousands(meta.len())),
                    );
                }
                Err(e) => report.push(Level::Warning, format!("{file}: cannot read size: {e}")),
            }
        }
        report.push(Level::Info, format!("  total: {} bytes", group_thousands(total)));
    }

    fn report_icons(&self, report: &mut ValidationReport) {
        let dir = self.root.join(&self.icons_dir);
        if !dir.exists() {
            report.push(
                Level::Warning,
                format!("{} directory not found (optional)", self.icons_dir),
            );
            return;
        }

        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) => {
                report.push(
                    Level::Warning,
                    format!("cannot list {} directory: {e}", self.icons_dir),
                );
                return;
            }
        };

        report.push(Level::Ok, format!("{} directory exists", self.icons_dir));

        let mut names: Vec<String> = entries
            .filter_map(Result::ok)
            .map(|entry| entry.file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();

        if names.is_empty() {
            report.push(Level::Warning, format!("{} directory is empty", self.icons_dir));
        } else {
            report.push(Level::Info, format!("  contains: {}", names.join(", ")));
        }
    }
}

/// Formats `value` with `,` between groups of three digits.
fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thousands_are_grouped() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(1234567), "1,234,567");
    }

    #[test]
    fn manifest_must_be_an_object() {
        assert!(matches!(
            Manifest::from_json("[1, 2]"),
            Err(ManifestError::NotAnObject)
        ));
        assert!(matches!(
            Manifest::from_json("{ not json"),
            Err(ManifestError::Parse(_))
        ));
    }

    #[test]
    fn manifest_lists_every_missing_field() {
        let manifest = Manifest::from_json(r#"{ "name": "X" }"#).unwrap();
        match manifest.require_fields(&REQUIRED_FIELDS) {
            Err(ManifestError::MissingFields(missing)) => {
                assert_eq!(missing, vec!["manifest_version", "version", "permissions"]);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn manifest_version_accepts_non_strings() {
        let manifest = Manifest::from_json(r#"{ "version": 3 }"#).unwrap();
        assert_eq!(manifest.version(), Some("3".to_string()));
        assert_eq!(Manifest::from_json("{}").unwrap().version(), None);
    }

    #[test]
    fn diagnostics_render_with_markers() {
        let mut report = ValidationReport::default();
        report.push(Level::Ok, "manifest.json");
        report = report.fail("missing files: popup.js");

        let text = report.to_string();
        assert!(text.contains("✅ manifest.json"));
        assert!(text.contains("❌ missing files: popup.js"));
        assert_eq!(report.errors().count(), 1);
        assert!(!report.passed);
    }
}
