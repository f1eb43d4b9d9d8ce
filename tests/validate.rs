use std::fs;
use std::path::Path;

use extension_icons::{Level, PackageValidator, REQUIRED_FILES};
use tempfile::TempDir;

const MANIFEST: &str = r#"{
    "manifest_version": 3,
    "name": "XD",
    "version": "1.2.0",
    "permissions": ["storage"]
}"#;

fn package(manifest: &str) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    for file in REQUIRED_FILES {
        fs::write(dir.path().join(file), "// stub\n").unwrap();
    }
    fs::write(dir.path().join("manifest.json"), manifest).unwrap();
    dir
}

fn add_icons(root: &Path, names: &[&str]) {
    let icons = root.join("icons");
    fs::create_dir(&icons).unwrap();
    for name in names {
        fs::write(icons.join(name), b"png").unwrap();
    }
}

#[test]
fn complete_package_passes() {
    let dir = package(MANIFEST);
    add_icons(dir.path(), &["icon16.png", "icon48.png", "icon128.png"]);

    let report = PackageValidator::new(dir.path()).validate();

    assert!(report.passed, "{report}");
    assert_eq!(report.manifest_version.as_deref(), Some("1.2.0"));
    assert!(report.mentions("version: 1.2.0"));
    assert!(report.mentions("contains: icon128.png, icon16.png, icon48.png"));
    assert!(report.mentions("Load unpacked"));
    assert_eq!(report.errors().count(), 0);
}

#[test]
fn missing_file_fails() {
    let dir = package(MANIFEST);
    fs::remove_file(dir.path().join("background.js")).unwrap();

    let report = PackageValidator::new(dir.path()).validate();

    assert!(!report.passed);
    assert!(report.errors().any(|d| d.message.contains("background.js")));
    assert!(report.manifest_version.is_none());
    assert!(!report.mentions("Installation steps"));
}

#[test]
fn missing_manifest_field_fails() {
    let dir = package(r#"{ "manifest_version": 3, "name": "XD", "permissions": [] }"#);

    let report = PackageValidator::new(dir.path()).validate();

    assert!(!report.passed);
    let errors: Vec<_> = report.errors().collect();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].message.contains("version"));
}

#[test]
fn malformed_manifest_fails() {
    let dir = package("{ \"name\": ");

    let report = PackageValidator::new(dir.path()).validate();

    assert!(!report.passed);
    assert_eq!(report.errors().count(), 1);
}

#[test]
fn missing_icons_dir_is_only_a_warning() {
    let dir = package(MANIFEST);

    let report = PackageValidator::new(dir.path()).validate();

    assert!(report.passed);
    assert!(report.warnings().any(|d| d.message.contains("not found")));
}

#[test]
fn empty_icons_dir_is_only_a_warning() {
    let dir = package(MANIFEST);
    add_icons(dir.path(), &[]);

    let report = PackageValidator::new(dir.path()).validate();

    assert!(report.passed);
    assert!(report.warnings().any(|d| d.message.contains("empty")));
    assert!(report
        .diagnostics
        .iter()
        .any(|d| d.level == Level::Ok && d.message.contains("directory exists")));
}

#[test]
fn file_sizes_are_totalled() {
    let dir = package(MANIFEST);

    let report = PackageValidator::new(dir.path()).validate();

    let stub = "// stub\n".len() * (REQUIRED_FILES.len() - 1);
    let total = stub + MANIFEST.len();
    assert!(report.mentions(&format!("total: {total} bytes")), "{report}");
}

#[test]
fn custom_icons_dir_is_listed() {
    let dir = package(MANIFEST);
    let assets = dir.path().join("assets");
    fs::create_dir(&assets).unwrap();
    fs::write(assets.join("icon16.png"), b"png").unwrap();

    let report = PackageValidator::new(dir.path())
        .with_icons_dir("assets")
        .validate();

    assert!(report.mentions("assets directory exists"), "{report}");
    assert!(report.mentions("contains: icon16.png"));
    assert_eq!(report.warnings().count(), 0, "{report}");
}
