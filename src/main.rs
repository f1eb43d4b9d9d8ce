//! exticons - generate extension icons and check an extension package.
//!
//! # Examples
//!
//! ```bash
//! # Write icons/icon16.png, icons/icon48.png and icons/icon128.png
//! exticons
//!
//! # Custom label and font file
//! exticons generate --label AB --font-file /System/Library/Fonts/Arial.ttf
//!
//! # Check the extension in the current directory
//! exticons verify
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use extension_icons::{
    FontSource, GenerateError, IconProfile, IconRenderer, PackageValidator, DEFAULT_OUTPUT_DIR,
};

// ============================================================================
// CLI Definition
// ============================================================================

#[derive(Parser)]
#[command(name = "exticons")]
#[command(about = "Generate browser extension icons and validate extension packages")]
#[command(version)]
struct Cli {
    /// Subcommand to run. If none, runs 'generate' with defaults.
    #[command(subcommand)]
    command: Option<Commands>,

    /// Verbose output (show debug info).
    #[arg(long, short, global = true)]
    verbose: bool,

    /// Quiet mode (no log output).
    #[arg(long, short, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Render icon16.png, icon48.png and icon128.png.
    #[command(visible_alias = "g")]
    Generate(GenerateArgs),

    /// Check that an unpacked extension directory can be installed.
    #[command(visible_alias = "v")]
    Verify(VerifyArgs),
}

#[derive(Args, Default)]
struct GenerateArgs {
    /// JSON profile with label, colors, font and output directory.
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Text drawn on the icons.
    #[arg(long, short)]
    label: Option<String>,

    /// Directory the icons are written to.
    #[arg(long, short)]
    out_dir: Option<PathBuf>,

    /// Font family looked up in the system fonts.
    #[arg(long, conflicts_with = "font_file")]
    font_family: Option<String>,

    /// Font file to draw the label with.
    #[arg(long)]
    font_file: Option<PathBuf>,
}

#[derive(Args)]
struct VerifyArgs {
    /// Extension directory to check.
    #[arg(default_value = ".")]
    dir: PathBuf,

    /// Icons directory, relative to the extension directory.
    #[arg(long, default_value = DEFAULT_OUTPUT_DIR)]
    icons_dir: String,
}

// ============================================================================
// Logging Setup
// ============================================================================

fn setup_logging(verbose: bool, quiet: bool) {
    if quiet {
        return;
    }

    let filter = if verbose {
        EnvFilter::new("extension_icons=debug,exticons=debug,info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

// ============================================================================
// Main Entry Point
// ============================================================================

fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let passed = match cli.command {
        Some(Commands::Generate(args)) => generate(&args)?,
        Some(Commands::Verify(args)) => verify(&args),
        None => generate(&GenerateArgs::default())?,
    };

    if !passed {
        std::process::exit(1);
    }
    Ok(())
}

fn load_profile(args: &GenerateArgs) -> Result<IconProfile> {
    let mut profile = match &args.config {
        Some(path) => IconProfile::load(path)
            .with_context(|| format!("loading profile {}", path.display()))?,
        None => IconProfile::default(),
    };

    if let Some(label) = &args.label {
        profile = profile.with_label(label.clone());
    }
    if let Some(dir) = &args.out_dir {
        profile = profile.with_output_dir(dir.clone());
    }
    if let Some(family) = &args.font_family {
        profile = profile.with_font(FontSource::Family(family.clone()));
    }
    if let Some(file) = &args.font_file {
        profile = profile.with_font(FontSource::File(file.clone()));
    }
    Ok(profile)
}

/// Runs the driving loop. Returns false if any size failed.
fn generate(args: &GenerateArgs) -> Result<bool> {
    let renderer = IconRenderer::from_profile(load_profile(args)?);

    match renderer.generate() {
        Ok(report) => {
            for path in report.paths() {
                println!("created icon: {}", path.display());
            }
            println!("all icons created");
            Ok(true)
        }
        Err(GenerateError::Failed {
            failed,
            written,
            first,
        }) => {
            for icon in &written {
                println!("created icon: {}", icon.path.display());
            }
            eprintln!("failed to create icon sizes {failed:?}: {first}");
            Ok(false)
        }
        Err(e) => Err(e.into()),
    }
}

/// Runs the package validator and prints its report.
fn verify(args: &VerifyArgs) -> bool {
    let validator = PackageValidator::new(&args.dir).with_icons_dir(&args.icons_dir);

    println!("Extension installation check: {}", validator.root().display());
    println!("{}", "=".repeat(50));

    let report = validator.validate();
    print!("{report}");

    if report.passed {
        println!();
        println!("Validation complete: the extension can be installed.");
    }
    report.passed
}
