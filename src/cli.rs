use crate::error::Error;
use crate::generator::{DocGenerator, GeneratorConfig};
use crate::scanner::DEFAULT_EXCLUDES;
use crate::serializer::{serialize_json, serialize_yaml, write_to_file};
use crate::writer::PagePolicy;
use anyhow::Result;
use clap::error::ErrorKind;
use clap::{Parser, ValueEnum};
use log::{debug, info, warn};
use std::path::PathBuf;

/// PHP API documentation generator - Writes one markdown page per PHP source file for MkDocs
#[derive(Parser, Debug)]
#[command(name = "phpdoc-from-source")]
#[command(author, version, about, long_about = None)]
pub struct CliArgs {
    /// Root directory of the PHP sources
    #[arg(value_name = "SRC_PATH")]
    pub src_path: PathBuf,

    /// Root directory the markdown pages are written to
    #[arg(value_name = "DOCS_PATH")]
    pub docs_path: PathBuf,

    /// Skip paths containing this substring (repeatable, replaces the defaults)
    #[arg(short = 'e', long = "exclude", value_name = "PATTERN")]
    pub excludes: Vec<String>,

    /// Extension of the source files to document
    #[arg(long = "source-ext", value_name = "EXT", default_value = "php")]
    pub source_extension: String,

    /// Extension of the generated pages
    #[arg(long = "doc-ext", value_name = "EXT", default_value = "md")]
    pub doc_extension: String,

    /// Write each declaration to its own page instead of one page per source file
    #[arg(long = "page-per-declaration")]
    pub page_per_declaration: bool,

    /// Also write a manifest of processed files and extracted declarations
    #[arg(long = "manifest", value_name = "FILE")]
    pub manifest_path: Option<PathBuf>,

    /// Manifest format (yaml or json)
    #[arg(short = 'f', long = "format", value_enum, default_value = "yaml")]
    pub manifest_format: ManifestFormat,

    /// Enable verbose output
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

/// Manifest format options
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum ManifestFormat {
    /// YAML format
    Yaml,
    /// JSON format
    Json,
}

impl CliArgs {
    /// Builds the run configuration from validated arguments.
    pub fn to_config(&self) -> GeneratorConfig {
        let mut config = GeneratorConfig::new(self.src_path.clone(), self.docs_path.clone());
        config.source_extension = normalize_extension(&self.source_extension);
        config.doc_extension = normalize_extension(&self.doc_extension);
        if !self.excludes.is_empty() {
            config.excludes = self.excludes.clone();
        }
        if self.page_per_declaration {
            config.policy = PagePolicy::PerDeclaration;
        }
        config.collect_manifest = self.manifest_path.is_some();
        config
    }
}

/// Parse command line arguments.
///
/// Usage errors (wrong number of paths, unknown options) print the usage
/// message and exit with status 1; `--help` and `--version` exit with 0.
pub fn parse_args() -> CliArgs {
    match CliArgs::try_parse() {
        Ok(args) => args,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => e.exit(),
            _ => {
                let _ = e.print();
                std::process::exit(1);
            }
        },
    }
}

/// Validate and log already-parsed arguments
pub fn parse_args_from_parsed(args: CliArgs) -> Result<CliArgs> {
    debug!("Parsed arguments: {:?}", args);

    if !args.src_path.exists() {
        anyhow::bail!("Source path does not exist: {}", args.src_path.display());
    }

    if !args.src_path.is_dir() {
        anyhow::bail!("Source path is not a directory: {}", args.src_path.display());
    }

    for (flag, value) in [
        ("--source-ext", &args.source_extension),
        ("--doc-ext", &args.doc_extension),
    ] {
        if normalize_extension(value).is_empty() {
            return Err(Error::InvalidArgument(format!("{} must not be empty", flag)).into());
        }
    }

    info!("Source path: {}", args.src_path.display());
    info!("Docs path: {}", args.docs_path.display());
    if args.excludes.is_empty() {
        debug!("Excluding: {:?}", DEFAULT_EXCLUDES);
    } else {
        info!("Excluding: {:?}", args.excludes);
    }
    if let Some(ref manifest) = args.manifest_path {
        info!("Manifest: {} ({:?})", manifest.display(), args.manifest_format);
    }

    Ok(args)
}

/// Run the main workflow
pub fn run(args: CliArgs) -> Result<()> {
    let generator = DocGenerator::new(args.to_config());
    let (summary, manifest) = generator.run()?;

    if let (Some(manifest_path), Some(manifest)) = (&args.manifest_path, &manifest) {
        let content = match args.manifest_format {
            ManifestFormat::Yaml => serialize_yaml(manifest)?,
            ManifestFormat::Json => serialize_json(manifest)?,
        };
        write_to_file(&content, manifest_path)?;
        info!("Wrote manifest to {}", manifest_path.display());
    }

    if summary.files_failed > 0 {
        warn!("{} files could not be documented", summary.files_failed);
    }

    info!("Summary:");
    info!("  - Files processed: {}", summary.files_visited);
    info!("  - Files failed: {}", summary.files_failed);
    info!("  - Paths excluded: {}", summary.excluded);
    info!("  - Declarations: {}", summary.declarations);
    info!("  - Pages written: {}", summary.pages_written);

    Ok(())
}

fn normalize_extension(extension: &str) -> String {
    extension.trim().trim_start_matches('.').to_string()
}
