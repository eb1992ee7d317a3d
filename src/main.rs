//! PHP API documentation generator - Command-line tool for writing MkDocs pages from PHP sources.
//!
//! Every class, interface and enum found under the source root is rendered to markdown at the
//! mirrored location under the docs root.
//!
//! # Usage
//!
//! ```bash
//! phpdoc-from-source [OPTIONS] <SRC_PATH> <DOCS_PATH>
//! ```
//!
//! # Examples
//!
//! Document a Laravel-style `app/` directory:
//! ```bash
//! phpdoc-from-source ./app ./docs/api
//! ```
//!
//! One page per declaration, plus a JSON manifest:
//! ```bash
//! phpdoc-from-source ./src ./docs/api --page-per-declaration --manifest docs/api.json -f json
//! ```
//!
//! Enable verbose logging:
//! ```bash
//! phpdoc-from-source ./src ./docs/api -v
//! ```

use anyhow::Result;
use log::info;
use phpdoc_from_source::cli;

fn main() -> Result<()> {
    // Usage errors exit here, before the logger exists
    let args = cli::parse_args();

    let log_level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .init();

    info!("PHP API documentation generator starting...");

    let args = cli::parse_args_from_parsed(args)?;

    cli::run(args)?;

    info!("API documentation generation complete!");

    Ok(())
}
