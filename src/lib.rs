//! PHP API documentation generator - MkDocs pages from PHP source code.
//!
//! This library scans a PHP source tree, pulls out classes, interfaces and enums together with
//! their methods, properties, cases and PHPDoc comments, and renders each one as a markdown page
//! placed at the path mirroring its source file.
//!
//! The extraction is pattern based, not a PHP parser: it is tuned for conventionally formatted
//! code with one-line signatures. See [`extractor`] for the exact rules.
//!
//! # Architecture
//!
//! 1. [`scanner`] - Recursively collects source files, honouring exclusion patterns
//! 2. [`parser`] - Reads a file and runs the extractor over it
//! 3. [`extractor`] - Regex passes that build the [`model`] for one file
//! 4. [`renderer`] - Turns declarations into markdown
//! 5. [`writer`] - Maps source files to page paths and writes pages
//! 6. [`generator`] - Drives a whole run with per-file error isolation
//! 7. [`manifest`] / [`serializer`] - Optional YAML or JSON record of the run
//!
//! # Example Usage
//!
//! ```no_run
//! use phpdoc_from_source::generator::{DocGenerator, GeneratorConfig};
//! use std::path::PathBuf;
//!
//! let config = GeneratorConfig::new(PathBuf::from("./src"), PathBuf::from("./docs/api"));
//! let (summary, _manifest) = DocGenerator::new(config).run().unwrap();
//! println!("{} pages written", summary.pages_written);
//! ```
//!
//! Rendering a single file in memory:
//!
//! ```
//! use phpdoc_from_source::{extractor::extract, renderer::render};
//!
//! let extracted = extract("<?php\n/** Greets people. */\nclass Greeter {}\n");
//! let page = render(&extracted.into_declarations()[0]);
//! assert_eq!(page, "# Greeter\n\nGreets people.\n\n");
//! ```
//!
//! # Command-Line Interface
//!
//! For command-line usage, see the [`cli`] module which provides a complete CLI application.

pub mod cli;
pub mod error;
pub mod extractor;
pub mod generator;
pub mod manifest;
pub mod model;
pub mod parser;
pub mod renderer;
pub mod scanner;
pub mod serializer;
pub mod writer;
