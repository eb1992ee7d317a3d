//! The documentation run: scan, extract, render and write, one file at a time.
//!
//! A failure on one file (unreadable, not UTF-8, unwritable page) is logged
//! with the file path and counted, then the run moves on. Pages already
//! written for that file are left in place.

use crate::manifest::Manifest;
use crate::parser::SourceParser;
use crate::renderer::{render, render_module};
use crate::scanner::{FileScanner, DEFAULT_EXCLUDES};
use crate::writer::{PageWriter, PagePolicy};
use anyhow::{Context, Result};
use log::{debug, error, info, warn};
use std::fs;
use std::path::{Path, PathBuf};

/// Everything a run needs to know.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub source_root: PathBuf,
    pub docs_root: PathBuf,
    /// Extension of the source files to document, without the dot
    pub source_extension: String,
    /// Extension of the generated pages, without the dot
    pub doc_extension: String,
    /// Substrings of root-relative paths to skip
    pub excludes: Vec<String>,
    pub policy: PagePolicy,
    /// Keep a manifest entry per processed file for the whole run
    pub collect_manifest: bool,
}

impl GeneratorConfig {
    /// A config with the default extensions (`php` → `md`), exclusions and page policy.
    pub fn new(source_root: PathBuf, docs_root: PathBuf) -> Self {
        Self {
            source_root,
            docs_root,
            source_extension: "php".to_string(),
            doc_extension: "md".to_string(),
            excludes: DEFAULT_EXCLUDES.iter().map(|s| s.to_string()).collect(),
            policy: PagePolicy::default(),
            collect_manifest: false,
        }
    }
}

/// Counters for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub files_visited: usize,
    pub files_failed: usize,
    /// Page writes, overwrites of the same path included
    pub pages_written: usize,
    pub declarations: usize,
    pub excluded: usize,
}

pub struct DocGenerator {
    config: GeneratorConfig,
    writer: PageWriter,
}

impl DocGenerator {
    pub fn new(config: GeneratorConfig) -> Self {
        let writer = PageWriter::new(config.source_root.clone(), config.docs_root.clone())
            .with_extension(config.doc_extension.clone())
            .with_policy(config.policy);
        Self { config, writer }
    }

    /// Documents every retained source file under the source root.
    ///
    /// Returns the run counters and, when `collect_manifest` is set, a
    /// manifest of the files that were processed successfully. Without it
    /// nothing extracted from a file outlives that file's processing.
    ///
    /// # Errors
    ///
    /// Only problems with the roots themselves are fatal: a missing or
    /// non-directory source root, or a docs root that cannot be created.
    pub fn run(&self) -> Result<(RunSummary, Option<Manifest>)> {
        info!(
            "Generating API documentation from {} to {}",
            self.config.source_root.display(),
            self.config.docs_root.display()
        );

        fs::create_dir_all(&self.config.docs_root).with_context(|| {
            format!(
                "Failed to create docs directory: {}",
                self.config.docs_root.display()
            )
        })?;

        let scanner = FileScanner::new(self.config.source_root.clone())
            .with_extension(self.config.source_extension.clone())
            .with_excludes(self.config.excludes.clone());
        let scan_result = scanner.scan().with_context(|| {
            format!(
                "Failed to scan source directory: {}",
                self.config.source_root.display()
            )
        })?;

        for warning in &scan_result.warnings {
            warn!("{}", warning);
        }
        debug!(
            "Found {} source files, excluded {} paths",
            scan_result.source_files.len(),
            scan_result.excluded
        );

        let mut summary = RunSummary {
            excluded: scan_result.excluded,
            ..Default::default()
        };
        let mut manifest = self.config.collect_manifest.then(|| {
            Manifest::new(
                self.config.source_root.clone(),
                self.config.docs_root.clone(),
            )
        });

        for file in &scan_result.source_files {
            summary.files_visited += 1;
            let relative = self.writer.relative(file).unwrap_or(file.as_path());
            info!("Processing {}", relative.display());

            match self.process_file(file, manifest.as_mut()) {
                Ok((pages, declarations)) => {
                    summary.pages_written += pages;
                    summary.declarations += declarations;
                }
                Err(e) => {
                    error!("Error processing {}: {:#}", file.display(), e);
                    summary.files_failed += 1;
                }
            }
        }

        Ok((summary, manifest))
    }

    /// Renders and writes every page for one file.
    ///
    /// Returns the number of page writes and of declarations found.
    fn process_file(
        &self,
        file: &Path,
        manifest: Option<&mut Manifest>,
    ) -> Result<(usize, usize)> {
        let parsed = SourceParser::parse_file(file)?;
        let extracted = parsed.extracted;
        let declarations = extracted.declaration_count();
        let mut pages = Vec::new();

        // written first so that, with one page per file, declarations take precedence
        if !extracted.functions.is_empty() || !extracted.constants.is_empty() {
            let page = self.writer.file_page(file)?;
            let title = file
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
            let content = render_module(&title, &extracted.functions, &extracted.constants);
            self.writer.write(&page, &content)?;
            pages.push(page);
        }

        let retained = manifest.is_some().then(|| extracted.clone());
        for declaration in extracted.into_declarations() {
            let page = self.writer.declaration_page(file, declaration.name())?;
            debug!(
                "Rendering {} {} to {}",
                declaration.kind(),
                declaration.name(),
                page.display()
            );
            let content = render(&declaration);
            self.writer.write(&page, &content)?;
            pages.push(page);
        }

        let written = pages.len();
        if let (Some(manifest), Some(extracted)) = (manifest, retained) {
            let relative = self.writer.relative(file)?.to_path_buf();
            manifest.add_file(relative, pages, extracted);
        }

        Ok((written, declarations))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn project(files: &[(&str, &str)]) -> TempDir {
        let temp_dir = TempDir::new().unwrap();
        for (path, content) in files {
            let file_path = temp_dir.path().join("src").join(path);
            fs::create_dir_all(file_path.parent().unwrap()).unwrap();
            fs::write(file_path, content).unwrap();
        }
        temp_dir
    }

    fn config(temp_dir: &TempDir) -> GeneratorConfig {
        GeneratorConfig::new(temp_dir.path().join("src"), temp_dir.path().join("docs"))
    }

    fn manifest_config(temp_dir: &TempDir) -> GeneratorConfig {
        GeneratorConfig {
            collect_manifest: true,
            ..config(temp_dir)
        }
    }

    #[test]
    fn test_run_writes_mirrored_pages() {
        let temp_dir = project(&[
            ("Models/User.php", "<?php\n/** A user. */\nclass User {}\n"),
            ("Kernel.php", "<?php\nclass Kernel {}\n"),
        ]);

        let (summary, manifest) = DocGenerator::new(manifest_config(&temp_dir)).run().unwrap();

        assert_eq!(summary.files_visited, 2);
        assert_eq!(summary.files_failed, 0);
        assert_eq!(summary.pages_written, 2);
        assert_eq!(summary.declarations, 2);
        assert_eq!(
            fs::read_to_string(temp_dir.path().join("docs/Models/User.md")).unwrap(),
            "# User\n\nA user.\n\n"
        );
        assert!(temp_dir.path().join("docs/Kernel.md").exists());
        assert_eq!(manifest.unwrap().files.len(), 2);
    }

    #[test]
    fn test_failed_file_does_not_stop_the_run() {
        let temp_dir = project(&[("Fine.php", "<?php\nclass Fine {}\n")]);
        fs::write(
            temp_dir.path().join("src/Broken.php"),
            b"<?php\n// \xff\xfe\nclass Broken {}\n",
        )
        .unwrap();

        let (summary, manifest) = DocGenerator::new(manifest_config(&temp_dir)).run().unwrap();

        assert_eq!(summary.files_visited, 2);
        assert_eq!(summary.files_failed, 1);
        assert!(!temp_dir.path().join("docs/Broken.md").exists());
        assert!(temp_dir.path().join("docs/Fine.md").exists());
        assert_eq!(manifest.unwrap().files.len(), 1);
    }

    #[test]
    fn test_module_page_is_overwritten_by_declarations() {
        let temp_dir = project(&[(
            "helpers.php",
            "<?php\nfunction helper() {\n}\n\nclass Helper {}\n",
        )]);

        let (summary, _) = DocGenerator::new(config(&temp_dir)).run().unwrap();

        assert_eq!(summary.pages_written, 2);
        assert_eq!(
            fs::read_to_string(temp_dir.path().join("docs/helpers.md")).unwrap(),
            "# Helper\n\n"
        );
    }

    #[test]
    fn test_functions_only_file_gets_module_page() {
        let temp_dir = project(&[(
            "helpers.php",
            "<?php\n/** Say hi. */\nfunction greet(): string {\n    return 'hi';\n}\n",
        )]);

        DocGenerator::new(config(&temp_dir)).run().unwrap();

        assert_eq!(
            fs::read_to_string(temp_dir.path().join("docs/helpers.md")).unwrap(),
            "# helpers\n\n## Functions\n\n### greet()\n\nSay hi.\n\n**Returns:** `string`\n\n"
        );
    }

    #[test]
    fn test_no_manifest_kept_unless_requested() {
        let files: Vec<(String, String)> = (0..20)
            .map(|i| (format!("C{}.php", i), format!("<?php\nclass C{} {{}}\n", i)))
            .collect();
        let files: Vec<(&str, &str)> = files
            .iter()
            .map(|(p, c)| (p.as_str(), c.as_str()))
            .collect();
        let temp_dir = project(&files);

        let (summary, manifest) = DocGenerator::new(config(&temp_dir)).run().unwrap();

        assert_eq!(summary.files_visited, 20);
        assert_eq!(summary.pages_written, 20);
        assert!(manifest.is_none());
    }

    #[test]
    fn test_missing_source_root_is_fatal() {
        let temp_dir = TempDir::new().unwrap();

        assert!(DocGenerator::new(config(&temp_dir)).run().is_err());
    }
}
