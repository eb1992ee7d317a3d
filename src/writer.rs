//! Placement of rendered pages in the documentation tree.
//!
//! Pages mirror the source tree: `src/Models/User.php` becomes
//! `docs/Models/User.md`. When a file declares several classes they all map
//! to the same page path and the last one written wins, unless pages are
//! split per declaration (see [`PagePolicy`]).

use crate::error::{Error, Result};
use crate::serializer::write_to_file;
use log::debug;
use std::path::{Path, PathBuf};

/// How declarations sharing a source file are laid out on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PagePolicy {
    /// One page per source file; each declaration overwrites the previous one
    #[default]
    PerFile,
    /// One page per declaration, in a directory named after the source file stem
    PerDeclaration,
}

/// Maps source files to documentation pages and writes them.
#[derive(Debug, Clone)]
pub struct PageWriter {
    source_root: PathBuf,
    docs_root: PathBuf,
    extension: String,
    policy: PagePolicy,
}

impl PageWriter {
    pub fn new(source_root: PathBuf, docs_root: PathBuf) -> Self {
        Self {
            source_root,
            docs_root,
            extension: "md".to_string(),
            policy: PagePolicy::default(),
        }
    }

    /// Sets the page extension (without the dot).
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    pub fn with_policy(mut self, policy: PagePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// The page mirroring `source_file`: its root-relative path under the
    /// docs root, with the extension swapped.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutsideSourceRoot`] if the file is not under the source root.
    pub fn file_page(&self, source_file: &Path) -> Result<PathBuf> {
        let relative = self.relative(source_file)?;
        Ok(self.docs_root.join(relative).with_extension(&self.extension))
    }

    /// The page for one declaration of `source_file`, honouring the policy.
    pub fn declaration_page(&self, source_file: &Path, name: &str) -> Result<PathBuf> {
        match self.policy {
            PagePolicy::PerFile => self.file_page(source_file),
            PagePolicy::PerDeclaration => {
                let dir = self.file_page(source_file)?.with_extension("");
                Ok(dir.join(format!("{}.{}", name, self.extension)))
            }
        }
    }

    /// Writes a rendered page, creating parent directories.
    pub fn write(&self, page: &Path, content: &str) -> anyhow::Result<()> {
        debug!("Writing page {}", page.display());
        write_to_file(content, page)
    }

    /// The root-relative path of a source file.
    pub fn relative<'p>(&self, source_file: &'p Path) -> Result<&'p Path> {
        source_file
            .strip_prefix(&self.source_root)
            .map_err(|_| Error::OutsideSourceRoot {
                file: source_file.to_path_buf(),
                root: self.source_root.clone(),
            })
    }
}
