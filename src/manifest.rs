//! Run manifest: which files were documented, where their pages went, and
//! what was extracted from them.
//!
//! The manifest is optional output meant for tooling around the static-site
//! generator (navigation builders, link checkers). It is assembled in memory
//! during a run and serialized once at the end by [`crate::serializer`].

use crate::model::ExtractedSource;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    pub source_root: PathBuf,
    pub docs_root: PathBuf,
    pub files: Vec<ManifestEntry>,
}

/// One successfully processed source file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManifestEntry {
    /// Source path relative to the source root
    pub source: PathBuf,
    /// Distinct pages written for the file, relative to the docs root
    pub pages: Vec<PathBuf>,
    pub extracted: ExtractedSource,
}

impl Manifest {
    pub fn new(source_root: PathBuf, docs_root: PathBuf) -> Self {
        Self {
            source_root,
            docs_root,
            files: Vec::new(),
        }
    }

    /// Records a processed file. Page paths under the docs root are stored
    /// relative to it and repeated pages are listed once.
    pub fn add_file(&mut self, source: PathBuf, pages: Vec<PathBuf>, extracted: ExtractedSource) {
        let mut relative_pages: Vec<PathBuf> = Vec::with_capacity(pages.len());
        for page in pages {
            let page = page
                .strip_prefix(&self.docs_root)
                .map(PathBuf::from)
                .unwrap_or(page);
            if !relative_pages.contains(&page) {
                relative_pages.push(page);
            }
        }

        self.files.push(ManifestEntry {
            source,
            pages: relative_pages,
            extracted,
        });
    }

    /// Total number of declarations across all recorded files.
    pub fn declaration_count(&self) -> usize {
        self.files
            .iter()
            .map(|entry| entry.extracted.declaration_count())
            .sum()
    }
}
