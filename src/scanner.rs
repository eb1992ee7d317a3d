use crate::error::{Error, Result};
use log::{debug, warn};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Path fragments skipped by default: test and vendor trees and test files.
pub const DEFAULT_EXCLUDES: &[&str] = &["/tests/", "/vendor/", "/Test.php", "/test.php"];

/// File scanner for traversing a source tree.
///
/// The `FileScanner` recursively walks the source root and collects every file with the
/// configured extension. A path is excluded when its root-relative form, written with forward
/// slashes and a leading `/` (e.g. `/vendor/acme/Lib.php`), contains any exclusion substring.
/// Excluded directories are pruned and never descended into.
///
/// # Example
///
/// ```no_run
/// use phpdoc_from_source::scanner::FileScanner;
/// use std::path::PathBuf;
///
/// let scanner = FileScanner::new(PathBuf::from("./src"));
/// let result = scanner.scan().unwrap();
/// println!("Found {} PHP files", result.source_files.len());
/// ```
pub struct FileScanner {
    root_path: PathBuf,
    extension: String,
    excludes: Vec<String>,
}

/// Result of directory scanning operation.
///
/// Contains the list of discovered source files and any warnings encountered during scanning.
pub struct ScanResult {
    /// Paths of all retained source files, in file-name order
    pub source_files: Vec<PathBuf>,
    /// Number of files or directories dropped by an exclusion pattern
    pub excluded: usize,
    /// Warning messages for any issues encountered (e.g., inaccessible directories)
    pub warnings: Vec<String>,
}

impl FileScanner {
    /// Creates a scanner for `.php` files using [`DEFAULT_EXCLUDES`].
    pub fn new(root_path: PathBuf) -> Self {
        Self {
            root_path,
            extension: "php".to_string(),
            excludes: DEFAULT_EXCLUDES.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Sets the extension (without the dot) of the files to collect.
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Replaces the exclusion substrings.
    pub fn with_excludes(mut self, excludes: Vec<String>) -> Self {
        self.excludes = excludes;
        self
    }

    /// Scans the directory tree and collects the matching files.
    ///
    /// Inaccessible entries are logged and recorded as warnings; scanning continues.
    ///
    /// # Errors
    ///
    /// Returns an error if the root does not exist or is not a directory.
    pub fn scan(&self) -> Result<ScanResult> {
        let metadata = std::fs::metadata(&self.root_path)?;
        if !metadata.is_dir() {
            return Err(Error::InvalidArgument(format!(
                "source root is not a directory: {}",
                self.root_path.display()
            )));
        }

        let mut source_files = Vec::new();
        let mut warnings = Vec::new();
        let mut excluded = 0;

        let walker = WalkDir::new(&self.root_path)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| {
                // Don't filter the root directory itself
                if e.path() == self.root_path {
                    return true;
                }

                let mut relative = self.relative_form(e.path());
                if e.file_type().is_dir() {
                    relative.push('/');
                }

                if self.is_excluded(&relative) {
                    debug!("Excluding {}", e.path().display());
                    excluded += 1;
                    return false;
                }
                true
            });

        for entry in walker {
            match entry {
                Ok(entry) => {
                    let path = entry.path();

                    if path.is_file()
                        && path.extension().and_then(|s| s.to_str()) == Some(self.extension.as_str())
                    {
                        source_files.push(path.to_path_buf());
                    }
                }
                Err(e) => {
                    // Record warning for inaccessible directories/files
                    let warning = format!("Failed to access path: {}", e);
                    warn!("{}", warning);
                    warnings.push(warning);
                }
            }
        }

        Ok(ScanResult {
            source_files,
            excluded,
            warnings,
        })
    }

    /// `/`-prefixed, `/`-separated path relative to the root.
    fn relative_form(&self, path: &Path) -> String {
        let relative = path.strip_prefix(&self.root_path).unwrap_or(path);
        let mut form = String::new();
        for component in relative.components() {
            form.push('/');
            form.push_str(&component.as_os_str().to_string_lossy());
        }
        form
    }

    fn is_excluded(&self, relative: &str) -> bool {
        self.excludes.iter().any(|pattern| relative.contains(pattern.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn names(result: &ScanResult, root: &Path) -> Vec<String> {
        result
            .source_files
            .iter()
            .map(|p| p.strip_prefix(root).unwrap().to_string_lossy().replace('\\', "/"))
            .collect()
    }

    #[test]
    fn test_scan_normal_directory() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();

        fs::write(root.join("User.php"), "<?php class User {}").unwrap();
        fs::write(root.join("Order.php"), "<?php class Order {}").unwrap();
        fs::write(root.join("readme.md"), "# README").unwrap();

        let scanner = FileScanner::new(root.to_path_buf());
        let result = scanner.scan().unwrap();

        assert_eq!(names(&result, root), vec!["Order.php", "User.php"]);
        assert!(result.warnings.is_empty());
        assert_eq!(result.excluded, 0);
    }

    #[test]
    fn test_scan_empty_directory() {
        let temp_dir = TempDir::new().unwrap();

        let scanner = FileScanner::new(temp_dir.path().to_path_buf());
        let result = scanner.scan().unwrap();

        assert!(result.source_files.is_empty());
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_scan_nested_directories() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();

        fs::create_dir_all(root.join("Http/Controllers")).unwrap();
        fs::create_dir(root.join("Models")).unwrap();
        fs::write(root.join("Kernel.php"), "<?php").unwrap();
        fs::write(root.join("Http/Controllers/HomeController.php"), "<?php").unwrap();
        fs::write(root.join("Models/User.php"), "<?php").unwrap();

        let scanner = FileScanner::new(root.to_path_buf());
        let result = scanner.scan().unwrap();

        assert_eq!(
            names(&result, root),
            vec!["Http/Controllers/HomeController.php", "Kernel.php", "Models/User.php"]
        );
    }

    #[test]
    fn test_scan_skips_default_excludes() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();

        fs::create_dir_all(root.join("vendor/acme")).unwrap();
        fs::create_dir(root.join("tests")).unwrap();
        fs::create_dir(root.join("Support")).unwrap();
        fs::write(root.join("vendor/acme/Lib.php"), "<?php").unwrap();
        fs::write(root.join("tests/UserTest.php"), "<?php").unwrap();
        fs::write(root.join("Support/Test.php"), "<?php").unwrap();
        fs::write(root.join("Support/Str.php"), "<?php").unwrap();

        let scanner = FileScanner::new(root.to_path_buf());
        let result = scanner.scan().unwrap();

        assert_eq!(names(&result, root), vec!["Support/Str.php"]);
        // vendor/ and tests/ are pruned as directories, Test.php as a file
        assert_eq!(result.excluded, 3);
    }

    #[test]
    fn test_scan_custom_excludes_and_extension() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();

        fs::create_dir(root.join("generated")).unwrap();
        fs::write(root.join("generated/Proxy.inc"), "<?php").unwrap();
        fs::write(root.join("Service.inc"), "<?php").unwrap();
        fs::write(root.join("Service.php"), "<?php").unwrap();

        let scanner = FileScanner::new(root.to_path_buf())
            .with_extension("inc")
            .with_excludes(vec!["/generated/".to_string()]);
        let result = scanner.scan().unwrap();

        assert_eq!(names(&result, root), vec!["Service.inc"]);
    }

    #[test]
    fn test_excludes_ignore_the_root_location() {
        // the root itself sits under a `tests` directory
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("tests").join("project");
        fs::create_dir_all(&root).unwrap();
        fs::write(root.join("App.php"), "<?php").unwrap();

        let scanner = FileScanner::new(root.clone());
        let result = scanner.scan().unwrap();

        assert_eq!(names(&result, &root), vec!["App.php"]);
    }

    #[test]
    fn test_scan_missing_root() {
        let temp_dir = TempDir::new().unwrap();
        let scanner = FileScanner::new(temp_dir.path().join("missing"));

        assert!(matches!(scanner.scan(), Err(Error::IoError(_))));
    }

    #[test]
    fn test_scan_root_is_a_file() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("App.php");
        fs::write(&file, "<?php").unwrap();

        let scanner = FileScanner::new(file);

        assert!(matches!(scanner.scan(), Err(Error::InvalidArgument(_))));
    }
}
