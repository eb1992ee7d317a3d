use crate::extractor;
use crate::model::ExtractedSource;
use anyhow::{Context, Result};
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};

/// Reads PHP source files and runs the structural extractor over them.
///
/// # Example
///
/// ```no_run
/// use phpdoc_from_source::parser::SourceParser;
/// use std::path::Path;
///
/// let parsed = SourceParser::parse_file(Path::new("src/Models/User.php")).unwrap();
/// println!("Found {} classes", parsed.extracted.classes.len());
/// ```
pub struct SourceParser;

/// A source file together with everything extracted from it.
#[derive(Debug)]
pub struct ParsedFile {
    /// Path to the source file
    pub path: PathBuf,
    /// Declarations and top-level members, each tagged with `path`
    pub extracted: ExtractedSource,
}

impl SourceParser {
    /// Parses a single source file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid UTF-8.
    pub fn parse_file(path: &Path) -> Result<ParsedFile> {
        debug!("Parsing file: {}", path.display());

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path.display()))?;

        Ok(Self::parse_source(path, &content))
    }

    /// Extracts from already loaded source text.
    pub fn parse_source(path: &Path, content: &str) -> ParsedFile {
        let mut extracted = extractor::extract(content);
        extracted.set_source(path);

        debug!(
            "Found {} declarations in {}",
            extracted.declaration_count(),
            path.display()
        );

        ParsedFile {
            path: path.to_path_buf(),
            extracted,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    /// Helper function to create a temporary file with content
    fn create_temp_file(dir: &TempDir, name: &str, content: &[u8]) -> PathBuf {
        let file_path = dir.path().join(name);
        fs::write(&file_path, content).unwrap();
        file_path
    }

    #[test]
    fn test_parse_valid_file() {
        let temp_dir = TempDir::new().unwrap();
        let code = br#"<?php
namespace App\Models;

/**
 * A registered user.
 */
class User extends Model
{
    public function name(): string
    {
        return $this->name;
    }
}
"#;

        let file_path = create_temp_file(&temp_dir, "User.php", code);
        let parsed = SourceParser::parse_file(&file_path).unwrap();

        assert_eq!(parsed.path, file_path);
        assert_eq!(parsed.extracted.classes.len(), 1);
        assert_eq!(parsed.extracted.classes[0].source, file_path);
        assert_eq!(parsed.extracted.classes[0].methods[0].name, "name");
    }

    #[test]
    fn test_parse_nonexistent_file() {
        let result = SourceParser::parse_file(Path::new("/nonexistent/File.php"));

        let err_msg = result.unwrap_err().to_string();
        assert!(err_msg.contains("Failed to read file"));
    }

    #[test]
    fn test_parse_invalid_utf8() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = create_temp_file(&temp_dir, "Latin1.php", b"<?php\n// caf\xe9\nclass A {}\n");

        assert!(SourceParser::parse_file(&file_path).is_err());
    }

    #[test]
    fn test_parse_empty_file() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = create_temp_file(&temp_dir, "empty.php", b"");

        let parsed = SourceParser::parse_file(&file_path).unwrap();
        assert!(parsed.extracted.is_empty());
    }

    #[test]
    fn test_parse_source_tags_every_declaration() {
        let path = Path::new("src/Shapes.php");
        let parsed = SourceParser::parse_source(
            path,
            "<?php\ninterface Shape {}\nenum Kind { case Round; }\nclass Circle implements Shape {}\n",
        );

        assert_eq!(parsed.extracted.declaration_count(), 3);
        for decl in parsed.extracted.into_declarations() {
            let source = match &decl {
                crate::model::Declaration::Class(c) => &c.source,
                crate::model::Declaration::Interface(i) => &i.source,
                crate::model::Declaration::Enum(e) => &e.source,
            };
            assert_eq!(source, path);
        }
    }
}
