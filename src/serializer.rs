//! Serialization of the run manifest to YAML or JSON, and the shared
//! file-writing helper used for every output.

use crate::error::Result;
use crate::manifest::Manifest;
use anyhow::Context;
use log::debug;
use std::fs;
use std::path::Path;

/// Serializes a manifest to YAML.
///
/// # Example
///
/// ```
/// use phpdoc_from_source::manifest::Manifest;
/// use phpdoc_from_source::serializer::serialize_yaml;
/// use std::path::PathBuf;
///
/// let manifest = Manifest::new(PathBuf::from("src"), PathBuf::from("docs"));
/// let yaml = serialize_yaml(&manifest).unwrap();
/// assert!(yaml.contains("source_root: src"));
/// ```
pub fn serialize_yaml(manifest: &Manifest) -> Result<String> {
    debug!("Serializing manifest to YAML");
    Ok(serde_yaml::to_string(manifest)?)
}

/// Serializes a manifest to pretty-printed JSON.
pub fn serialize_json(manifest: &Manifest) -> Result<String> {
    debug!("Serializing manifest to JSON");
    Ok(serde_json::to_string_pretty(manifest)?)
}

/// Writes string content to a file.
///
/// Creates the file and any missing parent directories, or overwrites the
/// file if it already exists.
///
/// # Errors
///
/// Returns an error if a directory or the file cannot be created or written to.
pub fn write_to_file(content: &str, path: &Path) -> anyhow::Result<()> {
    debug!("Writing content to file: {}", path.display());

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    fs::write(path, content)
        .with_context(|| format!("Failed to write to file: {}", path.display()))?;

    debug!("Successfully wrote {} bytes to {}", content.len(), path.display());
    Ok(())
}
