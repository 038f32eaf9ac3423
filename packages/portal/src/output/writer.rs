//! Data file writers.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use super::DataFormat;
use crate::config::DATA_FILE_STEM;
use crate::error::{PortalError, Result};
use crate::types::Document;

/// Serialize a document as pretty-printed JSON. Non-ASCII text is kept verbatim.
pub fn to_json(doc: &Document) -> Result<String> {
    Ok(serde_json::to_string_pretty(doc)?)
}

/// Serialize a document as YAML with a leading document marker.
pub fn to_yaml(doc: &Document) -> Result<String> {
    let yaml = serde_yaml_ng::to_string(doc)?;
    let lines: Vec<&str> = yaml.lines().map(str::trim_end).collect();
    Ok(format!("---\n{}\n", lines.join("\n")))
}

/// Write `content` to `path` atomically.
///
/// Writes to a hidden temp file next to the target, syncs it to disk, then
/// renames it over the target, so a crash never leaves a half-written file.
pub fn write_atomic(path: &Path, content: &str) -> Result<()> {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| {
            PortalError::InvalidOutputDir(format!("{} has no file name", path.display()))
        })?;
    let temp_file = path.with_file_name(format!(".{file_name}.tmp"));

    {
        let mut file = File::create(&temp_file)?;
        file.write_all(content.as_bytes())?;
        file.sync_all()?;
    }

    // On Windows, rename fails if the destination already exists
    #[cfg(target_os = "windows")]
    if path.exists() {
        fs::remove_file(path)?;
    }

    fs::rename(&temp_file, path)?;
    Ok(())
}

/// Save a document as `data.json` or `data.yaml` inside `output_dir`.
///
/// The directory is created when missing.
///
/// # Returns
/// Path to the saved file
pub fn save_data(doc: &Document, output_dir: &Path, format: DataFormat) -> Result<PathBuf> {
    fs::create_dir_all(output_dir)?;
    let output_file = output_dir.join(format!("{DATA_FILE_STEM}.{}", format.extension()));

    let content = match format {
        DataFormat::Json => to_json(doc)?,
        DataFormat::Yaml => to_yaml(doc)?,
    };
    write_atomic(&output_file, &content)?;

    tracing::info!(path = %output_file.display(), %format, "Saved data file");
    Ok(output_file)
}

/// Load a document from a JSON data file written by [`save_data`].
pub fn load_json(path: &Path) -> Result<Document> {
    let content = fs::read_to_string(path).map_err(|source| PortalError::ReadInput {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_json::from_str(&content)?)
}
