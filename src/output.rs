//! YAML rendering of the post list and the data-file writer.

use std::io::Write;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::post::Post;

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to serialize posts as YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Failed to write '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl OutputError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Three comment lines naming the program that produced the file.
pub fn header(generator: &str) -> String {
    [
        "#".to_string(),
        format!("# This file was automatically generated by \"{}\"", generator),
        "#".to_string(),
    ]
    .join("\n")
}

/// Renders the generated-file header followed by the YAML list of posts.
///
/// Output is deterministic: keys follow [`Post`] field order and posts keep
/// their input order, so an unchanged feed renders byte-identical text.
pub fn render_posts(posts: &[Post], generator: &str) -> Result<String, OutputError> {
    let yaml = serde_yaml::to_string(posts)?;
    Ok(format!("{}\n{}", header(generator), yaml))
}

/// Replaces the file at `path` with `contents`.
///
/// Writes to a temporary sibling file, syncs it, then renames it over the
/// destination, so readers see either the old file or the new one. The
/// parent directory must already exist.
pub fn write_posts(path: &Path, contents: &str) -> Result<(), OutputError> {
    use std::time::{SystemTime, UNIX_EPOCH};

    // SEC-009: Randomized temp filename to prevent TOCTOU race conditions
    let random_suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);
    let temp_path = path.with_extension(format!("tmp.{:016x}", random_suffix));

    let mut file = std::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&temp_path)
        .map_err(|e| OutputError::io(&temp_path, e))?;

    let written = file
        .write_all(contents.as_bytes())
        .and_then(|()| file.sync_all());
    drop(file);

    if let Err(e) = written {
        let _ = std::fs::remove_file(&temp_path);
        return Err(OutputError::io(&temp_path, e));
    }

    if let Err(e) = std::fs::rename(&temp_path, path) {
        let _ = std::fs::remove_file(&temp_path);
        return Err(OutputError::io(path, e));
    }

    tracing::info!(path = %path.display(), bytes = contents.len(), "Wrote posts file");
    Ok(())
}
