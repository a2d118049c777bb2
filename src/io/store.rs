use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use super::snapshot::{self, Snapshot, SnapshotError};

/// Name of the data file a notebook lives in
pub const NOTEBOOK_FILE: &str = "jotter.json";

/// Error type for notebook file I/O
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("no notebook found: no jotter.json in this directory or any parent")]
    NotFound,
    #[error("refusing to overwrite existing {0}")]
    AlreadyExists(PathBuf),
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not write {path}: {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error(transparent)]
    Invalid(#[from] SnapshotError),
}

/// Locate the notebook by walking up from `start`, looking for a
/// `jotter.json` file. Returns the file's path.
pub fn discover_notebook(start: &Path) -> Result<PathBuf, StoreError> {
    let mut current = start.to_path_buf();
    loop {
        let file = current.join(NOTEBOOK_FILE);
        if file.is_file() {
            return Ok(file);
        }
        if !current.pop() {
            return Err(StoreError::NotFound);
        }
    }
}

/// Read and validate the notebook file
pub fn load_notebook(path: &Path) -> Result<Snapshot, StoreError> {
    let text = fs::read_to_string(path).map_err(|e| StoreError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(snapshot::decode(&text)?)
}

/// Write the notebook atomically: temp file in the same directory, then
/// a rename over the target.
pub fn save_notebook(path: &Path, snapshot: &Snapshot) -> Result<(), StoreError> {
    let text = snapshot::encode(snapshot)?;
    atomic_write(path, text.as_bytes()).map_err(|e| StoreError::WriteError {
        path: path.to_path_buf(),
        source: e,
    })
}

fn atomic_write(path: &Path, content: &[u8]) -> std::io::Result<()> {
    let dir = path.parent().unwrap_or(Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Create an empty notebook file in `dir`. Refuses to overwrite an
/// existing one unless `force` is set.
pub fn init_notebook(dir: &Path, force: bool) -> Result<PathBuf, StoreError> {
    let path = dir.join(NOTEBOOK_FILE);
    if path.exists() && !force {
        return Err(StoreError::AlreadyExists(path));
    }
    save_notebook(&path, &Snapshot::default())?;
    Ok(path)
}

/// Copy the notebook file to a timestamped sibling (`jotter-20250101-120000.json`)
/// and return the backup's path. Called before destructive merges.
pub fn backup_notebook(path: &Path) -> Result<PathBuf, StoreError> {
    let stamp = chrono::Local::now().format("%Y%m%d-%H%M%S");
    let backup = path.with_file_name(format!("jotter-{stamp}.json"));
    fs::copy(path, &backup).map_err(|e| StoreError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(backup)
}
