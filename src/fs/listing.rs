use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::entry::DirEntry;

#[derive(Debug, Error)]
#[error("cannot list {}: {source}", .path.display())]
pub struct ListingError {
  pub path: PathBuf,
  #[source]
  pub source: io::Error,
}

/// Reads `path` fresh from disk. Element 0 is always the synthetic `..`; the
/// remaining entries keep the platform's listing order.
pub fn list_entries(path: &Path) -> Result<Vec<DirEntry>, ListingError> {
  let read_dir = std::fs::read_dir(path).map_err(|source| ListingError {
    path: path.to_path_buf(),
    source,
  })?;

  let mut entries = vec![DirEntry::parent()];
  for entry in read_dir.flatten() {
    entries.push(DirEntry::from_path(&entry.path()));
  }
  Ok(entries)
}
