use std::path::Path;

pub const PARENT_NAME: &str = "..";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
  Directory,
  File,
}

/// One row of a directory listing, either the synthetic `..` or a real child.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
  pub name: String,
  pub kind: EntryKind,
}

impl DirEntry {
  pub fn parent() -> Self {
    Self {
      name: PARENT_NAME.to_string(),
      kind: EntryKind::Directory,
    }
  }

  /// Classifies `path` by following it the way the platform does. A child that
  /// can no longer be stat'ed is reported as a file.
  pub fn from_path(path: &Path) -> Self {
    let is_dir = path.metadata().is_ok_and(|m| m.is_dir());
    let name = path
      .file_name()
      .map(|n| n.to_string_lossy().to_string())
      .unwrap_or_default();

    Self {
      name,
      kind: if is_dir { EntryKind::Directory } else { EntryKind::File },
    }
  }

  pub fn is_dir(&self) -> bool {
    self.kind == EntryKind::Directory
  }

  pub fn is_parent(&self) -> bool {
    self.name == PARENT_NAME
  }

  pub fn display_name(&self) -> String {
    match self.kind {
      EntryKind::Directory => format!("{}/", self.name),
      EntryKind::File => self.name.clone(),
    }
  }
}
