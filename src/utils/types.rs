use std::fs::{self, DirEntry};
use std::path::PathBuf;

use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Dir,
    File,
    /// Sockets, fifos, broken symlinks and anything else that is neither.
    Other,
}

/// How a rendered name should be styled. The sink decides what that means.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Highlight {
    Match,
    Directory,
    SourceFile,
    Plain,
}

/// One item of a directory listing. Kind and size are resolved through
/// symlinks, the way `stat` sees them.
#[derive(Clone, Debug)]
pub struct Entry {
    pub name: String,
    pub path: PathBuf,
    pub kind: EntryKind,
    pub is_symlink: bool,
    pub size: Option<u64>,
}

impl Entry {
    pub fn from_dir_entry(de: &DirEntry) -> Self {
        let path = de.path();
        let is_symlink = de.file_type().map(|ft| ft.is_symlink()).unwrap_or(false);
        let (kind, size) = match fs::metadata(&path) {
            Ok(md) if md.is_dir() => (EntryKind::Dir, None),
            Ok(md) if md.is_file() => (EntryKind::File, Some(md.len())),
            _ => (EntryKind::Other, None),
        };
        Self {
            name: de.file_name().to_string_lossy().into_owned(),
            path,
            kind,
            is_symlink,
            size,
        }
    }

    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Dir
    }

    pub fn is_file(&self) -> bool {
        self.kind == EntryKind::File
    }
}

/// A directory whose children are being emitted.
#[derive(Debug)]
pub struct Frame {
    pub entries: Vec<Entry>,
    pub idx: usize,
    pub prefix: String,
    pub level: usize,
    /// Canonical path, only tracked while following symlinks.
    pub canonical: Option<PathBuf>,
    /// The parent entry's progress tick is owed once this frame is drained.
    pub tick_on_pop: bool,
}
