//! Append-only note log (`output_notes.txt`).
//!
//! One `"<Label>: <subject>"` line per event. Informational only: nothing
//! reads it back to make decisions.

use std::fmt;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Kind of note, rendered as its fixed label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteKind {
    AlreadyMp3,
    ConversionFail,
    MetadataFail,
}

impl NoteKind {
    pub fn label(self) -> &'static str {
        match self {
            NoteKind::AlreadyMp3 => "Was already mp3",
            NoteKind::ConversionFail => "Conversion fail",
            NoteKind::MetadataFail => "Failed to write metadata",
        }
    }
}

impl fmt::Display for NoteKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Handle to the note file. The file is opened in append mode per entry.
#[derive(Debug, Clone)]
pub struct NoteLog {
    path: PathBuf,
}

impl NoteLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends one line. Creates the file if needed.
    pub fn append(&self, kind: NoteKind, subject: impl fmt::Display) -> io::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{}: {}", kind.label(), subject)
    }

    /// Appends one line; a failure is logged and otherwise ignored.
    pub fn record(&self, kind: NoteKind, subject: impl fmt::Display) {
        if let Err(e) = self.append(kind, subject) {
            tracing::warn!(
                "could not write note to {}: {}",
                self.path.display(),
                e
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_are_exact() {
        assert_eq!(NoteKind::AlreadyMp3.label(), "Was already mp3");
        assert_eq!(NoteKind::ConversionFail.label(), "Conversion fail");
        assert_eq!(NoteKind::MetadataFail.label(), "Failed to write metadata");
    }

    #[test]
    fn appends_lines_across_handles() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("output_notes.txt");
        std::fs::write(&path, "Conversion fail: old/run.ogg\n").unwrap();

        NoteLog::new(&path)
            .append(NoteKind::AlreadyMp3, "output/Theme.ogg")
            .unwrap();
        NoteLog::new(&path).record(NoteKind::MetadataFail, "Theme.mp3");

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            content,
            "Conversion fail: old/run.ogg\n\
             Was already mp3: output/Theme.ogg\n\
             Failed to write metadata: Theme.mp3\n"
        );
    }

    #[test]
    fn record_swallows_errors() {
        let dir = tempfile::tempdir().unwrap();
        // A directory cannot be opened for append.
        let log = NoteLog::new(dir.path());
        assert!(log.append(NoteKind::ConversionFail, "x").is_err());
        log.record(NoteKind::ConversionFail, "x");
    }
}
