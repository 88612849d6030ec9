//! Shared filesystem helpers: root validation, display names and text decoding

use std::borrow::Cow;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Check that `path` names an existing directory and return its absolute form.
///
/// The path is made absolute without resolving symlinks, so the header of a
/// report shows the path the user asked for.
pub fn resolve_root(path: &Path) -> Result<PathBuf> {
    if !path.exists() {
        return Err(Error::NotFound(path.to_path_buf()));
    }
    if !path.is_dir() {
        return Err(Error::NotADirectory(path.to_path_buf()));
    }
    std::path::absolute(path).map_err(|_| Error::NotFound(path.to_path_buf()))
}

/// Last component of a path as shown to the user, `.` when there is none.
pub fn display_name(path: &Path) -> String {
    path.components()
        .next_back()
        .map(|c| c.as_os_str().to_string_lossy().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| ".".to_string())
}

/// Text read from a source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedText {
    pub text: String,
    /// Set when the bytes were not valid UTF-8 and replacement characters
    /// were substituted.
    pub lossy: bool,
}

impl DecodedText {
    /// Decode bytes strictly, falling back to lossy decoding.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        match String::from_utf8(bytes) {
            Ok(text) => Self { text, lossy: false },
            Err(e) => Self {
                text: String::from_utf8_lossy(e.as_bytes()).into_owned(),
                lossy: true,
            },
        }
    }
}

/// Read a file as text. Only I/O failures are errors; bad encodings degrade.
pub fn read_text(path: &Path) -> io::Result<DecodedText> {
    let bytes = std::fs::read(path)?;
    Ok(DecodedText::from_bytes(bytes))
}

/// Convert `\r\n` and lone `\r` line endings to `\n`.
pub fn normalize_newlines(text: &str) -> Cow<'_, str> {
    if !text.contains('\r') {
        return Cow::Borrowed(text);
    }
    Cow::Owned(text.replace("\r\n", "\n").replace('\r', "\n"))
}
