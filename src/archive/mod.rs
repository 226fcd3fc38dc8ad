//! Archive entry model and the codec seam.
//!
//! The merge engine is independent of the container format: anything that
//! decodes bytes into entries and encodes entries back satisfies
//! [`ArchiveCodec`]. The shipped implementation is [`ZipCodec`].

mod zip;

pub use zip::ZipCodec;

use crate::error::Result;

/// Content of a single archive entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryContent {
    /// A `.txt` entry, decoded as UTF-8.
    Text(String),
    /// Any other entry, kept as raw bytes.
    Binary(Vec<u8>),
}

/// One file inside an archive. Directory entries are never represented;
/// paths keep whatever separators the archive stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    pub path: String,
    pub content: EntryContent,
}

impl ArchiveEntry {
    pub fn text(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: EntryContent::Text(content.into()),
        }
    }

    pub fn binary(path: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        Self {
            path: path.into(),
            content: EntryContent::Binary(content.into()),
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self.content, EntryContent::Text(_))
    }

    /// Decoded text of this entry, if it is a text entry.
    pub fn as_text(&self) -> Option<&str> {
        match &self.content {
            EntryContent::Text(text) => Some(text),
            EntryContent::Binary(_) => None,
        }
    }

    /// Raw byte view of the content, regardless of kind.
    pub fn bytes(&self) -> &[u8] {
        match &self.content {
            EntryContent::Text(text) => text.as_bytes(),
            EntryContent::Binary(bytes) => bytes,
        }
    }
}

/// True for paths the reader decodes as text. The extension check is
/// case-insensitive; the pairing pattern in [`crate::merge::pattern`] is not.
pub fn is_text_path(path: &str) -> bool {
    path.to_ascii_lowercase().ends_with(".txt")
}

/// Container codec seam: decode raw bytes into entries, encode entries back
/// into a serialized archive.
pub trait ArchiveCodec {
    fn decode(&self, bytes: &[u8]) -> Result<Vec<ArchiveEntry>>;
    fn encode(&self, entries: &[ArchiveEntry]) -> Result<Vec<u8>>;
}
