//! Error taxonomy for the merge pipeline.
//!
//! Every failure aborts the run atomically: no partial output archive is
//! ever produced. Pattern-match failures on individual filenames are not
//! errors (they route the entry to pass-through) and never appear here.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Input filename does not end in `.zip`; rejected before any I/O.
    #[error("not a ZIP file: {0}")]
    InvalidInputFormat(String),

    /// Decompression yielded zero entries.
    #[error("the ZIP file is empty or invalid")]
    EmptyArchive,

    /// Decompression or serialization failed at the container level.
    #[error("failed to process archive: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// A `.txt` entry could not be decoded as UTF-8 text.
    #[error("entry '{path}' is not valid UTF-8 text")]
    Decode { path: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
