//! zipstitch: merge split chapter text files inside ZIP archives.
//!
//! Chapter fragments named `<digits>_<key>_1_.txt` / `<digits>_<key>_2_.txt`
//! are concatenated into `<digits>_<key>.txt`; everything else in the
//! archive passes through unchanged. The core is purely functional (entries
//! in, entries out, log out); the container codec is an injected capability.

pub mod archive;
pub mod commands;
pub mod error;
pub mod merge;

pub use archive::{ArchiveCodec, ArchiveEntry, EntryContent, ZipCodec};
pub use error::{Error, Result};
pub use merge::{merge_archive, merge_archive_with, merge_entries, MergeAction, MergeOutcome};
