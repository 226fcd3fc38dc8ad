//! ZIP implementation of the codec seam, backed by the `zip` crate.

use std::io::{Cursor, Read, Write};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use super::{is_text_path, ArchiveCodec, ArchiveEntry, EntryContent};
use crate::error::{Error, Result};

/// In-memory ZIP codec. The whole archive is decoded eagerly; large archives
/// are intentionally not streamed.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZipCodec;

impl ArchiveCodec for ZipCodec {
    fn decode(&self, bytes: &[u8]) -> Result<Vec<ArchiveEntry>> {
        let mut archive = ZipArchive::new(Cursor::new(bytes))?;
        if archive.len() == 0 {
            return Err(Error::EmptyArchive);
        }

        let mut entries = Vec::with_capacity(archive.len());
        for index in 0..archive.len() {
            let mut file = archive.by_index(index)?;
            if file.is_dir() {
                continue;
            }

            let path = file.name().to_string();
            let mut raw = Vec::with_capacity(file.size() as usize);
            file.read_to_end(&mut raw)?;

            let content = if is_text_path(&path) {
                let text = String::from_utf8(raw)
                    .map_err(|_| Error::Decode { path: path.clone() })?;
                EntryContent::Text(text)
            } else {
                EntryContent::Binary(raw)
            };

            entries.push(ArchiveEntry { path, content });
        }

        Ok(entries)
    }

    fn encode(&self, entries: &[ArchiveEntry]) -> Result<Vec<u8>> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        let options =
            SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

        for entry in entries {
            writer.start_file(entry.path.as_str(), options)?;
            writer.write_all(entry.bytes())?;
        }

        Ok(writer.finish()?.into_inner())
    }
}
