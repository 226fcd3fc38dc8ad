//! Chapter merge engine: pairing, concatenation, and the action log.
//!
//! The engine is purely functional: decoded entries in, output entries and
//! an ordered log out. Archive and filesystem concerns live in
//! [`crate::archive`] and the command layer.

pub mod pattern;

use std::collections::{HashMap, HashSet};

use regex::Regex;
use serde::Serialize;
use tracing::{debug, warn};

use crate::archive::{ArchiveCodec, ArchiveEntry, EntryContent, ZipCodec};
use crate::error::Result;
use pattern::{ChapterPattern, Part};

/// One merge decision, in processing order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum MergeAction {
    /// Two parts were concatenated into a new output file.
    Merged {
        part1: String,
        part2: String,
        output: String,
    },
    /// Only one part of a chapter was found; kept under its original name.
    KeptSingle { path: String, missing_part: u8 },
    /// Text entry that never participated in a merge.
    KeptUnchanged { path: String },
}

impl std::fmt::Display for MergeAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MergeAction::Merged {
                part1,
                part2,
                output,
            } => write!(f, "Merged: {part1} + {part2} → {output}"),
            MergeAction::KeptSingle { path, missing_part } => {
                write!(f, "Kept as-is: {path} (part {missing_part} not found)")
            }
            MergeAction::KeptUnchanged { path } => write!(f, "Kept unchanged: {path}"),
        }
    }
}

/// Result of merging one archive's entries.
#[derive(Debug)]
pub struct MergeOutcome {
    pub entries: Vec<ArchiveEntry>,
    pub log: Vec<MergeAction>,
}

/// A classified chapter part, borrowing from the source entry.
#[derive(Clone, Copy)]
struct PartRef<'a> {
    path: &'a str,
    text: &'a str,
    prefix: Option<&'a str>,
}

#[derive(Default)]
struct ChapterParts<'a> {
    part1: Option<PartRef<'a>>,
    part2: Option<PartRef<'a>>,
}

/// Merge split chapter pairs within a decoded entry set.
///
/// Output order matches the original tool: merged chapters and unmatched
/// singles in first-seen chapter order, then pass-through text entries,
/// then all binary entries verbatim.
pub fn merge_entries(entries: &[ArchiveEntry]) -> MergeOutcome {
    let matcher = ChapterPattern::new();
    // A leading blank line: whitespace run terminated by a newline, anchored
    // at the very start of part 2.
    let leading_blank = Regex::new(r"^\s*\n").expect("Invalid regex pattern");

    // Single pass: group classified text entries by chapter key, keeping
    // first-seen chapter order for the log.
    let mut order: Vec<&str> = Vec::new();
    let mut chapters: HashMap<&str, ChapterParts<'_>> = HashMap::new();

    for entry in entries {
        let EntryContent::Text(text) = &entry.content else {
            continue;
        };
        let Some(found) = matcher.extract(&entry.path) else {
            continue;
        };

        let parts = chapters.entry(found.key).or_insert_with(|| {
            order.push(found.key);
            ChapterParts::default()
        });
        let slot = match found.part {
            Part::One => &mut parts.part1,
            Part::Two => &mut parts.part2,
        };
        let replaced = slot.replace(PartRef {
            path: &entry.path,
            text,
            prefix: found.prefix,
        });
        if let Some(previous) = replaced {
            warn!(
                chapter = found.key,
                part = found.part.number(),
                dropped = previous.path,
                kept = %entry.path,
                "duplicate part assignment, keeping the later entry"
            );
        }
    }

    let mut output: Vec<ArchiveEntry> = Vec::with_capacity(entries.len());
    let mut log: Vec<MergeAction> = Vec::new();
    let mut consumed: HashSet<&str> = HashSet::new();

    for key in &order {
        let parts = &chapters[key];
        match (&parts.part1, &parts.part2) {
            (Some(part1), Some(part2)) => {
                let body = leading_blank
                    .find(part2.text)
                    .map_or(part2.text, |m| &part2.text[m.end()..]);
                let merged = format!("{}{}", part1.text, body);
                // Output name reuses part 1's numeric prefix when it has one.
                let name = match part1.prefix {
                    Some(prefix) => format!("{prefix}_{key}.txt"),
                    None => format!("{key}.txt"),
                };

                consumed.insert(part1.path);
                consumed.insert(part2.path);
                log.push(MergeAction::Merged {
                    part1: part1.path.to_string(),
                    part2: part2.path.to_string(),
                    output: name.clone(),
                });
                output.push(ArchiveEntry::text(name, merged));
            }
            (Some(only), None) | (None, Some(only)) => {
                let missing = match parts.part1 {
                    Some(_) => Part::Two,
                    None => Part::One,
                };
                consumed.insert(only.path);
                log.push(MergeAction::KeptSingle {
                    path: only.path.to_string(),
                    missing_part: missing.number(),
                });
                output.push(ArchiveEntry::text(only.path, only.text));
            }
            (None, None) => {}
        }
    }

    // Text entries that never classified into a handled chapter pass
    // through under their original path and content.
    for entry in entries {
        if entry.is_text() && !consumed.contains(entry.path.as_str()) {
            log.push(MergeAction::KeptUnchanged {
                path: entry.path.clone(),
            });
            output.push(entry.clone());
        }
    }

    // Binary entries pass through verbatim and are not logged.
    for entry in entries {
        if !entry.is_text() {
            output.push(entry.clone());
        }
    }

    MergeOutcome {
        entries: output,
        log,
    }
}

/// Merge a raw archive: decode with `codec`, run the engine, re-encode.
pub fn merge_archive_with<C: ArchiveCodec>(
    codec: &C,
    bytes: &[u8],
) -> Result<(Vec<u8>, Vec<MergeAction>)> {
    let entries = codec.decode(bytes)?;
    debug!(entries = entries.len(), "decoded archive");

    let outcome = merge_entries(&entries);
    debug!(
        outputs = outcome.entries.len(),
        actions = outcome.log.len(),
        "merge complete"
    );

    let encoded = codec.encode(&outcome.entries)?;
    Ok((encoded, outcome.log))
}

/// Merge a raw ZIP archive into a new ZIP archive.
pub fn merge_archive(bytes: &[u8]) -> Result<(Vec<u8>, Vec<MergeAction>)> {
    merge_archive_with(&ZipCodec, bytes)
}
