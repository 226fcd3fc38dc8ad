//! Filename pattern matching for split chapter parts.
//!
//! A pairable filename has the shape `<digits>_<key>_<1|2>[_].txt`, where
//! the numeric prefix is optional. Classification failure is not an error:
//! the file simply takes the pass-through route.

use regex::Regex;

/// Which half of a split chapter a file represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Part {
    One,
    Two,
}

impl Part {
    /// The other half of the pair.
    pub fn other(self) -> Part {
        match self {
            Part::One => Part::Two,
            Part::Two => Part::One,
        }
    }

    pub fn number(self) -> u8 {
        match self {
            Part::One => 1,
            Part::Two => 2,
        }
    }
}

/// A successfully classified chapter part filename. Borrows from the path
/// it was extracted from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChapterMatch<'a> {
    /// Leading numeric prefix (`05` in `05_Intro_1_.txt`), when present.
    /// Retained separately so merged output names can reuse it.
    pub prefix: Option<&'a str>,
    /// Stable identifying substring shared between the two parts.
    pub key: &'a str,
    pub part: Part,
}

/// Compiled matcher for chapter part filenames.
pub struct ChapterPattern {
    prefix: Regex,
    part: Regex,
}

impl ChapterPattern {
    pub fn new() -> Self {
        Self {
            prefix: Regex::new(r"^(\d+)_").expect("Invalid regex pattern"),
            // Lazy key with an end anchor, so the key runs up to the last
            // `_1`/`_2` marker. Lowercase `.txt` only: an uppercase `.TXT`
            // entry decodes as text but never pairs.
            part: Regex::new(r"^(.+?)_([12])_?\.txt$").expect("Invalid regex pattern"),
        }
    }

    /// Classify a path. `None` means the file is an ordinary pass-through
    /// text file.
    pub fn extract<'a>(&self, path: &'a str) -> Option<ChapterMatch<'a>> {
        // The prefix is stripped before the part match, so leading digits
        // can never be reinterpreted as the chapter key.
        let (prefix, remainder) = match self.prefix.captures(path) {
            Some(caps) => {
                let whole = caps.get(0).map_or("", |m| m.as_str());
                let digits = caps.get(1).map(|m| m.as_str());
                (digits, &path[whole.len()..])
            }
            None => (None, path),
        };

        let caps = self.part.captures(remainder)?;
        let key = caps.get(1).map_or("", |m| m.as_str());
        let part = match caps.get(2).map_or("", |m| m.as_str()) {
            "1" => Part::One,
            _ => Part::Two,
        };

        Some(ChapterMatch { prefix, key, part })
    }
}

impl Default for ChapterPattern {
    fn default() -> Self {
        Self::new()
    }
}
