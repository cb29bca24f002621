//! Prcd directory loader
//!
//! Scans a directory for `prcd_*.txt` files and parses each one into a
//! [`Section`]. A prcd file holds one quotation per line, optionally ending
//! with ` (Author)`. Lines starting with `optimiz` (any case) continue the
//! previous quotation instead of starting a new one.

use lazy_static::lazy_static;
use regex::Regex;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::{LoadError, ResultExt};
use crate::grimoire::Grimoire;
use crate::moccolo::{Moccolo, Section};
use crate::Result;

/// Glob pattern selecting prcd files inside the data directory
pub const PRCD_PATTERN: &str = "prcd_*.txt";

/// Control files of the corpus that match the pattern but hold no quotations
pub const RESERVED_FILES: [&str; 5] = [
    "prcd_rd!.txt",
    "prcd_out.txt",
    "prcd_vpf.txt",
    "prcd_hst.txt",
    "prcd_int.txt",
];

const CONTINUATION_PREFIX: &str = "optimiz";

// ASCII whitespace only before the parenthetical; other spaces stay in the text
lazy_static! {
    static ref AUTHORED_LINE: Regex = Regex::new(r"^(.*?)[\t\n\f\r ]*\(([^)]+)\)$").unwrap();
}

/// Load every prcd file in `dir` into a grimoire
///
/// Any failure aborts the whole load; no partial grimoire is returned.
pub fn load_dir(dir: impl AsRef<Path>) -> Result<Grimoire> {
    let dir = dir.as_ref();
    if !dir.is_dir() {
        return Err(LoadError::NotADirectory(dir.to_path_buf()).into());
    }

    let pattern = Path::new(&glob::Pattern::escape(&dir.to_string_lossy())).join(PRCD_PATTERN);
    let matches = glob::glob(&pattern.to_string_lossy()).map_err(LoadError::from)?;

    let mut grimoire = Grimoire::new();
    for entry in matches {
        let path = entry.map_err(LoadError::from)?;

        if is_reserved(&path) {
            tracing::debug!("Skipping reserved file {}", path.display());
            continue;
        }

        let name = section_name(&path)?;
        let entries = load_file(&path)
            .with_context(|| format!("Failed to load section {}", name))?;

        tracing::debug!("Loaded section {} ({} entries)", name, entries.len());
        grimoire.add_section(Section::new(name, entries));
    }

    tracing::info!(
        "Loaded {} sections, {} entries from {}",
        grimoire.len(),
        grimoire.total_entries(),
        dir.display()
    );

    Ok(grimoire)
}

/// Whether the file is one of the reserved control files
pub fn is_reserved(path: &Path) -> bool {
    path.file_name()
        .map(|name| name.to_string_lossy())
        .map_or(false, |name| {
            RESERVED_FILES.iter().any(|reserved| name.ends_with(reserved))
        })
}

/// Section name of a prcd file: the part between the last `_` and `.txt`
pub fn section_name(path: &Path) -> Result<String> {
    let malformed = || LoadError::MalformedFileName(path.to_path_buf());

    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(malformed)?;

    let (_, tail) = file_name.rsplit_once('_').ok_or_else(malformed)?;
    match tail.strip_suffix(".txt") {
        Some(name) if !name.is_empty() => Ok(name.to_string()),
        _ => Err(malformed().into()),
    }
}

/// Open and parse a single prcd file
pub fn load_file(path: impl AsRef<Path>) -> Result<Vec<Moccolo>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    parse_entries(BufReader::new(file), path)
}

/// Parse prcd lines from any reader; `origin` is only used in errors
pub fn parse_entries<R: BufRead>(mut reader: R, origin: &Path) -> Result<Vec<Moccolo>> {
    let mut entries: Vec<Moccolo> = Vec::new();
    let mut buf = Vec::new();
    let mut line_no = 0;

    loop {
        buf.clear();
        let read = reader
            .read_until(b'\n', &mut buf)
            .map_err(|source| LoadError::Io {
                path: origin.to_path_buf(),
                source,
            })?;
        if read == 0 {
            break;
        }
        line_no += 1;

        let raw = String::from_utf8_lossy(strip_line_ending(&buf));
        let line = raw.trim_matches(' ');

        if is_continuation(line) {
            let last = entries.last_mut().ok_or_else(|| LoadError::OrphanContinuation {
                path: origin.to_path_buf(),
                line: line_no,
            })?;
            last.continue_with(line);
        } else {
            entries.push(parse_line(line));
        }
    }

    Ok(entries)
}

/// Split a trimmed line into text and author
pub fn parse_line(line: &str) -> Moccolo {
    match AUTHORED_LINE.captures(line) {
        Some(caps) => Moccolo::new(&caps[2], &caps[1]),
        None => Moccolo::anonymous(line),
    }
}

fn is_continuation(line: &str) -> bool {
    line.get(..CONTINUATION_PREFIX.len())
        .map_or(false, |prefix| prefix.eq_ignore_ascii_case(CONTINUATION_PREFIX))
}

fn strip_line_ending(buf: &[u8]) -> &[u8] {
    let buf = buf.strip_suffix(b"\n").unwrap_or(buf);
    buf.strip_suffix(b"\r").unwrap_or(buf)
}
