//! Loading a newline separated word list into a filter.

use crate::error::Result;
use crate::BloomFilter;
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{info, warn};

/// The words actually added, used as ground truth when measuring false
/// positives.
pub type WordSet = HashSet<String>;

/// Where most Unix systems keep their word list.
pub const DEFAULT_DICTIONARY: &str = "/usr/share/dict/words";

/// Adds every line of `reader` to `filter`, trimmed of surrounding
/// whitespace. Blank lines are skipped. Returns the set of added words.
///
/// Lines that are not valid UTF-8 (a Latin-1 word list, say) are skipped with
/// a warning naming the line number; the rest of the list is still loaded.
///
/// An I/O error stops loading and is returned as is. Words read before the
/// error stay in `filter`, so it should be discarded in that case.
pub fn load<F: BloomFilter, R: BufRead>(filter: &mut F, reader: R) -> Result<WordSet> {
    let mut words = WordSet::new();
    for (number, line) in reader.split(b'\n').enumerate() {
        let line = line?;
        let line = match std::str::from_utf8(&line) {
            Ok(line) => line,
            Err(err) => {
                warn!(line = number + 1, error = %err, "skipping dictionary line that is not UTF-8");
                continue;
            }
        };
        let word = line.trim();
        if word.is_empty() {
            continue;
        }
        filter.add(word);
        if !words.contains(word) {
            words.insert(word.to_owned());
        }
    }
    Ok(words)
}

pub fn load_path<F: BloomFilter, P: AsRef<Path>>(filter: &mut F, path: P) -> Result<WordSet> {
    let path = path.as_ref();
    let words = load(filter, BufReader::new(File::open(path)?))?;
    info!(path = %path.display(), words = words.len(), "loaded dictionary");
    Ok(words)
}
