use std::{
    fs::File,
    io::{BufRead, BufReader, BufWriter, Error, Seek, Write},
    path::Path,
};

use crate::listing::ListingRecord;

/// Ids of posts already processed in a prior run, backed by a plain text
/// file with one id per line. The file reflects the most recent run only:
/// each run replaces the whole set with what it saw after blacklist
/// filtering, it does not union with older runs.
pub struct HistoryStore {
    ids: Vec<String>,
    file: File,
}

impl HistoryStore {
    #[must_use]
    /// Load ids from a file. The caller opens it with create(true), so the
    /// first run sees an empty file and starts with an empty history.
    pub fn from_fs(file: File) -> Self {
        let mut ids = Vec::new();
        let reader = BufReader::new(&file);
        for line in reader.lines().map_while(Result::ok) {
            let id = line.trim().to_string();
            if !id.is_empty() {
                ids.push(id);
            }
        }
        Self { ids, file }
    }

    /// Snapshot of the loaded ids, for the filter pipeline.
    #[must_use]
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|known| known == id)
    }

    /// Replace the in-memory set with the ids of the given posts, keeping
    /// first occurrence when a batch repeats an id.
    pub fn replace(&mut self, posts: &[ListingRecord]) {
        self.ids.clear();
        for post in posts {
            if !self.contains(&post.id) {
                self.ids.push(post.id.clone());
            }
        }
    }

    /// Dump the ids to the file, one per line. Full overwrite: the file is
    /// truncated first so a shrinking set leaves no stale tail behind.
    pub fn dump(&mut self) -> Result<(), Error> {
        self.file.set_len(0)?;
        self.file.seek(std::io::SeekFrom::Start(0))?;
        let mut writer = BufWriter::new(&self.file);
        for id in &self.ids {
            writer.write_all(format!("{id}\n").as_bytes())?;
        }
        writer.flush()?;
        Ok(())
    }

    #[allow(dead_code)]
    /// Reload ids from the file
    pub fn reload(&mut self) -> Result<(), Error> {
        self.ids.clear();
        self.file.seek(std::io::SeekFrom::Start(0))?;
        let reader = BufReader::new(&self.file);
        let ids: Vec<String> = reader
            .lines()
            .map_while(Result::ok)
            .map(|line| line.trim().to_string())
            .filter(|id| !id.is_empty())
            .collect();
        self.ids = ids;
        Ok(())
    }

    #[allow(dead_code)]
    fn len(&self) -> usize {
        self.ids.len()
    }
}

/// Forbidden title substrings, one per line, lowercase. Loaded once at
/// startup and read-only for the rest of the run.
pub struct BlacklistStore {
    patterns: Vec<String>,
}

impl BlacklistStore {
    #[must_use]
    /// Load patterns from a file. A missing file is the normal first-run
    /// state and yields an empty blacklist, same as a missing history file.
    /// Any other read failure is warned about, since running with an empty
    /// blacklist notifies posts that should have been suppressed.
    pub fn load(path: &Path) -> Self {
        let patterns = match std::fs::read_to_string(path) {
            Ok(contents) => contents
                .lines()
                .map(|line| line.trim().to_lowercase())
                .filter(|pattern| !pattern.is_empty())
                .collect(),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => {
                eprintln!(
                    "Could not read blacklist {path}: {e}",
                    path = path.display()
                );
                Vec::new()
            }
        };
        Self { patterns }
    }

    #[must_use]
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }
}
