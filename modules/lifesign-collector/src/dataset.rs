use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{info, warn};

use lifesign_common::Record;

/// Outcome of offering a candidate record to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    Inserted,
    DuplicateUrl,
}

/// The persisted dataset: an ordered, most-recent-first sequence of records,
/// bounded to `max_records` and deduplicated by non-empty URL. All three
/// invariants live here; callers follow the `load → insert* → trim → save`
/// sequence once per run.
pub struct DatasetStore {
    primary: PathBuf,
    backup: PathBuf,
    max_records: usize,
    records: Vec<Record>,
}

impl DatasetStore {
    pub fn new(primary: impl Into<PathBuf>, backup: impl Into<PathBuf>, max_records: usize) -> Self {
        Self {
            primary: primary.into(),
            backup: backup.into(),
            max_records,
            records: Vec::new(),
        }
    }

    /// Read existing records from the primary path. A missing or unparsable
    /// file is not fatal: the run starts from an empty sequence.
    pub fn load(&mut self) {
        if !self.primary.exists() {
            info!(path = %self.primary.display(), "no existing dataset, starting empty");
            return;
        }
        match std::fs::read_to_string(&self.primary) {
            Ok(raw) => match serde_json::from_str::<Vec<Record>>(&raw) {
                Ok(records) => {
                    info!(count = records.len(), "loaded existing dataset");
                    self.records = records;
                }
                Err(e) => {
                    warn!(path = %self.primary.display(), error = %e, "dataset unparsable, starting empty");
                }
            },
            Err(e) => {
                warn!(path = %self.primary.display(), error = %e, "dataset unreadable, starting empty");
            }
        }
    }

    /// Whether a non-empty URL is already present. Synthetic records carry an
    /// empty URL and are exempt from deduplication.
    pub fn contains_url(&self, url: &str) -> bool {
        !url.is_empty() && self.records.iter().any(|r| r.url == url)
    }

    /// Prepend a record, rejecting candidates that duplicate an existing
    /// non-empty URL.
    pub fn insert(&mut self, record: Record) -> InsertOutcome {
        if self.contains_url(&record.url) {
            return InsertOutcome::DuplicateUrl;
        }
        self.records.insert(0, record);
        InsertOutcome::Inserted
    }

    /// Drop everything beyond the newest `max_records`. Returns the number of
    /// records dropped.
    pub fn trim(&mut self) -> usize {
        let before = self.records.len();
        self.records.truncate(self.max_records);
        let dropped = before - self.records.len();
        if dropped > 0 {
            info!(dropped, kept = self.records.len(), "trimmed dataset to rolling window");
        }
        dropped
    }

    /// Write the full sequence as pretty-printed JSON to the primary path and
    /// duplicate it to the backup path. Each write goes through a temp file
    /// and rename so a crash mid-write leaves the prior file intact.
    pub fn save(&self) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.records)
            .context("serializing dataset")?;
        write_atomic(&self.primary, json.as_bytes())?;
        write_atomic(&self.backup, json.as_bytes())?;
        info!(count = self.records.len(), path = %self.primary.display(), "dataset saved");
        Ok(())
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Stage bytes in a temp file next to the target, then rename into place.
pub(crate) fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)
        .with_context(|| format!("creating output directory {}", dir.display()))?;
    let mut tmp = tempfile::NamedTempFile::new_in(dir)
        .with_context(|| format!("staging write for {}", path.display()))?;
    tmp.write_all(bytes)
        .with_context(|| format!("writing {}", path.display()))?;
    tmp.persist(path)
        .with_context(|| format!("replacing {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::sample_record;

    fn temp_store(dir: &Path, max_records: usize) -> DatasetStore {
        DatasetStore::new(
            dir.join("data.json"),
            dir.join("data.backup.json"),
            max_records,
        )
    }

    #[test]
    fn inserts_prepend_newest_first() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = temp_store(dir.path(), 100);
        store.insert(sample_record("https://example.com/a"));
        store.insert(sample_record("https://example.com/b"));
        assert_eq!(store.records()[0].url, "https://example.com/b");
        assert_eq!(store.records()[1].url, "https://example.com/a");
    }

    #[test]
    fn duplicate_url_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = temp_store(dir.path(), 100);
        assert_eq!(
            store.insert(sample_record("https://example.com/a")),
            InsertOutcome::Inserted
        );
        assert_eq!(
            store.insert(sample_record("https://example.com/a")),
            InsertOutcome::DuplicateUrl
        );
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn empty_urls_never_collide() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = temp_store(dir.path(), 100);
        assert_eq!(store.insert(sample_record("")), InsertOutcome::Inserted);
        assert_eq!(store.insert(sample_record("")), InsertOutcome::Inserted);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn trim_keeps_newest_within_cap() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = temp_store(dir.path(), 100);
        for i in 0..99 {
            store.insert(sample_record(&format!("https://example.com/old/{i}")));
        }
        for i in 0..5 {
            store.insert(sample_record(&format!("https://example.com/new/{i}")));
        }
        assert_eq!(store.len(), 104);
        let dropped = store.trim();
        assert_eq!(dropped, 4);
        assert_eq!(store.len(), 100);
        // The 5 new records sit at the front, newest first.
        for i in 0..5 {
            assert_eq!(
                store.records()[i].url,
                format!("https://example.com/new/{}", 4 - i)
            );
        }
        // The 4 oldest originals (old/0..old/3, inserted first) fell off.
        assert!(!store.contains_url("https://example.com/old/0"));
        assert!(!store.contains_url("https://example.com/old/3"));
        assert!(store.contains_url("https://example.com/old/4"));
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = temp_store(dir.path(), 100);
        for i in 0..3 {
            store.insert(sample_record(&format!("https://example.com/{i}")));
        }
        store.save().unwrap();

        let mut reloaded = temp_store(dir.path(), 100);
        reloaded.load();
        assert_eq!(reloaded.records(), store.records());
    }

    #[test]
    fn save_duplicates_to_backup_path() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = temp_store(dir.path(), 100);
        store.insert(sample_record("https://example.com/a"));
        store.save().unwrap();

        let primary = std::fs::read_to_string(dir.path().join("data.json")).unwrap();
        let backup = std::fs::read_to_string(dir.path().join("data.backup.json")).unwrap();
        assert_eq!(primary, backup);
        // Pretty-printed with 2-space indentation.
        assert!(primary.contains("\n  {"));
    }

    #[test]
    fn load_fails_soft_on_missing_or_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = temp_store(dir.path(), 100);
        store.load();
        assert!(store.is_empty());

        std::fs::write(dir.path().join("data.json"), "not json at all").unwrap();
        let mut store = temp_store(dir.path(), 100);
        store.load();
        assert!(store.is_empty());
    }

    #[test]
    fn save_overwrites_prior_file_in_place() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = temp_store(dir.path(), 100);
        store.insert(sample_record("https://example.com/a"));
        store.save().unwrap();
        store.insert(sample_record("https://example.com/b"));
        store.save().unwrap();

        let mut reloaded = temp_store(dir.path(), 100);
        reloaded.load();
        assert_eq!(reloaded.len(), 2);
        assert_eq!(reloaded.records()[0].url, "https://example.com/b");
    }
}
