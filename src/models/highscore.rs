//! Per-chart top-10 table.
//!
//! Stored as exactly ten lines of `<stars> <accuracyPercent> <score>`,
//! descending by score.

use crate::error::{EngineError, Result, read_text};
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

pub const TABLE_SIZE: usize = 10;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HighScoreEntry {
    pub stars: u32,
    pub accuracy_percent: u32,
    pub score: u32,
}

impl HighScoreEntry {
    pub fn new(stars: u32, accuracy_percent: u32, score: u32) -> Self {
        Self {
            stars,
            accuracy_percent,
            score,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HighScoreTable {
    pub entries: [HighScoreEntry; TABLE_SIZE],
}

impl HighScoreTable {
    pub fn load(path: &Path) -> Result<Self> {
        let text = read_text(path)?;
        Self::parse(&text, path)
    }

    /// Any load failure is logged and replaced with a zeroed table.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(table) => table,
            Err(e) if e.is_missing() => {
                log::warn!("SCORES: {}, starting from an empty table", e);
                Self::default()
            }
            Err(e) => {
                log::error!("SCORES: {}, starting from an empty table", e);
                Self::default()
            }
        }
    }

    /// Reads up to ten rows; missing rows stay zeroed.
    pub fn parse(text: &str, origin: &Path) -> Result<Self> {
        let mut table = Self::default();
        let rows = text
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .take(TABLE_SIZE);

        for (slot, (i, line)) in rows.enumerate() {
            let values: Vec<u32> = line
                .split_whitespace()
                .map(str::parse)
                .collect::<std::result::Result<_, _>>()
                .map_err(|_| EngineError::malformed(origin, i + 1, "non-numeric score field"))?;
            let [stars, accuracy_percent, score] = values[..] else {
                return Err(EngineError::malformed(
                    origin,
                    i + 1,
                    format!("expected 3 fields, found {}", values.len()),
                ));
            };
            table.entries[slot] = HighScoreEntry::new(stars, accuracy_percent, score);
        }
        Ok(table)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        fs::write(path, self.to_text()).map_err(|e| EngineError::Io {
            path: path.to_path_buf(),
            source: e,
        })
    }

    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for e in &self.entries {
            let _ = writeln!(out, "{} {} {}", e.stars, e.accuracy_percent, e.score);
        }
        out
    }

    /// Rank a score would take: ten minus the rows scoring strictly lower.
    /// Equal scores rank below existing rows.
    pub fn rank_for(&self, score: u32) -> usize {
        TABLE_SIZE - self.entries.iter().filter(|e| score > e.score).count()
    }

    /// Places the entry at its rank, shifting lower rows down and dropping the
    /// last. Returns `None` when the score does not qualify.
    pub fn insert(&mut self, entry: HighScoreEntry) -> Option<usize> {
        let rank = self.rank_for(entry.score);
        if rank >= TABLE_SIZE {
            return None;
        }
        self.entries.copy_within(rank..TABLE_SIZE - 1, rank + 1);
        self.entries[rank] = entry;
        Some(rank)
    }

    pub fn best_score(&self) -> u32 {
        self.entries[0].score
    }

    /// Reloads the table at `path`, inserts the entry and rewrites the file.
    /// The file is left untouched when the score does not qualify or the
    /// existing table cannot be read; only a missing file starts a new table.
    pub fn record(path: &Path, entry: HighScoreEntry) -> Result<Option<usize>> {
        let mut table = match Self::load(path) {
            Ok(table) => table,
            Err(e) if e.is_missing() => {
                log::info!("SCORES: Creating {}", path.display());
                Self::default()
            }
            Err(e) => return Err(e),
        };
        let rank = table.insert(entry);
        match rank {
            Some(r) => {
                table.save(path)?;
                log::info!(
                    "SCORES: {} entered {} at rank {}",
                    entry.score,
                    path.display(),
                    r + 1
                );
            }
            None => log::info!("SCORES: {} did not make the table", entry.score),
        }
        Ok(rank)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn descending() -> HighScoreTable {
        let mut table = HighScoreTable::default();
        for (i, e) in table.entries.iter_mut().enumerate() {
            let score = 100 - 10 * i as u32;
            *e = HighScoreEntry::new(i as u32 % 4, 50 + i as u32, score);
        }
        table
    }

    #[test]
    fn insert_shifts_rows_and_drops_the_last() {
        let mut table = descending();
        let rank = table.insert(HighScoreEntry::new(3, 88, 95));
        assert_eq!(rank, Some(1));

        let scores: Vec<u32> = table.entries.iter().map(|e| e.score).collect();
        assert_eq!(scores, vec![100, 95, 90, 80, 70, 60, 50, 40, 30, 20]);
        assert_eq!(table.entries[1], HighScoreEntry::new(3, 88, 95));
        assert_eq!(table.entries[2], descending().entries[1]);
    }

    #[test]
    fn ties_rank_below_and_low_scores_do_not_qualify() {
        let mut table = descending();
        assert_eq!(table.rank_for(100), 1);
        assert_eq!(table.rank_for(101), 0);
        assert_eq!(table.rank_for(10), TABLE_SIZE);
        assert_eq!(table.insert(HighScoreEntry::new(0, 0, 5)), None);
        assert_eq!(table, descending());
    }

    #[test]
    fn new_top_score() {
        let mut table = descending();
        assert_eq!(table.insert(HighScoreEntry::new(7, 100, 500)), Some(0));
        assert_eq!(table.best_score(), 500);
        assert_eq!(table.entries[9].score, 20);
    }

    #[test]
    fn write_then_read_round_trip() {
        let dir = tempdir().expect("failed to create temp directory");
        let path = dir.path().join("Highscore.txt");
        let table = descending();
        table.save(&path).unwrap();

        let loaded = HighScoreTable::load(&path).unwrap();
        assert_eq!(loaded, table);
        assert_eq!(fs::read_to_string(&path).unwrap().lines().count(), TABLE_SIZE);
    }

    #[test]
    fn record_non_qualifying_score_leaves_file_untouched() {
        let dir = tempdir().expect("failed to create temp directory");
        let path = dir.path().join("Highscore.txt");
        descending().save(&path).unwrap();
        let before = fs::read(&path).unwrap();

        let rank = HighScoreTable::record(&path, HighScoreEntry::new(1, 10, 9)).unwrap();
        assert_eq!(rank, None);
        assert_eq!(fs::read(&path).unwrap(), before);
    }

    #[test]
    fn record_rewrites_all_rows() {
        let dir = tempdir().expect("failed to create temp directory");
        let path = dir.path().join("Highscore.txt");
        descending().save(&path).unwrap();

        let rank = HighScoreTable::record(&path, HighScoreEntry::new(2, 77, 95)).unwrap();
        assert_eq!(rank, Some(1));
        let text = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), TABLE_SIZE);
        assert_eq!(lines[1], "2 77 95");
        assert_eq!(lines[9], "1 58 20");
    }

    #[test]
    fn missing_file_starts_empty_and_is_created() {
        let dir = tempdir().expect("failed to create temp directory");
        let path = dir.path().join("Highscore.txt");
        assert!(HighScoreTable::load(&path).unwrap_err().is_missing());
        assert_eq!(HighScoreTable::load_or_default(&path), HighScoreTable::default());

        assert_eq!(
            HighScoreTable::record(&path, HighScoreEntry::new(1, 90, 400)).unwrap(),
            Some(0)
        );
        let table = HighScoreTable::load(&path).unwrap();
        assert_eq!(table.best_score(), 400);
        assert_eq!(table.entries[1], HighScoreEntry::default());
    }

    #[test]
    fn short_files_are_padded_and_bad_rows_rejected() {
        let table = HighScoreTable::parse("3 90 700\n1 40 200\n", Path::new("h")).unwrap();
        assert_eq!(table.entries[1].score, 200);
        assert_eq!(table.entries[2], HighScoreEntry::default());

        assert!(matches!(
            HighScoreTable::parse("3 90\n", Path::new("h")),
            Err(EngineError::MalformedData { line: 1, .. })
        ));
        assert!(matches!(
            HighScoreTable::parse("3 90 x\n", Path::new("h")),
            Err(EngineError::MalformedData { .. })
        ));
    }

    #[test]
    fn corrupt_table_is_not_overwritten() {
        let dir = tempdir().expect("failed to create temp directory");
        let path = dir.path().join("Highscore.txt");
        let mut text: String = (0..9)
            .map(|i| format!("3 90 {}\n", 10000 - 100 * i))
            .collect();
        text.push_str("3 90 oops\n");
        fs::write(&path, &text).unwrap();

        let err = HighScoreTable::record(&path, HighScoreEntry::new(1, 50, 10)).unwrap_err();
        assert!(matches!(err, EngineError::MalformedData { line: 10, .. }));
        assert_eq!(fs::read_to_string(&path).unwrap(), text);
    }
}
