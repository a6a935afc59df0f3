//! Chart loading.
//!
//! A chart file is whitespace separated text:
//!
//! ```text
//! <speed> <noMultiplierScore>
//! <entryTime> <lane 0-4> <heldTime>
//! ...
//! ```
//!
//! `heldTime == 0` marks a tap note.

use super::note::{Lane, NEVER, Note};
use crate::error::{EngineError, Result, read_text};
use crate::models::settings::EngineConfig;
use std::path::Path;
use std::str::FromStr;

/// Notes of one level plus its global parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    /// Ascending by `entry_time`.
    pub notes: Vec<Note>,
    /// Index into the speed table.
    pub speed: usize,
    /// Score per star step, before thresholds are applied.
    pub no_multiplier_score: u32,
    pub pixels_per_ms: f64,
    /// Session time at which the backing track starts.
    pub music_start: u32,
    /// Unmultiplied score of every note added up.
    pub base_score: u32,
}

impl Chart {
    pub fn load(path: &Path, config: &EngineConfig) -> Result<Self> {
        let text = read_text(path)?;
        let chart = Self::parse(&text, path, config)?;
        log::info!(
            "CHART: Loaded {} notes from {} (speed tier {}, music starts at {} ms)",
            chart.note_count(),
            path.display(),
            chart.speed,
            chart.music_start
        );
        Ok(chart)
    }

    /// Parses chart text. `origin` only labels errors.
    pub fn parse(text: &str, origin: &Path, config: &EngineConfig) -> Result<Self> {
        let mut lines = text
            .lines()
            .enumerate()
            .map(|(i, line)| (i + 1, line.trim()))
            .filter(|(_, line)| !line.is_empty());

        let (header_line, header) = lines
            .next()
            .ok_or_else(|| EngineError::malformed(origin, 1, "missing speed header"))?;
        let [speed, no_multiplier_score] = fields::<2>(header, origin, header_line)?;
        let speed: usize = number(speed, origin, header_line, "speed")?;
        let no_multiplier_score: u32 =
            number(no_multiplier_score, origin, header_line, "score threshold")?;

        let pixels_per_ms = config.timing.pixels_per_ms(speed).ok_or_else(|| {
            EngineError::malformed(
                origin,
                header_line,
                format!(
                    "speed tier {} outside 0..{}",
                    speed,
                    config.timing.speed_table.len()
                ),
            )
        })?;

        let mut notes = Vec::new();
        for (line_no, line) in lines {
            let [entry_time, lane, held_time] = fields::<3>(line, origin, line_no)?;
            let entry_time: u32 = number(entry_time, origin, line_no, "entry time")?;
            let lane_index: usize = number(lane, origin, line_no, "lane")?;
            let held_time: u32 = number(held_time, origin, line_no, "held time")?;
            let lane = Lane::from_index(lane_index).ok_or_else(|| {
                EngineError::malformed(origin, line_no, format!("lane {} outside 0-4", lane_index))
            })?;
            notes.push(Note::new(entry_time, lane, held_time));
        }

        if notes.windows(2).any(|w| w[0].entry_time > w[1].entry_time) {
            log::warn!(
                "CHART: {} is not in time order, sorting {} notes",
                origin.display(),
                notes.len()
            );
            notes.sort_by_key(|n| n.entry_time);
        }

        let scoring = &config.scoring;
        let base_score = notes
            .iter()
            .map(|n| n.base_score(scoring.tap_score, scoring.hold_divisor))
            .sum();

        Ok(Self {
            notes,
            speed,
            no_multiplier_score,
            pixels_per_ms,
            music_start: music_start(config, pixels_per_ms),
            base_score,
        })
    }

    /// Chart with no notes at the slowest speed tier.
    pub fn empty(config: &EngineConfig) -> Self {
        let pixels_per_ms = config.timing.pixels_per_ms(0).unwrap_or(0.1);
        Self {
            notes: Vec::new(),
            speed: 0,
            no_multiplier_score: 0,
            pixels_per_ms,
            music_start: music_start(config, pixels_per_ms),
            base_score: 0,
        }
    }

    pub fn note_count(&self) -> usize {
        self.notes.len()
    }

    /// Entry time of the note at `index`, or [`NEVER`] past the end.
    pub fn entry_time(&self, index: usize) -> u32 {
        self.notes.get(index).map_or(NEVER, |n| n.entry_time)
    }
}

/// Session time at which a note spawned at 0 reaches the top of the hit window.
///
/// Rounded up so the note is already inside the window when the track reaches
/// its entry time. Truncating (`(distance / pixels_per_ms) as u32`) would start
/// the track up to 1 ms early at tiers where 625 px is not a whole number of ms.
fn music_start(config: &EngineConfig, pixels_per_ms: f64) -> u32 {
    let distance = config.playfield.travel_distance().max(0) as f64;
    (distance / pixels_per_ms).ceil() as u32
}

fn fields<'a, const N: usize>(line: &'a str, origin: &Path, line_no: usize) -> Result<[&'a str; N]> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    tokens.try_into().map_err(|tokens: Vec<&str>| {
        EngineError::malformed(
            origin,
            line_no,
            format!("expected {} fields, found {}", N, tokens.len()),
        )
    })
}

fn number<T: FromStr>(token: &str, origin: &Path, line_no: usize, what: &str) -> Result<T> {
    token.parse().map_err(|_| {
        EngineError::malformed(origin, line_no, format!("invalid {}: {:?}", what, token))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn parse(text: &str) -> Result<Chart> {
        Chart::parse(text, Path::new("Chart.txt"), &EngineConfig::default())
    }

    #[test]
    fn parses_header_and_notes() {
        let chart = parse("9 1200\n1000 0 0\n2000 3 500\n").unwrap();
        assert_eq!(chart.speed, 9);
        assert_eq!(chart.no_multiplier_score, 1200);
        assert_eq!(chart.pixels_per_ms, 1.0);
        assert_eq!(chart.music_start, 625);
        assert_eq!(chart.note_count(), 2);

        assert_eq!(chart.notes[0], Note::tap(1000, Lane::Green));
        assert!(chart.notes[1].is_held);
        assert_eq!(chart.notes[1].lane, Lane::Blue);
        assert_eq!(chart.notes[1].held_time, 500);
        assert_eq!(chart.base_score, 100);
    }

    #[test]
    fn music_start_rounds_up() {
        // 625 / 0.3 = 2083.33..
        let chart = parse("2 100\n").unwrap();
        assert_eq!(chart.music_start, 2084);
        let slowest = parse("0 100\n").unwrap();
        assert_eq!(slowest.music_start, 6250);
    }

    #[test]
    fn sentinel_past_the_last_note() {
        let chart = parse("9 100\n500 1 0\n").unwrap();
        assert_eq!(chart.entry_time(0), 500);
        assert_eq!(chart.entry_time(1), NEVER);
        assert_eq!(chart.entry_time(99), NEVER);
    }

    #[test]
    fn blank_and_trailing_lines_are_ignored() {
        let chart = parse("\n5 300\n\n100 2 0\n   \n200 4 0\n\n").unwrap();
        assert_eq!(chart.note_count(), 2);
        assert_eq!(chart.notes[1].lane, Lane::Orange);
    }

    #[test]
    fn out_of_order_notes_are_sorted_stably() {
        let chart = parse("9 100\n300 0 0\n100 1 0\n100 2 0\n").unwrap();
        let order: Vec<(u32, Lane)> = chart.notes.iter().map(|n| (n.entry_time, n.lane)).collect();
        assert_eq!(
            order,
            vec![(100, Lane::Red), (100, Lane::Yellow), (300, Lane::Green)]
        );
    }

    #[test]
    fn malformed_numbers_abort_the_load() {
        let err = parse("9 100\n1000 0 0\n1x00 1 0\n").unwrap_err();
        match err {
            EngineError::MalformedData { line, reason, .. } => {
                assert_eq!(line, 3);
                assert!(reason.contains("entry time"));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn rejects_bad_lane_speed_and_field_count() {
        assert!(matches!(
            parse("9 100\n1000 5 0\n"),
            Err(EngineError::MalformedData { line: 2, .. })
        ));
        assert!(matches!(
            parse("10 100\n"),
            Err(EngineError::MalformedData { line: 1, .. })
        ));
        assert!(matches!(
            parse("9 100\n1000 0\n"),
            Err(EngineError::MalformedData { line: 2, .. })
        ));
        assert!(matches!(
            parse("9 100\n-5 0 0\n"),
            Err(EngineError::MalformedData { .. })
        ));
        assert!(matches!(parse(""), Err(EngineError::MalformedData { .. })));
    }

    #[test]
    fn missing_file_is_resource_missing() {
        let dir = tempdir().expect("failed to create temp directory");
        let err = Chart::load(&dir.path().join("Chart.txt"), &EngineConfig::default()).unwrap_err();
        assert!(err.is_missing());
    }

    #[test]
    fn loads_from_disk() {
        let dir = tempdir().expect("failed to create temp directory");
        let path = dir.path().join("Chart.txt");
        fs::write(&path, "4 800\n0 0 0\n250 1 0\n").unwrap();

        let chart = Chart::load(&path, &EngineConfig::default()).unwrap();
        assert_eq!(chart.note_count(), 2);
        assert_eq!(chart.pixels_per_ms, 0.5);
        assert_eq!(chart.music_start, 1250);
    }

    #[test]
    fn empty_chart_is_playable() {
        let chart = Chart::empty(&EngineConfig::default());
        assert_eq!(chart.note_count(), 0);
        assert_eq!(chart.entry_time(0), NEVER);
        assert_eq!(chart.music_start, 6250);
    }
}
