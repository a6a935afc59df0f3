//! Engine configuration.
//!
//! Every hand-tuned constant of the game (playfield geometry, speed tiers,
//! star thresholds, scoring) lives here as data so it can be tweaked from
//! `keyhero.toml` without touching the engine.

use crate::error::{EngineError, Result};
use crate::models::engine::PlayfieldConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "keyhero.toml";

/// Root configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub playfield: PlayfieldConfig,
    pub timing: TimingConfig,
    pub scoring: ScoringConfig,
    pub keys: KeyConfig,
    pub levels: Vec<LevelConfig>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            playfield: PlayfieldConfig::default(),
            timing: TimingConfig::default(),
            scoring: ScoringConfig::default(),
            keys: KeyConfig::default(),
            levels: LevelConfig::default_catalog(),
        }
    }
}

impl EngineConfig {
    /// Loads the configuration, falling back to defaults when the file is absent.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::info!("CONFIG: {} not found, using defaults", path.display());
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path).map_err(|e| EngineError::from_read(path, e))?;
        let config: Self = toml::from_str(&content).map_err(|e| {
            log::error!("CONFIG: Failed to parse {}: {}", path.display(), e);
            EngineError::Config(e.to_string())
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| EngineError::Config(e.to_string()))?;
        fs::write(path, content).map_err(|e| EngineError::Io {
            path: path.to_path_buf(),
            source: e,
        })
    }

    fn validate(&self) -> Result<()> {
        if self.timing.speed_table.is_empty() {
            return Err(EngineError::Config("timing.speed_table is empty".into()));
        }
        if self.timing.speed_table.iter().any(|s| !s.is_finite() || *s <= 0.0) {
            return Err(EngineError::Config(
                "timing.speed_table entries must be positive".into(),
            ));
        }
        if self.keys.lanes.len() != crate::models::engine::LANE_COUNT {
            return Err(EngineError::Config(format!(
                "keys.lanes needs {} entries, got {}",
                crate::models::engine::LANE_COUNT,
                self.keys.lanes.len()
            )));
        }
        if self.scoring.hold_divisor == 0 {
            return Err(EngineError::Config("scoring.hold_divisor must be > 0".into()));
        }
        Ok(())
    }

    pub fn level(&self, index: usize) -> Option<&LevelConfig> {
        self.levels.get(index)
    }
}

/// Speed tiers and star thresholds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Pixels per millisecond for each chart speed tier.
    pub speed_table: Vec<f64>,
    /// Multiples of a chart's `no_multiplier_score` needed for each star.
    pub star_thresholds: Vec<f64>,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            speed_table: vec![0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7, 0.8, 0.9, 1.0],
            star_thresholds: vec![0.5, 1.0, 1.5, 2.0, 2.5, 3.0, 3.5],
        }
    }
}

impl TimingConfig {
    pub fn pixels_per_ms(&self, speed: usize) -> Option<f64> {
        self.speed_table.get(speed).copied()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Unmultiplied award for a tap note.
    pub tap_score: u32,
    /// Held milliseconds per point on a sustain.
    pub hold_divisor: u32,
    /// Streak upper bounds of the 1x, 2x and 3x tiers.
    pub multiplier_steps: Vec<u32>,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            tap_score: 50,
            hold_divisor: 10,
            multiplier_steps: vec![10, 20, 30],
        }
    }
}

/// Key names as understood by [`crate::input::KeyCode::parse`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyConfig {
    pub lanes: Vec<String>,
    pub pause: String,
    pub confirm: String,
}

impl Default for KeyConfig {
    fn default() -> Self {
        Self {
            lanes: ["a", "w", "e", "r", "t"].iter().map(|k| k.to_string()).collect(),
            pause: "Escape".to_string(),
            confirm: "Enter".to_string(),
        }
    }
}

/// One playable song and its content files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelConfig {
    pub title: String,
    pub artist: String,
    pub genre: String,
    pub year: u16,
    /// Display length, e.g. `03:53`.
    pub length: String,
    pub chart: PathBuf,
    #[serde(default)]
    pub lyrics: Option<PathBuf>,
    pub highscores: PathBuf,
    pub track: PathBuf,
    /// Levels without a finished chart show a "coming soon" notice.
    #[serde(default = "default_true")]
    pub available: bool,
}

fn default_true() -> bool {
    true
}

impl LevelConfig {
    fn bundled(
        dir: &str,
        title: &str,
        artist: &str,
        year: u16,
        length: &str,
        has_lyrics: bool,
        available: bool,
    ) -> Self {
        let base = Path::new("assets").join(dir);
        Self {
            title: title.to_string(),
            artist: artist.to_string(),
            genre: "Metalcore".to_string(),
            year,
            length: length.to_string(),
            chart: base.join("Chart.txt"),
            lyrics: has_lyrics.then(|| base.join("Lyrics.txt")),
            highscores: base.join("Highscore.txt"),
            track: base.join("song.mp3"),
            available,
        }
    }

    pub fn default_catalog() -> Vec<Self> {
        vec![
            Self::bundled("LevelOne", "Kill the Ache", "Currents", 2020, "03:53", true, true),
            Self::bundled(
                "LevelTwo",
                "Me, Myself and Hyde",
                "Ice Nine Kills",
                2015,
                "04:04",
                false,
                false,
            ),
            Self::bundled(
                "LevelThree",
                "Gone With The Wind",
                "Architects",
                2016,
                "03:49",
                true,
                true,
            ),
        ]
    }

    pub fn has_lyrics(&self) -> bool {
        self.lyrics.is_some()
    }
}
