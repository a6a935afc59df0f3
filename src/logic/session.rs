//! One play-through of a level: the frame loop and its pause/results flow.
//!
//! ```text
//! Playing ──Esc──▶ Paused ──Enter──▶ Playing
//!    │               └──Esc──▶ Finished(Abandoned)
//!    └─track ends──▶ Results ──Esc──▶ Finished(Completed)
//! ```
//!
//! A quit request from the host finishes the session from any state.

use crate::error::{EngineError, Result};
use crate::input::{Action, InputEvent, KeyBindings, KeyEvent};
use crate::models::engine::{Chart, LyricCursor, LyricLine, Lyrics, Note, PlayfieldConfig};
use crate::models::highscore::{HighScoreEntry, HighScoreTable};
use crate::models::settings::{EngineConfig, LevelConfig};
use crate::render::draw::draw_frame;
use crate::shared::snapshot::{GameplaySnapshot, RenderState, SongResult};
use crate::state::{GameEngine, Snapshot};
use crate::system::{Clock, InputSource, MusicPlayer, Renderer};
use std::path::PathBuf;

/// Host services a session drives.
pub struct Collaborators {
    pub clock: Box<dyn Clock>,
    pub player: Box<dyn MusicPlayer>,
    pub input: Box<dyn InputSource>,
    pub renderer: Box<dyn Renderer>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutcome {
    /// Song played to the end and the result screen dismissed.
    Completed(SongResult),
    /// Left from the pause screen.
    Abandoned,
    /// Host asked the game to exit.
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Playing,
    /// `since` is the clock time the pause began.
    Paused { since: u64 },
    Results(SongResult),
    Finished(SessionOutcome),
}

/// Everything read from disk before a level starts.
#[derive(Debug, Clone)]
pub struct LevelContent {
    pub title: String,
    pub chart: Chart,
    pub lyrics: Lyrics,
    pub track: PathBuf,
    pub highscores: PathBuf,
}

impl LevelContent {
    /// Loads chart and lyrics. A missing chart plays as an empty one and
    /// missing lyrics are skipped; a malformed chart aborts the load.
    pub fn load(level: &LevelConfig, config: &EngineConfig) -> Result<Self> {
        if !level.available {
            log::warn!("SESSION: {} is coming soon", level.title);
            return Err(EngineError::LevelUnavailable(level.title.clone()));
        }

        let chart = match Chart::load(&level.chart, config) {
            Ok(chart) => chart,
            Err(e) if e.is_missing() => {
                log::warn!("SESSION: {}, playing without notes", e);
                Chart::empty(config)
            }
            Err(e) => {
                log::error!("SESSION: Cannot start {}: {}", level.title, e);
                return Err(e);
            }
        };

        let lyrics = match &level.lyrics {
            Some(path) => Lyrics::load(path).unwrap_or_else(|e| {
                log::warn!("SESSION: {}, continuing without lyrics", e);
                Lyrics::default()
            }),
            None => Lyrics::default(),
        };

        Ok(Self {
            title: level.title.clone(),
            chart,
            lyrics,
            track: level.track.clone(),
            highscores: level.highscores.clone(),
        })
    }
}

pub struct Session {
    engine: GameEngine,
    lyrics: Lyrics,
    lyric_cursor: LyricCursor,
    bindings: KeyBindings,
    playfield: PlayfieldConfig,

    title: String,
    track: PathBuf,
    highscores: PathBuf,

    state: SessionState,
    /// Clock time the session began.
    start_time: u64,
    paused_total: u64,
    passed_time: u32,
    music_started: bool,
    /// The track could not be started; the song ends with the chart instead.
    track_failed: bool,

    collab: Collaborators,
}

impl Session {
    /// Loads `level` and starts playing it.
    pub fn start(level: &LevelConfig, config: &EngineConfig, collab: Collaborators) -> Result<Self> {
        let content = LevelContent::load(level, config)?;
        Self::new(content, config, collab)
    }

    pub fn new(content: LevelContent, config: &EngineConfig, collab: Collaborators) -> Result<Self> {
        let bindings = KeyBindings::from_config(&config.keys)?;
        let start_time = collab.clock.now_millis();
        log::info!(
            "SESSION: Starting {} ({} notes, {} captions)",
            content.title,
            content.chart.note_count(),
            content.lyrics.len()
        );

        Ok(Self {
            engine: GameEngine::new(content.chart, config),
            lyrics: content.lyrics,
            lyric_cursor: LyricCursor::new(),
            bindings,
            playfield: config.playfield.clone(),
            title: content.title,
            track: content.track,
            highscores: content.highscores,
            state: SessionState::Playing,
            start_time,
            paused_total: 0,
            passed_time: 0,
            music_started: false,
            track_failed: false,
            collab,
        })
    }

    /// Advances one frame. Returns the outcome once the session is over.
    pub fn step(&mut self) -> Option<SessionOutcome> {
        match self.state {
            SessionState::Playing => self.play_frame(),
            SessionState::Paused { .. } | SessionState::Results(_) => {
                self.render();
                self.poll_input();
            }
            SessionState::Finished(_) => {}
        }
        self.outcome().cloned()
    }

    fn play_frame(&mut self) {
        let now = self.collab.clock.now_millis();
        let passed = now.saturating_sub(self.start_time + self.paused_total);
        self.passed_time = u32::try_from(passed).unwrap_or(u32::MAX);

        self.engine.update(self.passed_time);
        self.lyric_cursor
            .advance(&self.lyrics, self.passed_time, self.engine.chart.music_start);
        self.render();
        self.poll_input();

        if self.state != SessionState::Playing {
            return;
        }

        if !self.music_started && self.passed_time >= self.engine.chart.music_start {
            self.music_started = true;
            if let Err(e) = self.collab.player.play_track(&self.track, 0.0) {
                log::error!("SESSION: {}, the song ends with its last note", e);
                self.track_failed = true;
            }
        }

        if self.music_started && self.song_ended() {
            self.finish_song();
        }
    }

    fn song_ended(&self) -> bool {
        if self.track_failed {
            self.engine.is_chart_exhausted()
        } else {
            !self.collab.player.is_track_playing()
        }
    }

    fn poll_input(&mut self) {
        while let Some(event) = self.collab.input.poll_event() {
            let before = std::mem::discriminant(&self.state);
            match event {
                InputEvent::Quit => {
                    log::info!("SESSION: Quit requested");
                    self.collab.player.stop_track();
                    self.state = SessionState::Finished(SessionOutcome::Quit);
                }
                InputEvent::Key(key) => self.handle_key(key),
            }
            // Leave the rest of the queue to the new state's next frame.
            if std::mem::discriminant(&self.state) != before {
                break;
            }
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        let Some(action) = self.bindings.resolve(key.code) else {
            return;
        };

        match (&self.state, action) {
            (SessionState::Playing, Action::Lane(lane)) => {
                if key.is_down {
                    self.engine.press(lane, self.passed_time, key.is_repeat);
                } else {
                    self.engine.release(lane, self.passed_time);
                }
            }
            (SessionState::Playing, Action::Pause) if key.is_down && !key.is_repeat => {
                let since = self.collab.clock.now_millis();
                self.collab.player.pause_track();
                self.state = SessionState::Paused { since };
                log::info!("SESSION: Paused at {} ms", self.passed_time);
            }
            (SessionState::Paused { .. }, Action::Pause) if key.is_down && !key.is_repeat => {
                self.collab.player.stop_track();
                self.state = SessionState::Finished(SessionOutcome::Abandoned);
                log::info!("SESSION: Abandoned {}", self.title);
            }
            (SessionState::Paused { since }, Action::Confirm) if key.is_down => {
                let now = self.collab.clock.now_millis();
                self.paused_total += now.saturating_sub(*since);
                self.collab.player.resume_track();
                self.state = SessionState::Playing;
                log::info!("SESSION: Resumed ({} ms paused in total)", self.paused_total);
            }
            (SessionState::Paused { .. }, Action::Lane(lane)) if !key.is_down => {
                self.engine.release(lane, self.passed_time);
            }
            (SessionState::Results(_), Action::Pause) if key.is_down && !key.is_repeat => {
                self.dismiss_results();
            }
            _ => {}
        }
    }

    /// Leaves the result screen, completing the session.
    pub fn dismiss_results(&mut self) {
        if let SessionState::Results(result) = &self.state {
            self.state = SessionState::Finished(SessionOutcome::Completed(result.clone()));
        }
    }

    fn finish_song(&mut self) {
        let stats = &self.engine.stats;
        let note_count = self.engine.chart.note_count();
        let accuracy_percent = stats.accuracy_percent(note_count);

        let previous_best = HighScoreTable::load_or_default(&self.highscores).best_score();
        let entry = HighScoreEntry::new(stats.star, accuracy_percent, stats.score);
        let rank = HighScoreTable::record(&self.highscores, entry).unwrap_or_else(|e| {
            log::error!("SESSION: Could not save high score: {}", e);
            None
        });

        let result = SongResult {
            title: self.title.clone(),
            score: stats.score,
            stars: stats.star,
            accuracy: stats.accuracy,
            note_count,
            accuracy_percent,
            highest_streak: stats.highest_streak,
            full_combo: note_count > 0 && stats.accuracy as usize == note_count,
            new_best: stats.score > previous_best,
            rank,
        };
        log::info!(
            "SESSION: {} finished: {} points, {} stars, {}% accuracy",
            result.title,
            result.score,
            result.stars,
            result.accuracy_percent
        );
        self.state = SessionState::Results(result);
    }

    fn render(&mut self) {
        let view = self.render_state();
        draw_frame(self.collab.renderer.as_mut(), &view, &self.playfield);
    }

    pub fn render_state(&self) -> RenderState {
        match &self.state {
            SessionState::Results(result)
            | SessionState::Finished(SessionOutcome::Completed(result)) => {
                RenderState::Results(result.clone())
            }
            SessionState::Paused { .. } => RenderState::Paused(self.snapshot()),
            _ => RenderState::Playing(self.snapshot()),
        }
    }

    /// Gameplay view including the caption on display.
    pub fn snapshot(&self) -> GameplaySnapshot {
        let mut snapshot = self.engine.create_snapshot();
        snapshot.lyric = self.lyric_cursor.current(&self.lyrics).cloned();
        snapshot
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn outcome(&self) -> Option<&SessionOutcome> {
        match &self.state {
            SessionState::Finished(outcome) => Some(outcome),
            _ => None,
        }
    }

    pub fn passed_time(&self) -> u32 {
        self.passed_time
    }

    pub fn music_started(&self) -> bool {
        self.music_started
    }

    pub fn current_score(&self) -> u32 {
        self.engine.stats.score
    }

    pub fn current_streak(&self) -> u32 {
        self.engine.stats.streak
    }

    pub fn current_star(&self) -> u32 {
        self.engine.stats.star
    }

    pub fn active_notes_snapshot(&self) -> Vec<Note> {
        self.engine.active_notes().cloned().collect()
    }

    /// Caption lines on display, empty before the first caption.
    pub fn current_lyric_lines(&self) -> Vec<&str> {
        self.lyric_cursor
            .current(&self.lyrics)
            .map(|line| line.lines().collect())
            .unwrap_or_default()
    }

    pub fn current_lyric(&self) -> Option<&LyricLine> {
        self.lyric_cursor.current(&self.lyrics)
    }
}
