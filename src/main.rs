//! Headless demo: plays one level with the autoplayer and logs every frame.
//!
//! `keyhero [level-index]` picks a level from `keyhero.toml` (or the
//! built-in catalog); without an argument the first playable level runs.

use keyhero::input::KeyBindings;
use keyhero::logic::{AutoplayInput, Collaborators, LevelContent, Session, SessionOutcome, SessionState};
use keyhero::models::engine::Chart;
use keyhero::models::settings::{CONFIG_FILE, EngineConfig, LevelConfig};
use keyhero::render::draw::result_lines;
use keyhero::system::{Clock, LogRenderer, MusicPlayer, RodioPlayer, SilentPlayer, SystemClock};
use keyhero::{EngineError, Result};
use std::path::Path;
use std::thread;
use std::time::{Duration, Instant};

const FRAME_RATE: u64 = 60;
const FRAME_DURATION: Duration = Duration::from_nanos(1_000_000_000 / FRAME_RATE);

/// Silence kept after the last note when no audio device is present.
const SILENT_TAIL_MS: u64 = 2000;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("MAIN: Booting keyhero...");

    if let Err(e) = run() {
        log::error!("MAIN: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let config = EngineConfig::load(Path::new(CONFIG_FILE))?;
    let level = pick_level(&config)?;
    log::info!(
        "MAIN: {} by {} ({}, {})",
        level.title,
        level.artist,
        level.length,
        if level.has_lyrics() { "with lyrics" } else { "instrumental" }
    );
    let content = LevelContent::load(level, &config)?;

    let clock = SystemClock::new();
    let player: Box<dyn MusicPlayer> = match RodioPlayer::new() {
        Ok(player) => Box::new(player),
        Err(e) => {
            log::warn!("MAIN: {}, playing silently", e);
            Box::new(SilentPlayer::new(clock, silent_length_ms(&content.chart)))
        }
    };

    let bindings = KeyBindings::from_config(&config.keys)?;
    let input = AutoplayInput::new(
        clock,
        clock.now_millis(),
        &content.chart,
        &config.playfield,
        &bindings,
    );

    let collab = Collaborators {
        clock: Box::new(clock),
        player,
        input: Box::new(input),
        renderer: Box::new(LogRenderer::new()),
    };
    let mut session = Session::new(content, &config, collab)?;

    match play(&mut session) {
        SessionOutcome::Completed(result) => {
            for line in result_lines(&result) {
                log::info!("MAIN: {}", line);
            }
        }
        SessionOutcome::Abandoned => log::info!("MAIN: Level abandoned"),
        SessionOutcome::Quit => log::info!("MAIN: Quit"),
    }
    Ok(())
}

fn pick_level(config: &EngineConfig) -> Result<&LevelConfig> {
    match std::env::args().nth(1) {
        Some(arg) => {
            let index: usize = arg
                .parse()
                .map_err(|_| EngineError::Config(format!("level index {:?} is not a number", arg)))?;
            config
                .level(index)
                .ok_or_else(|| EngineError::Config(format!("no level at index {}", index)))
        }
        None => config
            .levels
            .iter()
            .find(|level| level.available)
            .ok_or_else(|| EngineError::Config("no playable level in the catalog".into())),
    }
}

/// Fixed-rate frame loop. Nobody is there to read the result screen, so it is
/// dismissed as soon as it appears.
fn play(session: &mut Session) -> SessionOutcome {
    let mut next_frame = Instant::now();
    loop {
        let now = Instant::now();
        if let Some(outcome) = session.step() {
            return outcome;
        }
        if matches!(session.state(), SessionState::Results(_)) {
            session.dismiss_results();
            continue;
        }

        next_frame += FRAME_DURATION;
        if now < next_frame {
            thread::sleep(next_frame - now);
        } else {
            next_frame = now + FRAME_DURATION;
        }
    }
}

fn silent_length_ms(chart: &Chart) -> u64 {
    let last_end = chart
        .notes
        .iter()
        .map(|n| n.end_time() as u64)
        .max()
        .unwrap_or(0);
    last_end + SILENT_TAIL_MS
}
