//! Backing-track playback.

use super::clock::Clock;
use crate::error::{EngineError, Result};
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;

/// Abstraction over music backends.
/// Implementations: RodioPlayer (audio device), SilentPlayer (headless and testing).
pub trait MusicPlayer {
    /// Starts `track` from `start_offset_secs`, replacing anything playing.
    fn play_track(&mut self, track: &Path, start_offset_secs: f32) -> Result<()>;
    fn pause_track(&mut self);
    fn resume_track(&mut self);
    fn stop_track(&mut self);
    /// True while a started track has not run out. A paused track counts as
    /// playing.
    fn is_track_playing(&self) -> bool;
}

/// Plays tracks through the default output device.
pub struct RodioPlayer {
    _stream: OutputStream,
    stream_handle: OutputStreamHandle,
    sink: Option<Sink>,
}

impl RodioPlayer {
    pub fn new() -> Result<Self> {
        let (stream, stream_handle) = OutputStream::try_default()
            .map_err(|e| EngineError::Playback(format!("no output device: {}", e)))?;
        log::info!("AUDIO: Device found, audio enabled");
        Ok(Self {
            _stream: stream,
            stream_handle,
            sink: None,
        })
    }
}

impl MusicPlayer for RodioPlayer {
    fn play_track(&mut self, track: &Path, start_offset_secs: f32) -> Result<()> {
        self.stop_track();

        let file = File::open(track).map_err(|e| EngineError::from_read(track, e))?;
        let source = Decoder::new(BufReader::new(file)).map_err(|e| {
            EngineError::Playback(format!("cannot decode {}: {}", track.display(), e))
        })?;
        let source = source.skip_duration(Duration::from_secs_f32(start_offset_secs.max(0.0)));

        let sink = Sink::try_new(&self.stream_handle)
            .map_err(|e| EngineError::Playback(format!("failed to create sink: {}", e)))?;
        sink.append(source);
        sink.play();
        self.sink = Some(sink);

        log::info!(
            "AUDIO: Playing {} from {:.1}s",
            track.display(),
            start_offset_secs
        );
        Ok(())
    }

    fn pause_track(&mut self) {
        if let Some(sink) = &self.sink {
            sink.pause();
        }
    }

    fn resume_track(&mut self) {
        if let Some(sink) = &self.sink {
            sink.play();
        }
    }

    fn stop_track(&mut self) {
        if let Some(sink) = self.sink.take() {
            sink.stop();
        }
    }

    fn is_track_playing(&self) -> bool {
        self.sink.as_ref().is_some_and(|s| !s.empty())
    }
}

/// Pretends to play a track of fixed length, measured on a [`Clock`].
pub struct SilentPlayer<C: Clock> {
    clock: C,
    length_ms: u64,
    /// Clock time the track started, shifted forward by pauses.
    started_at: Option<u64>,
    paused_at: Option<u64>,
}

impl<C: Clock> SilentPlayer<C> {
    pub fn new(clock: C, length_ms: u64) -> Self {
        Self {
            clock,
            length_ms,
            started_at: None,
            paused_at: None,
        }
    }

    /// Milliseconds of the track played so far.
    pub fn position_ms(&self) -> u64 {
        let Some(started_at) = self.started_at else {
            return 0;
        };
        let now = self.paused_at.unwrap_or_else(|| self.clock.now_millis());
        now.saturating_sub(started_at)
    }
}

impl<C: Clock> MusicPlayer for SilentPlayer<C> {
    fn play_track(&mut self, track: &Path, start_offset_secs: f32) -> Result<()> {
        let offset_ms = (start_offset_secs.max(0.0) * 1000.0) as u64;
        self.started_at = Some(self.clock.now_millis().saturating_sub(offset_ms));
        self.paused_at = None;
        log::info!(
            "AUDIO: Silent playback of {} ({} ms)",
            track.display(),
            self.length_ms
        );
        Ok(())
    }

    fn pause_track(&mut self) {
        if self.started_at.is_some() && self.paused_at.is_none() {
            self.paused_at = Some(self.clock.now_millis());
        }
    }

    fn resume_track(&mut self) {
        if let (Some(started_at), Some(paused_at)) = (self.started_at, self.paused_at.take()) {
            let paused_for = self.clock.now_millis().saturating_sub(paused_at);
            self.started_at = Some(started_at + paused_for);
        }
    }

    fn stop_track(&mut self) {
        self.started_at = None;
        self.paused_at = None;
    }

    fn is_track_playing(&self) -> bool {
        self.started_at.is_some() && self.position_ms() < self.length_ms
    }
}
