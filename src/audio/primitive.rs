use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use lofty::prelude::*;
use rodio::{OutputStream, OutputStreamBuilder, Sink};

use playbar::PlaybackPrimitive;

use super::sink::{AudioError, create_sink_at};

/// Wall-clock position of a sink that can be paused and restarted.
#[derive(Debug, Default, Clone)]
pub(super) struct PlayClock {
    started_at: Option<Instant>,
    accumulated: Duration,
}

impl PlayClock {
    pub(super) fn start(&mut self, now: Instant) {
        if self.started_at.is_none() {
            self.started_at = Some(now);
        }
    }

    pub(super) fn pause(&mut self, now: Instant) {
        if let Some(started) = self.started_at.take() {
            self.accumulated += now.saturating_duration_since(started);
        }
    }

    /// Jump to `at`, keeping the running/paused mode.
    pub(super) fn reset(&mut self, at: Duration, now: Instant) {
        self.accumulated = at;
        if self.started_at.is_some() {
            self.started_at = Some(now);
        }
    }

    pub(super) fn is_running(&self) -> bool {
        self.started_at.is_some()
    }

    pub(super) fn position(&self, now: Instant) -> Duration {
        match self.started_at {
            Some(started) => self.accumulated + now.saturating_duration_since(started),
            None => self.accumulated,
        }
    }
}

/// Map a playlist `file` entry to a local path. Only plain paths and
/// `file://` URLs are playable.
pub(super) fn local_path(url: &str) -> Option<PathBuf> {
    let path = url.strip_prefix("file://").unwrap_or(url);
    if path.is_empty() || path.contains("://") {
        return None;
    }
    Some(PathBuf::from(path))
}

fn probe_duration(path: &Path) -> Option<Duration> {
    match lofty::read_from_path(path) {
        Ok(tagged) => Some(tagged.properties().duration()).filter(|d| !d.is_zero()),
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "no readable properties");
            None
        }
    }
}

/// Plays local files on the default output device.
pub struct RodioPrimitive {
    stream: OutputStream,
    sink: Option<Sink>,
    path: Option<PathBuf>,
    duration: f64,
    clock: PlayClock,
    metadata_loaded: bool,
}

impl RodioPrimitive {
    pub fn new() -> Result<Self, AudioError> {
        let mut stream = OutputStreamBuilder::open_default_stream()?;
        // rodio logs to stderr when OutputStream is dropped, which would
        // scribble over the terminal on quit.
        stream.log_on_drop(false);

        Ok(Self {
            stream,
            sink: None,
            path: None,
            duration: f64::NAN,
            clock: PlayClock::default(),
            metadata_loaded: false,
        })
    }

    /// Whether the duration of the loaded track became known since the last
    /// call. The host turns this into `InputEvent::MetadataLoaded`.
    pub fn take_metadata_loaded(&mut self) -> bool {
        std::mem::take(&mut self.metadata_loaded)
    }

    fn stop_sink(&mut self) {
        if let Some(sink) = self.sink.take() {
            sink.stop();
        }
    }

    fn open_at(&mut self, start_at: Duration) {
        self.stop_sink();
        let Some(path) = self.path.as_deref() else {
            return;
        };
        match create_sink_at(&self.stream, path, start_at) {
            Ok(sink) => {
                if self.clock.is_running() {
                    sink.play();
                }
                self.sink = Some(sink);
            }
            Err(e) => tracing::warn!(error = %e, "track unavailable"),
        }
    }
}

impl PlaybackPrimitive for RodioPrimitive {
    fn load(&mut self, url: &str) {
        self.clock = PlayClock::default();
        self.duration = f64::NAN;
        self.path = local_path(url);

        let Some(path) = self.path.clone() else {
            self.stop_sink();
            tracing::warn!(url, "only local files can be played");
            return;
        };

        if let Some(duration) = probe_duration(&path) {
            self.duration = duration.as_secs_f64();
            self.metadata_loaded = true;
        }
        self.open_at(Duration::ZERO);
        tracing::debug!(path = %path.display(), duration = self.duration, "track loaded");
    }

    fn play(&mut self) {
        if let Some(sink) = self.sink.as_ref() {
            sink.play();
            self.clock.start(Instant::now());
        }
    }

    fn pause(&mut self) {
        if let Some(sink) = self.sink.as_ref() {
            sink.pause();
        }
        self.clock.pause(Instant::now());
    }

    fn position(&self) -> f64 {
        let position = self.clock.position(Instant::now()).as_secs_f64();
        if self.duration.is_finite() {
            position.min(self.duration)
        } else {
            position
        }
    }

    fn set_position(&mut self, seconds: f64) {
        let at = if seconds.is_finite() && seconds > 0.0 {
            Duration::from_secs_f64(seconds)
        } else {
            Duration::ZERO
        };
        self.clock.reset(at, Instant::now());
        self.open_at(at);
    }

    fn duration(&self) -> f64 {
        self.duration
    }

    fn ended(&self) -> bool {
        self.sink.as_ref().is_some_and(Sink::empty)
    }
}
