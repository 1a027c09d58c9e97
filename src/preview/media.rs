//! Playback state for audio previews. At most one plays at a time.

use std::collections::HashMap;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct Track {
    /// Elapsed time banked before the current run.
    elapsed: Duration,
    started: Option<Instant>,
}

impl Track {
    fn position(&self, now: Instant) -> Duration {
        self.elapsed + self.started.map_or(Duration::ZERO, |s| now.saturating_duration_since(s))
    }

    fn pause(&mut self, now: Instant) {
        self.elapsed = self.position(now);
        self.started = None;
    }
}

/// Tracks which audio preview is playing and where each one is.
#[derive(Debug, Default)]
pub struct AudioSlot {
    tracks: HashMap<String, Track>,
    playing: Option<String>,
}

impl AudioSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start `key`. Whatever was playing before is paused and rewound.
    pub fn play(&mut self, key: &str, now: Instant) {
        if let Some(previous) = self.playing.take()
            && previous != key
            && let Some(track) = self.tracks.get_mut(&previous)
        {
            *track = Track::default();
        }
        let track = self.tracks.entry(key.to_string()).or_default();
        if track.started.is_none() {
            track.started = Some(now);
        }
        self.playing = Some(key.to_string());
    }

    pub fn pause(&mut self, key: &str, now: Instant) {
        if let Some(track) = self.tracks.get_mut(key) {
            track.pause(now);
        }
        if self.playing.as_deref() == Some(key) {
            self.playing = None;
        }
    }

    /// Play or pause `key`. Returns whether it is now playing.
    pub fn toggle(&mut self, key: &str, now: Instant) -> bool {
        if self.is_playing(key) {
            self.pause(key, now);
            false
        } else {
            self.play(key, now);
            true
        }
    }

    pub fn is_playing(&self, key: &str) -> bool {
        self.playing.as_deref() == Some(key)
    }

    pub fn playing(&self) -> Option<&str> {
        self.playing.as_deref()
    }

    pub fn position(&self, key: &str, now: Instant) -> Duration {
        self.tracks
            .get(key)
            .map_or(Duration::ZERO, |track| track.position(now))
    }
}

/// `m:ss` form of a playback position.
pub fn format_position(position: Duration) -> String {
    let secs = position.as_secs();
    format!("{}:{:02}", secs / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_playing_another_rewinds_the_first() {
        let t0 = Instant::now();
        let mut slot = AudioSlot::new();
        slot.play("a.mp3", t0);
        assert!(slot.is_playing("a.mp3"));

        let t1 = t0 + Duration::from_secs(3);
        slot.play("b.mp3", t1);
        assert!(!slot.is_playing("a.mp3"));
        assert!(slot.is_playing("b.mp3"));
        assert_eq!(slot.position("a.mp3", t1), Duration::ZERO);
        assert_eq!(slot.position("b.mp3", t1 + Duration::from_secs(2)), Duration::from_secs(2));
    }

    #[test]
    fn test_pause_keeps_position() {
        let t0 = Instant::now();
        let mut slot = AudioSlot::new();
        assert!(slot.toggle("a", t0));
        assert!(!slot.toggle("a", t0 + Duration::from_secs(4)));
        assert_eq!(slot.playing(), None);
        let later = t0 + Duration::from_secs(60);
        assert_eq!(slot.position("a", later), Duration::from_secs(4));
        slot.play("a", later);
        assert_eq!(slot.position("a", later + Duration::from_secs(1)), Duration::from_secs(5));
    }

    #[test]
    fn test_format_position() {
        assert_eq!(format_position(Duration::from_secs(65)), "1:05");
        assert_eq!(format_position(Duration::ZERO), "0:00");
    }
}
