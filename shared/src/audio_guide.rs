use serde::{Deserialize, Serialize};

use crate::config::{AUDIO_TRACK_SECS, TRANSCRIPT_WINDOW_SECS};

/// One transcript line, shown from `start` seconds into the track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioSegment {
    pub start: f64,
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Stopped,
    Playing,
    Paused,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not playing; nothing changed.
    Idle,
    Advanced,
    /// Ran past the end: progress is back at zero and playback stopped.
    Finished,
}

/// Simulated audio guide for one scene. Progress runs 0..=100 in whole
/// percent, one step per tick.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioGuide {
    segments: Vec<AudioSegment>,
    state: PlaybackState,
    progress: u32,
}

impl AudioGuide {
    pub const MAX_PROGRESS: u32 = 100;

    pub fn new(segments: Vec<AudioSegment>) -> Self {
        Self {
            segments,
            state: PlaybackState::Stopped,
            progress: 0,
        }
    }

    pub fn segments(&self) -> &[AudioSegment] {
        &self.segments
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    pub fn progress(&self) -> u32 {
        self.progress
    }

    pub fn play(&mut self) {
        self.state = PlaybackState::Playing;
    }

    pub fn pause(&mut self) {
        if self.state == PlaybackState::Playing {
            self.state = PlaybackState::Paused;
        }
    }

    pub fn tick(&mut self) -> TickOutcome {
        if self.state != PlaybackState::Playing {
            return TickOutcome::Idle;
        }
        if self.progress < Self::MAX_PROGRESS {
            self.progress += 1;
            TickOutcome::Advanced
        } else {
            self.progress = 0;
            self.state = PlaybackState::Stopped;
            TickOutcome::Finished
        }
    }

    /// Simulated track position in seconds.
    pub fn elapsed_secs(&self) -> f64 {
        self.progress as f64 * AUDIO_TRACK_SECS / Self::MAX_PROGRESS as f64
    }

    /// Track position as `m:ss`.
    pub fn time_label(&self) -> String {
        let elapsed = self.elapsed_secs();
        let minutes = elapsed.floor() as u32 / 60;
        let seconds = (elapsed - (minutes * 60) as f64).floor() as u32;
        format!("{minutes}:{seconds:02}")
    }

    /// Index of the transcript line under the playhead. Nothing is
    /// highlighted until the first tick lands.
    pub fn active_segment(&self) -> Option<usize> {
        if self.progress == 0 {
            return None;
        }
        let t = self.elapsed_secs();
        self.segments
            .iter()
            .position(|s| t >= s.start && t < s.start + TRANSCRIPT_WINDOW_SECS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn guide() -> AudioGuide {
        AudioGuide::new(vec![
            AudioSegment {
                start: 0.0,
                text: "intro".into(),
            },
            AudioSegment {
                start: 5.0,
                text: "history".into(),
            },
            AudioSegment {
                start: 10.0,
                text: "murals".into(),
            },
            AudioSegment {
                start: 20.0,
                text: "statue".into(),
            },
        ])
    }

    #[test]
    fn ticks_are_ignored_until_played() {
        let mut g = guide();
        assert_eq!(g.tick(), TickOutcome::Idle);
        assert_eq!(g.progress(), 0);
        assert_eq!(g.state(), PlaybackState::Stopped);
    }

    #[test]
    fn runs_to_full_then_resets_and_stops() {
        let mut g = guide();
        g.play();
        for _ in 0..100 {
            assert_eq!(g.tick(), TickOutcome::Advanced);
        }
        assert_eq!(g.progress(), 100);
        assert!(g.is_playing());
        assert_eq!(g.time_label(), "0:30");

        assert_eq!(g.tick(), TickOutcome::Finished);
        assert_eq!(g.progress(), 0);
        assert_eq!(g.state(), PlaybackState::Stopped);
        assert_eq!(g.tick(), TickOutcome::Idle);
    }

    #[test]
    fn pause_freezes_progress_and_play_resumes() {
        let mut g = guide();
        g.play();
        for _ in 0..10 {
            g.tick();
        }
        g.pause();
        assert_eq!(g.state(), PlaybackState::Paused);
        assert_eq!(g.tick(), TickOutcome::Idle);
        assert_eq!(g.progress(), 10);
        g.play();
        g.tick();
        assert_eq!(g.progress(), 11);
    }

    #[test]
    fn pause_from_stopped_is_a_no_op() {
        let mut g = guide();
        g.pause();
        assert_eq!(g.state(), PlaybackState::Stopped);
    }

    #[test]
    fn time_label_pads_seconds() {
        let mut g = guide();
        g.play();
        for _ in 0..20 {
            g.tick();
        }
        // 20% of 30s
        assert_eq!(g.time_label(), "0:06");
    }

    #[test]
    fn active_segment_uses_five_second_window() {
        let mut g = guide();
        assert_eq!(g.active_segment(), None);
        g.play();
        let mut seen = Vec::new();
        for _ in 0..100 {
            g.tick();
            seen.push(g.active_segment());
        }
        // progress 10 -> 3.0s
        assert_eq!(seen[9], Some(0));
        // progress 20 -> 6.0s
        assert_eq!(seen[19], Some(1));
        // progress 40 -> 12.0s
        assert_eq!(seen[39], Some(2));
        // progress 55 -> 16.5s, between windows
        assert_eq!(seen[54], None);
        // progress 70 -> 21.0s
        assert_eq!(seen[69], Some(3));
        // progress 90 -> 27.0s
        assert_eq!(seen[89], None);
    }
}
