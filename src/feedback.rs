//! Audio feedback coordination
//!
//! Turns simulation events and the held flap control into calls on a
//! [`CuePlayer`]. The player is fire-and-forget: it never reports failure,
//! so a blocked or missing sound leaves gameplay untouched.

use crate::sim::{GameEvent, RespawnCause};

/// Sound cue types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cue {
    /// Loops while flap is held
    Flap,
    /// Orb collected
    Collect,
    /// Lives exhausted
    GameOver,
    /// Obstacle hit
    Hit,
}

impl Cue {
    pub const ALL: [Cue; 4] = [Cue::Flap, Cue::Collect, Cue::GameOver, Cue::Hit];

    /// Asset file name, relative to the page
    pub fn file_name(self) -> &'static str {
        match self {
            Cue::Flap => "flap.mp3",
            Cue::Collect => "collect.mp3",
            Cue::GameOver => "gameover.mp3",
            Cue::Hit => "hit.mp3",
        }
    }
}

/// The audio collaborator. Implementations swallow their own errors.
pub trait CuePlayer {
    /// Rewind to the start and play, cutting off any playback in progress
    fn play_from_start(&mut self, cue: Cue);
    fn pause(&mut self, cue: Cue);
    /// Seek back to the beginning without changing play state
    fn rewind(&mut self, cue: Cue);
    fn set_loop(&mut self, cue: Cue, looping: bool);
    fn set_volume(&mut self, cue: Cue, volume: f32);
    fn is_paused(&self, cue: Cue) -> bool;
    /// Best-effort attempt to lift autoplay restrictions; must be called
    /// from inside a user gesture
    fn unlock(&mut self) {}
}

/// Maps game events to audio cues with replay and dedup rules
pub struct FeedbackCoordinator<P: CuePlayer> {
    player: P,
    /// The flap loop is running
    flap_looping: bool,
    /// A hit cue may fire; closed by a hit, reopened by the relocation
    hit_gate_open: bool,
    unlocked: bool,
}

impl<P: CuePlayer> FeedbackCoordinator<P> {
    pub fn new(mut player: P, volume: f32) -> Self {
        let volume = volume.clamp(0.0, 1.0);
        for cue in Cue::ALL {
            player.set_volume(cue, volume);
            player.set_loop(cue, false);
        }
        Self {
            player,
            flap_looping: false,
            hit_gate_open: true,
            unlocked: false,
        }
    }

    pub fn player(&self) -> &P {
        &self.player
    }

    /// One-time audio unlock on the first user interaction
    pub fn unlock(&mut self) {
        if !self.unlocked {
            self.unlocked = true;
            self.player.unlock();
            log::debug!("audio unlock attempted");
        }
    }

    pub fn is_unlocked(&self) -> bool {
        self.unlocked
    }

    pub fn set_volume(&mut self, volume: f32) {
        let volume = volume.clamp(0.0, 1.0);
        for cue in Cue::ALL {
            self.player.set_volume(cue, volume);
        }
    }

    /// React to one frame: the tick's events plus whether flap is held
    pub fn on_frame(&mut self, events: &[GameEvent], flap_held: bool) {
        let mut game_over = false;

        for event in events {
            match *event {
                GameEvent::Collected { .. } => self.player.play_from_start(Cue::Collect),
                GameEvent::Hit { .. } => {
                    if self.hit_gate_open {
                        self.hit_gate_open = false;
                        self.player.play_from_start(Cue::Hit);
                    }
                }
                GameEvent::ObstacleRespawned { cause } => {
                    if cause == RespawnCause::Hit {
                        log::debug!("hit cue re-armed");
                    }
                    self.hit_gate_open = true;
                }
                GameEvent::GameOver { .. } => {
                    game_over = true;
                    self.player.play_from_start(Cue::GameOver);
                }
            }
        }

        // The loop halts on game over; a running flap loop would never stop
        self.set_flap(flap_held && !game_over);
    }

    fn set_flap(&mut self, held: bool) {
        match (held, self.flap_looping) {
            (true, false) => {
                self.player.set_loop(Cue::Flap, true);
                self.player.play_from_start(Cue::Flap);
                self.flap_looping = true;
            }
            (false, true) => {
                self.player.pause(Cue::Flap);
                self.player.rewind(Cue::Flap);
                self.flap_looping = false;
            }
            _ => {}
        }
    }

    /// Silence everything and re-arm the gates (restart)
    pub fn reset(&mut self) {
        for cue in Cue::ALL {
            if !self.player.is_paused(cue) {
                self.player.pause(cue);
            }
            self.player.rewind(cue);
        }
        self.flap_looping = false;
        self.hit_gate_open = true;
    }
}

/// Test double that records every call
#[cfg(test)]
pub(crate) mod testing {
    use super::{Cue, CuePlayer};

    #[derive(Debug, Clone, PartialEq)]
    pub enum Call {
        Play(Cue),
        Pause(Cue),
        Rewind(Cue),
        Loop(Cue, bool),
        Volume(Cue, f32),
        Unlock,
    }

    #[derive(Debug, Default)]
    pub struct RecordingPlayer {
        pub calls: Vec<Call>,
        playing: Vec<Cue>,
    }

    impl RecordingPlayer {
        pub fn plays(&self, cue: Cue) -> usize {
            self.calls.iter().filter(|c| **c == Call::Play(cue)).count()
        }

        pub fn pauses(&self, cue: Cue) -> usize {
            self.calls.iter().filter(|c| **c == Call::Pause(cue)).count()
        }

        pub fn clear(&mut self) {
            self.calls.clear();
        }
    }

    impl CuePlayer for RecordingPlayer {
        fn play_from_start(&mut self, cue: Cue) {
            self.calls.push(Call::Play(cue));
            if !self.playing.contains(&cue) {
                self.playing.push(cue);
            }
        }

        fn pause(&mut self, cue: Cue) {
            self.calls.push(Call::Pause(cue));
            self.playing.retain(|c| *c != cue);
        }

        fn rewind(&mut self, cue: Cue) {
            self.calls.push(Call::Rewind(cue));
        }

        fn set_loop(&mut self, cue: Cue, looping: bool) {
            self.calls.push(Call::Loop(cue, looping));
        }

        fn set_volume(&mut self, cue: Cue, volume: f32) {
            self.calls.push(Call::Volume(cue, volume));
        }

        fn is_paused(&self, cue: Cue) -> bool {
            !self.playing.contains(&cue)
        }

        fn unlock(&mut self) {
            self.calls.push(Call::Unlock);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::{Call, RecordingPlayer};
    use super::*;
    use glam::Vec2;

    fn coordinator() -> FeedbackCoordinator<RecordingPlayer> {
        let mut fb = FeedbackCoordinator::new(RecordingPlayer::default(), 0.8);
        fb.player.clear();
        fb
    }

    fn collected(score: u32) -> GameEvent {
        GameEvent::Collected { score, at: Vec2::ZERO }
    }

    #[test]
    fn test_new_sets_volume_on_every_cue() {
        let fb = FeedbackCoordinator::new(RecordingPlayer::default(), 1.7);
        for cue in Cue::ALL {
            assert!(fb.player().calls.contains(&Call::Volume(cue, 1.0)));
        }
    }

    #[test]
    fn test_flap_loop_starts_once_and_stops_on_release() {
        let mut fb = coordinator();
        for _ in 0..10 {
            fb.on_frame(&[], true);
        }
        assert_eq!(fb.player().plays(Cue::Flap), 1);
        assert!(fb.player().calls.contains(&Call::Loop(Cue::Flap, true)));
        assert_eq!(fb.player().pauses(Cue::Flap), 0);

        fb.on_frame(&[], false);
        assert_eq!(fb.player().pauses(Cue::Flap), 1);
        assert_eq!(fb.player().calls.last(), Some(&Call::Rewind(Cue::Flap)));

        // Idle frames after release stay quiet
        fb.on_frame(&[], false);
        assert_eq!(fb.player().pauses(Cue::Flap), 1);
    }

    #[test]
    fn test_collect_replays_each_time() {
        let mut fb = coordinator();
        fb.on_frame(&[collected(1)], false);
        fb.on_frame(&[collected(2)], false);
        assert_eq!(fb.player().plays(Cue::Collect), 2);
    }

    #[test]
    fn test_hit_plays_once_per_collision() {
        let mut fb = coordinator();
        let hit = [
            GameEvent::Hit { hits: 1 },
            GameEvent::ObstacleRespawned { cause: RespawnCause::Hit },
        ];
        fb.on_frame(&hit, false);
        fb.on_frame(&[], false);
        assert_eq!(fb.player().plays(Cue::Hit), 1);

        fb.on_frame(&[GameEvent::Hit { hits: 2 }], false);
        assert_eq!(fb.player().plays(Cue::Hit), 2);
    }

    #[test]
    fn test_hit_gate_blocks_until_relocation() {
        let mut fb = coordinator();
        fb.on_frame(&[GameEvent::Hit { hits: 1 }], false);
        fb.on_frame(&[GameEvent::Hit { hits: 2 }], false);
        assert_eq!(fb.player().plays(Cue::Hit), 1);

        fb.on_frame(
            &[GameEvent::ObstacleRespawned { cause: RespawnCause::OffScreen }],
            false,
        );
        fb.on_frame(&[GameEvent::Hit { hits: 3 }], false);
        assert_eq!(fb.player().plays(Cue::Hit), 2);
    }

    #[test]
    fn test_game_over_plays_once_and_stops_flap() {
        let mut fb = coordinator();
        fb.on_frame(&[], true);
        fb.on_frame(&[GameEvent::GameOver { score: 4 }], true);
        assert_eq!(fb.player().plays(Cue::GameOver), 1);
        assert_eq!(fb.player().pauses(Cue::Flap), 1);

        fb.on_frame(&[], false);
        assert_eq!(fb.player().plays(Cue::GameOver), 1);
    }

    #[test]
    fn test_unlock_is_one_shot() {
        let mut fb = coordinator();
        fb.unlock();
        fb.unlock();
        let unlocks = fb.player().calls.iter().filter(|c| **c == Call::Unlock).count();
        assert_eq!(unlocks, 1);
        assert!(fb.is_unlocked());
    }

    #[test]
    fn test_reset_silences_playing_cues() {
        let mut fb = coordinator();
        fb.on_frame(&[collected(1)], true);
        fb.reset();
        assert_eq!(fb.player().pauses(Cue::Flap), 1);
        assert_eq!(fb.player().pauses(Cue::Collect), 1);
        assert_eq!(fb.player().pauses(Cue::Hit), 0);

        // Flap restarts cleanly after reset
        fb.on_frame(&[], true);
        assert_eq!(fb.player().plays(Cue::Flap), 2);
    }
}
