//! Loop driver
//!
//! [`Game`] runs one full step per display refresh: input, physics, session
//! state, feedback, render. It does not schedule itself; the host calls
//! [`Game::frame`] from its refresh callback and stops rescheduling when
//! told to halt.

use crate::feedback::{CuePlayer, FeedbackCoordinator};
use crate::renderer::{DrawCommand, game_over_overlay, playing_frame};
use crate::sim::{Cloud, GameEvent, GamePhase, GameState, InputAggregator, InputEvent, tick};
use crate::tuning::Tuning;

/// What the host should do after a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Schedule another frame
    Continue,
    /// Stop scheduling until [`Game::restart`]
    Halt,
}

/// Game instance holding all state
pub struct Game<P: CuePlayer> {
    state: GameState,
    input: InputAggregator,
    feedback: FeedbackCoordinator<P>,
    clouds: Vec<Cloud>,
    /// Draw list of the most recent frame
    draw_list: Vec<DrawCommand>,
    running: bool,
}

impl<P: CuePlayer> Game<P> {
    pub fn new(tuning: Tuning, seed: u64, player: P) -> Self {
        let clouds = Cloud::sky(tuning.cloud_count, tuning.playfield);
        let feedback = FeedbackCoordinator::new(player, tuning.cue_volume);
        log::info!("session started with seed {seed}");
        Self {
            state: GameState::new(tuning, seed),
            input: InputAggregator::new(),
            feedback,
            clouds,
            draw_list: Vec::new(),
            running: true,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn feedback(&self) -> &FeedbackCoordinator<P> {
        &self.feedback
    }

    /// Whether the host loop should be scheduling frames
    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn draw_list(&self) -> &[DrawCommand] {
        &self.draw_list
    }

    /// Queue a host input event for the next frame. Call from inside the
    /// event handler so the first press can unlock audio.
    pub fn push_input(&mut self, event: InputEvent) {
        if self.input.queue(event) {
            self.user_gesture();
        }
    }

    /// Report a user gesture that maps to no control (any other key).
    /// Only the first gesture of the page does anything.
    pub fn user_gesture(&mut self) {
        self.feedback.unlock();
    }

    /// Run one step. Returns [`FrameOutcome::Halt`] on the frame the session
    /// ends and on every call after it.
    pub fn frame(&mut self, time_ms: f64) -> FrameOutcome {
        if self.state.phase == GamePhase::GameOver {
            self.running = false;
            return FrameOutcome::Halt;
        }

        self.input.apply_pending();
        let input = self.input.snapshot();

        let events = tick(&mut self.state, &input);
        self.feedback.on_frame(&events, input.flap);

        self.draw_list = playing_frame(&self.state, &mut self.clouds, time_ms / 1000.0);

        if events.iter().any(|e| matches!(e, GameEvent::GameOver { .. })) {
            self.draw_list.extend(game_over_overlay(&self.state));
            self.running = false;
            return FrameOutcome::Halt;
        }
        FrameOutcome::Continue
    }

    /// Reset the session with a new seed.
    ///
    /// Returns `true` if the loop had halted and the host must resume
    /// scheduling frames.
    pub fn restart(&mut self, seed: u64) -> bool {
        // The restart control is itself a user gesture
        self.feedback.unlock();
        self.state.restart(seed);
        self.input.release_all();
        self.feedback.reset();
        log::info!("session restarted with seed {seed}");

        let resume = !self.running;
        self.running = true;
        resume
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feedback::Cue;
    use crate::feedback::testing::{Call, RecordingPlayer};
    use crate::sim::{Key, Source, TouchTarget};
    use glam::Vec2;

    const SPACE: Source = Source::Key(Key::Space);

    fn game() -> Game<RecordingPlayer> {
        Game::new(Tuning::default(), 11, RecordingPlayer::default())
    }

    fn force_hit(game: &mut Game<RecordingPlayer>) {
        let state = game.state_mut();
        state.orb.center = Vec2::new(880.0, 680.0);
        state.obstacle.pos = state.angel.pos + Vec2::new(5.0, 5.0);
    }

    #[test]
    fn test_frame_draws_and_continues() {
        let mut game = game();
        assert_eq!(game.frame(16.0), FrameOutcome::Continue);
        assert!(matches!(game.draw_list()[0], DrawCommand::Clear { .. }));
        assert_eq!(game.state().frame, 1);
    }

    #[test]
    fn test_first_input_unlocks_audio_immediately() {
        let mut game = game();
        assert!(!game.feedback().is_unlocked());
        game.push_input(InputEvent::Press(SPACE));
        assert!(game.feedback().is_unlocked());
    }

    #[test]
    fn test_blur_before_first_press_keeps_unlock_available() {
        let mut game = game();
        game.push_input(InputEvent::ReleaseAll);
        game.push_input(InputEvent::Release(SPACE));
        game.frame(0.0);
        assert!(!game.feedback().is_unlocked());

        game.push_input(InputEvent::Press(Source::Touch(TouchTarget::FlyButton)));
        assert!(game.feedback().is_unlocked());
    }

    #[test]
    fn test_unmapped_key_unlocks_once() {
        let mut game = game();
        game.user_gesture();
        game.user_gesture();
        game.push_input(InputEvent::Press(SPACE));
        assert!(game.feedback().is_unlocked());
        let unlocks = game
            .feedback()
            .player()
            .calls
            .iter()
            .filter(|c| **c == Call::Unlock)
            .count();
        assert_eq!(unlocks, 1);
    }

    #[test]
    fn test_input_applies_on_next_frame() {
        let mut game = game();
        game.push_input(InputEvent::Press(Source::Key(Key::ArrowRight)));
        assert_eq!(game.state().angel.pos.x, 100.0);
        game.frame(0.0);
        assert_eq!(game.state().angel.pos.x, 104.0);
    }

    #[test]
    fn test_flap_held_across_frames_loops_once() {
        let mut game = game();
        game.push_input(InputEvent::Press(SPACE));
        for i in 0..20 {
            game.frame(f64::from(i) * 16.7);
        }
        assert_eq!(game.feedback().player().plays(Cue::Flap), 1);
        assert_eq!(game.feedback().player().pauses(Cue::Flap), 0);

        game.push_input(InputEvent::Release(SPACE));
        game.frame(400.0);
        assert_eq!(game.feedback().player().pauses(Cue::Flap), 1);
    }

    #[test]
    fn test_game_over_halts_and_draws_overlay() {
        let mut game = game();
        for hit in 1..=3 {
            force_hit(&mut game);
            let outcome = game.frame(0.0);
            assert_eq!(game.state().hits, hit);
            let expected = if hit == 3 { FrameOutcome::Halt } else { FrameOutcome::Continue };
            assert_eq!(outcome, expected);
        }
        assert!(!game.is_running());
        assert!(game.draw_list().iter().any(|c| matches!(
            c,
            DrawCommand::Text { text, .. } if text == "GAME OVER"
        )));
        assert_eq!(game.feedback().player().plays(Cue::GameOver), 1);
        assert_eq!(game.feedback().player().plays(Cue::Hit), 3);

        // Stays halted without re-triggering anything
        let frame = game.state().frame;
        assert_eq!(game.frame(0.0), FrameOutcome::Halt);
        assert_eq!(game.state().frame, frame);
        assert_eq!(game.feedback().player().plays(Cue::GameOver), 1);
    }

    #[test]
    fn test_restart_resumes_loop() {
        let mut game = game();
        for _ in 0..3 {
            force_hit(&mut game);
            game.frame(0.0);
        }
        assert!(game.state().is_game_over());

        assert!(game.restart(5));
        assert!(game.is_running());
        assert_eq!(game.state().hits, 0);
        assert_eq!(game.state().score, 0);
        assert_eq!(game.frame(0.0), FrameOutcome::Continue);

        // Restarting a running session does not ask for a second loop
        assert!(!game.restart(5));
    }

    #[test]
    fn test_restart_drops_held_input() {
        let mut game = game();
        game.push_input(InputEvent::Press(Source::Key(Key::ArrowLeft)));
        game.frame(0.0);
        game.restart(3);
        game.frame(0.0);
        assert_eq!(game.state().angel.pos.x, 100.0);
    }
}
