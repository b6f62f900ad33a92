//! Game state and core simulation types
//!
//! One [`GameState`] owns every entity and counter of a session. Step
//! functions borrow it mutably; nothing lives in globals.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::collision::Rect;
use super::input::TickInput;
use crate::sample_span;
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Active gameplay, the loop reschedules itself
    Playing,
    /// Lives exhausted, only restart is accepted
    GameOver,
}

/// Why the obstacle was moved back to the right of the playfield
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RespawnCause {
    /// It scrolled past the left edge
    OffScreen,
    /// It hit the angel
    Hit,
}

/// Discrete outcomes of one simulation tick, in the order they happened
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// The angel touched the orb
    Collected { score: u32, at: Vec2 },
    /// The angel overlapped the obstacle
    Hit { hits: u32 },
    /// The obstacle was relocated off-screen right
    ObstacleRespawned { cause: RespawnCause },
    /// Hits reached the maximum; emitted once per session
    GameOver { score: u32 },
}

/// The player's sprite
#[derive(Debug, Clone, PartialEq)]
pub struct Angel {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Vertical velocity (positive = down), units per frame
    pub vel_y: f32,
}

impl Angel {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: tuning.angel_start,
            size: tuning.angel_size,
            vel_y: 0.0,
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }

    pub fn center(&self) -> Vec2 {
        self.bounds().center()
    }

    /// Horizontal steering and flap impulse
    pub fn steer(&mut self, input: &TickInput, tuning: &Tuning) {
        if input.right {
            self.pos.x += tuning.speed_x;
        }
        if input.left {
            self.pos.x -= tuning.speed_x;
        }
        // Flap overwrites velocity rather than adding to it
        if input.flap {
            self.vel_y = tuning.lift;
        }
    }

    /// Gravity, fall-speed cap and vertical integration
    pub fn integrate(&mut self, tuning: &Tuning) {
        self.vel_y = (self.vel_y + tuning.gravity).min(tuning.max_fall_speed);
        self.pos.y += self.vel_y;
    }

    /// Keep the sprite inside the playfield. Touching the top or bottom
    /// edge kills vertical motion.
    pub fn clamp_to_playfield(&mut self, tuning: &Tuning) {
        self.pos.x = self.pos.x.clamp(0.0, tuning.angel_max_x());

        let max_y = tuning.angel_max_y();
        if self.pos.y < 0.0 {
            self.pos.y = 0.0;
            self.vel_y = 0.0;
        } else if self.pos.y > max_y {
            self.pos.y = max_y;
            self.vel_y = 0.0;
        }
    }
}

/// The collectible light orb
#[derive(Debug, Clone, PartialEq)]
pub struct Orb {
    pub center: Vec2,
    pub radius: f32,
}

impl Orb {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            center: tuning.orb_start,
            radius: tuning.orb_radius,
        }
    }

    /// Move to a uniformly random spot at least `orb_margin` from every edge
    pub fn relocate(&mut self, rng: &mut Pcg32, tuning: &Tuning) {
        let margin = tuning.orb_margin;
        let span = tuning.playfield - Vec2::splat(margin * 2.0);
        self.center = Vec2::new(
            sample_span(rng, margin, span.x),
            sample_span(rng, margin, span.y),
        );
    }
}

/// The sweeping obstacle
#[derive(Debug, Clone, PartialEq)]
pub struct Obstacle {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Leftward speed, units per frame
    pub speed: f32,
}

impl Obstacle {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: tuning.obstacle_start,
            size: tuning.obstacle_size,
            speed: tuning.obstacle_speed,
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }

    pub fn advance(&mut self) {
        self.pos.x -= self.speed;
    }

    /// True once the right edge has passed the left side of the playfield
    pub fn is_off_screen(&self) -> bool {
        self.pos.x + self.size.x < 0.0
    }

    /// Re-enter from the right: `x` in `[width, width + spread)`, `y` anywhere
    /// the obstacle fits.
    ///
    /// After a hit the range starts one step further right, so the next
    /// frame's advance still leaves the obstacle past the right wall where
    /// the angel can be.
    pub fn respawn(&mut self, rng: &mut Pcg32, tuning: &Tuning, cause: RespawnCause) {
        let start = match cause {
            RespawnCause::OffScreen => tuning.playfield.x,
            RespawnCause::Hit => tuning.playfield.x + self.speed,
        };
        self.pos.x = sample_span(rng, start, tuning.obstacle_respawn_spread);
        self.randomize_y(rng, tuning);
    }

    fn randomize_y(&mut self, rng: &mut Pcg32, tuning: &Tuning) {
        self.pos.y = sample_span(rng, 0.0, tuning.playfield.y - self.size.y);
    }
}

/// A purely decorative cloud drifting across the sky
#[derive(Debug, Clone, PartialEq)]
pub struct Cloud {
    pub pos: Vec2,
    /// Leftward drift, units per frame
    pub speed: f32,
    /// Base puff radius
    pub size: f32,
}

impl Cloud {
    /// A fixed, evenly spread set of clouds for the upper sky
    pub fn sky(count: usize, playfield: Vec2) -> Vec<Cloud> {
        let spacing = playfield.x / count.max(1) as f32;
        (0..count)
            .map(|i| {
                let i = i as f32;
                Cloud {
                    pos: Vec2::new(spacing * i + spacing * 0.3, 60.0 + (i * 97.0) % 140.0),
                    speed: 0.25 + 0.15 * (i % 3.0),
                    size: 28.0 + 8.0 * (i % 2.0),
                }
            })
            .collect()
    }

    /// Full puff width (three overlapping circles)
    pub fn width(&self) -> f32 {
        self.size * 4.0
    }

    /// Drift left, wrapping around to the right edge
    pub fn drift(&mut self, playfield_width: f32) {
        self.pos.x -= self.speed;
        if self.pos.x + self.width() < 0.0 {
            self.pos.x = playfield_width;
        }
    }
}

/// Complete session state (deterministic for a given seed and input stream)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed of the current session
    pub seed: u64,
    rng: Pcg32,
    pub tuning: Tuning,
    /// Frames simulated in this session
    pub frame: u64,
    pub phase: GamePhase,
    /// Orbs collected
    pub score: u32,
    /// Obstacle collisions, `0..=max_hits`
    pub hits: u32,
    pub angel: Angel,
    pub orb: Orb,
    pub obstacle: Obstacle,
}

impl GameState {
    /// Create the opening session. Orb and obstacle start at their fixed
    /// tuning positions.
    pub fn new(tuning: Tuning, seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            frame: 0,
            phase: GamePhase::Playing,
            score: 0,
            hits: 0,
            angel: Angel::new(&tuning),
            orb: Orb::new(&tuning),
            obstacle: Obstacle::new(&tuning),
            tuning,
        }
    }

    /// Reset every counter and entity for a fresh session.
    ///
    /// The obstacle re-enters at a fixed offset right of the playfield with a
    /// random height; the orb gets a random position.
    pub fn restart(&mut self, seed: u64) {
        self.seed = seed;
        self.rng = Pcg32::seed_from_u64(seed);
        self.frame = 0;
        self.phase = GamePhase::Playing;
        self.score = 0;
        self.hits = 0;
        self.angel = Angel::new(&self.tuning);

        self.obstacle = Obstacle::new(&self.tuning);
        self.obstacle.pos.x = self.tuning.playfield.x + self.tuning.obstacle_restart_offset;
        self.obstacle.randomize_y(&mut self.rng, &self.tuning);

        self.orb.relocate(&mut self.rng, &self.tuning);
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Lives left before game over
    pub fn lives_remaining(&self) -> u32 {
        self.tuning.max_hits.saturating_sub(self.hits)
    }

    /// Mutable access to the entities together with the RNG and tuning,
    /// for step functions that need all of them at once
    pub(crate) fn split_mut(&mut self) -> Entities<'_> {
        Entities {
            rng: &mut self.rng,
            tuning: &self.tuning,
            angel: &mut self.angel,
            orb: &mut self.orb,
            obstacle: &mut self.obstacle,
        }
    }
}

/// Disjoint borrows of a [`GameState`]
pub(crate) struct Entities<'a> {
    pub rng: &'a mut Pcg32,
    pub tuning: &'a Tuning,
    pub angel: &'a mut Angel,
    pub orb: &'a mut Orb,
    pub obstacle: &'a mut Obstacle,
}
