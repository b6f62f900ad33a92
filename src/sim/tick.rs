//! Per-frame simulation tick
//!
//! One call advances the session by exactly one display refresh. There is no
//! delta-time scaling: speeds are in units per frame.

use super::collision::{angel_reaches_orb, rects_overlap};
use super::input::TickInput;
use super::state::{GameEvent, GamePhase, GameState, RespawnCause};

/// Advance the game state by one frame and report what happened.
///
/// Does nothing once the session is over.
pub fn tick(state: &mut GameState, input: &TickInput) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if state.phase == GamePhase::GameOver {
        return events;
    }

    state.frame += 1;
    let mut e = state.split_mut();

    // Angel
    e.angel.steer(input, e.tuning);
    e.angel.integrate(e.tuning);
    e.angel.clamp_to_playfield(e.tuning);

    // Obstacle sweep
    e.obstacle.advance();
    if e.obstacle.is_off_screen() {
        e.obstacle.respawn(e.rng, e.tuning, RespawnCause::OffScreen);
        log::debug!("obstacle respawned off-screen at y={:.0}", e.obstacle.pos.y);
        events.push(GameEvent::ObstacleRespawned {
            cause: RespawnCause::OffScreen,
        });
    }

    let angel_bounds = e.angel.bounds();
    let collected = angel_reaches_orb(&angel_bounds, e.orb.center, e.orb.radius);
    let orb_at = e.orb.center;
    if collected {
        e.orb.relocate(e.rng, e.tuning);
    }

    // Relocation puts the obstacle beyond the right wall even after the next
    // advance, so the overlap cannot persist into the next frame
    let hit = rects_overlap(&angel_bounds, &e.obstacle.bounds());
    if hit {
        e.obstacle.respawn(e.rng, e.tuning, RespawnCause::Hit);
    }

    if collected {
        state.score += 1;
        log::debug!("orb collected, score {}", state.score);
        events.push(GameEvent::Collected {
            score: state.score,
            at: orb_at,
        });
    }

    if hit {
        state.hits += 1;
        log::debug!("obstacle hit {}/{}", state.hits, state.tuning.max_hits);
        events.push(GameEvent::Hit { hits: state.hits });
        events.push(GameEvent::ObstacleRespawned {
            cause: RespawnCause::Hit,
        });

        if state.hits >= state.tuning.max_hits {
            state.phase = GamePhase::GameOver;
            log::info!("game over, final score {}", state.score);
            events.push(GameEvent::GameOver { score: state.score });
        }
    }

    events
}
