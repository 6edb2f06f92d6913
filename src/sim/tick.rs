//! Fixed timestep simulation tick
//!
//! Core game loop that advances the session deterministically:
//! input → countdown → physics → motion → collisions → wrap/camera/score →
//! lifecycle sweep → fall check.

use super::collision::{Contact, ContactKind, Effect, resolve};
use super::entities::PlatformKind;
use super::lifecycle;
use super::physics::{self, Target};
use super::state::{GameEvent, GameOverCause, GameState};
use crate::wrap_x;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Move left (keyboard or touch)
    pub left: bool,
    /// Move right (keyboard or touch)
    pub right: bool,
    /// Any input while the game is over starts a new run
    pub restart: bool,
    /// Idle/demo mode - autopilot steers
    pub idle_mode: bool,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    // Frozen until restarted
    if state.is_game_over() {
        if input.restart {
            state.restart();
        }
        return;
    }

    let mut input = input.clone();
    if input.idle_mode {
        let steer = autopilot(state);
        input.left = steer < 0.0;
        input.right = steer > 0.0;
    }

    state.time_ticks += 1;

    // Horizontal control; left wins when both are held
    state.player.vel.x = if input.left {
        -state.tuning.player_speed
    } else if input.right {
        state.tuning.player_speed
    } else {
        0.0
    };

    for _ in 0..state.countdown.advance(dt) {
        state.on_timer_tick();
    }
    if state.is_game_over() {
        return;
    }

    physics::integrate(
        &mut state.player,
        &mut state.registry,
        state.tuning.gravity,
        dt,
    );
    lifecycle::update_motion(&mut state.registry);

    resolve_contacts(state);
    if state.is_game_over() {
        return;
    }

    state.player.pos.x = wrap_x(state.player.pos.x, state.tuning.world_width);
    state
        .camera
        .follow(state.player.pos.y, state.tuning.camera_follow_offset);
    state.update_score();

    let threshold = state.destroy_threshold();
    lifecycle::sweep(
        &mut state.registry,
        &mut state.generator,
        &mut state.rng,
        &state.tuning,
        state.score,
        threshold,
    );

    if state.player.pos.y > threshold {
        state.game_over(GameOverCause::Fell);
    }
}

/// Resolve this step's contacts in order, stopping at a death
fn resolve_contacts(state: &mut GameState) {
    for target in physics::detect_contacts(&state.player, &state.registry) {
        // An earlier effect this step may have removed the target
        let Some(contact) = contact_for(state, target) else {
            continue;
        };
        let effect = resolve(&contact, &state.tuning);
        apply_effect(state, target, effect);
        if state.is_game_over() {
            return;
        }
    }
}

/// Snapshot a contact from live state; `None` if the target is gone
fn contact_for(state: &GameState, target: Target) -> Option<Contact> {
    let player = &state.player;
    let (kind, other_y, surface_y) = match target {
        Target::Platform(h) => {
            let p = state.registry.platforms.get(h)?;
            (ContactKind::Platform(p.kind), p.pos.y, p.top())
        }
        Target::Hazard(h) => {
            let hz = state.registry.hazards.get(h)?;
            (ContactKind::Hazard, hz.pos.y, hz.pos.y - hz.half_size())
        }
        Target::Boost(h) => {
            let b = state.registry.boosts.get(h)?;
            (ContactKind::Boost, b.pos.y, b.pos.y)
        }
    };
    Some(Contact {
        kind,
        player_y: player.pos.y,
        player_vel_y: player.vel.y,
        other_y,
        surface_y,
    })
}

fn apply_effect(state: &mut GameState, target: Target, effect: Effect) {
    match effect {
        Effect::None => {}
        Effect::Bounce { velocity_y, rest_y } => {
            state.player.vel.y = velocity_y;
            state.player.pos.y = rest_y;
            state.events.push(GameEvent::Bounce);
        }
        Effect::Collapse => {
            if let Target::Platform(h) = target
                && let Some((_, removed)) = state.registry.remove_platform(h)
            {
                log::debug!(
                    "Fake platform collapsed (took {} hazards, {} boosts)",
                    removed.hazards,
                    removed.boosts
                );
                state.events.push(GameEvent::FakeCollapsed);
            }
        }
        Effect::Stomp { velocity_y, bonus } => {
            if let Target::Hazard(h) = target
                && state.registry.remove_hazard(h).is_some()
            {
                state.player.vel.y = velocity_y;
                state.score += bonus;
                log::debug!("Hazard stomped, score {}", state.score);
                state.events.push(GameEvent::HazardStomped { bonus });
            }
        }
        Effect::Launch { velocity_y } => {
            state.player.vel.y = velocity_y;
            log::debug!("Boost launch at y={:.1}", state.player.pos.y);
            state.events.push(GameEvent::BoostLaunched);
        }
        Effect::Death => state.game_over(GameOverCause::Hazard),
    }
}

/// Jump apex reachable from a bounce, with a little headroom
fn reach(state: &GameState) -> f32 {
    let v = state.tuning.bounce_velocity;
    v * v / (2.0 * state.tuning.gravity) * 0.9
}

/// Steering for idle mode: -1 left, 1 right, 0 hold
///
/// Rising: head for the highest hazard-free solid platform in reach.
/// Falling: head for the nearest hazard-free solid platform below.
fn autopilot(state: &GameState) -> f32 {
    let player = &state.player;
    let bottom = player.bottom();
    let reach = reach(state);

    let candidates = state
        .registry
        .platforms
        .values()
        .filter(|p| p.kind != PlatformKind::Fake && p.hazard.is_none());

    let target = if player.is_falling() {
        candidates
            .filter(|p| p.top() >= bottom)
            .min_by(|a, b| a.top().total_cmp(&b.top()))
    } else {
        candidates
            .filter(|p| p.top() >= bottom - reach)
            .min_by(|a, b| a.top().total_cmp(&b.top()))
    };

    let Some(target) = target else {
        return 0.0;
    };
    let dx = target.pos.x - player.pos.x;
    if dx.abs() < target.half_width() * 0.5 {
        0.0
    } else {
        dx.signum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::sim::entities::{Hazard, HazardMode, Platform};
    use crate::sim::state::GamePhase;
    use crate::tuning::Tuning;
    use glam::Vec2;

    /// Just the start platform under the player
    fn bare_state() -> GameState {
        let tuning = Tuning {
            initial_rows: 0,
            ..Tuning::default()
        };
        GameState::with_tuning(5, tuning)
    }

    fn positions(state: &GameState) -> Vec<Vec2> {
        let mut out = vec![state.player.pos];
        out.extend(state.registry.platforms.values().map(|p| p.pos));
        out.extend(state.registry.hazards.values().map(|h| h.pos));
        out.extend(state.registry.boosts.values().map(|b| b.pos));
        out
    }

    #[test]
    fn test_idle_player_bounces_on_start() {
        let mut state = bare_state();
        let input = TickInput::default();
        let mut bounced = false;
        for _ in 0..240 {
            tick(&mut state, &input, SIM_DT);
            bounced |= state.drain_events().contains(&GameEvent::Bounce);
        }
        assert!(bounced);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_timeout_after_time_limit() {
        let mut state = bare_state();
        let input = TickInput::default();
        let ticks_per_run = state.tuning.time_limit as usize * 120;

        for _ in 0..ticks_per_run - 60 {
            tick(&mut state, &input, SIM_DT);
        }
        assert!(!state.is_game_over());

        for _ in 0..60 {
            tick(&mut state, &input, SIM_DT);
        }
        assert!(state.is_game_over());
        assert_eq!(state.cause, Some(GameOverCause::Timeout));
        assert_eq!(state.time_left(), 0);

        // Frozen: nothing moves any more
        let frozen = positions(&state);
        let ticks = state.time_ticks;
        for _ in 0..120 {
            tick(&mut state, &input, SIM_DT);
        }
        assert_eq!(positions(&state), frozen);
        assert_eq!(state.time_ticks, ticks);
    }

    #[test]
    fn test_stomp_scenario() {
        let mut state = bare_state();
        let p = state
            .registry
            .spawn_platform(Platform::new(PlatformKind::Real, Vec2::new(180.0, 300.0), 1.0));
        let hazard = state
            .registry
            .attach_hazard(Hazard {
                pos: Vec2::new(180.0, 282.5),
                vel: Vec2::ZERO,
                mode: HazardMode::Riding,
                parent: p,
                offset_x: 0.0,
            })
            .unwrap();

        // Falling onto the hazard from well above
        state.player.pos = Vec2::new(180.0, 263.0);
        state.player.vel = Vec2::new(0.0, 300.0);
        state.score = 30;

        tick(&mut state, &TickInput::default(), SIM_DT);

        assert!(!state.registry.hazards.contains(hazard));
        assert_eq!(state.score(), 50);
        assert_eq!(state.player.vel.y, -state.tuning.stomp_velocity);
        assert!(!state.is_game_over());
        assert!(
            state
                .drain_events()
                .contains(&GameEvent::HazardStomped { bonus: 20 })
        );
    }

    #[test]
    fn test_side_hit_kills() {
        let mut state = bare_state();
        let p = state
            .registry
            .spawn_platform(Platform::new(PlatformKind::Real, Vec2::new(180.0, 300.0), 1.0));
        state
            .registry
            .attach_hazard(Hazard {
                pos: Vec2::new(180.0, 282.5),
                vel: Vec2::ZERO,
                mode: HazardMode::Riding,
                parent: p,
                offset_x: 0.0,
            })
            .unwrap();

        state.player.pos = Vec2::new(170.0, 285.0);
        state.player.vel = Vec2::new(0.0, -200.0);
        tick(&mut state, &TickInput::default(), SIM_DT);

        assert!(state.is_game_over());
        assert_eq!(state.cause, Some(GameOverCause::Hazard));
    }

    #[test]
    fn test_fake_collapse_removes_dependents() {
        let mut state = bare_state();
        let fake = state
            .registry
            .spawn_platform(Platform::new(PlatformKind::Fake, Vec2::new(180.0, 300.0), 1.0));
        state
            .registry
            .attach_hazard(Hazard {
                pos: Vec2::new(150.0, 282.5),
                vel: Vec2::ZERO,
                mode: HazardMode::Patrolling,
                parent: fake,
                offset_x: 0.0,
            })
            .unwrap();
        let frontier = state.generator.frontier_y();

        // Player just above the surface, falling; lands away from the hazard
        state.player.pos = Vec2::new(205.0, 280.0);
        state.player.vel = Vec2::new(0.0, 400.0);
        tick(&mut state, &TickInput::default(), SIM_DT);

        assert!(!state.registry.platforms.contains(fake));
        assert_eq!(state.registry.dependents_of(fake), 0);
        assert!(state.registry.hazards.is_empty());
        // No bounce, keeps falling, nothing regenerated
        assert!(state.player.vel.y > 0.0);
        assert_eq!(state.generator.frontier_y(), frontier);
        assert!(state.drain_events().contains(&GameEvent::FakeCollapsed));
    }

    #[test]
    fn test_boost_launch() {
        let mut state = bare_state();
        let p = state
            .registry
            .spawn_platform(Platform::new(PlatformKind::Real, Vec2::new(180.0, 300.0), 1.0));
        state
            .registry
            .attach_boost(crate::sim::entities::Boost {
                pos: Vec2::new(180.0, 287.5),
                vel: Vec2::ZERO,
                parent: p,
                offset_x: 0.0,
            })
            .unwrap();

        state.player.pos = Vec2::new(180.0, 276.0);
        state.player.vel = Vec2::new(0.0, 200.0);
        tick(&mut state, &TickInput::default(), SIM_DT);

        assert_eq!(state.player.vel.y, -state.tuning.boost_velocity);
        // Springs stay put
        assert_eq!(state.registry.boosts.len(), 1);
    }

    #[test]
    fn test_fall_through_bottom() {
        let mut state = bare_state();
        // Nothing to land on
        state.registry.clear();
        state.player.pos = Vec2::new(180.0, 688.0);
        state.player.vel = Vec2::new(0.0, 600.0);
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert!(state.is_game_over());
        assert_eq!(state.cause, Some(GameOverCause::Fell));
    }

    #[test]
    fn test_wraps_horizontally() {
        let mut state = bare_state();
        state.player.pos = Vec2::new(359.0, 450.0);
        let right = TickInput {
            right: true,
            ..Default::default()
        };
        tick(&mut state, &right, SIM_DT);
        assert_eq!(state.player.pos.x, 0.0);

        state.player.pos.x = 1.0;
        let left = TickInput {
            left: true,
            ..Default::default()
        };
        tick(&mut state, &left, SIM_DT);
        assert_eq!(state.player.pos.x, state.tuning.world_width);
    }

    #[test]
    fn test_restart_resets_everything() {
        let mut state = GameState::new(4242);
        state.score = 321;
        state.time_left = 17;
        state.game_over(GameOverCause::Hazard);

        // Ignored without a restart signal
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert!(state.is_game_over());

        let restart = TickInput {
            restart: true,
            ..Default::default()
        };
        tick(&mut state, &restart, SIM_DT);

        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score(), 0);
        assert_eq!(state.time_left(), state.tuning.time_limit);
        assert!(state.countdown.is_active());

        let fresh = GameState::with_tuning(state.seed, state.tuning.clone());
        assert_eq!(state.registry.platforms.len(), fresh.registry.platforms.len());
        assert_eq!(state.registry.hazards.len(), fresh.registry.hazards.len());
        assert_eq!(state.registry.boosts.len(), fresh.registry.boosts.len());
        assert_eq!(state.player.pos, fresh.player.pos);
        assert!(matches!(state.events.last(), Some(GameEvent::Restarted { .. })));
    }

    #[test]
    fn test_score_monotonic_under_play() {
        let mut state = GameState::new(2024);
        let input = TickInput {
            idle_mode: true,
            ..Default::default()
        };
        let mut last = 0;
        for _ in 0..120 * 30 {
            tick(&mut state, &input, SIM_DT);
            assert!(state.score() >= last);
            last = state.score();
            if state.is_game_over() {
                break;
            }
        }
    }

    #[test]
    fn test_determinism() {
        let mut a = GameState::new(99999);
        let mut b = GameState::new(99999);
        let input = TickInput {
            idle_mode: true,
            ..Default::default()
        };
        for _ in 0..1200 {
            tick(&mut a, &input, SIM_DT);
            tick(&mut b, &input, SIM_DT);
        }
        assert_eq!(a.time_ticks, b.time_ticks);
        assert_eq!(a.score(), b.score());
        assert_eq!(a.player.pos, b.player.pos);
    }
}
