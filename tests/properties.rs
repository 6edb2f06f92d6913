//! Property-based tests using proptest
//!
//! Invariants that must hold for every seed and input sequence:
//! - Generation: platforms on screen, one real per row, fakes keep their distance
//! - Difficulty: never gets easier as the score rises
//! - Patrols: hazards stay on their platform
//! - Session: score never decreases, runs are reproducible from the seed

use proptest::prelude::*;

use sky_hop::Tuning;
use sky_hop::consts::SIM_DT;
use sky_hop::sim::entities::{HazardMode, PlatformKind, Player};
use sky_hop::sim::{
    Difficulty, GameState, Registry, SimRng, TickInput, WorldGenerator, physics, tick, update_motion,
};

fn fresh_world(seed: u64) -> (Registry, WorldGenerator, SimRng, Tuning) {
    let tuning = Tuning::default();
    let mut registry = Registry::new();
    let mut generator = WorldGenerator::new(&tuning);
    let mut rng = SimRng::new(seed);
    generator.spawn_start_platform(&mut registry, &tuning);
    generator.generate_initial_column(&mut registry, &mut rng, &tuning, tuning.initial_rows);
    (registry, generator, rng, tuning)
}

fn inputs_strategy() -> impl Strategy<Value = Vec<(bool, bool)>> {
    prop::collection::vec((any::<bool>(), any::<bool>()), 1..600)
}

// ============================================================
// Generation Properties
// ============================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_platforms_stay_on_screen(seed in any::<u64>(), score in 0u64..3000) {
        let (mut registry, mut generator, mut rng, tuning) = fresh_world(seed);
        for _ in 0..60 {
            generator.generate_next_row(&mut registry, &mut rng, &tuning, score);
        }
        for platform in registry.platforms.values() {
            let half = platform.half_width();
            prop_assert!(
                platform.pos.x >= half && platform.pos.x <= tuning.world_width - half,
                "platform at x={} half={} off screen (seed={seed}, score={score})",
                platform.pos.x,
                half
            );
        }
    }

    #[test]
    fn prop_rows_have_one_real_and_spaced_fakes(seed in any::<u64>(), score in 0u64..3000) {
        let (mut registry, mut generator, mut rng, tuning) = fresh_world(seed);
        let mut frontier = generator.frontier_y();
        for _ in 0..60 {
            let row = generator.generate_next_row(&mut registry, &mut rng, &tuning, score);

            let gap = frontier - row.y;
            prop_assert!(gap >= tuning.row_gap_min - 1e-2 && gap <= tuning.row_gap_max + 1e-2);
            frontier = row.y;

            let reals = registry
                .platforms
                .values()
                .filter(|p| p.pos.y == row.y && p.kind == PlatformKind::Real)
                .count();
            prop_assert_eq!(reals, 1);

            let real = registry.platforms.get(row.real).unwrap();
            if let Some(fake) = row.fake {
                let fake = registry.platforms.get(fake).unwrap();
                prop_assert_eq!(fake.kind, PlatformKind::Fake);
                prop_assert_eq!(fake.pos.y, real.pos.y);
                prop_assert!(!real.is_moving());
                prop_assert!((fake.pos.x - real.pos.x).abs() > real.width() + tuning.fake_margin);
            }

            // Hazards and boosts never share a platform
            prop_assert!(real.hazard.is_none() || real.boost.is_none());
        }
    }

    #[test]
    fn prop_difficulty_never_eases(a in 0u64..5000, b in 0u64..5000) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let easy = Difficulty::for_score(lo);
        let hard = Difficulty::for_score(hi);
        prop_assert!(easy.fake_chance <= hard.fake_chance);
        prop_assert!(easy.moving_chance <= hard.moving_chance);
        prop_assert!(easy.hazard_chance <= hard.hazard_chance);
        prop_assert!(easy.boost_chance <= hard.boost_chance);
        prop_assert!(easy.platform_speed_max <= hard.platform_speed_max);
        prop_assert!(easy.patrol_speed_max <= hard.patrol_speed_max);
        prop_assert!(easy.scale >= hard.scale);
    }

    #[test]
    fn prop_patrols_stay_on_platform(seed in any::<u64>()) {
        let (mut registry, mut generator, mut rng, tuning) = fresh_world(seed);
        for _ in 0..40 {
            generator.generate_next_row(&mut registry, &mut rng, &tuning, 500);
        }
        let mut player = Player::new(glam::Vec2::new(0.0, 10_000.0));
        for _ in 0..240 {
            physics::integrate(&mut player, &mut registry, 0.0, SIM_DT);
            update_motion(&mut registry);
            for hazard in registry.hazards.values() {
                if hazard.mode != HazardMode::Patrolling {
                    continue;
                }
                let parent = registry.platforms.get(hazard.parent).unwrap();
                let (left, right) = parent.footprint();
                prop_assert!(hazard.pos.x >= left + hazard.half_size() - 1e-3);
                prop_assert!(hazard.pos.x <= right - hazard.half_size() + 1e-3);
            }
        }
    }
}

// ============================================================
// Session Properties
// ============================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_score_never_decreases(seed in any::<u64>(), inputs in inputs_strategy()) {
        let mut state = GameState::new(seed);
        let mut last = state.score();
        for (left, right) in inputs {
            let input = TickInput { left, right, ..Default::default() };
            tick(&mut state, &input, SIM_DT);
            prop_assert!(state.score() >= last);
            last = state.score();
        }
    }

    #[test]
    fn prop_same_seed_same_run(seed in any::<u64>(), inputs in inputs_strategy()) {
        let mut a = GameState::new(seed);
        let mut b = GameState::new(seed);
        for (left, right) in inputs {
            let input = TickInput { left, right, ..Default::default() };
            tick(&mut a, &input, SIM_DT);
            tick(&mut b, &input, SIM_DT);
        }
        prop_assert_eq!(a.hud(), b.hud());
        prop_assert_eq!(a.player.pos, b.player.pos);
        prop_assert_eq!(a.registry.platforms.len(), b.registry.platforms.len());
        prop_assert_eq!(a.drain_events(), b.drain_events());
    }
}
