//! Simulation tick and flap input
//!
//! Core game loop that advances the simulation by one frame's elapsed time.

use super::collision::avatar_hits_obstacle;
use super::obstacles;
use super::physics::{self, Contact};
use super::state::{CrashCause, GameEvent, GamePhase, GameState};
use crate::consts::GROUND_TILE;

/// Apply the single input event
///
/// Idle starts a run, Running latches an impulse for the next tick, and
/// Ended resets everything but the best score before starting over.
pub fn flap(state: &mut GameState) {
    match state.phase {
        GamePhase::Idle => state.start_run(),
        GamePhase::Running => {}
        GamePhase::Ended => {
            state.reset();
            state.start_run();
        }
    }
    state.pending_flap = true;
}

/// Advance the game state by `dt_ms` milliseconds
pub fn tick(state: &mut GameState, dt_ms: f32) {
    if state.phase != GamePhase::Running {
        return;
    }

    let dt_ms = if dt_ms.is_finite() {
        dt_ms.max(0.0).min(state.tuning.max_frame_ms)
    } else {
        0.0
    };
    let dt = dt_ms / 1000.0;

    state.time_ticks += 1;
    state.run_time += dt;

    // Avatar first; a ground hit ends the run before anything else moves
    let flapped = std::mem::take(&mut state.pending_flap);
    if flapped {
        state.events.push(GameEvent::Flapped);
    }
    if physics::integrate(&mut state.avatar, dt, flapped, &state.tuning) == Contact::Ground {
        state.end_run(CrashCause::Ground);
        return;
    }

    scroll_obstacles(state, dt);
    advance_parallax(state, dt);
    retire_obstacles(state);
    spawn_obstacles(state);
    score_and_collide(state);
}

fn scroll_obstacles(state: &mut GameState, dt: f32) {
    let dx = state.tuning.scroll_speed * dt;
    for pair in &mut state.obstacles {
        pair.x -= dx;
    }
}

fn advance_parallax(state: &mut GameState, dt: f32) {
    let dx = state.tuning.scroll_speed * dt;
    state.ground_offset = (state.ground_offset + dx) % GROUND_TILE;
    state.backdrop_offset =
        (state.backdrop_offset + dx * state.tuning.parallax_factor) % state.tuning.playfield_width;
}

/// Drop obstacles whose trailing edge has left the screen (head only)
fn retire_obstacles(state: &mut GameState) {
    let limit = -state.tuning.retire_margin;
    while state.obstacles.front().is_some_and(|p| p.right() < limit) {
        if let Some(pair) = state.obstacles.pop_front() {
            log::debug!("Retired obstacle (x={:.1})", pair.x);
        }
    }
}

/// Keep the look-ahead buffer topped up at the tail
fn spawn_obstacles(state: &mut GameState) {
    let threshold = state.tuning.playfield_width - state.tuning.obstacle_spacing;
    match state.obstacles.back().map(|p| p.x) {
        Some(tail_x) if tail_x < threshold => {
            let x = tail_x + state.tuning.obstacle_spacing;
            let pair = obstacles::generate(x, &mut state.rng, &state.tuning);
            state.obstacles.push_back(pair);
        }
        Some(_) => {}
        None => state.seed_obstacles(),
    }
}

fn score_and_collide(state: &mut GameState) {
    let avatar = state.avatar;
    let mut crashed = false;

    for pair in state.obstacles.iter_mut() {
        if !pair.passed && avatar.x > pair.right() {
            pair.passed = true;
            state.score += 1;
            state.events.push(GameEvent::Scored { score: state.score });

            if state.score > state.best {
                state.best = state.score;
                if !state.new_best {
                    log::info!("New best score this run");
                }
                state.new_best = true;
                state.events.push(GameEvent::NewBest { best: state.best });
            }
        }

        if avatar_hits_obstacle(&avatar, pair) {
            crashed = true;
        }
    }

    if crashed {
        state.end_run(CrashCause::Obstacle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::state::ObstaclePair;
    use crate::tuning::Tuning;

    const FRAME_MS: f32 = 16.0;

    /// No gravity and a gap pinned around the avatar's start height:
    /// the avatar hovers and never touches anything
    fn hover_tuning() -> Tuning {
        Tuning {
            gravity: 0.0,
            flap_impulse: 0.0,
            obstacle_margin: (GAME_HEIGHT - GROUND_HEIGHT - OBSTACLE_GAP) / 2.0,
            ..Default::default()
        }
    }

    fn running(tuning: Tuning) -> GameState {
        let mut state = GameState::new(1234, 0, tuning);
        flap(&mut state);
        state.drain_events();
        state
    }

    #[test]
    fn test_tick_is_noop_when_idle() {
        let mut state = GameState::new(1, 0, Tuning::default());
        let before = state.avatar;
        tick(&mut state, FRAME_MS);
        assert_eq!(state.phase, GamePhase::Idle);
        assert_eq!(state.avatar, before);
        assert_eq!(state.time_ticks, 0);
    }

    #[test]
    fn test_first_flap_starts_run() {
        let mut state = GameState::new(1, 5, Tuning::default());
        flap(&mut state);
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.obstacles.len(), INITIAL_OBSTACLES);
        assert_eq!(state.obstacles[0].x, GAME_WIDTH + FIRST_OBSTACLE_OFFSET);
        assert_eq!(state.score, 0);
        assert_eq!(state.drain_events(), vec![GameEvent::RunStarted]);

        tick(&mut state, FRAME_MS);
        assert_eq!(state.avatar.vel, FLAP_IMPULSE);
        assert_eq!(state.drain_events(), vec![GameEvent::Flapped]);
    }

    #[test]
    fn test_flaps_collapse_within_a_tick() {
        let mut state = running(Tuning::default());
        tick(&mut state, FRAME_MS);
        flap(&mut state);
        flap(&mut state);
        flap(&mut state);
        tick(&mut state, FRAME_MS);
        let flaps = state
            .drain_events()
            .into_iter()
            .filter(|e| *e == GameEvent::Flapped)
            .count();
        assert_eq!(flaps, 2);
        assert_eq!(state.avatar.vel, FLAP_IMPULSE);
    }

    #[test]
    fn test_large_dt_is_clamped() {
        let mut a = running(Tuning::default());
        let mut b = a.clone();
        tick(&mut a, 5000.0);
        tick(&mut b, MAX_FRAME_MS);
        assert_eq!(a.avatar, b.avatar);
        assert_eq!(a.obstacles[0].x, b.obstacles[0].x);
    }

    #[test]
    fn test_falling_to_ground_ends_run() {
        let mut state = running(Tuning::default());
        state.pending_flap = false;
        for _ in 0..600 {
            tick(&mut state, FRAME_MS);
            if state.phase == GamePhase::Ended {
                break;
            }
        }
        assert_eq!(state.phase, GamePhase::Ended);
        assert_eq!(state.avatar.y, state.tuning.ground_line() - AVATAR_RADIUS);
        assert!(
            state
                .drain_events()
                .contains(&GameEvent::Crashed { cause: CrashCause::Ground })
        );

        // Ended gates further ticks
        let frozen = state.avatar;
        tick(&mut state, FRAME_MS);
        assert_eq!(state.avatar, frozen);
    }

    #[test]
    fn test_obstacles_recycle_at_steady_state() {
        let mut state = running(hover_tuning());
        let moved = SCROLL_SPEED * FRAME_MS / 1000.0;
        let mut retired = 0;
        let mut appended = 0;

        // Long enough for many pairs to cross the whole screen
        for _ in 0..2000 {
            let len_before = state.obstacles.len();
            let tail_before = state.obstacles.back().map(|p| p.x).unwrap();
            tick(&mut state, FRAME_MS);
            assert_eq!(state.phase, GamePhase::Running);

            let tail_after = state.obstacles.back().map(|p| p.x).unwrap();
            let appended_now = if (tail_after - (tail_before - moved)).abs() > 1.0 {
                // Fresh pair lands one spacing behind the old tail
                assert!((tail_after - (tail_before - moved + OBSTACLE_SPACING)).abs() < 0.01);
                assert!(tail_after < GAME_WIDTH);
                1
            } else {
                0
            };
            appended += appended_now;
            retired += len_before + appended_now - state.obstacles.len();

            assert!(!state.obstacles.is_empty());
            assert!(state.obstacles.iter().all(|p| p.right() >= -RETIRE_MARGIN));
        }

        assert!(retired > INITIAL_OBSTACLES);
        assert!(appended > 0);
        // Every pair ever created is either retired or still queued
        assert_eq!(INITIAL_OBSTACLES + appended, retired + state.obstacles.len());
        // Positions stay ordered head to tail
        let xs: Vec<f32> = state.obstacles.iter().map(|p| p.x).collect();
        assert!(xs.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_each_retirement_is_refilled_by_one_append() {
        let mut state = running(hover_tuning());
        let moved = SCROLL_SPEED * FRAME_MS / 1000.0;
        let max_wait = (OBSTACLE_SPACING / moved).ceil() as usize + 1;
        let mut steady = false;
        // (length before the retirement, ticks waited since)
        let mut refill: Option<(usize, usize)> = None;
        let mut pairings = 0;

        for _ in 0..3000 {
            let len_before = state.obstacles.len();
            tick(&mut state, FRAME_MS);
            let len_after = state.obstacles.len();

            if len_after > len_before {
                if let Some((target, _)) = refill.take() {
                    assert_eq!(len_after, target);
                    pairings += 1;
                }
                steady = true;
            } else if len_after < len_before {
                assert!(refill.is_none());
                assert_eq!(len_after, len_before - 1);
                if steady {
                    refill = Some((len_before, 0));
                }
            } else if let Some((_, waited)) = refill.as_mut() {
                *waited += 1;
                assert!(*waited <= max_wait);
            }
        }

        assert!(pairings > 3);
    }

    #[test]
    fn test_head_retires_after_passing_left_edge() {
        let mut state = running(hover_tuning());
        let moved = SCROLL_SPEED * FRAME_MS / 1000.0;
        let head_x = state.obstacles[0].x;
        let second_x = state.obstacles[1].x;
        let travel = head_x + OBSTACLE_WIDTH + RETIRE_MARGIN;
        let ticks = (travel / moved).ceil() as usize + 1;
        for _ in 0..ticks {
            tick(&mut state, FRAME_MS);
        }

        // Old head is gone, the second pair leads, and no pair was appended yet
        assert_eq!(state.obstacles.len(), INITIAL_OBSTACLES - 1);
        let front = state.obstacles.front().unwrap();
        assert!((front.x - (second_x - ticks as f32 * moved)).abs() < 0.05);
    }

    #[test]
    fn test_score_counts_each_pair_once() {
        let mut state = running(hover_tuning());
        let mut passed_seen = 0;
        for _ in 0..3000 {
            tick(&mut state, FRAME_MS);
            for event in state.drain_events() {
                if let GameEvent::Scored { score } = event {
                    passed_seen += 1;
                    assert_eq!(score, passed_seen);
                }
            }
        }
        assert_eq!(state.phase, GamePhase::Running);
        assert!(state.score > 5);
        assert_eq!(state.score, passed_seen);
    }

    #[test]
    fn test_score_latches_when_avatar_clears_trailing_edge() {
        let mut state = running(hover_tuning());
        let tuning = state.tuning.clone();
        let mut pair = ObstaclePair::new(0.0, tuning.obstacle_margin, &tuning);
        // Trailing edge sits just behind the avatar after one frame
        pair.x = AVATAR_X - OBSTACLE_WIDTH + 1.0;
        state.obstacles.push_front(pair);

        tick(&mut state, FRAME_MS);
        assert_eq!(state.score, 1);
        assert!(state.obstacles[0].passed);

        tick(&mut state, FRAME_MS);
        tick(&mut state, FRAME_MS);
        assert_eq!(state.score, 1);
    }

    #[test]
    fn test_new_best_sets_flag_and_best() {
        let mut state = running(hover_tuning());
        state.best = 1;
        let mut new_best_events = Vec::new();
        while state.score < 3 {
            tick(&mut state, FRAME_MS);
            new_best_events.extend(
                state
                    .drain_events()
                    .into_iter()
                    .filter(|e| matches!(e, GameEvent::NewBest { .. })),
            );
        }
        assert!(state.new_best);
        assert_eq!(state.best, 3);
        assert_eq!(
            new_best_events,
            vec![GameEvent::NewBest { best: 2 }, GameEvent::NewBest { best: 3 }]
        );
    }

    #[test]
    fn test_obstacle_hit_ends_run() {
        let mut state = running(Tuning::default());
        let tuning = state.tuning.clone();
        // Top segment reaches well below the avatar
        let mut wall = ObstaclePair::new(0.0, 350.0, &tuning);
        wall.x = AVATAR_X - 10.0;
        state.obstacles.push_front(wall);

        tick(&mut state, FRAME_MS);
        assert_eq!(state.phase, GamePhase::Ended);
        assert!(
            state
                .drain_events()
                .contains(&GameEvent::Crashed { cause: CrashCause::Obstacle })
        );
    }

    #[test]
    fn test_flap_from_ended_resets_run() {
        let mut state = running(hover_tuning());
        while state.score < 2 {
            tick(&mut state, FRAME_MS);
        }
        state.end_run(CrashCause::Obstacle);
        assert!(state.new_best);
        let best = state.best;

        flap(&mut state);
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.score, 0);
        assert_eq!(state.best, best);
        assert!(!state.new_best);
        assert_eq!(state.obstacles.len(), INITIAL_OBSTACLES);
        assert!(state.obstacles.iter().all(|p| !p.passed));
        assert_eq!(state.avatar.y, AVATAR_START_Y);
    }

    #[test]
    fn test_same_seed_same_run() {
        let mut a = GameState::new(99999, 0, Tuning::default());
        let mut b = GameState::new(99999, 0, Tuning::default());
        for i in 0..400 {
            if i % 22 == 0 {
                flap(&mut a);
                flap(&mut b);
            }
            tick(&mut a, FRAME_MS);
            tick(&mut b, FRAME_MS);
        }
        assert_eq!(a.phase, b.phase);
        assert_eq!(a.score, b.score);
        assert_eq!(a.avatar, b.avatar);
        assert_eq!(a.obstacles, b.obstacles);
    }

    #[test]
    fn test_parallax_wraps() {
        let mut state = running(hover_tuning());
        for _ in 0..500 {
            tick(&mut state, FRAME_MS);
        }
        assert!(state.ground_offset >= 0.0 && state.ground_offset < GROUND_TILE);
        assert!(state.backdrop_offset >= 0.0 && state.backdrop_offset < GAME_WIDTH);
    }
}
