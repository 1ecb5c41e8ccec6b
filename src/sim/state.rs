//! Game state and core simulation types
//!
//! Everything the renderer reads between ticks lives here.

use std::collections::VecDeque;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::obstacles;
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the first flap
    Idle,
    /// Active gameplay
    Running,
    /// Run ended; the next flap starts a fresh run
    Ended,
}

/// What ended a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CrashCause {
    Ground,
    Obstacle,
}

/// Discrete outcomes produced by the simulation, drained by the harness
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A run began (from Idle or after a reset)
    RunStarted,
    /// A flap impulse was applied this tick
    Flapped,
    /// An obstacle was passed
    Scored { score: u32 },
    /// Score went past the stored best
    NewBest { best: u32 },
    /// The run ended
    Crashed { cause: CrashCause },
}

/// The player-controlled body
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Avatar {
    /// Horizontal position (fixed for the whole run)
    pub x: f32,
    /// Vertical position of the center (down is positive)
    pub y: f32,
    /// Vertical velocity (pixels/s)
    pub vel: f32,
    pub radius: f32,
    /// Tilt in radians, eased toward a velocity-derived target
    pub rotation: f32,
}

impl Avatar {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            x: tuning.avatar_x,
            y: tuning.avatar_start_y,
            vel: 0.0,
            radius: tuning.avatar_radius,
            rotation: 0.0,
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

/// Cosmetic obstacle variants (renderer only)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PipeSkin {
    #[default]
    Moss,
    Brick,
    Steel,
}

impl PipeSkin {
    const ALL: [PipeSkin; 3] = [PipeSkin::Moss, PipeSkin::Brick, PipeSkin::Steel];

    pub fn random<R: Rng>(rng: &mut R) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }
}

/// One top + bottom barrier with a fixed vertical gap
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObstaclePair {
    /// Left edge
    pub x: f32,
    pub width: f32,
    pub top_height: f32,
    pub gap: f32,
    pub bottom_height: f32,
    /// Scoring latch
    pub passed: bool,
    pub top_style: PipeSkin,
    pub bottom_style: PipeSkin,
}

impl ObstaclePair {
    /// Build a pair with the given top height; the bottom fills down to the ground
    pub fn new(x: f32, top_height: f32, tuning: &Tuning) -> Self {
        Self {
            x,
            width: tuning.obstacle_width,
            top_height,
            gap: tuning.obstacle_gap,
            bottom_height: tuning.ground_line() - tuning.obstacle_gap - top_height,
            passed: false,
            top_style: PipeSkin::default(),
            bottom_style: PipeSkin::default(),
        }
    }

    /// Trailing (right) edge
    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Y of the bottom segment's top face
    #[inline]
    pub fn gap_bottom(&self) -> f32 {
        self.top_height + self.gap
    }

    pub fn top_rect(&self) -> Rect {
        Rect::new(self.x, 0.0, self.width, self.top_height)
    }

    pub fn bottom_rect(&self) -> Rect {
        Rect::new(self.x, self.gap_bottom(), self.width, self.bottom_height)
    }
}

/// Read-only view handed to renderers (serializable for JS hosts)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub avatar: Avatar,
    pub obstacles: Vec<ObstaclePair>,
    pub score: u32,
    pub best: u32,
    pub new_best: bool,
    /// Ticks simulated in the current run
    pub time_ticks: u64,
    pub ground_offset: f32,
    pub backdrop_offset: f32,
}

/// Complete game state for one session
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the RNG was created from
    pub seed: u64,
    pub tuning: Tuning,
    pub phase: GamePhase,
    pub avatar: Avatar,
    /// Time-ordered, leftmost first
    pub obstacles: VecDeque<ObstaclePair>,
    pub score: u32,
    /// Best score ever seen (persisted by the session)
    pub best: u32,
    /// Current run has beaten the previous best
    pub new_best: bool,
    /// Flap latched since the last tick
    pub pending_flap: bool,
    /// Seconds simulated in the current run
    pub run_time: f32,
    /// Ticks simulated in the current run
    pub time_ticks: u64,
    /// Ground texture scroll (wraps at `GROUND_TILE`)
    pub ground_offset: f32,
    /// Backdrop parallax scroll (wraps at the playfield width)
    pub backdrop_offset: f32,
    pub(crate) rng: Pcg32,
    pub(crate) events: Vec<GameEvent>,
}

impl GameState {
    /// Create an idle game with the given seed and previously stored best
    pub fn new(seed: u64, best: u32, tuning: Tuning) -> Self {
        let avatar = Avatar::new(&tuning);
        Self {
            seed,
            tuning,
            phase: GamePhase::Idle,
            avatar,
            obstacles: VecDeque::new(),
            score: 0,
            best,
            new_best: false,
            pending_flap: false,
            run_time: 0.0,
            time_ticks: 0,
            ground_offset: 0.0,
            backdrop_offset: 0.0,
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
        }
    }

    /// Enter Running: fresh avatar, fresh obstacles, score zeroed
    pub fn start_run(&mut self) {
        self.avatar = Avatar::new(&self.tuning);
        self.seed_obstacles();
        self.score = 0;
        self.run_time = 0.0;
        self.time_ticks = 0;
        self.phase = GamePhase::Running;
        self.events.push(GameEvent::RunStarted);
        log::info!("Run started (seed {}, best {})", self.seed, self.best);
    }

    /// Return to Idle, clearing everything a run owns (best is kept)
    pub fn reset(&mut self) {
        self.avatar = Avatar::new(&self.tuning);
        self.obstacles.clear();
        self.score = 0;
        self.new_best = false;
        self.pending_flap = false;
        self.run_time = 0.0;
        self.time_ticks = 0;
        self.phase = GamePhase::Idle;
    }

    /// Replace the obstacle sequence with the opening look-ahead buffer
    pub fn seed_obstacles(&mut self) {
        self.obstacles.clear();
        let start_x = self.tuning.playfield_width + self.tuning.first_obstacle_offset;
        for i in 0..self.tuning.initial_obstacles {
            let x = start_x + i as f32 * self.tuning.obstacle_spacing;
            let pair = obstacles::generate(x, &mut self.rng, &self.tuning);
            self.obstacles.push_back(pair);
        }
    }

    /// End the current run
    pub(crate) fn end_run(&mut self, cause: CrashCause) {
        self.phase = GamePhase::Ended;
        self.pending_flap = false;
        self.events.push(GameEvent::Crashed { cause });
        log::info!(
            "Game over ({:?}): score {}, best {}",
            cause,
            self.score,
            self.best
        );
    }

    /// Take the events produced since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.phase,
            avatar: self.avatar,
            obstacles: self.obstacles.iter().copied().collect(),
            score: self.score,
            best: self.best,
            new_best: self.new_best,
            time_ticks: self.time_ticks,
            ground_offset: self.ground_offset,
            backdrop_offset: self.backdrop_offset,
        }
    }
}
