//! Obstacle pair generation

use rand::Rng;

use super::state::{ObstaclePair, PipeSkin};
use crate::tuning::Tuning;

/// Build an obstacle pair at `x` with a random gap position
///
/// The top height is `margin + U[0,1) * slack`, floored to a whole pixel,
/// so both segments are at least `margin` tall and the gap is constant.
pub fn generate<R: Rng>(x: f32, rng: &mut R, tuning: &Tuning) -> ObstaclePair {
    let margin = tuning.obstacle_margin;
    let slack = tuning.obstacle_slack().max(0.0);
    let draw: f32 = rng.random();
    let top_height = (margin + draw * slack).floor().max(margin).min(margin + slack);

    let mut pair = ObstaclePair::new(x, top_height, tuning);
    pair.top_style = PipeSkin::random(rng);
    pair.bottom_style = PipeSkin::random(rng);

    log::debug!("Spawned obstacle at x={:.1} top={}", x, top_height);
    pair
}
