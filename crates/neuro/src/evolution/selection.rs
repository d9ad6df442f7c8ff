use rand::distributions::{Distribution, WeightedIndex};
use rand::seq::index;
use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionStrategy {
    /// Best of a random sample drawn without replacement.
    #[default]
    Tournament,
    /// Fitness-proportionate sampling over shifted scores.
    Roulette,
}

impl SelectionStrategy {
    /// Picks one member index from `scores`. `scores` must be non-empty.
    pub fn select_index(self, scores: &[f32], tournament_size: usize, rng: &mut impl Rng) -> usize {
        match self {
            Self::Tournament => tournament_index(scores, tournament_size, rng),
            Self::Roulette => roulette_index(scores, rng),
        }
    }
}

/// Draws `tournament_size` distinct indices (clamped to the population) and
/// returns the fittest. Ties go to whichever was drawn first.
pub fn tournament_index(scores: &[f32], tournament_size: usize, rng: &mut impl Rng) -> usize {
    let amount = tournament_size.clamp(1, scores.len());
    let mut drawn = index::sample(rng, scores.len(), amount).into_iter();
    let mut best = drawn.next().unwrap_or(0);
    for idx in drawn {
        if scores[idx] > scores[best] {
            best = idx;
        }
    }
    best
}

/// Samples an index with probability proportional to `f - min(f) + 1`.
///
/// Scores that cannot form a distribution (NaN or infinite) fall back to a
/// uniform draw.
pub fn roulette_index(scores: &[f32], rng: &mut impl Rng) -> usize {
    let min = scores.iter().copied().fold(f32::INFINITY, f32::min);
    let shifted = scores.iter().map(|&f| f - min + 1.0);
    match WeightedIndex::new(shifted) {
        Ok(dist) => dist.sample(rng),
        Err(_) => rng.gen_range(0..scores.len()),
    }
}
