//! Computer opponent move selection.
//!
//! The computer plays uniformly at random among legal moves. The source of
//! randomness is injected through [`MoveSelector`] so a game can be
//! replayed exactly from a seed, or driven by a fixed script in tests.

use crate::types::Move;
use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;
use std::collections::VecDeque;
use tracing::{debug, instrument};

/// Chooses the computer's reply from the legal moves.
pub trait MoveSelector {
    /// Picks one of `available`, or `None` when it is empty.
    fn select(&mut self, available: &[Move]) -> Option<Move>;
}

impl<S: MoveSelector + ?Sized> MoveSelector for &mut S {
    fn select(&mut self, available: &[Move]) -> Option<Move> {
        (**self).select(available)
    }
}

impl<S: MoveSelector + ?Sized> MoveSelector for Box<S> {
    fn select(&mut self, available: &[Move]) -> Option<Move> {
        (**self).select(available)
    }
}

/// Uniform random selection backed by ChaCha8.
#[derive(Debug, Clone)]
pub struct RandomSelector {
    inner: ChaCha8Rng,
}

impl RandomSelector {
    /// Creates a reproducible selector: same seed, same choices.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Creates a selector seeded from operating system entropy.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self {
            inner: ChaCha8Rng::from_entropy(),
        }
    }
}

impl MoveSelector for RandomSelector {
    #[instrument(skip(self, available), fields(choices = available.len()))]
    fn select(&mut self, available: &[Move]) -> Option<Move> {
        let choice = available.choose(&mut self.inner).copied();
        debug!(?choice, "Computer selected move");
        choice
    }
}

/// Plays a fixed list of moves in order.
///
/// Scripted moves that are no longer available are skipped; once the script
/// runs out, the first available move is played.
#[derive(Debug, Clone, Default)]
pub struct ScriptedSelector {
    script: VecDeque<Move>,
}

impl ScriptedSelector {
    /// Creates a selector that will try `moves` in order.
    pub fn new(moves: impl IntoIterator<Item = Move>) -> Self {
        Self {
            script: moves.into_iter().collect(),
        }
    }
}

impl MoveSelector for ScriptedSelector {
    fn select(&mut self, available: &[Move]) -> Option<Move> {
        while let Some(next) = self.script.pop_front() {
            if available.contains(&next) {
                return Some(next);
            }
        }
        available.first().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::available_moves;
    use crate::types::Board;

    #[test]
    fn test_same_seed_same_choices() {
        let moves = available_moves(&Board::new());
        let mut a = RandomSelector::seeded(42);
        let mut b = RandomSelector::seeded(42);
        for _ in 0..20 {
            assert_eq!(a.select(&moves), b.select(&moves));
        }
    }

    #[test]
    fn test_choice_is_from_available() {
        let moves = vec![Move::new(2, 2).unwrap(), Move::new(0, 1).unwrap()];
        let mut selector = RandomSelector::from_entropy();
        for _ in 0..20 {
            let choice = selector.select(&moves).unwrap();
            assert!(moves.contains(&choice));
        }
    }

    #[test]
    fn test_empty_available_gives_none() {
        assert_eq!(RandomSelector::seeded(7).select(&[]), None);
        assert_eq!(ScriptedSelector::default().select(&[]), None);
    }

    #[test]
    fn test_scripted_skips_unavailable() {
        let taken = Move::new(0, 0).unwrap();
        let wanted = Move::new(1, 1).unwrap();
        let mut selector = ScriptedSelector::new([taken, wanted]);
        let available = vec![Move::new(0, 1).unwrap(), wanted];
        assert_eq!(selector.select(&available), Some(wanted));
        assert_eq!(selector.select(&available), Some(Move::new(0, 1).unwrap()));
    }
}
