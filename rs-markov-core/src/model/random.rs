use rand::rngs::{StdRng, ThreadRng};
use rand::{Rng, SeedableRng};

use crate::error::{ChainError, Result};
use super::chain_model::Token;

/// Pluggable choice primitive over a finite candidate set.
///
/// Generation never reads ambient randomness; a source is passed into
/// every operation, so tests can substitute a deterministic one.
pub trait RandomSource {
	/// Uniform choice among distinct candidates.
	///
	/// # Errors
	/// Returns `ChainError::EmptyCandidates` if `candidates` is empty.
	fn choose(&mut self, candidates: &[Token]) -> Result<Token>;

	/// Count-proportional choice.
	///
	/// # Errors
	/// Returns `ChainError::EmptyCandidates` if `candidates` is empty or
	/// every weight is zero.
	fn choose_weighted(&mut self, candidates: &[(Token, u64)]) -> Result<Token>;
}

/// `RandomSource` backed by any [`rand::Rng`].
#[derive(Debug)]
pub struct RngSource<R: Rng> {
	rng: R,
}

impl RngSource<ThreadRng> {
	/// Source over the thread-local generator.
	pub fn thread() -> Self {
		Self { rng: rand::rng() }
	}
}

impl RngSource<StdRng> {
	/// Deterministic source seeded from a fixed value.
	///
	/// Two sources built from the same seed produce the same choices,
	/// which makes generation reproducible.
	pub fn seeded(seed: u64) -> Self {
		Self { rng: StdRng::seed_from_u64(seed) }
	}
}

impl<R: Rng> RandomSource for RngSource<R> {
	fn choose(&mut self, candidates: &[Token]) -> Result<Token> {
		if candidates.is_empty() {
			return Err(ChainError::EmptyCandidates);
		}
		let index = self.rng.random_range(0..candidates.len());
		Ok(candidates[index].clone())
	}

	fn choose_weighted(&mut self, candidates: &[(Token, u64)]) -> Result<Token> {
		// This performs an O(n) cumulative scan over the candidates.
		let total: u64 = candidates.iter().map(|(_, count)| count).sum();
		if total == 0 {
			return Err(ChainError::EmptyCandidates);
		}

		let mut remaining = self.rng.random_range(0..total);
		let mut fallback = None;
		for (token, count) in candidates {
			if remaining < *count {
				return Ok(token.clone());
			}
			remaining -= count;
			fallback = Some(token.clone());
		}

		// Should not happen while counts sum to `total`, kept for safety.
		fallback.ok_or(ChainError::EmptyCandidates)
	}
}

/// Deterministic source for reproducible tests.
///
/// Uniform choice picks the smallest candidate; weighted choice picks the
/// highest count, smallest token on ties.
#[derive(Clone, Copy, Debug, Default)]
pub struct Lexicographic;

impl RandomSource for Lexicographic {
	fn choose(&mut self, candidates: &[Token]) -> Result<Token> {
		candidates.iter().min().cloned().ok_or(ChainError::EmptyCandidates)
	}

	fn choose_weighted(&mut self, candidates: &[(Token, u64)]) -> Result<Token> {
		candidates
			.iter()
			.filter(|(_, count)| *count > 0)
			.max_by(|a, b| a.1.cmp(&b.1).then_with(|| b.0.cmp(&a.0)))
			.map(|(token, _)| token.clone())
			.ok_or(ChainError::EmptyCandidates)
	}
}
