use crate::error::{ChainError, Result};
use super::chain_model::{ChainModel, ContextKey, START_MARKER, TERMINATOR, Token};
use super::random::RandomSource;
use super::state::SuccessorTable;

/// Successor selection strategy.
///
/// `Uniform` reproduces the reference behavior of the chain: one vote per
/// distinct successor token, observation counts ignored. `Weighted` draws
/// proportionally to the counts, which is what a frequency-weighted chain
/// would do. The default is `Uniform`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Selection {
	#[default]
	Uniform,
	Weighted,
}

/// Why a generated sentence stopped growing.
///
/// Every variant is a successful outcome; an incompletely terminated
/// sentence is a valid result of a sparse model, not an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StopReason {
	/// The terminator token was drawn.
	Terminator,
	/// The current context has no recorded successors.
	SparseContext,
	/// The step budget ran out before a terminator was drawn.
	BudgetExhausted,
}

/// A generated token sequence and the reason the walk stopped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sentence {
	pub tokens: Vec<Token>,
	pub stop: StopReason,
}

impl Sentence {
	/// Joins the tokens without separators.
	pub fn concat(&self) -> String {
		self.tokens.concat()
	}
}

/// Random-walk sentence generator over a [`ChainModel`].
///
/// # Responsibilities
/// - Anchor the walk on the start-marker context
/// - Draw successors through a caller-supplied [`RandomSource`]
/// - Stop on the terminator, on a missing context, or at the step budget
///
/// The step budget is mandatory: the walk has no other guaranteed
/// termination on a model where no terminator is reachable from the
/// current context.
#[derive(Clone, Copy, Debug)]
pub struct SentenceGenerator {
	max_steps: usize,
	selection: Selection,
}

impl SentenceGenerator {
	/// Creates a generator bounded to `max_steps` drawn successors per
	/// walk, with uniform selection.
	///
	/// # Errors
	/// Returns `ChainError::Config` if `max_steps` is zero.
	pub fn new(max_steps: usize) -> Result<Self> {
		if max_steps == 0 {
			return Err(ChainError::Config("max_steps must be >= 1".to_owned()));
		}
		Ok(Self { max_steps, selection: Selection::Uniform })
	}

	/// Replaces the successor selection strategy.
	pub fn with_selection(mut self, selection: Selection) -> Self {
		self.selection = selection;
		self
	}

	/// Draws one successor from `table` under the configured strategy.
	fn draw(&self, table: &SuccessorTable, rng: &mut dyn RandomSource) -> Result<Token> {
		match self.selection {
			Selection::Uniform => rng.choose(&table.candidates()),
			Selection::Weighted => rng.choose_weighted(&table.weighted()),
		}
	}

	/// Walks `model` from the start context and returns the generated
	/// sentence.
	///
	/// The first token is drawn uniformly among the tokens observed right
	/// after the start marker; every further token is drawn from the
	/// successor table of the current two-token context under the
	/// configured strategy. The walk stops when the terminator is drawn,
	/// when the current context has no entry (sparse model), or when the
	/// step budget runs out; the outcome is reported on the sentence.
	///
	/// # Errors
	/// - `ChainError::EmptyModel` if the model has no start context
	/// - `ChainError::EmptyCandidates` if a successor table is empty
	///   (unreachable while the model invariants hold)
	pub fn generate(&self, model: &ChainModel, rng: &mut dyn RandomSource) -> Result<Sentence> {
		let starts = model.start_tokens();
		if starts.is_empty() {
			return Err(ChainError::EmptyModel);
		}

		let first = rng.choose(&starts)?;
		let mut context = ContextKey::new(START_MARKER, first.clone());
		let mut tokens = vec![first];

		let second = match model.successors(&context) {
			Some(table) => self.draw(table, rng)?,
			// Start contexts always carry at least one successor; stop
			// early instead of failing if this one does not.
			None => return Ok(Sentence { tokens, stop: StopReason::SparseContext }),
		};
		context = context.shift(second.clone());
		tokens.push(second);

		for _ in 0..self.max_steps {
			let table = match model.successors(&context) {
				Some(table) => table,
				None => return Ok(Sentence { tokens, stop: StopReason::SparseContext }),
			};

			let next = self.draw(table, rng)?;
			tokens.push(next.clone());

			if next == TERMINATOR {
				return Ok(Sentence { tokens, stop: StopReason::Terminator });
			}
			context = context.shift(next);
		}

		Ok(Sentence { tokens, stop: StopReason::BudgetExhausted })
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::builder::build;
	use crate::model::random::{Lexicographic, RngSource};

	fn tokens(words: &[&str]) -> Vec<Token> {
		words.iter().map(|word| (*word).to_owned()).collect()
	}

	fn model_from(words: &[&str]) -> ChainModel {
		build(tokens(words), ChainModel::new())
	}

	#[test]
	fn zero_step_budget_is_rejected() {
		assert!(matches!(
			SentenceGenerator::new(0),
			Err(ChainError::Config(_))
		));
	}

	#[test]
	fn empty_model_is_an_explicit_error() {
		let generator = SentenceGenerator::new(100).unwrap();
		let result = generator.generate(&ChainModel::new(), &mut Lexicographic);
		assert!(matches!(result, Err(ChainError::EmptyModel)));
	}

	#[test]
	fn deterministic_walk_replays_the_sentence() {
		let model = model_from(&["a", "b", "c", "."]);
		let generator = SentenceGenerator::new(100).unwrap();

		let sentence = generator.generate(&model, &mut Lexicographic).unwrap();
		assert_eq!(sentence.tokens, tokens(&["a", "b", "c", "."]));
		assert_eq!(sentence.stop, StopReason::Terminator);
		assert_eq!(sentence.concat(), "abc.");
	}

	#[test]
	fn missing_context_stops_the_walk_early() {
		// No terminator: the last trigram's context pair is never
		// re-anchored, so the walk runs off the table.
		let model = model_from(&["a", "b", "c"]);
		let generator = SentenceGenerator::new(100).unwrap();

		let sentence = generator.generate(&model, &mut Lexicographic).unwrap();
		assert_eq!(sentence.tokens, tokens(&["a", "b", "c"]));
		assert_eq!(sentence.stop, StopReason::SparseContext);
	}

	#[test]
	fn step_budget_bounds_a_terminator_free_cycle() {
		// (x, y) → x and (y, x) → y loop forever without a terminator.
		let model = model_from(&["x", "y", "x", "y"]);
		let generator = SentenceGenerator::new(7).unwrap();

		let sentence = generator.generate(&model, &mut Lexicographic).unwrap();
		assert_eq!(sentence.stop, StopReason::BudgetExhausted);
		assert_eq!(sentence.tokens.len(), 2 + 7);
	}

	#[test]
	fn selection_strategy_changes_the_draw() {
		let mut model = model_from(&["a", "b", "x", "."]);
		for _ in 0..3 {
			model = build(tokens(&["a", "b", "y", "."]), model);
		}

		let uniform = SentenceGenerator::new(100).unwrap();
		let sentence = uniform.generate(&model, &mut Lexicographic).unwrap();
		// Uniform over distinct successors: the smallest token wins.
		assert_eq!(sentence.tokens, tokens(&["a", "b", "x", "."]));

		let weighted = SentenceGenerator::new(100)
			.unwrap()
			.with_selection(Selection::Weighted);
		let sentence = weighted.generate(&model, &mut Lexicographic).unwrap();
		// Weighted: "y" carries three observations against one.
		assert_eq!(sentence.tokens, tokens(&["a", "b", "y", "."]));
	}

	#[test]
	fn seeded_generation_is_reproducible() {
		let model = model_from(&[
			"the", "cat", "sat", ".", "the", "dog", "ran", ".", "the", "cat", "ran", ".",
		]);
		let generator = SentenceGenerator::new(50).unwrap();

		let first = generator
			.generate(&model, &mut RngSource::seeded(99))
			.unwrap();
		let second = generator
			.generate(&model, &mut RngSource::seeded(99))
			.unwrap();
		assert_eq!(first, second);
	}
}
