use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::state::SuccessorTable;

/// Synthetic token seeding the context of every sentence.
///
/// Never appears in real input; it is a valid first element of a context
/// key and anchors generation.
pub const START_MARKER: &str = "@";

/// Token ending a sentence.
///
/// Recorded as an ordinary successor; drawing it during generation is how
/// a sentence ends, and observing it during building resets the window.
pub const TERMINATOR: &str = ".";

/// An opaque normalized token, as handed over by the external tokenizer.
pub type Token = String;

/// Ordered two-token context window, the key of the frequency table.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ContextKey {
	pub first: Token,
	pub second: Token,
}

impl ContextKey {
	/// Builds the key `(w1, w2)`.
	pub fn new(first: impl Into<Token>, second: impl Into<Token>) -> Self {
		Self { first: first.into(), second: second.into() }
	}

	/// Slides the window one token forward: `(w1, w2)` + `w3` → `(w2, w3)`.
	pub fn shift(self, next: impl Into<Token>) -> Self {
		Self { first: self.second, second: next.into() }
	}
}

/// Order-3 chain frequency table.
///
/// Maps every observed two-token context to the frequency table of the
/// tokens that followed it. The nesting of the conceptual
/// `w1 → w2 → w3 → count` mapping is flattened into a single well-typed
/// context key; the persisted interchange form keeps the nested shape.
///
/// # Responsibilities
/// - Accumulate transition counts fed in by the builder
/// - Answer successor lookups during generation
/// - Merge with models built from other corpora
///
/// # Invariants
/// - Every stored count is >= 1; zero-count triples are never entries
/// - If built from at least one non-empty sentence, some context
///   `("@", w2)` exists
/// - Keys are unique per level; no ordering is guaranteed or relied upon
///
/// A model is a plain value with no external resources. Concurrent writers
/// are not synchronized internally; callers sharing one model across
/// threads must serialize access.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct ChainModel {
	/// Mapping from a context window to its successor frequency table.
	entries: HashMap<ContextKey, SuccessorTable>,
}

impl ChainModel {
	/// Creates an empty model.
	pub fn new() -> Self {
		Self { entries: HashMap::new() }
	}

	/// Number of distinct recorded contexts.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// True when no context has been recorded.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Records one observation of `successor` after `context`.
	pub(crate) fn record(&mut self, context: ContextKey, successor: impl Into<Token>) {
		self.add_count(context, successor, 1);
	}

	/// Adds `count` observations of `successor` after `context`.
	///
	/// Zero counts are dropped; the table never stores them.
	pub(crate) fn add_count(&mut self, context: ContextKey, successor: impl Into<Token>, count: u64) {
		if count == 0 {
			return;
		}
		self.entries.entry(context).or_default().add(successor.into(), count);
	}

	/// Looks up the successor table recorded for `context`.
	pub(crate) fn successors(&self, context: &ContextKey) -> Option<&SuccessorTable> {
		self.entries.get(context)
	}

	/// Distinct tokens observed right after the start marker.
	///
	/// These are the candidates for the first token of a generated
	/// sentence; an empty result means the model has no start context.
	pub(crate) fn start_tokens(&self) -> Vec<Token> {
		self.entries
			.keys()
			.filter(|key| key.first == START_MARKER)
			.map(|key| key.second.clone())
			.collect()
	}

	/// Count recorded for the triple `(w1, w2, w3)`, zero when absent.
	pub fn count(&self, w1: &str, w2: &str, w3: &str) -> u64 {
		self.entries
			.get(&ContextKey::new(w1, w2))
			.map_or(0, |table| table.count(w3))
	}

	/// Iterates over all `(context, successor, count)` entries.
	pub fn iter(&self) -> impl Iterator<Item = (&ContextKey, &Token, u64)> {
		self.entries
			.iter()
			.flat_map(|(key, table)| table.iter().map(move |(token, count)| (key, token, count)))
	}

	/// Merges another model into this one.
	///
	/// Counts of matching `(context, successor)` entries are summed;
	/// entries unknown to `self` are inserted. Used for incremental
	/// accumulation across corpora and by the parallel corpus build.
	pub fn merge(&mut self, other: &Self) {
		for (key, table) in &other.entries {
			self.entries.entry(key.clone()).or_default().merge(table);
		}
	}
}
