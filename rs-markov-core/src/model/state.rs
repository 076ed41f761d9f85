use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::chain_model::Token;

/// Successor frequency table of a single two-token context window.
///
/// Conceptually a node in the chain where outgoing edges are weighted by
/// their number of observations.
///
/// ## Responsibilities
/// - Accumulate transition occurrences during building
/// - Expose candidates for uniform or count-weighted sampling
/// - Merge with the table of the same context from another model
///
/// ## Invariants
/// - Every stored count is strictly positive
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct SuccessorTable {
	/// Observed successors indexed by token.
	/// Example: { "weather" => 42, "." => 3 }
	counts: HashMap<Token, u64>,
}

impl SuccessorTable {
	/// Records `count` occurrences of a transition toward `successor`.
	///
	/// Zero counts are dropped; the table never stores them.
	pub fn add(&mut self, successor: Token, count: u64) {
		if count == 0 {
			return;
		}
		*self.counts.entry(successor).or_insert(0) += count;
	}

	/// Distinct successor tokens, without their counts.
	pub fn candidates(&self) -> Vec<Token> {
		self.counts.keys().cloned().collect()
	}

	/// Successor tokens paired with their observation counts.
	pub fn weighted(&self) -> Vec<(Token, u64)> {
		self.counts.iter().map(|(token, count)| (token.clone(), *count)).collect()
	}

	/// Count recorded for one successor, zero when absent.
	pub fn count(&self, successor: &str) -> u64 {
		self.counts.get(successor).copied().unwrap_or(0)
	}

	/// Iterates over `(successor, count)` pairs.
	pub fn iter(&self) -> impl Iterator<Item = (&Token, u64)> {
		self.counts.iter().map(|(token, count)| (token, *count))
	}

	/// Merges another table into this one, summing matching counts.
	pub fn merge(&mut self, other: &Self) {
		for (successor, count) in &other.counts {
			*self.counts.entry(successor.clone()).or_insert(0) += *count;
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn add_accumulates_and_drops_zero() {
		let mut table = SuccessorTable::default();
		table.add("next".to_owned(), 1);
		table.add("next".to_owned(), 2);
		table.add("ghost".to_owned(), 0);

		assert_eq!(table.count("next"), 3);
		assert_eq!(table.count("ghost"), 0);
		assert_eq!(table.candidates(), vec!["next".to_owned()]);
	}

	#[test]
	fn merge_sums_counts() {
		let mut left = SuccessorTable::default();
		left.add("a".to_owned(), 2);
		left.add("b".to_owned(), 1);

		let mut right = SuccessorTable::default();
		right.add("b".to_owned(), 4);
		right.add("c".to_owned(), 1);

		left.merge(&right);
		assert_eq!(left.count("a"), 2);
		assert_eq!(left.count("b"), 5);
		assert_eq!(left.count("c"), 1);
	}
}
