use std::collections::BTreeMap;

/// Frequency accumulator for a single model state.
///
/// A `State` corresponds to one window of `memory` words (`key`) and stores
/// how many times each vocabulary word was observed right after it.
///
/// Conceptually, this is a node in a Markov chain where outgoing edges
/// are weighted by their number of observations.
///
/// ## Invariants
/// - Transitions are keyed by vocabulary index, in ascending order
/// - Each stored occurrence count is strictly positive
#[derive(Clone, Debug)]
pub(crate) struct State {
	/// Joined window this state stands for.
	key: String,
	/// Occurrences of each following word, by vocabulary index.
	/// Example: { 3 => 42, 7 => 1 }
	transitions: BTreeMap<usize, usize>,
}

impl State {
	/// Creates a new empty state for the given window.
	pub(crate) fn new(key: &str) -> Self {
		Self {
			key: key.to_owned(),
			transitions: BTreeMap::new(),
		}
	}

	pub(crate) fn key(&self) -> &str {
		&self.key
	}

	/// Records one occurrence of `word` following this state.
	pub(crate) fn add_transition(&mut self, word: usize) {
		*self.transitions.entry(word).or_insert(0) += 1;
	}

	/// Total number of observed continuations.
	pub(crate) fn total(&self) -> usize {
		self.transitions.values().sum()
	}

	/// Converts the counts into probabilities, in ascending word order.
	///
	/// Returns `None` if the state was never followed by a word, so callers
	/// never divide by zero.
	pub(crate) fn normalize(&self) -> Option<Vec<(usize, f64)>> {
		let total = self.total();
		if total == 0 {
			return None;
		}

		let total = total as f64;
		Some(
			self.transitions
				.iter()
				.map(|(word, occurrence)| (*word, *occurrence as f64 / total))
				.collect(),
		)
	}
}
