use log::debug;
use rand::Rng;

use crate::error::{ModelError, Result};
use super::catalog::Catalog;
use super::enumerator::state_key;
use super::sampler;
use super::state::State;

/// Probability distribution of the next word for one state.
///
/// Only words with a non-zero probability are stored, in ascending
/// vocabulary index.
///
/// ## Invariants
/// - `entries` is sorted by word index, without duplicates
/// - probabilities are strictly positive and sum to 1.0 (within rounding)
#[derive(Clone, Debug, PartialEq)]
pub struct Row {
	entries: Vec<(usize, f64)>,
}

impl Row {
	/// Non-zero `(word index, probability)` pairs.
	pub fn entries(&self) -> &[(usize, f64)] {
		&self.entries
	}

	/// Probability of `word` following this state.
	pub fn probability(&self, word: usize) -> f64 {
		self.entries
			.binary_search_by_key(&word, |(index, _)| *index)
			.map_or(0.0, |position| self.entries[position].1)
	}

	pub fn sum(&self) -> f64 {
		self.entries.iter().map(|(_, probability)| probability).sum()
	}

	/// Picks the word index `draw` falls onto.
	pub fn sample(&self, draw: f64) -> Option<usize> {
		sampler::sample(self.entries.iter().copied(), draw)
	}

	/// Picks the next word index with one uniform draw in `[0, 1)`.
	pub fn predict<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<usize> {
		self.sample(rng.random::<f64>())
	}
}

/// Conditional probabilities P(word | state), one row per state.
///
/// Rows are sparse: a state × vocabulary table would grow multiplicatively
/// with the sample, while each state is only ever followed by a few words.
///
/// A state that was never followed by a word (the last window of the
/// sample) has a dead row: it cannot be continued and holds no probability.
#[derive(Clone, Debug, PartialEq)]
pub struct TransitionMatrix {
	rows: Vec<Option<Row>>,
	columns: usize,
}

impl TransitionMatrix {
	/// Counts every (state, next word) pair of `tokens` and normalizes the counts.
	///
	/// For each position `i` from `memory`, the window `tokens[i - memory..i]`
	/// is the state and `tokens[i]` the observed next word.
	///
	/// # Errors
	/// - `StateLookup` if a window is missing from `states`
	/// - `WordLookup` if a token is missing from `vocabulary`
	pub fn build<S: AsRef<str>>(
		tokens: &[S],
		memory: usize,
		vocabulary: &Catalog,
		states: &Catalog,
	) -> Result<Self> {
		let mut accumulators: Vec<State> = states.iter().map(State::new).collect();

		for i in memory..tokens.len() {
			let key = state_key(&tokens[i - memory..i]);
			let state = states
				.index_of(&key)
				.ok_or(ModelError::StateLookup { state: key })?;

			let word = tokens[i].as_ref();
			let word = vocabulary
				.index_of(word)
				.ok_or_else(|| ModelError::WordLookup { word: word.to_owned() })?;

			accumulators[state].add_transition(word);
		}

		let rows: Vec<Option<Row>> = accumulators
			.iter()
			.map(|state| state.normalize().map(|entries| Row { entries }))
			.collect();

		for state in accumulators.iter().filter(|state| state.total() == 0) {
			debug!("state '{}' has no continuation", state.key());
		}
		debug!(
			"built {} x {} transition rows, {} stored probabilities",
			rows.len(),
			vocabulary.len(),
			rows.iter().flatten().map(|row| row.entries.len()).sum::<usize>()
		);

		Ok(Self { rows, columns: vocabulary.len() })
	}

	/// Row of `state`, or `None` if the state is dead or out of range.
	pub fn row(&self, state: usize) -> Option<&Row> {
		self.rows.get(state)?.as_ref()
	}

	/// Returns `true` if `state` exists but has no continuation.
	pub fn is_dead(&self, state: usize) -> bool {
		matches!(self.rows.get(state), Some(None))
	}

	/// Indices of all dead states.
	pub fn dead_states(&self) -> impl Iterator<Item = usize> + '_ {
		self.rows
			.iter()
			.enumerate()
			.filter(|(_, row)| row.is_none())
			.map(|(state, _)| state)
	}

	/// Probability of `word` following `state` (0.0 for dead states).
	pub fn probability(&self, state: usize, word: usize) -> f64 {
		self.row(state).map_or(0.0, |row| row.probability(word))
	}

	/// Materializes the full row of `state` over the whole vocabulary.
	pub fn dense_row(&self, state: usize) -> Option<Vec<f64>> {
		let row = self.row(state)?;
		let mut dense = vec![0.0; self.columns];
		for (word, probability) in &row.entries {
			dense[*word] = *probability;
		}
		Some(dense)
	}

	/// Number of states.
	pub fn row_count(&self) -> usize {
		self.rows.len()
	}

	/// Vocabulary size.
	pub fn column_count(&self) -> usize {
		self.columns
	}
}
