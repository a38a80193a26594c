use std::path::Path;

use log::debug;
use rand::Rng;
use serde::Serialize;

use crate::error::{ModelError, Result};
use crate::io::{read_sample, tokenize};
use super::catalog::Catalog;
use super::enumerator::enumerate;
use super::generation_input::GenerationInput;
use super::generator::Generator;
use super::transition::{Row, TransitionMatrix};

/// A word-level Markov model of fixed memory.
///
/// The model holds:
/// - `vocabulary`: every distinct word of the sample, sorted
/// - `states`: every distinct window of `memory` words, sorted
/// - `initial_states`: states that may open a sentence
/// - `transitions`: P(next word | state) for every state
///
/// It is built once from a whole sample and never mutated afterwards, so a
/// shared reference can serve any number of generations, from any thread.
#[derive(Clone, Debug)]
pub struct MarkovModel {
	memory: usize,
	vocabulary: Catalog,
	states: Catalog,
	initial_states: Vec<usize>,
	transitions: TransitionMatrix,
}

/// Size figures of a built model.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct ModelSummary {
	pub memory: usize,
	pub vocabulary_size: usize,
	pub state_count: usize,
	pub initial_state_count: usize,
	pub dead_state_count: usize,
}

impl MarkovModel {
	/// Builds a model from raw text, split on whitespace.
	///
	/// # Errors
	/// - `InvalidMemory` if `memory` is 0
	/// - `InsufficientSample` if the text has fewer than `memory + 1` words
	pub fn new(text: &str, memory: usize) -> Result<Self> {
		Self::from_tokens(&tokenize(text), memory)
	}

	/// Builds a model from an already tokenized sample.
	pub fn from_tokens<S: AsRef<str>>(tokens: &[S], memory: usize) -> Result<Self> {
		let enumeration = enumerate(tokens, memory)?;
		let transitions =
			TransitionMatrix::build(tokens, memory, &enumeration.vocabulary, &enumeration.states)?;

		Ok(Self {
			memory,
			vocabulary: enumeration.vocabulary,
			states: enumeration.states,
			initial_states: enumeration.initial_states,
			transitions,
		})
	}

	/// Loads a sample file and builds a model from it.
	///
	/// # Errors
	/// Returns `Io` if the file can't be read, or any construction error.
	pub fn from_file<P: AsRef<Path>>(filepath: P, memory: usize) -> Result<Self> {
		let text = read_sample(&filepath)?;
		debug!("loaded sample {} ({} bytes)", filepath.as_ref().display(), text.len());
		Self::new(&text, memory)
	}

	pub fn memory(&self) -> usize {
		self.memory
	}

	pub fn vocabulary(&self) -> &Catalog {
		&self.vocabulary
	}

	pub fn states(&self) -> &Catalog {
		&self.states
	}

	/// Indices of the initial states, ascending.
	pub fn initial_states(&self) -> &[usize] {
		&self.initial_states
	}

	/// Initial states by name, in catalog order.
	pub fn initial_state_names(&self) -> impl Iterator<Item = &str> {
		self.initial_states
			.iter()
			.filter_map(|state| self.states.get(*state))
	}

	/// Initial states that have at least one continuation.
	pub fn live_initial_states(&self) -> Vec<usize> {
		self.initial_states
			.iter()
			.copied()
			.filter(|state| !self.transitions.is_dead(*state))
			.collect()
	}

	pub fn transitions(&self) -> &TransitionMatrix {
		&self.transitions
	}

	/// Looks a state up by its joined window.
	///
	/// # Errors
	/// Returns `StateLookup` if the window was never seen.
	pub fn state_index(&self, key: &str) -> Result<usize> {
		self.states
			.index_of(key)
			.ok_or_else(|| ModelError::StateLookup { state: key.to_owned() })
	}

	/// Distribution of the word following `state`.
	///
	/// # Errors
	/// - `EmptyDistribution` if the state has no continuation
	/// - `StateLookup` if the index is out of range
	pub fn row(&self, state: usize) -> Result<&Row> {
		let key = self
			.states
			.get(state)
			.ok_or_else(|| ModelError::StateLookup { state: state.to_string() })?;
		self.transitions
			.row(state)
			.ok_or_else(|| ModelError::EmptyDistribution { state: key.to_owned() })
	}

	pub fn summary(&self) -> ModelSummary {
		ModelSummary {
			memory: self.memory,
			vocabulary_size: self.vocabulary.len(),
			state_count: self.states.len(),
			initial_state_count: self.initial_states.len(),
			dead_state_count: self.transitions.dead_states().count(),
		}
	}

	/// Generates `sentences` sentences from a random initial state.
	///
	/// Shorthand for [`Generator::generate`] with default input.
	pub fn generate<R: Rng + ?Sized>(&self, sentences: usize, rng: &mut R) -> Result<String> {
		Generator::new(self).generate(&GenerationInput::new(sentences)?, rng)
	}
}
