use log::debug;

use crate::error::{ModelError, Result};
use super::catalog::Catalog;

/// Separator used to join the words of a window into a single state key.
///
/// Tokens come from whitespace splitting, so they never contain it.
pub const STATE_SEPARATOR: &str = " ";

/// Characters that end a sentence when they terminate a token.
pub const SENTENCE_TERMINATORS: [char; 3] = ['.', '!', '?'];

/// Returns `true` if `token` ends with a sentence terminator.
pub fn is_terminator(token: &str) -> bool {
	token.ends_with(SENTENCE_TERMINATORS)
}

/// Joins a window of words into its state key.
pub fn state_key<S: AsRef<str>>(window: &[S]) -> String {
	window
		.iter()
		.map(AsRef::as_ref)
		.collect::<Vec<&str>>()
		.join(STATE_SEPARATOR)
}

/// Result of enumerating a token sequence.
///
/// ## Invariants
/// - every state is made of exactly `memory` words of `vocabulary`
/// - `initial_states` is sorted, deduplicated and indexes into `states`
#[derive(Clone, Debug)]
pub struct Enumeration {
	pub vocabulary: Catalog,
	pub states: Catalog,
	pub initial_states: Vec<usize>,
}

/// Enumerates the vocabulary, the states and the initial states of a sample.
///
/// A state is any window of `memory` consecutive tokens. A window is initial
/// if it starts the sample or directly follows a sentence terminator.
///
/// # Errors
/// - `InvalidMemory` if `memory` is 0
/// - `InsufficientSample` if the sample has fewer than `memory + 1` tokens
pub fn enumerate<S: AsRef<str>>(tokens: &[S], memory: usize) -> Result<Enumeration> {
	if memory == 0 {
		return Err(ModelError::InvalidMemory);
	}
	if tokens.len() <= memory {
		return Err(ModelError::InsufficientSample { tokens: tokens.len(), memory });
	}

	let vocabulary = Catalog::new(tokens.iter().map(|token| token.as_ref()));
	let states = Catalog::new(tokens.windows(memory).map(state_key));

	let mut initial_states: Vec<usize> = tokens
		.windows(memory)
		.enumerate()
		.filter(|(start, _)| *start == 0 || is_terminator(tokens[start - 1].as_ref()))
		.filter_map(|(_, window)| states.index_of(&state_key(window)))
		.collect();
	initial_states.sort_unstable();
	initial_states.dedup();

	debug!(
		"enumerated {} words, {} states ({} initial) with memory {}",
		vocabulary.len(),
		states.len(),
		initial_states.len(),
		memory
	);

	Ok(Enumeration { vocabulary, states, initial_states })
}
