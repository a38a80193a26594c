use crate::error::{ModelError, Result};

/// Default cap on the number of words emitted by one generation.
pub const DEFAULT_MAX_TOKENS: usize = 10_000;

/// Strategy used to select the window generation starts from.
///
/// # Variants
/// - `Random`: pick a uniformly random initial state that can be continued.
/// - `Custom(String)`: start from the given window (words joined by a space).
///   It must be a known state, but does not need to be an initial one.
#[derive(PartialEq, Eq, Clone, Debug, Default)]
pub enum StartState {
	#[default]
	Random,
	Custom(String),
}

/// Input parameters for one generation.
///
/// # Invariants
/// - `sentences` is at least 1
/// - `max_tokens` is at least 1
#[derive(Clone, Debug)]
pub struct GenerationInput {
	/// Number of sentences to generate.
	sentences: usize,

	/// How the first window is chosen.
	pub start_state: StartState,

	/// Maximum number of words emitted before giving up.
	///
	/// Guards against states that can never reach a sentence terminator.
	max_tokens: usize,
}

impl GenerationInput {
	/// Creates an input generating `sentences` sentences from a random start.
	///
	/// # Errors
	/// Returns `InvalidSentenceCount` if `sentences` is 0.
	pub fn new(sentences: usize) -> Result<Self> {
		if sentences == 0 {
			return Err(ModelError::InvalidSentenceCount);
		}
		Ok(Self {
			sentences,
			start_state: StartState::Random,
			max_tokens: DEFAULT_MAX_TOKENS,
		})
	}

	pub fn sentences(&self) -> usize {
		self.sentences
	}

	pub fn max_tokens(&self) -> usize {
		self.max_tokens
	}

	/// Sets the word cap.
	///
	/// # Errors
	/// Returns an error if `max_tokens` is 0.
	pub fn set_max_tokens(&mut self, max_tokens: usize) -> std::result::Result<(), String> {
		if max_tokens == 0 {
			return Err("max_tokens must be at least 1".to_owned());
		}
		self.max_tokens = max_tokens;
		Ok(())
	}

	/// Builder-style variant of setting `start_state`.
	pub fn with_start(mut self, start_state: StartState) -> Self {
		self.start_state = start_state;
		self
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn defaults() {
		let input = GenerationInput::new(3).unwrap();
		assert_eq!(input.sentences(), 3);
		assert_eq!(input.max_tokens(), DEFAULT_MAX_TOKENS);
		assert_eq!(input.start_state, StartState::Random);
	}

	#[test]
	fn zero_sentences_rejected() {
		assert!(matches!(GenerationInput::new(0), Err(ModelError::InvalidSentenceCount)));
	}

	#[test]
	fn max_tokens_must_be_positive() {
		let mut input = GenerationInput::new(1).unwrap();
		assert!(input.set_max_tokens(0).is_err());
		assert!(input.set_max_tokens(5).is_ok());
		assert_eq!(input.max_tokens(), 5);
	}

	#[test]
	fn custom_start() {
		let input = GenerationInput::new(1).unwrap().with_start(StartState::Custom("the cat".into()));
		assert_eq!(input.start_state, StartState::Custom("the cat".to_owned()));
	}
}
