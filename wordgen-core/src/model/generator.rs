use std::collections::VecDeque;

use log::{trace, warn};
use rand::Rng;
use rand::seq::IndexedRandom;

use crate::error::{ModelError, Result};
use crate::model::enumerator::{STATE_SEPARATOR, is_terminator};
use crate::model::generation_input::{GenerationInput, StartState};
use crate::model::markov_model::MarkovModel;

/// Sentence generator over a built `MarkovModel`.
///
/// The generator only reads the model: several generators, on several
/// threads, may share the same model.
///
/// # Behavior
/// - Starts from an initial state (or a caller-given one)
/// - Repeatedly samples the next word from the current state's row,
///   then slides the window by one word
/// - Counts sentence terminators and stops once enough were emitted
#[derive(Debug, Clone, Copy)]
pub struct Generator<'a> {
	model: &'a MarkovModel,
}

impl<'a> Generator<'a> {
	pub fn new(model: &'a MarkovModel) -> Self {
		Self { model }
	}

	/// Generates text made of `input.sentences()` sentences.
	///
	/// Words are joined by single spaces and the last word is the sentence
	/// terminator that completed the count. The words of the start window
	/// itself are not part of the output.
	///
	/// # Errors
	/// - `NoInitialState` if no initial state can be continued
	/// - `StateLookup` if a custom start or a slid window is unknown
	/// - `EmptyDistribution` if a dead state is reached mid-sentence
	/// - `UnreachableTermination` if `input.max_tokens()` words were emitted
	///   without completing the requested sentences
	pub fn generate<R: Rng + ?Sized>(&self, input: &GenerationInput, rng: &mut R) -> Result<String> {
		Ok(self.generate_words(input, rng)?.join(" "))
	}

	/// Same as [`Generator::generate`], with one string per sentence.
	pub fn sentences<R: Rng + ?Sized>(&self, input: &GenerationInput, rng: &mut R) -> Result<Vec<String>> {
		let words = self.generate_words(input, rng)?;

		let mut sentences = Vec::with_capacity(input.sentences());
		let mut current: Vec<&str> = Vec::new();
		for word in words {
			current.push(word);
			if is_terminator(word) {
				sentences.push(current.join(" "));
				current.clear();
			}
		}

		Ok(sentences)
	}

	fn generate_words<R: Rng + ?Sized>(&self, input: &GenerationInput, rng: &mut R) -> Result<Vec<&'a str>> {
		let mut state = match &input.start_state {
			StartState::Random => self.random_initial_state(rng)?,
			StartState::Custom(key) => self.model.state_index(key)?,
		};
		let mut window = self.window(state)?;

		let mut remaining = input.sentences();
		let mut words: Vec<&'a str> = Vec::new();

		while remaining > 0 {
			if words.len() >= input.max_tokens() {
				warn!("no sentence end after {} words, {} sentences missing", words.len(), remaining);
				return Err(ModelError::UnreachableTermination { emitted: words.len(), remaining });
			}

			// The sample ended right after a sentence: open a new one
			if self.model.transitions().is_dead(state) && words.last().is_some_and(|word| is_terminator(word)) {
				state = self.random_initial_state(rng)?;
				window = self.window(state)?;
				trace!("restarting from '{}'", self.key(state)?);
			}

			let row = self.model.row(state)?;
			let next = row
				.predict(rng)
				.ok_or_else(|| ModelError::EmptyDistribution { state: window_key(&window) })?;
			let word = self
				.model
				.vocabulary()
				.get(next)
				.ok_or_else(|| ModelError::WordLookup { word: next.to_string() })?;

			words.push(word);
			if is_terminator(word) {
				remaining -= 1;
				if remaining == 0 {
					break;
				}
			}

			window.pop_front();
			window.push_back(word);
			state = self.model.state_index(&window_key(&window))?;
		}

		Ok(words)
	}

	/// Picks a uniformly random initial state that has a continuation.
	fn random_initial_state<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<usize> {
		self.model
			.live_initial_states()
			.choose(rng)
			.copied()
			.ok_or(ModelError::NoInitialState)
	}

	fn key(&self, state: usize) -> Result<&'a str> {
		self.model
			.states()
			.get(state)
			.ok_or_else(|| ModelError::StateLookup { state: state.to_string() })
	}

	/// Splits a state back into its words.
	fn window(&self, state: usize) -> Result<VecDeque<&'a str>> {
		Ok(self.key(state)?.split(STATE_SEPARATOR).collect())
	}
}

fn window_key(window: &VecDeque<&str>) -> String {
	window.iter().copied().collect::<Vec<&str>>().join(STATE_SEPARATOR)
}

#[cfg(test)]
mod tests {
	use super::*;
	use rand::SeedableRng;
	use rand::rngs::SmallRng;

	fn rng(seed: u64) -> SmallRng {
		SmallRng::seed_from_u64(seed)
	}

	fn terminators(text: &str) -> usize {
		text.split(' ').filter(|word| is_terminator(word)).count()
	}

	#[test]
	fn custom_start_is_deterministic() {
		let model = MarkovModel::new("A b. C d.", 1).unwrap();
		let input = GenerationInput::new(1).unwrap().with_start(StartState::Custom("C".into()));
		assert_eq!(Generator::new(&model).generate(&input, &mut rng(1)).unwrap(), "d.");

		let input = GenerationInput::new(2).unwrap().with_start(StartState::Custom("A".into()));
		assert_eq!(Generator::new(&model).generate(&input, &mut rng(1)).unwrap(), "b. C d.");
	}

	#[test]
	fn restarts_after_the_last_sentence_of_the_sample() {
		let model = MarkovModel::new("A b. C d.", 1).unwrap();
		for seed in 0..20 {
			let text = model.generate(5, &mut rng(seed)).unwrap();
			assert_eq!(terminators(&text), 5);
			assert!(text.split(' ').all(|word| ["b.", "C", "d."].contains(&word)));
		}
	}

	#[test]
	fn window_of_two_words() {
		let model = MarkovModel::new("the cat sat. the dog ran.", 2).unwrap();
		for seed in 0..20 {
			let text = model.generate(2, &mut rng(seed)).unwrap();
			assert_eq!(terminators(&text), 2);
			assert!(is_terminator(text.split(' ').last().unwrap()));
		}
	}

	#[test]
	fn same_seed_same_text() {
		let model = MarkovModel::new("a b a c. b a b c! c a b a? a c b.", 1).unwrap();
		let first = model.generate(4, &mut rng(7)).unwrap();
		let second = model.generate(4, &mut rng(7)).unwrap();
		assert_eq!(first, second);
	}

	#[test]
	fn sentences_are_split() {
		let model = MarkovModel::new("A b. C d.", 1).unwrap();
		let input = GenerationInput::new(3).unwrap();
		let sentences = Generator::new(&model).sentences(&input, &mut rng(3)).unwrap();
		assert_eq!(sentences.len(), 3);
		assert!(sentences.iter().all(|sentence| ["b.", "C d.", "d."].contains(&sentence.as_str())));
	}

	#[test]
	fn dead_end_mid_sentence() {
		let model = MarkovModel::new("a b c", 1).unwrap();
		let result = model.generate(1, &mut rng(0));
		assert!(matches!(result, Err(ModelError::EmptyDistribution { state }) if state == "c"));
	}

	#[test]
	fn endless_text_hits_the_cap() {
		let model = MarkovModel::new("x y x y x y", 1).unwrap();
		let mut input = GenerationInput::new(1).unwrap();
		input.set_max_tokens(50).unwrap();
		let result = Generator::new(&model).generate(&input, &mut rng(0));
		assert!(matches!(result, Err(ModelError::UnreachableTermination { emitted: 50, remaining: 1 })));
	}

	#[test]
	fn unknown_custom_start() {
		let model = MarkovModel::new("A b. C d.", 1).unwrap();
		let input = GenerationInput::new(1).unwrap().with_start(StartState::Custom("Z".into()));
		assert!(matches!(
			Generator::new(&model).generate(&input, &mut rng(0)),
			Err(ModelError::StateLookup { .. })
		));
	}

	#[test]
	fn dead_custom_start() {
		let model = MarkovModel::new("A b. C d.", 1).unwrap();
		let input = GenerationInput::new(1).unwrap().with_start(StartState::Custom("d.".into()));
		assert!(matches!(
			Generator::new(&model).generate(&input, &mut rng(0)),
			Err(ModelError::EmptyDistribution { .. })
		));
	}
}
