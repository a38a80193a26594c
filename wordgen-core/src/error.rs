use std::io;

/// Everything that can go wrong while building a model or generating from it.
///
/// Construction errors are fatal: no partial model is ever returned.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
	#[error("memory must be at least 1")]
	InvalidMemory,

	#[error("sample has {tokens} tokens, memory {memory} needs more than {memory}")]
	InsufficientSample { tokens: usize, memory: usize },

	#[error("state '{state}' has no observed continuation")]
	EmptyDistribution { state: String },

	#[error("no initial state available to start a sentence")]
	NoInitialState,

	#[error("state '{state}' is not in the catalog")]
	StateLookup { state: String },

	#[error("word '{word}' is not in the vocabulary")]
	WordLookup { word: String },

	#[error("generation stopped after {emitted} tokens with {remaining} sentences still missing")]
	UnreachableTermination { emitted: usize, remaining: usize },

	#[error("sentence count must be at least 1")]
	InvalidSentenceCount,

	#[error("failed to read sample: {0}")]
	Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, ModelError>;
