//! Top-level module for the word Markov model.
//!
//! This module provides:
//! - Sorted, deduplicated catalogs of words and states (`Catalog`)
//! - State and vocabulary enumeration from a token sequence (`enumerator`)
//! - Sparse transition counting and normalization (`TransitionMatrix`)
//! - Bucket sampling from a discrete distribution (`sampler`)
//! - The built model (`MarkovModel`) and its generation interface (`Generator`)

/// Sorted unique string catalog with a dense index map.
pub mod catalog;

/// Derives the vocabulary, the state catalog and the initial states
/// from a token sequence.
pub mod enumerator;

/// Per-state frequency accumulation.
///
/// Tracks how often each word follows a state before normalization.
/// This module is not exposed publicly.
mod state;

/// Normalized transition probabilities, one sparse row per state.
pub mod transition;

/// Cumulative-subtraction sampling over a probability row.
pub mod sampler;

/// Generation parameters: sentence count, start strategy and step cap.
pub mod generation_input;

/// Sentence generation over a built model.
pub mod generator;

/// The immutable model bundling catalogs and transitions.
pub mod markov_model;
