//! Word-level Markov chain text generation library.
//!
//! This crate provides a fixed-memory Markov model over words, including:
//! - Enumeration of the vocabulary and of the model states (word windows)
//! - Sparse transition counting and per-state normalization
//! - Bucket sampling from discrete distributions
//! - Sentence generation driven by an explicit random source
//!
//! Models are built once from a sample and are read-only afterwards.

/// Markov model construction and generation.
///
/// Exposes the built model, its catalogs, the sampler and the generator.
pub mod model;

/// Errors raised while building a model or generating text.
pub mod error;

/// Sample loading and tokenization helpers.
pub mod io;

pub use error::{ModelError, Result};
pub use model::generation_input::{GenerationInput, StartState};
pub use model::generator::Generator;
pub use model::markov_model::{MarkovModel, ModelSummary};
