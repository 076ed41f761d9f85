//! Top-level module for the chain language model.
//!
//! This module wires together the components of the order-3 chain:
//! - The frequency table itself (`ChainModel`)
//! - Sliding-window ingestion (`builder`)
//! - Persistence (`store`)
//! - Random-walk sentence generation (`generator`)
//! - Pluggable choice primitives (`random`)

/// Sliding-window ingestion of token sequences into a `ChainModel`.
///
/// Covers one-shot and incremental building, the tagged-token filter fed
/// by the external tokenizer, and the parallel corpus-file path.
pub mod builder;

/// The chain frequency table, its context keys and reserved tokens.
pub mod chain_model;

/// Random-walk sentence generation with a mandatory step budget.
pub mod generator;

/// Pluggable uniform/weighted choice sources.
///
/// Includes RNG-backed sources and a deterministic one for tests.
pub mod random;

/// Internal per-context successor frequency table.
///
/// Tracks outgoing transition counts for a single context window.
/// This module is not exposed publicly.
pub(crate) mod state;

/// Model persistence: JSON text interchange and binary snapshot.
pub mod store;
