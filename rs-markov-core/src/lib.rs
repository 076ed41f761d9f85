//! Order-3 chain language model library.
//!
//! This crate ingests sequences of normalized tokens, accumulates
//! transition-frequency statistics keyed by two-token context windows,
//! persists the statistic table, and reconstitutes sentences by a random
//! walk over it. It provides:
//! - Sliding-window model building, incremental and parallel corpus paths
//! - A UTF-8 JSON interchange format plus a compact binary snapshot
//! - Uniform or frequency-weighted successor selection
//! - Pluggable, seedable random sources for reproducible generation
//!
//! Tokenization and normalization are performed by an external component;
//! the model only ever sees plain token sequences.

/// Crate-wide error taxonomy.
pub mod error;

/// Chain model, builder, store, generator and random sources.
pub mod model;

/// I/O utilities (file loading, path helpers).
///
/// Not exposed
pub(crate) mod io;
