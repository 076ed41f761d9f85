use std::path::PathBuf;

/// Errors surfaced by model building, persistence and generation.
///
/// Early generation stops (sparse context, exhausted step budget) are not
/// errors; they are reported as a `StopReason` on a successful sentence.
#[derive(Debug, thiserror::Error)]
pub enum ChainError {
	/// Filesystem access failed while persisting or loading a model.
	#[error("I/O error at {path:?}: {source}")]
	Io {
		path: PathBuf,
		source: std::io::Error,
	},

	/// The persisted payload is not a three-level token/count mapping.
	#[error("malformed model payload: {0}")]
	Format(String),

	/// Generation was requested on a model with no start context.
	#[error("model has no start context")]
	EmptyModel,

	/// A random choice was requested over an empty candidate set.
	///
	/// Unreachable while the model invariants hold; checked defensively.
	#[error("empty candidate set")]
	EmptyCandidates,

	/// Invalid generation configuration.
	#[error("invalid configuration: {0}")]
	Config(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ChainError>;

impl ChainError {
	/// Wraps a `std::io::Error` with the path it occurred at.
	pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
		Self::Io { path: path.into(), source }
	}
}

impl From<serde_json::Error> for ChainError {
	fn from(err: serde_json::Error) -> Self {
		Self::Format(err.to_string())
	}
}

impl From<postcard::Error> for ChainError {
	fn from(err: postcard::Error) -> Self {
		Self::Format(err.to_string())
	}
}
