use std::path::PathBuf;
use thiserror::Error;

/// Main error type for scene description operations.
#[derive(Error, Debug)]
pub enum Error {
	/// Layer file does not exist or cannot be accessed
	#[error("file not found: {0}")]
	FileNotFound(PathBuf),

	/// Extension is not a recognized layer format
	#[error("unsupported layer format: {0}")]
	UnsupportedFormat(String),

	/// Text layer could not be parsed
	#[error("parse error at line {line}: {message}")]
	Parse { line: usize, message: String },

	/// Path text does not form a valid scene path
	#[error("invalid path: {0}")]
	InvalidPath(String),

	/// No prim exists at the given path
	#[error("prim not found: {0}")]
	PrimNotFound(String),

	/// Prim exists but is not of the expected schema type
	#[error("schema mismatch at {path}: expected {expected}")]
	SchemaMismatch { path: String, expected: String },

	/// A variant edit target was requested without a selection
	#[error("no variant selected for set {0}")]
	NoVariantSelection(String),

	/// The named variant was never added to the set
	#[error("unknown variant {variant} in set {set}")]
	UnknownVariant { set: String, variant: String },

	/// Anonymous layers have no backing file
	#[error("cannot save anonymous layer")]
	AnonymousLayer,

	/// I/O error
	#[error("I/O error: {0}")]
	Io(#[from] std::io::Error),
}

impl Error {
	/// Create a parse error at the given 1-based line.
	pub fn parse(line: usize, message: impl Into<String>) -> Self {
		Self::Parse {
			line,
			message: message.into(),
		}
	}
}

/// Result type alias for scene description operations.
pub type Result<T> = std::result::Result<T, Error>;
