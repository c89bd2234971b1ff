//! Crate-wide error type
//!
//! Every public `bvfs` operation returns `Result<T>`; the `?` operator
//! replaces manual bail-out checks, and the error variant carries what a
//! log line would otherwise have to.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BvfsError {
	#[error("catalog error: {0}")]
	Catalog(Box<crate::catalog::CatalogError>),

	#[error("hierarchy build already in progress for job {job_id}")]
	AlreadyInProgress { job_id: u64 },

	#[error("bad argument: {reason}")]
	BadArgument { reason: String },

	#[error("path not found for PathId {path_id}")]
	PathNotFound { path_id: u64 },

	#[error("invalid restore-list token: {token:?} (expected ^b2[0-9]+$)")]
	InvalidToken { token: String },
}

impl From<crate::catalog::CatalogError> for BvfsError {
	fn from(err: crate::catalog::CatalogError) -> Self {
		BvfsError::Catalog(Box::new(err))
	}
}

impl BvfsError {
	pub fn bad_argument(reason: impl Into<String>) -> Self {
		BvfsError::BadArgument {
			reason: reason.into(),
		}
	}

	/// Whether this error indicates the operation may succeed if retried
	/// later (transient failures the caller may retry for
	/// already-in-progress, and delegates to the catalog error for
	/// transient catalog failures).
	pub fn is_retryable(&self) -> bool {
		match self {
			BvfsError::Catalog(e) => e.is_retryable(),
			BvfsError::AlreadyInProgress { .. } => true,
			_ => false,
		}
	}
}

pub type Result<T> = std::result::Result<T, BvfsError>;
