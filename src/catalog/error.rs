//! Error types for catalog-gateway operations

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
	#[error("catalog connection failed: {0}")]
	ConnectionFailed(String),

	#[error("catalog query failed: {0}")]
	QueryFailed(String),

	#[error("catalog transaction failed: {0}")]
	TransactionFailed(String),

	#[error("catalog lock failed: {0}")]
	LockFailed(String),

	#[error("sqlx error: {0}")]
	Sqlx(#[from] sqlx::Error),

	#[error("unsupported backend for this operation: {0:?}")]
	UnsupportedBackend(super::backend::BackendKind),

	#[error("invalid configuration: {0}")]
	InvalidConfiguration(String),
}

impl CatalogError {
	/// Whether the failing operation is safe to retry (transient I/O,
	/// connection churn). Never true for data-shape errors.
	pub fn is_retryable(&self) -> bool {
		matches!(
			self,
			CatalogError::ConnectionFailed(_) | CatalogError::TransactionFailed(_)
		)
	}
}

pub type CatalogResult<T> = Result<T, CatalogError>;
