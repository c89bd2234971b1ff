//! Catalog Gateway (C1): the narrow adapter BVFS needs from a SQL catalog.
//!
//! An `async_trait`, implemented once for production use (`SqlxGateway`)
//! and trivially mockable for tests.

use super::backend::BackendKind;
use super::error::CatalogResult;
use async_trait::async_trait;

/// One row of query results: nullable text cells.
pub type Row = Vec<Option<String>>;

/// The catalog operations the BVFS core needs. Implementations own their
/// own connection pool and internal transaction/lock state.
#[async_trait]
pub trait CatalogGateway: Send + Sync {
	/// Run a statement that returns no rows (or whose rows are discarded).
	/// Returns the number of affected rows.
	async fn execute(&self, sql: &str) -> CatalogResult<u64>;

	/// Run a statement and buffer all resulting rows.
	///
	/// Buffered rather than streamed: several backends don't expose a reliable
	/// row count until all rows are drained, so callers that need paging
	/// decisions drive them off `Vec::len()` of what this returns, not a
	/// separate count.
	async fn query(&self, sql: &str) -> CatalogResult<Vec<Row>>;

	/// Begin a transaction on this gateway's connection.
	async fn begin_tx(&self) -> CatalogResult<()>;

	/// Commit the current transaction.
	async fn commit_tx(&self) -> CatalogResult<()>;

	/// Acquire the connection-level mutual exclusion callers take around
	/// multi-statement critical sections.
	async fn lock(&self) -> CatalogResult<()>;

	/// Release the lock taken by `lock()`.
	async fn unlock(&self) -> CatalogResult<()>;

	/// Which backend this gateway is connected to.
	fn backend_kind(&self) -> BackendKind;

	/// Escape a LIKE-pattern body so literal `%`, `_`, `\` match themselves.
	fn escape_like(&self, raw: &str) -> String {
		super::templates::escape_like(raw)
	}

	/// Escape a value for inclusion inside a single-quoted SQL literal.
	fn escape_literal(&self, raw: &str) -> String {
		super::templates::escape_literal(raw)
	}
}
