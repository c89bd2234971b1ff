//! Catalog connection configuration
//!
//! A plain struct with named presets and a `validate()` method, rather
//! than a builder with panics.

use super::backend::BackendKind;
use std::time::Duration;

/// Configuration for a catalog connection pool.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
	/// Which SQL backend `dsn` points at.
	pub backend: BackendKind,

	/// Connection string / DSN understood by `sqlx` for `backend`.
	pub dsn: String,

	/// Maximum number of pooled connections.
	pub max_connections: u32,

	/// Statement timeout applied to every query issued through the gateway
	/// (0 = no timeout).
	pub statement_timeout: Duration,
}

impl CatalogConfig {
	/// Configuration for a local PostgreSQL catalog, the backend Bareos
	/// itself defaults to.
	pub fn postgres(dsn: impl Into<String>) -> Self {
		Self {
			backend: BackendKind::PostgreSql,
			dsn: dsn.into(),
			max_connections: 10,
			statement_timeout: Duration::from_secs(30),
		}
	}

	/// Configuration for a MySQL/MariaDB catalog.
	pub fn mysql(dsn: impl Into<String>) -> Self {
		Self {
			backend: BackendKind::MySql,
			dsn: dsn.into(),
			max_connections: 10,
			statement_timeout: Duration::from_secs(30),
		}
	}

	/// Configuration for a SQLite catalog file, primarily used by tests and
	/// small single-node installs.
	pub fn sqlite(path: impl Into<String>) -> Self {
		Self {
			backend: BackendKind::Sqlite,
			dsn: path.into(),
			max_connections: 1,
			statement_timeout: Duration::from_secs(30),
		}
	}

	/// Validate configuration parameters.
	pub fn validate(&self) -> Result<(), String> {
		if self.dsn.is_empty() {
			return Err("dsn must not be empty".to_string());
		}

		if self.max_connections == 0 {
			return Err("max_connections must be greater than 0".to_string());
		}

		if matches!(self.backend, BackendKind::Sqlite) && self.max_connections > 1 {
			// SQLite serializes writers regardless; a single connection
			// avoids "database is locked" churn under the gateway's own
			// lock()/unlock() discipline.
			return Err("sqlite backend supports at most 1 pooled connection".to_string());
		}

		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn presets_validate() {
		assert!(CatalogConfig::postgres("postgres://localhost/bareos")
			.validate()
			.is_ok());
		assert!(CatalogConfig::mysql("mysql://localhost/bareos")
			.validate()
			.is_ok());
		assert!(CatalogConfig::sqlite(":memory:").validate().is_ok());
	}

	#[test]
	fn empty_dsn_rejected() {
		let mut cfg = CatalogConfig::postgres("");
		assert!(cfg.validate().is_err());
		cfg.dsn = "postgres://localhost/bareos".to_string();
		assert!(cfg.validate().is_ok());
	}

	#[test]
	fn sqlite_rejects_multiple_connections() {
		let mut cfg = CatalogConfig::sqlite(":memory:");
		cfg.max_connections = 4;
		assert!(cfg.validate().is_err());
	}
}
