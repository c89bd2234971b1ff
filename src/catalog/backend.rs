//! Backend discriminator
//!
//! Several gateway operations (lock statements, template rendering) need to
//! branch on which SQL backend they are talking to. An explicit, matchable
//! value keeps that dispatch in one place instead of scattered `match`es on
//! strings or a DSN prefix.

/// Which catalog backend a gateway is connected to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendKind {
	PostgreSql,
	MySql,
	Sqlite,
}

impl BackendKind {
	pub fn as_str(&self) -> &'static str {
		match self {
			BackendKind::PostgreSql => "postgresql",
			BackendKind::MySql => "mysql",
			BackendKind::Sqlite => "sqlite",
		}
	}

	/// Whether this backend supports `TRUNCATE TABLE` (SQLite does not).
	pub fn supports_truncate(&self) -> bool {
		!matches!(self, BackendKind::Sqlite)
	}
}

impl std::fmt::Display for BackendKind {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}
