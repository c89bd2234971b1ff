//! Production `CatalogGateway` backed by `sqlx`.
//!
//! `sqlx`'s `Pool<DB>`/`Transaction<'_, DB>` are generic over a single
//! backend at a time; BVFS needs to speak Postgres, MySQL, *and* SQLite
//! depending on deployment. `SqlxGateway` hides that behind an internal
//! enum, dispatching explicitly on `BackendKind` at each call site instead
//! of monomorphizing the whole gateway per backend.

use super::backend::BackendKind;
use super::config::CatalogConfig;
use super::error::{CatalogError, CatalogResult};
use super::gateway::{CatalogGateway, Row};
use async_trait::async_trait;
use sqlx::{MySqlPool, PgPool, SqlitePool};
use tokio::sync::Mutex;
use tracing::{debug, warn};

enum Pool {
	Postgres(PgPool),
	MySql(MySqlPool),
	Sqlite(SqlitePool),
}

enum Tx {
	Postgres(sqlx::Transaction<'static, sqlx::Postgres>),
	MySql(sqlx::Transaction<'static, sqlx::MySql>),
	Sqlite(sqlx::Transaction<'static, sqlx::Sqlite>),
}

struct GatewayState {
	tx: Option<Tx>,
	guard: Option<tokio::sync::OwnedMutexGuard<()>>,
}

/// A `CatalogGateway` backed by one of `sqlx`'s backend-specific pools.
///
/// Models "one connection serves one session at a time" by serializing all
/// operations on this gateway through an internal mutex, rather than
/// exposing raw pool concurrency — multiple independent `SqlxGateway`s (one
/// per browsing session) may still run truly in parallel against the same
/// database.
pub struct SqlxGateway {
	backend: BackendKind,
	pool: Pool,
	lock_mutex: std::sync::Arc<Mutex<()>>,
	state: Mutex<GatewayState>,
}

impl SqlxGateway {
	pub async fn connect(config: &CatalogConfig) -> CatalogResult<Self> {
		config
			.validate()
			.map_err(CatalogError::InvalidConfiguration)?;

		let pool = match config.backend {
			BackendKind::PostgreSql => Pool::Postgres(
				sqlx::pool::PoolOptions::new()
					.max_connections(config.max_connections)
					.connect(&config.dsn)
					.await?,
			),
			BackendKind::MySql => Pool::MySql(
				sqlx::pool::PoolOptions::new()
					.max_connections(config.max_connections)
					.connect(&config.dsn)
					.await?,
			),
			BackendKind::Sqlite => Pool::Sqlite(
				sqlx::pool::PoolOptions::new()
					.max_connections(config.max_connections)
					.connect(&config.dsn)
					.await?,
			),
		};

		Ok(Self {
			backend: config.backend,
			pool,
			lock_mutex: std::sync::Arc::new(Mutex::new(())),
			state: Mutex::new(GatewayState {
				tx: None,
				guard: None,
			}),
		})
	}
}

/// Best-effort decode of one cell to its text representation. Backends
/// disagree on how integers/booleans surface through the generic `Row`
/// trait, so this tries the common scalar shapes in order and stringifies
/// whichever one decodes.
fn cell_to_string<'r, R>(row: &'r R, idx: usize) -> Option<String>
where
	R: sqlx::Row,
	usize: sqlx::ColumnIndex<R>,
	&'r str: sqlx::Decode<'r, R::Database> + sqlx::Type<R::Database>,
	i64: sqlx::Decode<'r, R::Database> + sqlx::Type<R::Database>,
	f64: sqlx::Decode<'r, R::Database> + sqlx::Type<R::Database>,
	bool: sqlx::Decode<'r, R::Database> + sqlx::Type<R::Database>,
{
	if let Ok(v) = row.try_get::<Option<&str>, _>(idx) {
		return v.map(|s| s.to_string());
	}
	if let Ok(v) = row.try_get::<Option<i64>, _>(idx) {
		return v.map(|n| n.to_string());
	}
	if let Ok(v) = row.try_get::<Option<f64>, _>(idx) {
		return v.map(|n| n.to_string());
	}
	if let Ok(v) = row.try_get::<Option<bool>, _>(idx) {
		return v.map(|b| b.to_string());
	}
	None
}

fn row_to_cells<'r, R>(row: &'r R) -> Row
where
	R: sqlx::Row,
	usize: sqlx::ColumnIndex<R>,
	&'r str: sqlx::Decode<'r, R::Database> + sqlx::Type<R::Database>,
	i64: sqlx::Decode<'r, R::Database> + sqlx::Type<R::Database>,
	f64: sqlx::Decode<'r, R::Database> + sqlx::Type<R::Database>,
	bool: sqlx::Decode<'r, R::Database> + sqlx::Type<R::Database>,
{
	(0..row.columns().len())
		.map(|i| cell_to_string(row, i))
		.collect()
}

#[async_trait]
impl CatalogGateway for SqlxGateway {
	async fn execute(&self, sql: &str) -> CatalogResult<u64> {
		debug!(sql, "catalog execute");
		let mut state = self.state.lock().await;
		let tx_taken = state.tx.take();
		let affected = match tx_taken {
			Some(Tx::Postgres(mut tx)) => {
				let res = sqlx::query(sql).execute(&mut *tx).await?;
				let n = res.rows_affected();
				state.tx = Some(Tx::Postgres(tx));
				n
			}
			Some(Tx::MySql(mut tx)) => {
				let res = sqlx::query(sql).execute(&mut *tx).await?;
				let n = res.rows_affected();
				state.tx = Some(Tx::MySql(tx));
				n
			}
			Some(Tx::Sqlite(mut tx)) => {
				let res = sqlx::query(sql).execute(&mut *tx).await?;
				let n = res.rows_affected();
				state.tx = Some(Tx::Sqlite(tx));
				n
			}
			None => match &self.pool {
				Pool::Postgres(p) => sqlx::query(sql).execute(p).await?.rows_affected(),
				Pool::MySql(p) => sqlx::query(sql).execute(p).await?.rows_affected(),
				Pool::Sqlite(p) => sqlx::query(sql).execute(p).await?.rows_affected(),
			},
		};
		Ok(affected)
	}

	async fn query(&self, sql: &str) -> CatalogResult<Vec<Row>> {
		debug!(sql, "catalog query");
		let mut state = self.state.lock().await;
		let tx_taken = state.tx.take();
		let rows: Vec<Row> = match tx_taken {
			Some(Tx::Postgres(mut tx)) => {
				let fetched = sqlx::query(sql).fetch_all(&mut *tx).await?;
				state.tx = Some(Tx::Postgres(tx));
				fetched.iter().map(row_to_cells).collect()
			}
			Some(Tx::MySql(mut tx)) => {
				let fetched = sqlx::query(sql).fetch_all(&mut *tx).await?;
				state.tx = Some(Tx::MySql(tx));
				fetched.iter().map(row_to_cells).collect()
			}
			Some(Tx::Sqlite(mut tx)) => {
				let fetched = sqlx::query(sql).fetch_all(&mut *tx).await?;
				state.tx = Some(Tx::Sqlite(tx));
				fetched.iter().map(row_to_cells).collect()
			}
			None => match &self.pool {
				Pool::Postgres(p) => sqlx::query(sql)
					.fetch_all(p)
					.await?
					.iter()
					.map(row_to_cells)
					.collect(),
				Pool::MySql(p) => sqlx::query(sql)
					.fetch_all(p)
					.await?
					.iter()
					.map(row_to_cells)
					.collect(),
				Pool::Sqlite(p) => sqlx::query(sql)
					.fetch_all(p)
					.await?
					.iter()
					.map(row_to_cells)
					.collect(),
			},
		};
		Ok(rows)
	}

	async fn begin_tx(&self) -> CatalogResult<()> {
		let mut state = self.state.lock().await;
		if state.tx.is_some() {
			return Err(CatalogError::TransactionFailed(
				"transaction already open on this gateway".to_string(),
			));
		}
		state.tx = Some(match &self.pool {
			Pool::Postgres(p) => Tx::Postgres(p.begin().await?),
			Pool::MySql(p) => Tx::MySql(p.begin().await?),
			Pool::Sqlite(p) => Tx::Sqlite(p.begin().await?),
		});
		Ok(())
	}

	async fn commit_tx(&self) -> CatalogResult<()> {
		let mut state = self.state.lock().await;
		let tx = state.tx.take().ok_or_else(|| {
			CatalogError::TransactionFailed("no open transaction to commit".to_string())
		})?;
		match tx {
			Tx::Postgres(t) => t.commit().await?,
			Tx::MySql(t) => t.commit().await?,
			Tx::Sqlite(t) => t.commit().await?,
		}
		Ok(())
	}

	async fn lock(&self) -> CatalogResult<()> {
		let guard = self.lock_mutex.clone().lock_owned().await;
		let mut state = self.state.lock().await;
		if state.guard.is_some() {
			warn!("lock() called while already holding the gateway lock");
		}
		state.guard = Some(guard);
		Ok(())
	}

	async fn unlock(&self) -> CatalogResult<()> {
		let mut state = self.state.lock().await;
		state.guard.take();
		Ok(())
	}

	fn backend_kind(&self) -> BackendKind {
		self.backend
	}
}
