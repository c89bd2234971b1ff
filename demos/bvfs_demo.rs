//! Seeds a throwaway SQLite catalog with a tiny two-job backup corpus,
//! builds the hierarchy cache, then lists the root directory.
//!
//! Run with `cargo run --example bvfs_demo`.

use bvfs::{BrowserSession, BvfsRow, CatalogConfig, SqlxGateway};
use std::sync::Arc;

const SCHEMA: &str = include_str!("../tests/support/schema.sql");

#[tokio::main]
async fn main() -> anyhow::Result<()> {
	tracing_subscriber::fmt().init();

	let config = CatalogConfig::sqlite("sqlite::memory:");
	let gateway = Arc::new(SqlxGateway::connect(&config).await?);

	for stmt in SCHEMA.split(';') {
		let stmt = stmt.trim();
		if !stmt.is_empty() {
			gateway.execute(stmt).await?;
		}
	}

	seed_sample_corpus(gateway.as_ref()).await?;

	let mut session = BrowserSession::new(gateway);
	session.set_job_ids("1,2")?;
	session.update_cache().await?;

	let root = session.get_root().await?;
	session.chdir_id(root);

	let mut rows = Vec::new();
	session.ls_dirs(&mut |row: BvfsRow| rows.push(row)).await?;
	println!("entries under /:");
	for row in rows {
		if let BvfsRow::Dir { name, .. } = row {
			println!("  {name}");
		}
	}

	Ok(())
}

/// Job 1 (full): /a/b/x, /a/b/y. Job 2 (incremental): /a/b/x (new
/// version), /a/c/z.
async fn seed_sample_corpus(gateway: &dyn bvfs::CatalogGateway) -> anyhow::Result<()> {
	gateway
		.execute("INSERT INTO Path (Path) VALUES (''), ('/'), ('/a/'), ('/a/b/'), ('/a/c/')")
		.await?;
	gateway
		.execute("INSERT INTO Job (JobId, Name, Type, JobTDate, HasCache) VALUES (1, 'full', 'B', 1000, 0)")
		.await?;
	gateway
		.execute("INSERT INTO Job (JobId, Name, Type, JobTDate, HasCache) VALUES (2, 'incr', 'B', 2000, 0)")
		.await?;

	let b_path_id: i64 = 4; // /a/b/
	let c_path_id: i64 = 5; // /a/c/

	gateway
		.execute(&format!(
			"INSERT INTO File (JobId, PathId, Name) VALUES (1, {b_path_id}, 'x'), (1, {b_path_id}, 'y')"
		))
		.await?;
	gateway
		.execute(&format!(
			"INSERT INTO File (JobId, PathId, Name) VALUES (2, {b_path_id}, 'x'), (2, {c_path_id}, 'z')"
		))
		.await?;

	Ok(())
}
