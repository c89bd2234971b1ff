//! Shared fixtures for the integration tests: an in-memory SQLite catalog
//! seeded with the two-job corpus used throughout these tests.

use bvfs::{CatalogConfig, CatalogGateway, SqlxGateway};
use std::sync::Arc;

const SCHEMA: &str = include_str!("schema.sql");

/// A fresh, empty in-memory catalog with the schema applied.
pub async fn empty_catalog() -> Arc<dyn CatalogGateway> {
	let config = CatalogConfig::sqlite("sqlite::memory:");
	let gateway = SqlxGateway::connect(&config)
		.await
		.expect("connect to in-memory sqlite catalog");
	for stmt in SCHEMA.split(';') {
		let stmt = stmt.trim();
		if !stmt.is_empty() {
			gateway.execute(stmt).await.expect("apply schema statement");
		}
	}
	Arc::new(gateway)
}

/// Job 1 (full backup): `/a/b/x`, `/a/b/y`.
/// Job 2 (incremental): `/a/b/x` (new version), `/a/c/z`.
pub async fn two_job_corpus() -> Arc<dyn CatalogGateway> {
	let gateway = empty_catalog().await;

	gateway
		.execute("INSERT INTO Path (Path) VALUES (''), ('/'), ('/a/'), ('/a/b/'), ('/a/c/')")
		.await
		.unwrap();
	gateway
		.execute(
			"INSERT INTO Job (JobId, Name, Type, JobTDate, HasCache) VALUES \
			 (1, 'full', 'B', 1000, 0), (2, 'incr', 'B', 2000, 0)",
		)
		.await
		.unwrap();
	gateway
		.execute("INSERT INTO Client (ClientId, Name) VALUES (1, 'host1')")
		.await
		.unwrap();
	gateway
		.execute("UPDATE Job SET ClientId = 1")
		.await
		.unwrap();

	let b_path_id = path_id(&gateway, "/a/b/").await;
	let c_path_id = path_id(&gateway, "/a/c/").await;

	gateway
		.execute(&format!(
			"INSERT INTO File (JobId, PathId, Name, FileIndex) VALUES \
			 (1, {b_path_id}, 'x', 1), (1, {b_path_id}, 'y', 2)"
		))
		.await
		.unwrap();
	gateway
		.execute(&format!(
			"INSERT INTO File (JobId, PathId, Name, FileIndex) VALUES \
			 (2, {b_path_id}, 'x', 1), (2, {c_path_id}, 'z', 2)"
		))
		.await
		.unwrap();

	gateway
}

pub async fn path_id(gateway: &Arc<dyn CatalogGateway>, path: &str) -> u64 {
	let escaped = gateway.escape_literal(path);
	let rows = gateway
		.query(&format!("SELECT PathId FROM Path WHERE Path = '{escaped}'"))
		.await
		.unwrap();
	rows[0][0].as_ref().unwrap().parse().unwrap()
}
