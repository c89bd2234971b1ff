//! Hierarchy Builder (C3): the per-job `PathHierarchy`/`PathVisibility`
//! update protocol.
//!
//! Takes its `CatalogGateway` by constructor argument rather than reaching
//! for global state, handed its collaborators rather than looking them up.

use super::visibility;
use crate::cache::PathIdCache;
use crate::catalog::{templates, CatalogGateway, Row};
use crate::error::{BvfsError, Result};
use crate::path;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct HierarchyBuilder {
	gateway: Arc<dyn CatalogGateway>,
}

impl HierarchyBuilder {
	pub fn new(gateway: Arc<dyn CatalogGateway>) -> Self {
		Self { gateway }
	}

	/// Per-job update protocol. `cache` may be reused across several calls.
	pub async fn update_job(&self, job_id: u64, cache: &mut PathIdCache) -> Result<()> {
		self.gateway.lock().await?;
		let result = self.update_job_locked(job_id, cache).await;
		self.gateway.unlock().await?;
		result
	}

	async fn update_job_locked(&self, job_id: u64, cache: &mut PathIdCache) -> Result<()> {
		// Steps 1-5: atomic HasCache 0 -> -1 transition, published by its
		// own commit before the long build begins.
		self.gateway.begin_tx().await?;
		let has_cache = self.read_has_cache(job_id).await?;
		if has_cache == 1 {
			self.gateway.commit_tx().await?;
			debug!(job_id, "hierarchy already cached");
			return Ok(());
		}
		if has_cache == -1 {
			self.gateway.commit_tx().await?;
			warn!(job_id, "hierarchy build already in progress");
			return Err(BvfsError::AlreadyInProgress { job_id });
		}
		self.gateway
			.execute(&format!("UPDATE Job SET HasCache = -1 WHERE JobId = {job_id}"))
			.await?;
		self.gateway.commit_tx().await?;
		info!(job_id, "hierarchy build started");

		// Steps 6-10: seed PathVisibility, walk uncached paths under the
		// PathHierarchy write lock. Deliberately not wrapped in the same
		// transaction as steps 1-5 or 11-14.
		self.gateway
			.execute(&format!(
				"INSERT INTO PathVisibility (PathId, JobId) \
				 SELECT DISTINCT PathId, {job_id} FROM File WHERE JobId = {job_id}"
			))
			.await?;

		let uncached = self
			.gateway
			.query(&format!(
				"SELECT PathVisibility.PathId, Path.Path FROM PathVisibility \
				 JOIN Path ON (Path.PathId = PathVisibility.PathId) \
				 LEFT JOIN PathHierarchy ON (PathHierarchy.PathId = PathVisibility.PathId) \
				 WHERE PathVisibility.JobId = {job_id} AND PathHierarchy.PathId IS NULL \
				 ORDER BY Path.Path"
			))
			.await?;

		let backend = self.gateway.backend_kind();
		self.gateway
			.execute(&templates::lock_path_hierarchy(backend))
			.await?;

		for row in &uncached {
			let pid = cell_u64(row, 0)
				.ok_or_else(|| BvfsError::bad_argument("malformed PathId in hierarchy scan"))?;
			let path_str = cell_str(row, 1)
				.ok_or_else(|| BvfsError::bad_argument("malformed Path in hierarchy scan"))?;
			self.build_path_chain(pid, &path_str, cache).await?;
		}

		self.gateway
			.execute(&templates::unlock_tables(backend))
			.await?;

		// Steps 11-14: closure + publish HasCache=1, as a fresh
		// transaction so the row locks released at step 10 don't block it.
		self.gateway.begin_tx().await?;
		visibility::close(self.gateway.as_ref(), job_id).await?;
		self.gateway
			.execute(&format!("UPDATE Job SET HasCache = 1 WHERE JobId = {job_id}"))
			.await?;
		self.gateway.commit_tx().await?;
		info!(job_id, "hierarchy build complete");
		Ok(())
	}

	async fn read_has_cache(&self, job_id: u64) -> Result<i32> {
		let rows = self
			.gateway
			.query(&format!("SELECT HasCache FROM Job WHERE JobId = {job_id}"))
			.await?;
		let row = rows
			.first()
			.ok_or_else(|| BvfsError::bad_argument(format!("unknown JobId {job_id}")))?;
		cell_i32(row, 0).ok_or_else(|| BvfsError::bad_argument("malformed HasCache value"))
	}

	/// `buildPathChain`: walk from the leaf upward,
	/// stopping as soon as an ancestor is already known.
	async fn build_path_chain(
		&self,
		leaf_pid: u64,
		leaf_path: &str,
		cache: &mut PathIdCache,
	) -> Result<()> {
		if !leaf_path.ends_with('/') {
			// Defensive: not a directory, this row should not have been
			// returned by the collection query.
			return Ok(());
		}

		let mut pid = leaf_pid;
		let mut current_path = leaf_path.to_string();

		loop {
			if cache.lookup(pid) {
				return Ok(());
			}
			if self.hierarchy_has_row(pid).await? {
				cache.insert(pid);
				return Ok(());
			}

			let parent = path::parent_dir(&current_path);
			if parent.is_empty() {
				return Ok(());
			}

			let ppid = self.lookup_or_create_path(&parent).await?;
			self.gateway
				.execute(&format!(
					"INSERT INTO PathHierarchy (PathId, PPathId) VALUES ({pid}, {ppid})"
				))
				.await?;
			cache.insert(pid);

			pid = ppid;
			current_path = parent;
		}
	}

	async fn hierarchy_has_row(&self, pid: u64) -> Result<bool> {
		let rows = self
			.gateway
			.query(&format!("SELECT PathId FROM PathHierarchy WHERE PathId = {pid}"))
			.await?;
		Ok(!rows.is_empty())
	}

	async fn lookup_or_create_path(&self, path_str: &str) -> Result<u64> {
		let escaped = self.gateway.escape_literal(path_str);
		if let Some(pid) = self.find_path_id(&escaped).await? {
			return Ok(pid);
		}
		self.gateway
			.execute(&format!("INSERT INTO Path (Path) VALUES ('{escaped}')"))
			.await?;
		self.find_path_id(&escaped)
			.await?
			.ok_or_else(|| BvfsError::bad_argument(format!("failed to materialize Path row for {path_str:?}")))
	}

	async fn find_path_id(&self, escaped_path: &str) -> Result<Option<u64>> {
		let rows = self
			.gateway
			.query(&format!("SELECT PathId FROM Path WHERE Path = '{escaped_path}'"))
			.await?;
		Ok(rows.first().and_then(|row| cell_u64(row, 0)))
	}

	/// Bulk update: runs the per-job protocol in order
	/// over a single shared cache, then purges orphaned `PathVisibility`
	/// rows for jobs that no longer exist. A job that's mid-build on
	/// another session is skipped, not fatal to the batch.
	pub async fn update_jobs(&self, job_ids: &[u64]) -> Result<()> {
		let mut cache = PathIdCache::new();
		for &job_id in job_ids {
			match self.update_job(job_id, &mut cache).await {
				Ok(()) => {}
				Err(BvfsError::AlreadyInProgress { .. }) => continue,
				Err(e) => return Err(e),
			}
		}
		self.purge_orphaned_visibility().await
	}

	async fn purge_orphaned_visibility(&self) -> Result<()> {
		self.gateway
			.execute("DELETE FROM PathVisibility WHERE JobId NOT IN (SELECT JobId FROM Job)")
			.await?;
		Ok(())
	}

	/// Clear-cache.
	pub async fn clear_cache(&self) -> Result<()> {
		self.gateway.lock().await?;
		let result = self.clear_cache_locked().await;
		self.gateway.unlock().await?;
		result
	}

	async fn clear_cache_locked(&self) -> Result<()> {
		self.gateway.begin_tx().await?;
		let backend = self.gateway.backend_kind();
		for stmt in templates::clear_cache(backend) {
			self.gateway.execute(&stmt).await?;
		}
		self.gateway.commit_tx().await?;
		info!("hierarchy cache cleared");
		Ok(())
	}
}

fn cell_u64(row: &Row, idx: usize) -> Option<u64> {
	row.get(idx)?.as_ref()?.parse().ok()
}

fn cell_i32(row: &Row, idx: usize) -> Option<i32> {
	row.get(idx)?.as_ref()?.parse().ok()
}

fn cell_str(row: &Row, idx: usize) -> Option<String> {
	row.get(idx)?.clone()
}
