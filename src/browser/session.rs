//! Browser (C4): the restore-UI-facing session facade. Holds a small
//! bundle of local state and delegates catalog work to `listing`,
//! `versions`, the hierarchy builder, and the restore-list builder.

use super::listing;
use super::row::BvfsRow;
use super::versions;
use crate::catalog::CatalogGateway;
use crate::error::{BvfsError, Result};
use crate::hierarchy::HierarchyBuilder;
use crate::restore::{self, idlist};
use std::sync::Arc;

/// A restore-browsing session: job-set scope, current directory, paging,
/// and listing options. Mutators other than `chdir_path` are synchronous,
/// local state updates that never touch the catalog.
pub struct BrowserSession {
	gateway: Arc<dyn CatalogGateway>,
	hierarchy: HierarchyBuilder,
	jobids: Vec<u64>,
	jobids_csv: String,
	pwd_path_id: u64,
	pattern: Option<String>,
	limit: u32,
	offset: u32,
	see_copies: bool,
	see_all_versions: bool,
	prev_dir_name: Option<String>,
}

impl BrowserSession {
	pub fn new(gateway: Arc<dyn CatalogGateway>) -> Self {
		Self {
			hierarchy: HierarchyBuilder::new(gateway.clone()),
			gateway,
			jobids: Vec::new(),
			jobids_csv: String::new(),
			pwd_path_id: 0,
			pattern: None,
			limit: 1000,
			offset: 0,
			see_copies: false,
			see_all_versions: false,
			prev_dir_name: None,
		}
	}

	pub fn set_job_id(&mut self, id: u64) {
		self.jobids = vec![id];
		self.jobids_csv = id.to_string();
	}

	pub fn set_job_ids(&mut self, csv: &str) -> Result<()> {
		let ids =
			idlist::parse_csv_ids(csv).ok_or_else(|| BvfsError::bad_argument("malformed jobids list"))?;
		self.jobids = ids;
		self.jobids_csv = csv.to_string();
		Ok(())
	}

	pub fn set_limit(&mut self, n: u32) {
		self.limit = n;
	}

	pub fn set_offset(&mut self, n: u32) {
		self.offset = n;
	}

	pub fn next_page(&mut self) {
		self.offset += self.limit;
	}

	/// Stores `raw` as a pre-escaped LIKE pattern; literal `%`, `_`, `\`
	/// survive as themselves.
	pub fn set_pattern(&mut self, raw: &str) {
		self.pattern = Some(self.gateway.escape_like(raw));
	}

	pub fn set_see_copies(&mut self, v: bool) {
		self.see_copies = v;
	}

	pub fn set_see_all_versions(&mut self, v: bool) {
		self.see_all_versions = v;
	}

	pub fn pwd_path_id(&self) -> u64 {
		self.pwd_path_id
	}

	/// The PathId of the empty path `""`, the browser's notion of root.
	pub async fn get_root(&self) -> Result<u64> {
		let rows = self.gateway.query("SELECT PathId FROM Path WHERE Path = ''").await?;
		first_u64(&rows).ok_or_else(|| BvfsError::bad_argument("root PathId not found"))
	}

	/// Infallible `chDir(pathId)`: resets paging state.
	pub fn chdir_id(&mut self, path_id: u64) {
		self.pwd_path_id = path_id;
		self.offset = 0;
		self.prev_dir_name = None;
	}

	/// Fallible `chDir(pathText)`: resolves through the catalog. Returns
	/// `true` iff the path exists.
	pub async fn chdir_path(&mut self, path_text: &str) -> Result<bool> {
		let escaped = self.gateway.escape_literal(path_text);
		let rows = self
			.gateway
			.query(&format!("SELECT PathId FROM Path WHERE Path = '{escaped}'"))
			.await?;
		match first_u64(&rows) {
			Some(pid) => {
				self.chdir_id(pid);
				Ok(true)
			}
			None => Ok(false),
		}
	}

	/// `updateCache()`: builds the hierarchy for this session's job set.
	pub async fn update_cache(&self) -> Result<()> {
		self.hierarchy.update_jobs(&self.jobids).await
	}

	/// `bvfsUpdateCache()`: builds the hierarchy for every uncached job.
	pub async fn bvfs_update_cache(&self) -> Result<()> {
		let rows = self.gateway.query("SELECT JobId FROM Job WHERE HasCache = 0").await?;
		let job_ids: Vec<u64> = rows.iter().filter_map(|r| cell_u64(r, 0)).collect();
		self.hierarchy.update_jobs(&job_ids).await
	}

	pub async fn clear_cache(&self) -> Result<()> {
		self.hierarchy.clear_cache().await
	}

	/// `lsDirs()`: returns `true` iff the page was full.
	pub async fn ls_dirs(&mut self, sink: &mut dyn FnMut(BvfsRow)) -> Result<bool> {
		listing::ls_dirs(
			self.gateway.as_ref(),
			&self.jobids_csv,
			self.pwd_path_id,
			self.pattern.as_deref(),
			self.limit,
			self.offset,
			&mut self.prev_dir_name,
			sink,
		)
		.await
	}

	/// `lsFiles()`: returns `true` iff the page was full.
	pub async fn ls_files(&self, sink: &mut dyn FnMut(BvfsRow)) -> Result<bool> {
		listing::ls_files(
			self.gateway.as_ref(),
			&self.jobids_csv,
			self.pwd_path_id,
			self.pattern.as_deref(),
			self.limit,
			self.offset,
			sink,
		)
		.await
	}

	pub async fn get_all_file_versions(
		&self,
		path_id: u64,
		name: &str,
		client: &str,
		sink: &mut dyn FnMut(BvfsRow),
	) -> Result<()> {
		versions::get_all_file_versions(
			self.gateway.as_ref(),
			path_id,
			name,
			client,
			self.see_copies,
			self.limit,
			self.offset,
			sink,
		)
		.await
	}

	pub async fn get_all_file_versions_by_path(
		&self,
		path_text: &str,
		name: &str,
		client: &str,
		sink: &mut dyn FnMut(BvfsRow),
	) -> Result<()> {
		let escaped = self.gateway.escape_literal(path_text);
		let rows = self
			.gateway
			.query(&format!("SELECT PathId FROM Path WHERE Path = '{escaped}'"))
			.await?;
		let path_id = first_u64(&rows)
			.ok_or_else(|| BvfsError::bad_argument(format!("no such path: {path_text:?}")))?;
		self.get_all_file_versions(path_id, name, client, sink).await
	}

	pub async fn compute_restore_list(
		&self,
		file_ids: &str,
		dir_ids: &str,
		hardlinks: &str,
		output_table: &str,
	) -> Result<()> {
		restore::compute_restore_list(
			self.gateway.as_ref(),
			&self.jobids_csv,
			file_ids,
			dir_ids,
			hardlinks,
			output_table,
		)
		.await
	}

	pub async fn drop_restore_list(&self, token: &str) -> Result<()> {
		restore::drop_restore_list(self.gateway.as_ref(), token).await
	}
}

fn cell_u64(row: &crate::catalog::Row, idx: usize) -> Option<u64> {
	row.get(idx)?.as_deref()?.parse().ok()
}

fn first_u64(rows: &[crate::catalog::Row]) -> Option<u64> {
	rows.first().and_then(|r| cell_u64(r, 0))
}
