//! Restore-List Builder (C5): turns a heterogeneous selection (file ids,
//! directory ids, hardlink pairs) into a deduplicated, materialized
//! restore-list relation.

use super::idlist;
use super::token as token_module;
use crate::catalog::{templates, CatalogGateway};
use crate::error::{BvfsError, Result};
use tracing::{debug, info};

/// Computes `<output_table>` from `fileIds`/`dirIds`/`hardlinks` against
/// the given job set. Any of the three inputs may be
/// empty but at least one must be non-empty.
pub async fn compute_restore_list(
	gateway: &dyn CatalogGateway,
	jobids_csv: &str,
	file_ids: &str,
	dir_ids: &str,
	hardlinks: &str,
	output_table: &str,
) -> Result<()> {
	if !token_module::is_valid(output_table) {
		return Err(BvfsError::InvalidToken {
			token: output_table.to_string(),
		});
	}
	if file_ids.is_empty() && dir_ids.is_empty() && hardlinks.is_empty() {
		return Err(BvfsError::bad_argument(
			"at least one of fileIds, dirIds, hardlinks must be non-empty",
		));
	}

	let file_id_list =
		idlist::parse_csv_ids(file_ids).ok_or_else(|| BvfsError::bad_argument("malformed fileIds list"))?;
	let dir_id_list =
		idlist::parse_csv_ids(dir_ids).ok_or_else(|| BvfsError::bad_argument("malformed dirIds list"))?;
	let hardlink_list =
		idlist::parse_csv_ids(hardlinks).ok_or_else(|| BvfsError::bad_argument("malformed hardlinks list"))?;
	if hardlink_list.len() % 2 != 0 {
		return Err(BvfsError::bad_argument(
			"hardlinks list must have an even number of elements",
		));
	}

	let scratch = token_module::scratch_name(output_table);

	gateway.lock().await?;
	let result = compute_restore_list_locked(
		gateway,
		jobids_csv,
		&file_id_list,
		&dir_id_list,
		&hardlink_list,
		output_table,
		&scratch,
	)
	.await;
	if result.is_err() {
		// Best-effort cleanup of the scratch relation on failure (§4.5.3);
		// the partial `<output_table>`, if any, is left for teardown.
		let _ = gateway.execute(&format!("DROP TABLE IF EXISTS {scratch}")).await;
	}
	gateway.unlock().await?;
	result
}

async fn compute_restore_list_locked(
	gateway: &dyn CatalogGateway,
	jobids_csv: &str,
	file_ids: &[u64],
	dir_ids: &[u64],
	hardlinks: &[u64],
	output_table: &str,
	scratch: &str,
) -> Result<()> {
	gateway.execute(&format!("DROP TABLE IF EXISTS {scratch}")).await?;
	gateway.execute(&format!("DROP TABLE IF EXISTS {output_table}")).await?;

	let mut select = String::new();
	let mut first = false;

	if !file_ids.is_empty() {
		let ids = join_csv(file_ids);
		select.push_str(&format!(
			"SELECT Job.JobId, Job.JobTDate, File.FileIndex, File.Name, File.PathId, File.FileId \
			 FROM File JOIN Job ON (Job.JobId = File.JobId) WHERE File.FileId IN ({ids})"
		));
		first = true;
	}

	for &dir_id in dir_ids {
		let path_rows = gateway
			.query(&format!("SELECT Path FROM Path WHERE PathId = {dir_id}"))
			.await?;
		let path_str = match path_rows.first().and_then(|r| r.first()).and_then(|c| c.clone()) {
			Some(p) => p,
			None => {
				// path-not-found: terminate only this branch (§7), not the
				// whole operation.
				debug!(dir_id, "restore-list dirId has no Path row, skipping");
				continue;
			}
		};
		let escaped = gateway.escape_literal(&gateway.escape_like(&path_str));

		if first {
			select.push_str(" UNION ");
		}
		select.push_str(&format!(
			"SELECT Job.JobId, Job.JobTDate, File.FileIndex, File.Name, File.PathId, File.FileId \
			 FROM Path JOIN File ON (File.PathId = Path.PathId) JOIN Job ON (Job.JobId = File.JobId) \
			 WHERE Path.Path LIKE '{escaped}%' ESCAPE '\\' AND File.JobId IN ({jobids_csv})"
		));
		select.push_str(" UNION ");
		select.push_str(&format!(
			"SELECT Job.JobId, Job.JobTDate, File.FileIndex, File.Name, File.PathId, File.FileId \
			 FROM Path JOIN File ON (File.PathId = Path.PathId) \
			 JOIN BaseFiles ON (BaseFiles.FileId = File.FileId) JOIN Job ON (Job.JobId = BaseFiles.JobId) \
			 WHERE Path.Path LIKE '{escaped}%' ESCAPE '\\' AND BaseFiles.JobId IN ({jobids_csv})"
		));
		first = true;
	}

	if !hardlinks.is_empty() {
		let mut prev: Option<u64> = None;
		for pair in hardlinks.chunks(2) {
			let job_id = pair[0];
			let file_index = pair[1];
			if prev != Some(job_id) {
				match prev {
					None if first => select.push_str(" UNION "),
					None => {}
					Some(_) => select.push_str(") UNION "),
				}
				select.push_str(&format!(
					"SELECT Job.JobId, Job.JobTDate, File.FileIndex, File.Name, File.PathId, File.FileId \
					 FROM File JOIN Job ON (Job.JobId = File.JobId) \
					 WHERE File.JobId = {job_id} AND File.FileIndex IN ({file_index}"
				));
				prev = Some(job_id);
				first = true;
			} else {
				select.push_str(&format!(", {file_index}"));
			}
		}
		if prev.is_some() {
			select.push(')');
		}
	}

	gateway
		.execute(&format!("CREATE TABLE {scratch} AS {select}"))
		.await?;

	let backend = gateway.backend_kind();
	for stmt in templates::bvfs_select(backend, output_table) {
		gateway.execute(&stmt).await?;
	}

	gateway.execute(&format!("DROP TABLE IF EXISTS {scratch}")).await?;
	info!(output_table, "restore list computed");
	Ok(())
}

/// `dropRestoreList`.
pub async fn drop_restore_list(gateway: &dyn CatalogGateway, token: &str) -> Result<()> {
	if !token_module::is_valid(token) {
		return Err(BvfsError::InvalidToken {
			token: token.to_string(),
		});
	}
	gateway.execute(&format!("DROP TABLE IF EXISTS {token}")).await?;
	Ok(())
}

fn join_csv(ids: &[u64]) -> String {
	ids.iter()
		.map(|id| id.to_string())
		.collect::<Vec<_>>()
		.join(",")
}
