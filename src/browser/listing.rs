//! Directory and file listing.

use super::row::BvfsRow;
use crate::catalog::{templates, CatalogGateway};
use crate::error::Result;
use crate::path;

/// `lsDirs`: the union of "." / ".." and child directories visible in the
/// session's job set, paged. Returns `true` iff the page was full, i.e.
/// there may be more to read.
pub async fn ls_dirs(
	gateway: &dyn CatalogGateway,
	jobids_csv: &str,
	pwd_path_id: u64,
	pattern: Option<&str>,
	limit: u32,
	offset: u32,
	prev_dir_name: &mut Option<String>,
	sink: &mut dyn FnMut(BvfsRow),
) -> Result<bool> {
	if jobids_csv.is_empty() || limit == 0 {
		return Ok(false);
	}

	let name_filter = pattern.map(templates::match_query).unwrap_or_default();
	let special = templates::ls_special_dirs(pwd_path_id, jobids_csv);
	let sub = templates::ls_sub_dirs(pwd_path_id, jobids_csv, &name_filter);
	let sql = templates::lsdirs(&special, &sub, limit, offset);

	let rows = gateway.query(&sql).await?;
	for cells in &rows {
		let Some(row) = BvfsRow::from_cells(cells) else {
			continue;
		};
		// bvfs_ls_sub_dirs_5 selects the child's full canonical Path as
		// Name; reduce it to a display basename here rather than in SQL,
		// so per-backend SUBSTR dialects don't need to agree.
		let row = shorten_sub_dir_name(row);

		// Dedup consecutive directory rows sharing a Name: the two UNION
		// branches ("." / ".." vs. child dirs) are ordered by Name, so
		// comparing against the last-emitted name is sufficient.
		if prev_dir_name.as_deref() == Some(row.name()) {
			continue;
		}
		*prev_dir_name = Some(row.name().to_string());
		sink(row);
	}

	// "Page was full" means the query returned a full window, regardless of
	// how many of those rows survived dedup/decode — emitted count alone
	// would under-report and stop paging early.
	Ok(rows.len() == limit as usize)
}

fn shorten_sub_dir_name(row: BvfsRow) -> BvfsRow {
	match row {
		BvfsRow::Dir { path_id, name } if name != "." && name != ".." => {
			let base = path::basename_dir(&name);
			let display = if base.is_empty() {
				name
			} else {
				format!("{base}/")
			};
			BvfsRow::Dir {
				path_id,
				name: display,
			}
		}
		other => other,
	}
}

/// `lsFiles`: direct and `BaseFiles`-inherited files at the pwd, for every
/// job in the session's job set. Returns `true` iff the page was full.
pub async fn ls_files(
	gateway: &dyn CatalogGateway,
	jobids_csv: &str,
	pwd_path_id: u64,
	pattern: Option<&str>,
	limit: u32,
	offset: u32,
	sink: &mut dyn FnMut(BvfsRow),
) -> Result<bool> {
	if jobids_csv.is_empty() || limit == 0 {
		return Ok(false);
	}

	let name_filter = pattern.map(templates::match_query2).unwrap_or_default();
	let sql = templates::list_files(jobids_csv, pwd_path_id, &name_filter, limit, offset);

	let rows = gateway.query(&sql).await?;
	for cells in &rows {
		let Some(row) = BvfsRow::from_cells(cells) else {
			continue;
		};
		sink(row);
	}

	// See the matching comment in `ls_dirs`: page-full is driven off the
	// fetched row count, not how many rows made it through the sink.
	Ok(rows.len() == limit as usize)
}
