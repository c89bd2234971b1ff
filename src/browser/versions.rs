//! File versions: every backed-up occurrence of a
//! `(PathId, Name)` on a given client.

use super::row::BvfsRow;
use crate::catalog::{templates, CatalogGateway};
use crate::error::Result;

/// `getAllFileVersions`. `Type` filter is `{'B'}` normally and
/// `{'B','C','A','a'}` when `see_copies` is set.
pub async fn get_all_file_versions(
	gateway: &dyn CatalogGateway,
	path_id: u64,
	name: &str,
	client: &str,
	see_copies: bool,
	limit: u32,
	offset: u32,
	sink: &mut dyn FnMut(BvfsRow),
) -> Result<()> {
	let escaped_name = gateway.escape_literal(name);
	let escaped_client = gateway.escape_literal(client);
	let type_filter = if see_copies {
		"AND Job.Type IN ('B','C','A','a')"
	} else {
		"AND Job.Type = 'B'"
	};

	let sql = templates::versions(&escaped_name, path_id, &escaped_client, type_filter, limit, offset);
	let rows = gateway.query(&sql).await?;
	for cells in &rows {
		if let Some(row) = BvfsRow::from_cells(cells) {
			sink(row);
		}
	}
	Ok(())
}
