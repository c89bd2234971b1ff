//! Visibility closure: extends `PathVisibility` from a
//! child path to every ancestor reachable through `PathHierarchy`.

use crate::catalog::{templates, CatalogGateway};
use crate::error::Result;
use tracing::debug;

/// Runs the `INSERT ... SELECT` closure step repeatedly until it affects
/// zero rows, i.e. until a fixed point is reached. Bounded in practice by
/// tree depth: each iteration can only add rows one hop further from an
/// already-visible path.
pub async fn close(gateway: &dyn CatalogGateway, job_id: u64) -> Result<()> {
	let backend = gateway.backend_kind();
	loop {
		let sql = templates::update_path_visibility(backend, job_id);
		let affected = gateway.execute(&sql).await?;
		debug!(job_id, affected, "visibility closure iteration");
		if affected == 0 {
			break;
		}
	}
	Ok(())
}
