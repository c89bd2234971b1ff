mod support;

use bvfs::{BrowserSession, HierarchyBuilder};

/// `computeRestoreList` by directory: restoring `/a/` across jobs
/// 1 and 2 should pick the newest version of each duplicated name (`x`
/// from Job 2, not Job 1) plus every name that only one job backed up
/// (`y` from Job 1, `z` from Job 2).
#[tokio::test]
async fn restore_list_by_directory_keeps_newest_duplicate() {
	let gateway = support::two_job_corpus().await;
	HierarchyBuilder::new(gateway.clone())
		.update_jobs(&[1, 2])
		.await
		.unwrap();

	let a_path_id = support::path_id(&gateway, "/a/").await;

	let mut session = BrowserSession::new(gateway.clone());
	session.set_job_ids("1,2").unwrap();

	session
		.compute_restore_list("", &a_path_id.to_string(), "", "b2100")
		.await
		.unwrap();

	let rows = gateway
		.query("SELECT JobId, Name FROM b2100 ORDER BY Name")
		.await
		.unwrap();
	let entries: Vec<(u64, String)> = rows
		.iter()
		.map(|r| (r[0].as_ref().unwrap().parse().unwrap(), r[1].clone().unwrap()))
		.collect();

	assert_eq!(
		entries,
		vec![(2u64, "x".to_string()), (1, "y".to_string()), (2, "z".to_string())]
	);

	session.drop_restore_list("b2100").await.unwrap();
	let after_drop = gateway.query("SELECT name FROM sqlite_master WHERE type='table' AND name='b2100'").await.unwrap();
	assert!(after_drop.is_empty());
}

/// An invalid token is rejected before any catalog work happens.
#[tokio::test]
async fn restore_list_rejects_malformed_token() {
	let gateway = support::two_job_corpus().await;
	let mut session = BrowserSession::new(gateway);
	session.set_job_ids("1,2").unwrap();

	let err = session
		.compute_restore_list("1", "", "", "not-a-token")
		.await
		.unwrap_err();
	assert!(matches!(err, bvfs::BvfsError::InvalidToken { .. }));
}

/// At least one of fileIds/dirIds/hardlinks must be non-empty.
#[tokio::test]
async fn restore_list_rejects_all_empty_selection() {
	let gateway = support::two_job_corpus().await;
	let mut session = BrowserSession::new(gateway);
	session.set_job_ids("1,2").unwrap();

	let err = session.compute_restore_list("", "", "", "b2200").await.unwrap_err();
	assert!(matches!(err, bvfs::BvfsError::BadArgument { .. }));
}
