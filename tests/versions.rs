mod support;

use bvfs::{BrowserSession, BvfsRow, HierarchyBuilder};

/// `getAllFileVersions("/a/b/", "x", client="host1")`: two version
/// rows (Job 1 and Job 2 each backed up `x`), newest first.
#[tokio::test]
async fn versions_of_a_file_ordered_newest_first() {
	let gateway = support::two_job_corpus().await;
	HierarchyBuilder::new(gateway.clone())
		.update_jobs(&[1, 2])
		.await
		.unwrap();

	gateway
		.execute("INSERT INTO Media (MediaId, VolumeName, InChanger) VALUES (1, 'Vol-0001', 1), (2, 'Vol-0002', 0)")
		.await
		.unwrap();
	gateway
		.execute("INSERT INTO JobMedia (JobId, MediaId) VALUES (1, 1), (2, 2)")
		.await
		.unwrap();

	let b_path_id = support::path_id(&gateway, "/a/b/").await;

	let session = BrowserSession::new(gateway);
	let mut rows = Vec::new();
	session
		.get_all_file_versions(b_path_id, "x", "host1", &mut |row: BvfsRow| rows.push(row))
		.await
		.unwrap();

	assert_eq!(rows.len(), 2);
	let job_ids: Vec<u64> = rows
		.iter()
		.map(|r| match r {
			BvfsRow::Version { job_id, .. } => *job_id,
			other => panic!("expected a Version row, got {other:?}"),
		})
		.collect();
	// Job 2 has the later JobTDate, so it sorts first.
	assert_eq!(job_ids, vec![2, 1]);

	let vol_names: Vec<&str> = rows
		.iter()
		.map(|r| match r {
			BvfsRow::Version { vol_name, .. } => vol_name.as_str(),
			other => panic!("expected a Version row, got {other:?}"),
		})
		.collect();
	assert_eq!(vol_names, vec!["Vol-0002", "Vol-0001"]);
}

/// A path/name pair with no backed-up occurrences yields no rows, not an
/// error.
#[tokio::test]
async fn versions_of_an_unknown_file_is_empty() {
	let gateway = support::two_job_corpus().await;
	HierarchyBuilder::new(gateway.clone())
		.update_jobs(&[1, 2])
		.await
		.unwrap();

	let b_path_id = support::path_id(&gateway, "/a/b/").await;

	let session = BrowserSession::new(gateway);
	let mut rows = Vec::new();
	session
		.get_all_file_versions(b_path_id, "does-not-exist", "host1", &mut |row: BvfsRow| rows.push(row))
		.await
		.unwrap();

	assert!(rows.is_empty());
}
