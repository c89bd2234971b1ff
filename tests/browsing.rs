mod support;

use bvfs::{BrowserSession, BvfsRow, HierarchyBuilder};

/// Browsing: `.`, `..`, and child dirs, with dedup across overlapping
/// job visibility.
#[tokio::test]
async fn lists_dirs_with_dedup_across_jobs() {
	let gateway = support::two_job_corpus().await;
	HierarchyBuilder::new(gateway.clone())
		.update_jobs(&[1, 2])
		.await
		.unwrap();

	let a_path_id = support::path_id(&gateway, "/a/").await;

	let mut session = BrowserSession::new(gateway);
	session.set_job_ids("1,2").unwrap();
	session.chdir_id(a_path_id);

	let mut rows = Vec::new();
	session.ls_dirs(&mut |row: BvfsRow| rows.push(row)).await.unwrap();

	let names: Vec<&str> = rows.iter().map(|r| r.name()).collect();
	assert!(names.contains(&"."));
	assert!(names.contains(&".."));
	assert!(names.contains(&"b/") || names.contains(&"b"));
	assert!(names.contains(&"c/") || names.contains(&"c"));

	let b_count = names.iter().filter(|n| n.starts_with('b')).count();
	assert_eq!(b_count, 1, "b/ must not be emitted twice even though both jobs see it");
}

/// §8.3 — empty job set touches nothing and returns false.
#[tokio::test]
async fn empty_job_set_short_circuits() {
	let gateway = support::two_job_corpus().await;
	let mut session = BrowserSession::new(gateway);

	let mut rows = Vec::new();
	let more = session.ls_dirs(&mut |row: BvfsRow| rows.push(row)).await.unwrap();
	assert!(!more);
	assert!(rows.is_empty());
}

/// §8.3 — limit = 0 never returns rows.
#[tokio::test]
async fn zero_limit_returns_nothing() {
	let gateway = support::two_job_corpus().await;
	HierarchyBuilder::new(gateway.clone())
		.update_jobs(&[1, 2])
		.await
		.unwrap();

	let mut session = BrowserSession::new(gateway);
	session.set_job_ids("1,2").unwrap();
	session.set_limit(0);

	let mut rows = Vec::new();
	let more = session.ls_files(&mut |row: BvfsRow| rows.push(row)).await.unwrap();
	assert!(!more);
	assert!(rows.is_empty());
}

/// `lsFiles` surfaces both direct rows for a path, across the job set.
#[tokio::test]
async fn lists_files_at_pwd() {
	let gateway = support::two_job_corpus().await;
	HierarchyBuilder::new(gateway.clone())
		.update_jobs(&[1, 2])
		.await
		.unwrap();

	let b_path_id = support::path_id(&gateway, "/a/b/").await;

	let mut session = BrowserSession::new(gateway);
	session.set_job_ids("1,2").unwrap();
	session.chdir_id(b_path_id);

	let mut rows = Vec::new();
	session.ls_files(&mut |row: BvfsRow| rows.push(row)).await.unwrap();

	let names: Vec<&str> = rows.iter().map(|r| r.name()).collect();
	assert!(names.contains(&"x"));
	assert!(names.contains(&"y"));
}
