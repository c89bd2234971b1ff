//! Named SQL template registry
//!
//! Dispatching SQL template bodies on backend by positional argument count
//! (e.g. a listing query taking 10 args on MySQL, 7 on PostgreSQL) is brittle
//! to extend. This registry instead gives
//! each template a name, a typed argument list, and a `render` that branches
//! explicitly on `BackendKind` only where the SQL text actually differs.

use super::backend::BackendKind;

/// Escape `%`, `_`, and `\` in a LIKE pattern body so the caller's literal
/// wildcards match themselves. Does not add surrounding quotes.
pub fn escape_like(raw: &str) -> String {
	let mut out = String::with_capacity(raw.len());
	for c in raw.chars() {
		if c == '%' || c == '_' || c == '\\' {
			out.push('\\');
		}
		out.push(c);
	}
	out
}

/// Escape a value for inclusion inside a single-quoted SQL string literal.
pub fn escape_literal(raw: &str) -> String {
	raw.replace('\'', "''")
}

/// `bvfs_ls_special_dirs_3` — the "." and ".." rows for a directory listing.
pub fn ls_special_dirs(pwd_path_id: u64, jobids: &str) -> String {
	format!(
		"SELECT 'D' AS Type, PathId, '.' AS Name, 0 AS JobId, '' AS LStat, '' AS FileId \
		 FROM Path WHERE PathId = {pwd} \
		 UNION \
		 SELECT 'D' AS Type, PPathId AS PathId, '..' AS Name, 0 AS JobId, '' AS LStat, '' AS FileId \
		 FROM PathHierarchy WHERE PathId = {pwd} \
		 AND EXISTS (SELECT 1 FROM PathVisibility WHERE PathVisibility.PathId = {pwd} \
		   AND PathVisibility.JobId IN ({jobids}))",
		pwd = pwd_path_id,
		jobids = jobids,
	)
}

/// `bvfs_ls_sub_dirs_5` — child directories of the pwd visible in the job set.
pub fn ls_sub_dirs(pwd_path_id: u64, jobids: &str, name_filter: &str) -> String {
	format!(
		"SELECT 'D' AS Type, PathHierarchy.PathId AS PathId, Path.Path AS Name, \
		 0 AS JobId, '' AS LStat, '' AS FileId \
		 FROM PathHierarchy \
		 JOIN Path ON (Path.PathId = PathHierarchy.PathId) \
		 JOIN PathVisibility ON (PathVisibility.PathId = PathHierarchy.PathId) \
		 WHERE PathHierarchy.PPathId = {pwd} \
		 AND PathVisibility.JobId IN ({jobids}) {filter}",
		pwd = pwd_path_id,
		jobids = jobids,
		filter = name_filter,
	)
}

/// `bvfs_lsdirs_4` — union of special dirs and sub dirs, paged.
pub fn lsdirs(special_dirs_query: &str, sub_dirs_query: &str, limit: u32, offset: u32) -> String {
	format!(
		"SELECT * FROM ({special} UNION {sub}) AS ls_dirs \
		 ORDER BY Name LIMIT {limit} OFFSET {offset}",
		special = special_dirs_query,
		sub = sub_dirs_query,
		limit = limit,
		offset = offset,
	)
}

/// `match_query` — LIKE filter clause applied to `Path.Path` (directory listing).
pub fn match_query(escaped_pattern: &str) -> String {
	format!(" AND Path.Path LIKE '{escaped_pattern}' ESCAPE '\\' ")
}

/// `match_query2` — LIKE filter clause applied to `File.Name` (file listing).
pub fn match_query2(escaped_pattern: &str) -> String {
	format!(" AND File.Name LIKE '{escaped_pattern}' ESCAPE '\\' ")
}

/// `bvfs_list_files` — direct + BaseFiles-inherited files at a PathId.
pub fn list_files(jobids: &str, pwd_path_id: u64, name_filter: &str, limit: u32, offset: u32) -> String {
	format!(
		"SELECT * FROM ( \
		   SELECT 'F' AS Type, File.PathId AS PathId, File.Name AS Name, \
		     File.JobId AS JobId, File.LStat AS LStat, File.FileId AS FileId \
		   FROM File WHERE File.JobId IN ({jobids}) AND File.PathId = {pwd} {filter} \
		   UNION \
		   SELECT 'F' AS Type, File.PathId AS PathId, File.Name AS Name, \
		     BaseFiles.JobId AS JobId, File.LStat AS LStat, File.FileId AS FileId \
		   FROM BaseFiles \
		   JOIN File ON (File.FileId = BaseFiles.FileId) \
		   WHERE BaseFiles.JobId IN ({jobids}) AND File.PathId = {pwd} {filter} \
		 ) AS ls_files \
		 ORDER BY Name, JobId DESC LIMIT {limit} OFFSET {offset}",
		jobids = jobids,
		pwd = pwd_path_id,
		filter = name_filter,
		limit = limit,
		offset = offset,
	)
}

/// `bvfs_versions_6` — every occurrence of a (PathId, Name) on a client.
pub fn versions(
	escaped_name: &str,
	path_id: u64,
	escaped_client: &str,
	type_filter: &str,
	limit: u32,
	offset: u32,
) -> String {
	format!(
		"SELECT 'V' AS Type, File.PathId AS PathId, File.Name AS Name, \
		   File.JobId AS JobId, File.LStat AS LStat, File.FileId AS FileId, \
		   File.Md5 AS Md5, Media.VolumeName AS VolName, Media.InChanger AS VolInChanger \
		 FROM File \
		 JOIN Job ON (Job.JobId = File.JobId) \
		 JOIN Client ON (Client.ClientId = Job.ClientId) \
		 JOIN JobMedia ON (JobMedia.JobId = File.JobId) \
		 JOIN Media ON (Media.MediaId = JobMedia.MediaId) \
		 WHERE File.PathId = {path_id} AND File.Name = '{name}' AND Client.Name = '{client}' \
		 {type_filter} \
		 ORDER BY Job.JobTDate DESC LIMIT {limit} OFFSET {offset}",
		path_id = path_id,
		name = escaped_name,
		client = escaped_client,
		type_filter = type_filter,
		limit = limit,
		offset = offset,
	)
}

/// `bvfs_update_path_visibility_3` — one iteration of the visibility closure.
pub fn update_path_visibility(backend: BackendKind, job_id: u64) -> String {
	match backend {
		BackendKind::PostgreSql | BackendKind::Sqlite => format!(
			"INSERT INTO PathVisibility (PathId, JobId) \
			 SELECT PathHierarchy.PPathId, {job} FROM PathHierarchy \
			 JOIN PathVisibility AS Child ON (Child.PathId = PathHierarchy.PathId) \
			 WHERE Child.JobId = {job} \
			 AND NOT EXISTS ( \
			   SELECT 1 FROM PathVisibility AS Existing \
			   WHERE Existing.PathId = PathHierarchy.PPathId AND Existing.JobId = {job} \
			 )",
			job = job_id,
		),
		BackendKind::MySql => format!(
			"INSERT INTO PathVisibility (PathId, JobId) \
			 SELECT PathHierarchy.PPathId, {job} FROM PathHierarchy \
			 JOIN PathVisibility AS Child ON (Child.PathId = PathHierarchy.PathId) \
			 LEFT JOIN PathVisibility AS Existing \
			   ON (Existing.PathId = PathHierarchy.PPathId AND Existing.JobId = {job}) \
			 WHERE Child.JobId = {job} AND Existing.PathId IS NULL",
			job = job_id,
		),
	}
}

/// `bvfs_lock_pathhierarchy_0` — backend-appropriate exclusive write lock.
pub fn lock_path_hierarchy(backend: BackendKind) -> String {
	match backend {
		BackendKind::PostgreSql => "LOCK TABLE PathHierarchy IN EXCLUSIVE MODE".to_string(),
		BackendKind::MySql => "LOCK TABLES PathHierarchy WRITE".to_string(),
		// SQLite serializes all writers on the whole database file; no
		// per-table lock statement exists or is needed.
		BackendKind::Sqlite => "SELECT 1".to_string(),
	}
}

/// `bvfs_unlock_tables_0` — release the lock taken above.
pub fn unlock_tables(backend: BackendKind) -> String {
	match backend {
		BackendKind::PostgreSql => "SELECT 1".to_string(), // released at commit
		BackendKind::MySql => "UNLOCK TABLES".to_string(),
		BackendKind::Sqlite => "SELECT 1".to_string(),
	}
}

/// `bvfs_clear_cache_0` — the three clear-cache statements (§4.3.5), returned
/// in execution order.
pub fn clear_cache(backend: BackendKind) -> Vec<String> {
	let wipe = |table: &str| -> String {
		if backend.supports_truncate() {
			format!("TRUNCATE TABLE {table}")
		} else {
			format!("DELETE FROM {table}")
		}
	};

	vec![
		"UPDATE Job SET HasCache = 0".to_string(),
		wipe("PathHierarchy"),
		wipe("PathVisibility"),
	]
}

/// `bvfs_select` — materialize `<token>` from `btemp<token>`, keeping only
/// the most-recent-`JobTDate` row per `(PathId, Name)`.
pub fn bvfs_select(backend: BackendKind, token: &str) -> Vec<String> {
	let create = format!(
		"CREATE TABLE {token} AS \
		 SELECT b1.JobId, b1.PathId, b1.FileId, b1.FileIndex, b1.Name \
		 FROM btemp{token} AS b1 \
		 JOIN ( \
		   SELECT PathId, Name, MAX(JobTDate) AS JobTDate \
		   FROM btemp{token} GROUP BY PathId, Name \
		 ) AS latest \
		 ON (b1.PathId = latest.PathId AND b1.Name = latest.Name AND b1.JobTDate = latest.JobTDate)",
		token = token,
	);

	let mut stmts = vec![create];
	if matches!(backend, BackendKind::MySql) {
		stmts.push(format!("CREATE INDEX idx_{token} ON {token} (JobId)"));
	}
	stmts
}
