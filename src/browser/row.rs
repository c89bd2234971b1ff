//! Typed row sink, replacing an untyped `(ctx, fieldCount, row)` callback
//! with a Rust enum over the three row shapes. The sink a caller installs
//! stays polymorphic over all three.

use crate::catalog::Row;

/// One row emitted by the Browser (C4) to a caller-supplied sink.
#[derive(Debug, Clone, PartialEq)]
pub enum BvfsRow {
	/// `Type = 'D'`: a directory entry from `lsDirs`.
	Dir { path_id: u64, name: String },
	/// `Type = 'F'`: a file entry from `lsFiles`.
	File {
		path_id: u64,
		name: String,
		job_id: u64,
		lstat: String,
		file_id: Option<u64>,
	},
	/// `Type = 'V'`: one occurrence from `getAllFileVersions`.
	Version {
		path_id: u64,
		name: String,
		job_id: u64,
		lstat: String,
		file_id: u64,
		md5: String,
		vol_name: String,
		vol_in_changer: bool,
	},
}

impl BvfsRow {
	/// Decodes one catalog row into the shape indicated by its `Type`
	/// column (field 0). Returns `None` for a malformed or unrecognized row
	/// rather than erroring the whole page.
	pub fn from_cells(cells: &Row) -> Option<Self> {
		let type_tag = cells.first()?.as_deref()?;
		match type_tag {
			"D" => Some(BvfsRow::Dir {
				path_id: parse_u64(cells, 1)?,
				name: cell_string(cells, 2)?,
			}),
			"F" => Some(BvfsRow::File {
				path_id: parse_u64(cells, 1)?,
				name: cell_string(cells, 2)?,
				job_id: parse_u64(cells, 3)?,
				lstat: cell_string(cells, 4).unwrap_or_default(),
				file_id: parse_u64(cells, 5),
			}),
			"V" => Some(BvfsRow::Version {
				path_id: parse_u64(cells, 1)?,
				name: cell_string(cells, 2)?,
				job_id: parse_u64(cells, 3)?,
				lstat: cell_string(cells, 4).unwrap_or_default(),
				file_id: parse_u64(cells, 5)?,
				md5: cell_string(cells, 6).unwrap_or_default(),
				vol_name: cell_string(cells, 7).unwrap_or_default(),
				vol_in_changer: cells
					.get(8)
					.and_then(|c| c.as_deref())
					.map(|s| s == "1" || s.eq_ignore_ascii_case("t"))
					.unwrap_or(false),
			}),
			_ => None,
		}
	}

	pub fn name(&self) -> &str {
		match self {
			BvfsRow::Dir { name, .. } => name,
			BvfsRow::File { name, .. } => name,
			BvfsRow::Version { name, .. } => name,
		}
	}
}

fn parse_u64(cells: &Row, idx: usize) -> Option<u64> {
	cells.get(idx)?.as_deref()?.parse().ok()
}

fn cell_string(cells: &Row, idx: usize) -> Option<String> {
	cells.get(idx)?.clone()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn decodes_dir_row() {
		let cells: Row = vec![
			Some("D".to_string()),
			Some("5".to_string()),
			Some("b/".to_string()),
		];
		assert_eq!(
			BvfsRow::from_cells(&cells),
			Some(BvfsRow::Dir {
				path_id: 5,
				name: "b/".to_string()
			})
		);
	}

	#[test]
	fn decodes_file_row() {
		let cells: Row = vec![
			Some("F".to_string()),
			Some("5".to_string()),
			Some("x".to_string()),
			Some("2".to_string()),
			Some("lstat-blob".to_string()),
			Some("77".to_string()),
		];
		assert_eq!(
			BvfsRow::from_cells(&cells),
			Some(BvfsRow::File {
				path_id: 5,
				name: "x".to_string(),
				job_id: 2,
				lstat: "lstat-blob".to_string(),
				file_id: Some(77),
			})
		);
	}

	#[test]
	fn unknown_type_tag_decodes_to_none() {
		let cells: Row = vec![Some("Z".to_string())];
		assert_eq!(BvfsRow::from_cells(&cells), None);
	}
}
