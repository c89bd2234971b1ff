//! Comma-separated decimal integer ID-list parsing.

/// Outcome of pulling one element from an ID list, mirroring
/// `GetNextIdFromList`'s `(1, value)` / `(0, _)` / `(-1, _)` result shape.
#[derive(Debug, PartialEq, Eq)]
enum IdListItem {
	Value(u64),
	End,
	Invalid,
}

const MAX_ELEMENT_LEN: usize = 30;

/// Parses a full comma-separated list of decimal integers. `""` parses to
/// an empty `Vec`. Returns `None` if any element is non-numeric or longer
/// than 30 characters.
pub fn parse_csv_ids(csv: &str) -> Option<Vec<u64>> {
	if csv.is_empty() {
		return Some(Vec::new());
	}
	let mut out = Vec::new();
	for part in csv.split(',') {
		match next_item(part) {
			IdListItem::Value(v) => out.push(v),
			IdListItem::End => {}
			IdListItem::Invalid => return None,
		}
	}
	Some(out)
}

fn next_item(part: &str) -> IdListItem {
	if part.is_empty() {
		return IdListItem::End;
	}
	if part.len() > MAX_ELEMENT_LEN || !part.bytes().all(|b| b.is_ascii_digit()) {
		return IdListItem::Invalid;
	}
	match part.parse::<u64>() {
		Ok(v) => IdListItem::Value(v),
		Err(_) => IdListItem::Invalid,
	}
}
