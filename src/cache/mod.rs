//! PathId Cache (C2): tracks which PathIds are already known to have a
//! `PathHierarchy` edge, so `buildPathChain` can stop walking upward as
//! soon as it hits one.

use std::collections::HashSet;

/// A set of PathIds known to already have a parent edge recorded.
///
/// Owned by one hierarchy-build invocation (or one bulk-update run across
/// several jobs — the cache stays valid across jobs
/// since "known to have an ancestor edge" only grows over time). Not
/// thread-safe; callers that need to share state across tasks wrap it
/// themselves (e.g. `Arc<Mutex<_>>`) only at the points that actually
/// need it.
#[derive(Debug, Default)]
pub struct PathIdCache {
	known: HashSet<u64>,
}

impl PathIdCache {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn lookup(&self, path_id: u64) -> bool {
		self.known.contains(&path_id)
	}

	pub fn insert(&mut self, path_id: u64) {
		self.known.insert(path_id);
	}

	pub fn len(&self) -> usize {
		self.known.len()
	}

	pub fn is_empty(&self) -> bool {
		self.known.is_empty()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn lookup_reflects_inserts() {
		let mut cache = PathIdCache::new();
		assert!(!cache.lookup(42));
		cache.insert(42);
		assert!(cache.lookup(42));
		assert!(!cache.lookup(7));
	}
}
