mod browser;
mod cache;
mod catalog;
mod error;
mod hierarchy;
mod path;
mod restore;

pub use browser::{BrowserSession, BvfsRow};
pub use cache::PathIdCache;
pub use catalog::{
	BackendKind, CatalogConfig, CatalogError, CatalogGateway, CatalogResult, Row, SqlxGateway,
};
pub use error::{BvfsError, Result};
pub use hierarchy::HierarchyBuilder;
pub use path::{basename_dir, parent_dir};
pub use restore::{compute_restore_list, drop_restore_list};
