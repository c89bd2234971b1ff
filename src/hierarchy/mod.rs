//! Hierarchy Builder (C3): keeps `PathHierarchy`/`PathVisibility` in sync
//! with `File` for a set of jobs.

pub mod builder;
pub mod visibility;

pub use builder::HierarchyBuilder;
