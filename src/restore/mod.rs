//! Restore-List Builder (C5).

pub mod builder;
pub mod idlist;
pub mod token;

pub use builder::{compute_restore_list, drop_restore_list};
