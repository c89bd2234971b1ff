//! Browser (C4): the restore-UI-facing session, directory/file listing,
//! and file-version lookup.

pub mod listing;
pub mod row;
pub mod session;
pub mod versions;

pub use row::BvfsRow;
pub use session::BrowserSession;
