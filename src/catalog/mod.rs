//! Catalog Gateway (C1): the narrow, backend-portable SQL surface the rest
//! of BVFS is built on.

pub mod backend;
pub mod config;
pub mod error;
pub mod gateway;
pub mod sqlx_gateway;
pub mod templates;

pub use backend::BackendKind;
pub use config::CatalogConfig;
pub use error::{CatalogError, CatalogResult};
pub use gateway::{CatalogGateway, Row};
pub use sqlx_gateway::SqlxGateway;
