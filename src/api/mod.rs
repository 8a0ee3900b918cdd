//! Wire layer for the catalog HTTP API.

pub mod client;
pub mod error;
pub mod types;

pub use client::{CatalogApi, CatalogClient};
pub use error::ApiError;
pub use types::{ResourceDetail, ResourceSummary};
