//! HTTP client for an external FWIP title catalog.
//!
//! [`HttpCatalogStore`] implements [`fwip_core::catalog::CatalogStore`] over a
//! plain JSON REST API, so the moderation console can publish approved
//! changes to a catalog it does not own.

pub mod client;

pub use client::{CatalogClientError, HttpCatalogStore, DEFAULT_TIMEOUT};
