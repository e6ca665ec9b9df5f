//! MLGCL Librarian Client Core
//!
//! Client-side core of the MLGCL library's librarian app: authentication
//! against the identity portal, catalog search and dashboard counters,
//! the scan-to-borrow workflow, returns, and record listings — all over
//! the backends' REST JSON contracts.

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod qr;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
