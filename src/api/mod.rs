//! PocketBase admin API client.
//!
//! The core of the crate: endpoint configuration, the HTTP transport, the
//! superuser token cache, the authenticated request facade, and the uniform
//! `{success, status, data}` result contract every command emits.

pub mod client;
pub mod config;
pub mod error;
pub mod query;
pub mod report;
pub mod token;
pub mod transport;

pub use client::PbClient;
pub use config::Config;
pub use error::{Error, Result};
pub use query::ListParams;
pub use report::Report;
pub use token::TokenManager;
pub use transport::{ApiResponse, Transport};
