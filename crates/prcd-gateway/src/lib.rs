//! PRCD Gateway - quotations over HTTP
//!
//! This crate serves a [`prcd_core::Grimoire`] over HTTP, answering in plain
//! text or JSON depending on the request headers.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │                 PRCD Gateway                 │
//! ├──────────────────────────────────────────────┤
//! │   GET /  /prcd  /prcd/:section  /sections    │
//! │                      │                       │
//! │           ┌──────────▼──────────┐            │
//! │           │ Content negotiation │            │
//! │           └──────────┬──────────┘            │
//! │                      │                       │
//! │           ┌──────────▼──────────┐            │
//! │           │  Arc<Grimoire>      │            │
//! │           │  (read-only)        │            │
//! │           └──────────▲──────────┘            │
//! │                      │ load once             │
//! │              prcd_*.txt directory            │
//! └──────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod gateway;

pub use config::GatewayConfig;
pub use error::{GatewayError, Result};
pub use gateway::{Gateway, GatewayState, ResponseFormat};

/// Gateway version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default HTTP port
pub const DEFAULT_PORT: u16 = 30666;

/// Default host
pub const DEFAULT_HOST: &str = "127.0.0.1";
