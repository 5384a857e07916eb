//! HTTP access to the storefront's remote services.
//!
//! This crate provides:
//! - `ApiClient` - implements the catalog, order and upload service traits
//! - `DependencyTag` - which remote service a request goes to
//! - `TimeoutConfig` / `Timeouts` - per-dependency timeouts

mod client;
mod dependency;
mod timeout;

pub use client::*;
pub use dependency::*;
pub use timeout::*;
