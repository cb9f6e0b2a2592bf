//! Per-connector metadata caching + site resolution.
//!
//! [`runtime::ConnectorRuntime`] holds one connector's cached metadata
//! (config, schemas, charting schemes, type maps, transforms), loaded from
//! the stores its manifest points at, and serves site-specific views of it
//! on demand. [`registry::ConnectorRegistry`] owns one runtime per
//! registered connector and is the serialization point for reloads.

pub mod env;
pub mod error;
pub mod registry;
pub mod runtime;
