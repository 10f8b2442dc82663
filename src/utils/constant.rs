//! # Application Constants
//!
//! Configuration constants used throughout the BizTime service.

/// Listen address used when `BIND_ADDR` is not set.
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

/// Size of the store connection pool.
///
/// The service shares one connection across all requests.
pub const DB_MAX_CONNECTIONS: u32 = 1;

/// Log filter used when `RUST_LOG` is not set.
pub const DEFAULT_LOG_FILTER: &str = "biztime=info,tower_http=info";

/// Name under which bunyan-formatted logs are emitted.
pub const SERVICE_NAME: &str = "biztime";

/// Body sent by `POST /industries/associate` on success.
pub const ASSOCIATION_CREATED: &str = "Association created successfully";
