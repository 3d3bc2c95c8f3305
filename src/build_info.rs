//! Build metadata exposed by the `/version` endpoint.

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
