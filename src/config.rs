use std::net::SocketAddr;

/// Application-level constants
pub const APP_NAME: &str = "VitalVoice";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default address the API server binds to.
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8787";

/// Default tracing filter when RUST_LOG is not set.
pub fn default_log_filter() -> &'static str {
    "info"
}

/// Resolve the bind address from `VITALVOICE_ADDR`, falling back to the default.
/// An unparseable override is ignored with a warning rather than refusing to start.
pub fn bind_addr() -> SocketAddr {
    match std::env::var("VITALVOICE_ADDR") {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            tracing::warn!(addr = %raw, "Invalid VITALVOICE_ADDR, using default");
            default_addr()
        }),
        Err(_) => default_addr(),
    }
}

fn default_addr() -> SocketAddr {
    DEFAULT_BIND_ADDR
        .parse()
        .expect("default bind address is valid")
}
