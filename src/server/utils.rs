//! HTTP server utility methods

use crate::server::server::HttpServer;
use crate::utils::error::AltFriendError;

impl HttpServer {
    /// Format a user-friendly error message for port binding failures
    pub(crate) fn format_bind_error(
        error: std::io::Error,
        bind_addr: &str,
        port: u16,
    ) -> AltFriendError {
        match error.kind() {
            std::io::ErrorKind::AddrInUse => AltFriendError::server(format!(
                "Port {} is already in use. Stop the other process or set ALT_FRIEND_PORT={}",
                port,
                port.saturating_add(1)
            )),
            std::io::ErrorKind::PermissionDenied => AltFriendError::server(format!(
                "Permission denied for port {}. Use a port >= 1024, e.g. ALT_FRIEND_PORT=8080",
                port
            )),
            _ => AltFriendError::server(format!("Failed to bind to {}: {}", bind_addr, error)),
        }
    }
}
