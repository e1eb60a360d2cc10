//! Listener setup.

use std::io;

use tokio::net::TcpListener;

/// Bind `host:port`, moving on to the next port while the current one is in use.
///
/// Any other bind error is returned as-is.
pub async fn bind_with_fallback(host: &str, port: u16) -> io::Result<TcpListener> {
    let mut port = port;
    loop {
        match TcpListener::bind((host, port)).await {
            Ok(listener) => return Ok(listener),
            Err(e) if e.kind() == io::ErrorKind::AddrInUse => {
                let Some(next) = port.checked_add(1) else {
                    return Err(e);
                };
                tracing::warn!(port, next, "Port already in use, trying the next one");
                port = next;
            }
            Err(e) => return Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_binds_requested_port_when_free() {
        let listener = bind_with_fallback("127.0.0.1", 0).await.unwrap();
        assert_ne!(listener.local_addr().unwrap().port(), 0);
    }

    #[tokio::test]
    async fn test_falls_forward_when_port_taken() {
        let taken = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let taken_port = taken.local_addr().unwrap().port();

        let listener = bind_with_fallback("127.0.0.1", taken_port).await.unwrap();
        let bound_port = listener.local_addr().unwrap().port();

        assert!(bound_port > taken_port);
    }
}
