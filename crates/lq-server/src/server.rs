use std::future::Future;
use std::sync::Arc;

use tokio::net::TcpListener;

use lq_store::QueueStore;

use crate::config::ServerConfig;
use crate::error::ServerResult;
use crate::router::build_router_with_limit;

/// linequeue HTTP server.
pub struct LqServer {
    config: ServerConfig,
    store: Arc<QueueStore>,
}

impl LqServer {
    pub fn new(config: ServerConfig, store: Arc<QueueStore>) -> Self {
        Self { config, store }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    pub fn store(&self) -> &Arc<QueueStore> {
        &self.store
    }

    /// Build the router (useful for testing).
    pub fn router(&self) -> axum::Router {
        build_router_with_limit(Arc::clone(&self.store), self.config.max_body_bytes)
    }

    /// Serve on the configured address until Ctrl-C.
    pub async fn serve(self) -> ServerResult<()> {
        self.serve_with_shutdown(shutdown_signal()).await
    }

    /// Serve on the configured address until `signal` resolves.
    pub async fn serve_with_shutdown<F>(self, signal: F) -> ServerResult<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let listener = TcpListener::bind(self.config.bind_addr).await?;
        self.run(listener, signal).await
    }

    /// Serve on an already-bound listener until `signal` resolves.
    pub async fn run<F>(self, listener: TcpListener, signal: F) -> ServerResult<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let app = self.router();
        tracing::info!("linequeue listening on {}", listener.local_addr()?);
        axum::serve(listener, app)
            .with_graceful_shutdown(signal)
            .await?;
        tracing::info!("linequeue stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("failed to listen for Ctrl-C: {e}");
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
mod tests {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpStream;
    use tokio::sync::oneshot;

    use super::*;

    async fn send(addr: std::net::SocketAddr, request: &str) -> String {
        let mut stream = TcpStream::connect(addr).await.unwrap();
        stream.write_all(request.as_bytes()).await.unwrap();
        let mut response = String::new();
        stream.read_to_string(&mut response).await.unwrap();
        response
    }

    #[test]
    fn server_construction() {
        let server = LqServer::new(ServerConfig::default(), Arc::new(QueueStore::new()));
        assert_eq!(server.config().bind_addr, "127.0.0.1:8080".parse().unwrap());
        assert_eq!(server.store().topic_count(), 0);
    }

    #[test]
    fn router_builds() {
        let server = LqServer::new(ServerConfig::default(), Arc::new(QueueStore::new()));
        let _router = server.router();
    }

    #[tokio::test]
    async fn serves_over_tcp_until_shutdown() {
        let store = Arc::new(QueueStore::new());
        let server = LqServer::new(ServerConfig::default(), Arc::clone(&store));
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (stop_tx, stop_rx) = oneshot::channel::<()>();

        let handle = tokio::spawn(server.run(listener, async move {
            let _ = stop_rx.await;
        }));

        let response = send(
            addr,
            concat!(
                "POST /foo HTTP/1.1\r\n",
                "Host: localhost\r\n",
                "Content-Length: 4\r\n",
                "Connection: close\r\n",
                "\r\n",
                "a\nb\n",
            ),
        )
        .await;
        assert!(response.starts_with("HTTP/1.1 200"));
        assert!(response.ends_with("\r\n\r\n2\n"));
        assert_eq!(store.read_all("foo"), vec!["a", "b"]);

        stop_tx.send(()).unwrap();
        handle.await.unwrap().unwrap();
    }
}
