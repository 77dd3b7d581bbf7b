//! Outbound weight updates to the traffic-shaping backend.
//!
//! One GET per target per invocation, single attempt. The backend
//! enforces the split; this side only reports the numbers and
//! classifies the outcome.

use async_trait::async_trait;
use hyper_util::rt::TokioIo;
use tracing::debug;

use crate::config::BackendConfig;
use crate::error::{RouterError, RouterResult};

/// Path of the backend's weight endpoint.
const WEIGHT_PATH: &str = "/debug/weight";

/// Seam between the reconciler and the traffic-shaping backend.
///
/// Implementations push one weight for one named target and classify
/// the outcome. No retries belong behind this trait; the orchestrator
/// re-invokes reconciliation on its own schedule.
#[async_trait]
pub trait WeightBackend: Send + Sync {
    /// Apply `weight` (0-100) to the named target.
    async fn apply(&self, target: &str, weight: i32) -> RouterResult<()>;
}

/// HTTP client for the backend's weight endpoint.
///
/// Encodes the weight and the target name (as an opaque `desc` label)
/// into query parameters. Success is exactly HTTP 200; any other
/// status or transport failure is surfaced to the caller unchanged.
pub struct WeightUpdateClient {
    endpoint: String,
}

impl WeightUpdateClient {
    /// Create a client against the configured backend endpoint.
    pub fn new(config: &BackendConfig) -> Self {
        Self {
            endpoint: config.endpoint.clone(),
        }
    }
}

#[async_trait]
impl WeightBackend for WeightUpdateClient {
    async fn apply(&self, target: &str, weight: i32) -> RouterResult<()> {
        let uri = format!(
            "http://{}{WEIGHT_PATH}?weight={weight}&desc={target}",
            self.endpoint
        );
        debug!(%uri, "sending weight request");

        let stream = tokio::net::TcpStream::connect(&self.endpoint)
            .await
            .map_err(|e| RouterError::Transport(e.to_string()))?;

        let io = TokioIo::new(stream);
        let (mut sender, conn) = hyper::client::conn::http1::handshake(io)
            .await
            .map_err(|e| RouterError::Transport(e.to_string()))?;

        // Drive the connection in the background.
        tokio::spawn(async move {
            let _ = conn.await;
        });

        let req = http::Request::builder()
            .method("GET")
            .uri(&uri)
            .header("host", &self.endpoint)
            .header("user-agent", "weir-router/0.1")
            .body(http_body_util::Empty::<bytes::Bytes>::new())
            .unwrap();

        let resp = sender
            .send_request(req)
            .await
            .map_err(|e| RouterError::Transport(e.to_string()))?;

        if resp.status() != http::StatusCode::OK {
            return Err(RouterError::BackendStatus(resp.status().as_u16()));
        }

        // Dropping the response releases the connection.
        Ok(())
    }
}
