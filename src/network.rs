use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use futures_util::stream::{self, BoxStream, StreamExt};
use tokio::net::TcpStream;

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

const HTTPS_PORT: u16 = 443;
const CONNECT_TIMEOUT: Duration = Duration::from_secs(3);

#[async_trait]
pub trait Probe: Send + Sync {
    async fn is_reachable(&self) -> bool;
}

#[derive(Debug, Clone)]
pub struct TcpProbe {
    host: String,
    port: u16,
    timeout: Duration,
}

impl TcpProbe {
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: HTTPS_PORT,
            timeout: CONNECT_TIMEOUT,
        }
    }

    /// Probe for an API host that may carry its own port, as in `localhost:8080`.
    pub fn for_authority(authority: &str) -> Self {
        match authority.rsplit_once(':') {
            Some((host, port)) if !host.contains(':') => match port.parse() {
                Ok(port) => Self::new(host).with_port(port),
                Err(_) => Self::new(authority),
            },
            _ => Self::new(authority),
        }
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[async_trait]
impl Probe for TcpProbe {
    async fn is_reachable(&self) -> bool {
        let connect = TcpStream::connect((self.host.as_str(), self.port));
        match tokio::time::timeout(self.timeout, connect).await {
            Ok(Ok(_)) => true,
            Ok(Err(e)) => {
                tracing::debug!(host = %self.host, error = %e, "connectivity probe failed");
                false
            }
            Err(_) => {
                tracing::debug!(host = %self.host, "connectivity probe timed out");
                false
            }
        }
    }
}

struct Monitor {
    probe: Arc<dyn Probe>,
    interval: Duration,
    last: Option<bool>,
}

impl Monitor {
    async fn next_change(&mut self) -> bool {
        loop {
            if self.last.is_some() {
                tokio::time::sleep(self.interval).await;
            }
            let online = self.probe.is_reachable().await;
            if self.last != Some(online) {
                self.last = Some(online);
                return online;
            }
        }
    }
}

/// Polls `probe` every `interval` and yields the connectivity each time it
/// changes. The first observation is always yielded.
pub fn connectivity_stream(probe: Arc<dyn Probe>, interval: Duration) -> BoxStream<'static, bool> {
    let monitor = Monitor {
        probe,
        interval,
        last: None,
    };
    stream::unfold(monitor, |mut monitor| async move {
        let online = monitor.next_change().await;
        Some((online, monitor))
    })
    .boxed()
}
