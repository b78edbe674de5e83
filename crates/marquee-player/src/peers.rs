use std::net::SocketAddr;

use marquee_core::{config::SyncConfig, MarqueeError, Result};
use marquee_protocol::CallFrame;
use tokio::net::UdpSocket;
use tracing::{debug, warn};

/// Sends every synchronized call to all peer displays, one JSON datagram each.
///
/// Delivery is best effort; a lost datagram is the peer's problem.
pub struct PeerBroadcaster {
    socket: UdpSocket,
    peers: Vec<SocketAddr>,
}

impl PeerBroadcaster {
    /// Bind the local socket and resolve each configured peer once.
    pub async fn bind(config: &SyncConfig) -> Result<Self> {
        let socket = UdpSocket::bind(&config.bind).await?;

        let mut peers = Vec::with_capacity(config.peers.len());
        for peer in &config.peers {
            let addr = tokio::net::lookup_host(peer.as_str())
                .await
                .map_err(|e| MarqueeError::Config(format!("peer {peer}: {e}")))?
                .next()
                .ok_or_else(|| MarqueeError::Config(format!("peer {peer}: no address")))?;
            peers.push(addr);
        }

        debug!(bind = %config.bind, peers = peers.len(), "peer broadcaster ready");
        Ok(Self { socket, peers })
    }

    /// Send `frame` to every peer. Returns how many sends succeeded.
    pub async fn send(&self, frame: &CallFrame) -> Result<usize> {
        let bytes = serde_json::to_vec(frame)?;
        let mut delivered = 0;
        for peer in &self.peers {
            match self.socket.send_to(&bytes, peer).await {
                Ok(_) => delivered += 1,
                Err(e) => warn!(%peer, error = %e, "peer send failed"),
            }
        }
        Ok(delivered)
    }
}
