use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use marquee_core::{config::MarqueeConfig, Configuration, LocalConfig, MarqueeError, Result};
use marquee_protocol::{CallFrame, SyncCall};
use marquee_scheduler::PlayerHost;
use tracing::{debug, warn};

use crate::{peers::PeerBroadcaster, power::PowerSwitch};

/// File-backed host: playlist and local policy from JSON files, peers over UDP,
/// power through shell commands.
pub struct DisplayHost {
    shared_config_path: PathBuf,
    local_config_path: Option<PathBuf>,
    default_blank: bool,
    /// `None` in dry-run mode: calls are only logged.
    peers: Option<PeerBroadcaster>,
    power: PowerSwitch,
}

impl DisplayHost {
    pub async fn new(config: &MarqueeConfig, dry_run: bool) -> Result<Self> {
        let peers = if dry_run {
            None
        } else {
            Some(PeerBroadcaster::bind(&config.sync).await?)
        };

        Ok(Self {
            shared_config_path: PathBuf::from(&config.player.shared_config_path),
            local_config_path: config.player.local_config_path.as_ref().map(PathBuf::from),
            default_blank: config.player.blank,
            peers,
            power: PowerSwitch::new(&config.power),
        })
    }
}

#[async_trait]
impl PlayerHost for DisplayHost {
    async fn shared_config(&self) -> Option<Arc<Configuration>> {
        match read_json::<Configuration>(&self.shared_config_path).await {
            Ok(config) => Some(Arc::new(config)),
            Err(e) => {
                warn!(code = e.code(), "{e}");
                None
            }
        }
    }

    async fn local_config(&self) -> LocalConfig {
        let fallback = LocalConfig {
            blank: self.default_blank,
        };
        let Some(path) = &self.local_config_path else {
            return fallback;
        };
        read_json::<LocalConfig>(path).await.unwrap_or_else(|e| {
            warn!(code = e.code(), "{e}; using configured blank={}", fallback.blank);
            fallback
        })
    }

    async fn broadcast(&self, delay: Duration, call: SyncCall) {
        let command = call.command();
        let frame = CallFrame::new(delay, call);
        match &self.peers {
            Some(peers) => match peers.send(&frame).await {
                Ok(delivered) => {
                    debug!(command, delay = frame.delay, delivered, "sync call sent")
                }
                Err(e) => warn!(command, code = e.code(), "sync call failed: {e}"),
            },
            None => debug!(command, delay = frame.delay, "dry run: sync call not sent"),
        }
    }

    async fn set_power(&self, on: bool) {
        if let Err(e) = self.power.apply(on).await {
            warn!(on, code = e.code(), "{e}");
        }
    }
}

/// Read and parse a JSON file. Any failure is reported as `SharedConfig`
/// carrying the path, since both sources are external snapshots.
async fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let unavailable = |reason: String| MarqueeError::SharedConfig {
        path: path.display().to_string(),
        reason,
    };
    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| unavailable(e.to_string()))?;
    serde_json::from_str(&raw).map_err(|e| unavailable(e.to_string()))
}
