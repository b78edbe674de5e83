use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const DEFAULT_SYNC_BIND: &str = "0.0.0.0:0";
pub const DEFAULT_SYNC_PORT: u16 = 4711;

/// Top-level config (marquee.toml + MARQUEE_* env overrides).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MarqueeConfig {
    #[serde(default)]
    pub player: PlayerConfig,
    #[serde(default)]
    pub sync: SyncConfig,
    #[serde(default)]
    pub power: PowerConfig,
}

/// Where the player finds its playlist and how it behaves when idle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerConfig {
    /// JSON file holding the shared configuration snapshot.
    #[serde(default = "default_shared_config_path")]
    pub shared_config_path: String,
    /// Blank (and eventually power off) the display when nothing is scheduled.
    #[serde(default)]
    pub blank: bool,
    /// Optional JSON file `{"blank": bool}` re-read every cycle.
    /// Takes precedence over `blank` when readable.
    pub local_config_path: Option<String>,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            shared_config_path: default_shared_config_path(),
            blank: false,
            local_config_path: None,
        }
    }
}

/// Peer displays that receive synchronized preload/switch calls.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    #[serde(default = "default_sync_bind")]
    pub bind: String,
    /// `host:port` of every peer, including this display if it renders too.
    #[serde(default)]
    pub peers: Vec<String>,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            bind: default_sync_bind(),
            peers: vec![format!("127.0.0.1:{DEFAULT_SYNC_PORT}")],
        }
    }
}

/// Shell commands that switch the display on and off.
/// When unset, power changes are only logged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PowerConfig {
    pub on_command: Option<String>,
    pub off_command: Option<String>,
}

/// Per-display policy, re-read every scheduling cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalConfig {
    /// Blank the display when nothing is scheduled.
    #[serde(default)]
    pub blank: bool,
}

fn default_sync_bind() -> String {
    DEFAULT_SYNC_BIND.to_string()
}
fn default_shared_config_path() -> String {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    format!("{}/.marquee/config.json", home)
}

impl MarqueeConfig {
    /// Load config from a TOML file with MARQUEE_* env var overrides.
    ///
    /// Nested keys use a double underscore, e.g. `MARQUEE_PLAYER__BLANK=true`.
    /// Falls back to `~/.marquee/marquee.toml` when no path is given.
    pub fn load(config_path: Option<&str>) -> crate::error::Result<Self> {
        let path = config_path
            .map(String::from)
            .unwrap_or_else(default_config_path);
        debug!(%path, "loading config");

        let config: MarqueeConfig = Figment::new()
            .merge(Toml::file(&path))
            .merge(Env::prefixed("MARQUEE_").split("__"))
            .extract()
            .map_err(|e| crate::error::MarqueeError::Config(e.to_string()))?;

        Ok(config)
    }
}

fn default_config_path() -> String {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    format!("{}/.marquee/marquee.toml", home)
}
