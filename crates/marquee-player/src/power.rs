use std::time::Duration;

use marquee_core::{config::PowerConfig, MarqueeError, Result};
use tokio::process::Command;
use tokio::sync::Mutex;
use tracing::{debug, info};

const POWER_COMMAND_TIMEOUT: Duration = Duration::from_secs(10);

/// Display power control through configured shell commands.
///
/// Commands only run when the requested state differs from the last one
/// applied successfully, so a failed switch is retried next cycle.
pub struct PowerSwitch {
    on_command: Option<String>,
    off_command: Option<String>,
    state: Mutex<Option<bool>>,
}

impl PowerSwitch {
    pub fn new(config: &PowerConfig) -> Self {
        Self {
            on_command: config.on_command.clone(),
            off_command: config.off_command.clone(),
            state: Mutex::new(None),
        }
    }

    /// Apply `on`. Returns whether the state changed.
    pub async fn apply(&self, on: bool) -> Result<bool> {
        let mut state = self.state.lock().await;
        if *state == Some(on) {
            return Ok(false);
        }

        let command = if on { &self.on_command } else { &self.off_command };
        match command {
            Some(cmd) => {
                run(cmd).await?;
                info!(on, command = %cmd, "display power switched");
            }
            None => info!(on, "display power change (no command configured)"),
        }

        *state = Some(on);
        Ok(true)
    }
}

async fn run(cmd: &str) -> Result<()> {
    debug!("power: {cmd}");
    let output = tokio::time::timeout(
        POWER_COMMAND_TIMEOUT,
        Command::new("sh")
            .arg("-c")
            .arg(cmd)
            .kill_on_drop(true)
            .output(),
    )
    .await
    .map_err(|_| MarqueeError::Power(format!("`{cmd}` timed out")))??;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(MarqueeError::Power(format!(
            "`{cmd}` exited with {}: {}",
            output.status,
            stderr.trim()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn switch(on: Option<&str>, off: Option<&str>) -> PowerSwitch {
        PowerSwitch::new(&PowerConfig {
            on_command: on.map(String::from),
            off_command: off.map(String::from),
        })
    }

    #[tokio::test]
    async fn runs_only_on_change() {
        let power = switch(Some("true"), Some("true"));
        assert!(power.apply(true).await.unwrap());
        assert!(!power.apply(true).await.unwrap());
        assert!(power.apply(false).await.unwrap());
    }

    #[tokio::test]
    async fn failing_command_is_retried() {
        let power = switch(Some("true"), Some("echo nope >&2; exit 3"));
        power.apply(true).await.unwrap();

        let err = power.apply(false).await.unwrap_err();
        assert_eq!(err.code(), "POWER_ERROR");
        assert!(err.to_string().contains("nope"));

        // Still considered on, so the next off request runs the command again.
        assert!(power.apply(false).await.is_err());
        assert!(!power.apply(true).await.unwrap());
    }

    #[tokio::test]
    async fn no_command_only_tracks_state() {
        let power = switch(None, None);
        assert!(power.apply(false).await.unwrap());
        assert!(!power.apply(false).await.unwrap());
    }
}
