use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::item::ScheduledItem;

/// Instruction every peer executes `delay` seconds after receiving it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum SyncCall {
    /// Buffer the upcoming item.
    Preload { payload: ScheduledItem },
    /// Show the preloaded item.
    Switch,
}

impl SyncCall {
    pub fn command(&self) -> &'static str {
        match self {
            SyncCall::Preload { .. } => "preload",
            SyncCall::Switch => "switch",
        }
    }
}

/// Scheduler → peer synchronized call.
/// Wire: `{ "type": "call", "delay": 0.25, "command": "preload", "payload": {...} }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallFrame {
    #[serde(rename = "type")]
    pub frame_type: String,
    /// Seconds to wait before executing the call.
    pub delay: f64,
    #[serde(flatten)]
    pub call: SyncCall,
}

impl CallFrame {
    pub fn new(delay: Duration, call: SyncCall) -> Self {
        Self {
            frame_type: "call".to_string(),
            delay: delay.as_secs_f64(),
            call,
        }
    }
}
