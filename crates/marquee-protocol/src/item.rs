use serde::{Deserialize, Serialize};

/// `item_idx` of the blank/placeholder item. Never a playlist position.
pub const FALLBACK_ITEM_IDX: i64 = -1;
/// Seconds the placeholder stays up before the next decision.
pub const FALLBACK_DURATION: f64 = 5.0;

/// One scheduling decision, carried as the `preload` payload.
///
/// Wire: `{ "config_hash": "…", "item_idx": 3, "duration": 10.0, "cnt": 7,
///          "rnd": 523981, "ovr": ["ticker"] }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledItem {
    /// Identity of the configuration the item was chosen from. Empty for fallback.
    pub config_hash: String,
    /// 1-based playlist position, or [`FALLBACK_ITEM_IDX`].
    pub item_idx: i64,
    /// Effective play time in seconds.
    pub duration: f64,
    /// How often this position has been chosen before (wraps at 10!).
    pub cnt: u32,
    /// Random tie-break in `[0, 2^20)`.
    pub rnd: u32,
    /// Overlay groups that may apply; displays re-check device-side conditions.
    pub ovr: Vec<String>,
}

impl ScheduledItem {
    /// The blank/placeholder item shown when nothing can be scheduled.
    pub fn fallback() -> Self {
        Self {
            config_hash: String::new(),
            item_idx: FALLBACK_ITEM_IDX,
            duration: FALLBACK_DURATION,
            cnt: 0,
            rnd: 0,
            ovr: Vec::new(),
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.item_idx == FALLBACK_ITEM_IDX
    }
}
