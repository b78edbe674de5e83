//! Shared configuration snapshot: the playlist every peer display plays from
//! and the overlay groups that may be layered on top of it.
//!
//! The snapshot is produced elsewhere and is treated as read-only here.

use chrono::{DateTime, Datelike, Timelike, Utc};
use serde::{Deserialize, Serialize};

/// One fetched version of the shared configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Configuration {
    /// Identity token of this configuration version.
    pub config_hash: String,
    #[serde(default)]
    pub playlist: Vec<PlaylistEntry>,
    #[serde(default)]
    pub overlay_groups: Vec<OverlayGroup>,
}

/// A single position in the playlist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaylistEntry {
    pub schedule: Schedule,
    /// Nominal play time in seconds. `0` derives it from the asset.
    #[serde(default)]
    pub duration: f64,
    #[serde(default)]
    pub slot_type: String,
    #[serde(default)]
    pub asset: Asset,
}

/// Asset reference. Only the metadata duration is interpreted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub metadata: AssetMetadata,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssetMetadata {
    /// Native length of the asset in seconds, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
}

/// Activity predicate attached to playlist entries and overlay conditions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Schedule {
    Always,
    Never,

    /// Active for `starts <= t < ends`. A missing bound is open.
    Span {
        #[serde(default)]
        starts: Option<DateTime<Utc>>,
        #[serde(default)]
        ends: Option<DateTime<Utc>>,
    },

    /// Active on the listed weekdays (0 = Monday … 6 = Sunday) during the
    /// listed UTC hours. An empty list matches every day or hour.
    Recurring {
        #[serde(default)]
        days: Vec<u8>,
        #[serde(default)]
        hours: Vec<u8>,
    },
}

impl Schedule {
    pub fn is_active_at(&self, at: DateTime<Utc>) -> bool {
        match self {
            Schedule::Always => true,
            Schedule::Never => false,
            Schedule::Span { starts, ends } => {
                starts.map_or(true, |s| s <= at) && ends.map_or(true, |e| at < e)
            }
            Schedule::Recurring { days, hours } => {
                let day = at.weekday().num_days_from_monday() as u8;
                let hour = at.hour() as u8;
                (days.is_empty() || days.contains(&day))
                    && (hours.is_empty() || hours.contains(&hour))
            }
        }
    }
}

/// Named set of conditions that, when all hold, make an overlay applicable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlayGroup {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub conditions: Vec<Condition>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "condition_type", rename_all = "snake_case")]
pub enum Condition {
    Schedule { schedule: Schedule },
    SlotType { slot_type: String },
    NotSlotType { slot_type: String },
    /// Any condition kind that depends on device state. Resolved on the
    /// display itself, so it never filters here.
    #[serde(other)]
    Unrecognized,
}

impl Condition {
    /// Whether this condition can still hold for an entry of `slot_type` at `at`.
    pub fn may_hold(&self, at: DateTime<Utc>, slot_type: &str) -> bool {
        match self {
            Condition::Schedule { schedule } => schedule.is_active_at(at),
            Condition::SlotType { slot_type: want } => want == slot_type,
            Condition::NotSlotType { slot_type: avoid } => avoid != slot_type,
            Condition::Unrecognized => true,
        }
    }
}

impl OverlayGroup {
    /// Conjunction of all conditions; a group without conditions qualifies.
    pub fn potentially_active(&self, at: DateTime<Utc>, slot_type: &str) -> bool {
        self.conditions.iter().all(|c| c.may_hold(at, slot_type))
    }
}
