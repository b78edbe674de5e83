//! `marquee-core` — shared model for the Marquee playback scheduler.
//!
//! Holds the shared configuration snapshot (playlist, overlay groups and
//! their schedules), the player settings loaded from `marquee.toml`, and the
//! host-side error type.

pub mod config;
pub mod error;
pub mod playlist;

pub use config::LocalConfig;
pub use error::{MarqueeError, Result};
pub use playlist::{Asset, Condition, Configuration, OverlayGroup, PlaylistEntry, Schedule};
