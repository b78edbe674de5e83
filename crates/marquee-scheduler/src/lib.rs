//! `marquee-scheduler` — playback scheduling engine for synchronized displays.
//!
//! # Overview
//!
//! A single Tokio task ([`driver::ScheduleDriver`]) wakes up
//! [`PRELOAD_WINDOW`] before every content switch, asks the
//! [`selector::SequenceSelector`] for the next playlist entry, and broadcasts
//! a `preload` followed by a `switch` call to all peer displays so they change
//! content at the same instant.
//!
//! # Cycle
//!
//! | Step | Effect                                                    |
//! |------|-----------------------------------------------------------|
//! | 1    | sleep until `next_switch - PRELOAD_WINDOW` (or stop)      |
//! | 2    | select next entry, apply the suspend ramp                 |
//! | 3    | set display power                                         |
//! | 4    | broadcast `preload` (after [`PRELOAD_DELAY`])             |
//! | 5    | broadcast `switch` (at `next_switch`)                     |
//! | 6    | sleep until `next_switch`, advance by the item's duration |
//!
//! When nothing is schedulable the fallback item is shown and, if blanking is
//! enabled, the [`suspend::SuspendRamp`] powers the display down step by step.

use std::time::Duration;

pub mod driver;
pub mod error;
pub mod selector;
pub mod suspend;

pub use driver::{spawn, PlayerHost, ScheduleDriver};
pub use error::{Result, SchedulerError};
pub use selector::SequenceSelector;
pub use suspend::{SuspendRamp, MAX_SUSPEND_DEPTH};

/// Lead time between the preload broadcast and the switch it prepares.
pub const PRELOAD_WINDOW: Duration = Duration::from_secs(4);
/// Delay peers wait before executing a preload. Eats into the preload window.
pub const PRELOAD_DELAY: Duration = Duration::from_millis(250);
/// Extra slack before the very first switch after startup.
pub const STARTUP_DELAY: Duration = Duration::from_millis(100);
