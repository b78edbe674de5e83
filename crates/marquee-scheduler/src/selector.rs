use std::collections::HashMap;

use chrono::{DateTime, Utc};
use marquee_core::{Configuration, PlaylistEntry};
use marquee_protocol::ScheduledItem;
use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing::debug;

use crate::error::{Result, SchedulerError};
use crate::PRELOAD_WINDOW;

/// Play time used for entries with duration 0 whose asset has no metadata duration.
pub const DEFAULT_DURATION_SECS: f64 = 10.0;
/// Lower bound on any scheduled duration: one second more than the preload window,
/// so playback always ends before the following preload is sent.
pub const MIN_DURATION_SECS: f64 = PRELOAD_WINDOW.as_secs() as f64 + 1.0;
/// Repeat counters wrap at 1*2*…*10 so `cnt % k` rotates evenly for every k <= 10.
pub const REPEAT_MODULUS: u32 = 3_628_800;
/// Exclusive upper bound of the random tie-break value.
pub const RND_RANGE: u32 = 1 << 20;

/// Cyclic playlist cursor with per-position repeat counters.
///
/// State lives as long as the selector and is never reset when the
/// configuration changes.
pub struct SequenceSelector {
    /// Last selected zero-based position; `None` means "before position 0".
    cursor: Option<usize>,
    /// Next repeat counter per zero-based position, created on first visit.
    repeats: HashMap<usize, u32>,
    rng: StdRng,
}

impl SequenceSelector {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Selector with a reproducible tie-break sequence.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            cursor: None,
            repeats: HashMap::new(),
            rng,
        }
    }

    /// Zero-based position of the last selected entry.
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// Pick the next entry active at `now`, starting right after the last one.
    ///
    /// Probes every position at most once. Leaves the cursor untouched when
    /// nothing is active.
    pub fn select_next(
        &mut self,
        config: Option<&Configuration>,
        now: DateTime<Utc>,
    ) -> Result<ScheduledItem> {
        let config = config.ok_or(SchedulerError::NoConfig)?;
        let playlist = &config.playlist;
        let len = playlist.len();

        let start = self.cursor.map_or(0, |c| c + 1);
        for probe in 0..len {
            let position = (start + probe) % len;
            let entry = &playlist[position];
            if !entry.schedule.is_active_at(now) {
                continue;
            }

            self.cursor = Some(position);
            let duration = effective_duration(entry);
            let ovr = config
                .overlay_groups
                .iter()
                .filter(|group| group.potentially_active(now, &entry.slot_type))
                .map(|group| group.id.clone())
                .collect();
            let cnt = self.next_repeat(position);
            let rnd = self.rng.gen_range(0..RND_RANGE);

            debug!(position, probes = probe + 1, duration, cnt, "entry selected");
            return Ok(ScheduledItem {
                config_hash: config.config_hash.clone(),
                item_idx: position as i64 + 1,
                duration,
                cnt,
                rnd,
                ovr,
            });
        }

        Err(SchedulerError::NothingScheduled { entries: len })
    }

    /// Read-and-increment the repeat counter of `position`.
    fn next_repeat(&mut self, position: usize) -> u32 {
        let slot = self.repeats.entry(position).or_insert(0);
        let cnt = *slot;
        *slot = (cnt + 1) % REPEAT_MODULUS;
        cnt
    }
}

impl Default for SequenceSelector {
    fn default() -> Self {
        Self::new()
    }
}

/// Nominal duration, derived from the asset when 0, clamped to [`MIN_DURATION_SECS`].
pub fn effective_duration(entry: &PlaylistEntry) -> f64 {
    let mut duration = entry.duration;
    if duration == 0.0 {
        duration = entry
            .asset
            .metadata
            .duration
            .unwrap_or(DEFAULT_DURATION_SECS);
    }
    duration.max(MIN_DURATION_SECS)
}
