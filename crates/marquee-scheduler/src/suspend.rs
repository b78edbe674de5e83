use marquee_protocol::ScheduledItem;

/// Depth at which the display is powered off (when blanking is enabled).
pub const MAX_SUSPEND_DEPTH: u8 = 4;

/// Graceful blank/power-off ramp.
///
/// Each cycle without schedulable content moves one step towards
/// [`MAX_SUSPEND_DEPTH`]; each cycle with content moves one step back. The
/// fallback item is shown for as long as the depth is above zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SuspendRamp {
    depth: u8,
}

impl SuspendRamp {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn depth(&self) -> u8 {
        self.depth
    }

    /// Decide what to broadcast this cycle and update the depth.
    pub fn step(&mut self, selected: Option<ScheduledItem>, blank: bool) -> ScheduledItem {
        match selected {
            None => {
                if blank {
                    self.depth = (self.depth + 1).min(MAX_SUSPEND_DEPTH);
                }
                ScheduledItem::fallback()
            }
            Some(item) if self.depth == 0 => item,
            Some(_) => {
                self.depth -= 1;
                ScheduledItem::fallback()
            }
        }
    }

    /// Display power is only off at full depth with blanking enabled.
    pub fn power_on(&self, blank: bool) -> bool {
        self.depth < MAX_SUSPEND_DEPTH || !blank
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item() -> ScheduledItem {
        ScheduledItem {
            config_hash: "h".to_string(),
            item_idx: 1,
            duration: 10.0,
            cnt: 0,
            rnd: 17,
            ovr: vec![],
        }
    }

    #[test]
    fn ramps_up_one_step_per_empty_cycle() {
        let mut ramp = SuspendRamp::new();
        for n in 1..=6u8 {
            let shown = ramp.step(None, true);
            assert!(shown.is_fallback());
            assert_eq!(ramp.depth(), n.min(MAX_SUSPEND_DEPTH));
        }
    }

    #[test]
    fn no_ramp_without_blanking() {
        let mut ramp = SuspendRamp::new();
        for _ in 0..6 {
            assert!(ramp.step(None, false).is_fallback());
            assert_eq!(ramp.depth(), 0);
            assert!(ramp.power_on(false));
        }
    }

    #[test]
    fn empty_cycle_without_blanking_keeps_depth() {
        let mut ramp = SuspendRamp::new();
        ramp.step(None, true);
        ramp.step(None, true);
        ramp.step(None, false);
        assert_eq!(ramp.depth(), 2);
    }

    #[test]
    fn recovers_one_step_per_cycle_showing_fallback() {
        let mut ramp = SuspendRamp::new();
        for _ in 0..4 {
            ramp.step(None, true);
        }
        assert_eq!(ramp.depth(), MAX_SUSPEND_DEPTH);

        for expected in (0..MAX_SUSPEND_DEPTH).rev() {
            let shown = ramp.step(Some(item()), true);
            assert!(shown.is_fallback());
            assert_eq!(ramp.depth(), expected);
        }
        assert_eq!(ramp.step(Some(item()), true), item());
    }

    #[test]
    fn power_rule() {
        let mut ramp = SuspendRamp::new();
        for depth in 0..=MAX_SUSPEND_DEPTH {
            assert_eq!(ramp.depth(), depth);
            assert!(ramp.power_on(false));
            assert_eq!(ramp.power_on(true), depth < MAX_SUSPEND_DEPTH);
            ramp.step(None, true);
        }
    }
}
