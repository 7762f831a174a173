#![forbid(unsafe_code)]

//! Trailing resize debouncer.
//!
//! Viewport resizes arrive in storms while a window is dragged. Relayout is
//! cheap but not free, so widths are coalesced:
//!
//! - **Latest wins**: only the final width of a burst is applied.
//! - **Trailing edge**: a width applies once no new event arrived for
//!   `delay` (80 ms by default).
//! - **Bounded latency** (optional): with a hard deadline set, a burst that
//!   never pauses still applies every `hard_deadline`.
//! - **Deterministic**: all decisions take an explicit `now`, so tests can
//!   drive the clock.
//!
//! # Usage
//!
//! ```
//! use std::time::{Duration, Instant};
//! use gallery_runtime::resize_debounce::{DebounceAction, DebounceConfig, ResizeDebouncer};
//!
//! let start = Instant::now();
//! let mut debouncer = ResizeDebouncer::new(DebounceConfig::default(), 1200.0);
//!
//! assert_eq!(debouncer.handle_resize_at(1100.0, start), DebounceAction::Pending);
//! assert_eq!(debouncer.tick_at(start + Duration::from_millis(40)), DebounceAction::None);
//! assert!(matches!(
//!     debouncer.tick_at(start + Duration::from_millis(80)),
//!     DebounceAction::Apply { width, .. } if width == 1100.0
//! ));
//! ```

use std::time::{Duration, Instant};

#[inline]
fn duration_since_or_zero(now: Instant, earlier: Instant) -> Duration {
    now.checked_duration_since(earlier).unwrap_or(Duration::ZERO)
}

/// Configuration for the debouncer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebounceConfig {
    /// Quiet period required before a pending width applies.
    pub delay: Duration,
    /// Upper bound on how long a width may stay pending. `None` disables it.
    pub hard_deadline: Option<Duration>,
}

impl Default for DebounceConfig {
    fn default() -> Self {
        Self {
            delay: Duration::from_millis(80),
            hard_deadline: None,
        }
    }
}

impl DebounceConfig {
    /// Debounce with the given quiet period and no deadline.
    pub const fn with_delay(delay: Duration) -> Self {
        Self {
            delay,
            hard_deadline: None,
        }
    }

    /// Set the hard deadline.
    #[must_use]
    pub const fn hard_deadline(mut self, deadline: Duration) -> Self {
        self.hard_deadline = Some(deadline);
        self
    }
}

/// Decision returned by the debouncer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DebounceAction {
    /// Nothing to do.
    None,
    /// A width is waiting for the quiet period.
    Pending,
    /// Relayout at this width now.
    Apply {
        width: f64,
        /// Number of resize events folded into this apply.
        coalesced: u32,
        /// Whether the hard deadline forced the apply.
        forced_by_deadline: bool,
    },
}

/// Counters for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DebounceStats {
    pub events: u64,
    pub skipped: u64,
    pub applies: u64,
    pub forced: u64,
}

/// Latest-wins trailing debouncer for viewport widths.
#[derive(Debug, Clone)]
pub struct ResizeDebouncer {
    config: DebounceConfig,
    pending: Option<f64>,
    last_event: Option<Instant>,
    window_start: Option<Instant>,
    events_in_window: u32,
    last_applied: f64,
    stats: DebounceStats,
}

impl ResizeDebouncer {
    /// Create a debouncer; `initial_width` counts as already applied.
    pub fn new(config: DebounceConfig, initial_width: f64) -> Self {
        Self {
            config,
            pending: None,
            last_event: None,
            window_start: None,
            events_in_window: 0,
            last_applied: initial_width,
            stats: DebounceStats::default(),
        }
    }

    /// Handle a resize event.
    pub fn handle_resize(&mut self, width: f64) -> DebounceAction {
        self.handle_resize_at(width, Instant::now())
    }

    /// Handle a resize event at a specific time.
    pub fn handle_resize_at(&mut self, width: f64, now: Instant) -> DebounceAction {
        self.stats.events += 1;

        if self.pending.is_none() && width == self.last_applied {
            self.stats.skipped += 1;
            return DebounceAction::None;
        }

        self.pending = Some(width);
        self.last_event = Some(now);
        self.events_in_window += 1;
        let window_start = *self.window_start.get_or_insert(now);

        if let Some(deadline) = self.config.hard_deadline
            && duration_since_or_zero(now, window_start) >= deadline
        {
            return self.apply_pending(true);
        }

        DebounceAction::Pending
    }

    /// Poll the debouncer.
    pub fn tick(&mut self) -> DebounceAction {
        self.tick_at(Instant::now())
    }

    /// Poll at a specific time.
    pub fn tick_at(&mut self, now: Instant) -> DebounceAction {
        if self.pending.is_none() {
            return DebounceAction::None;
        }

        if let (Some(deadline), Some(start)) = (self.config.hard_deadline, self.window_start)
            && duration_since_or_zero(now, start) >= deadline
        {
            return self.apply_pending(true);
        }

        match self.last_event {
            Some(last) if duration_since_or_zero(now, last) >= self.config.delay => {
                self.apply_pending(false)
            }
            _ => DebounceAction::None,
        }
    }

    /// Apply whatever is pending immediately, skipping the quiet period.
    pub fn flush(&mut self) -> DebounceAction {
        if self.pending.is_none() {
            return DebounceAction::None;
        }
        self.apply_pending(false)
    }

    /// Record a width applied outside the debouncer (initial layout,
    /// breakpoint crossing). Drops anything pending.
    pub fn record_external_apply(&mut self, width: f64) {
        self.reset_window();
        self.last_applied = width;
    }

    /// Time until the pending width applies, if any.
    pub fn time_until_apply(&self, now: Instant) -> Option<Duration> {
        self.pending?;
        let last = self.last_event?;
        let mut remaining = self
            .config
            .delay
            .saturating_sub(duration_since_or_zero(now, last));
        if let (Some(deadline), Some(start)) = (self.config.hard_deadline, self.window_start) {
            remaining = remaining.min(deadline.saturating_sub(duration_since_or_zero(now, start)));
        }
        Some(remaining)
    }

    /// Whether a width is waiting.
    #[inline]
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// The pending width, if any.
    #[inline]
    pub fn pending_width(&self) -> Option<f64> {
        self.pending
    }

    /// The most recently applied width.
    #[inline]
    pub fn last_applied(&self) -> f64 {
        self.last_applied
    }

    /// Diagnostic counters.
    #[inline]
    pub fn stats(&self) -> DebounceStats {
        self.stats
    }

    /// The active configuration.
    #[inline]
    pub fn config(&self) -> &DebounceConfig {
        &self.config
    }

    fn apply_pending(&mut self, forced: bool) -> DebounceAction {
        let Some(width) = self.pending else {
            return DebounceAction::None;
        };
        let coalesced = self.events_in_window;
        self.reset_window();
        self.last_applied = width;
        self.stats.applies += 1;
        if forced {
            self.stats.forced += 1;
        }
        tracing::trace!(width, coalesced, forced, "resize applied");
        DebounceAction::Apply {
            width,
            coalesced,
            forced_by_deadline: forced,
        }
    }

    fn reset_window(&mut self) {
        self.pending = None;
        self.last_event = None;
        self.window_start = None;
        self.events_in_window = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn same_width_is_skipped() {
        let mut debouncer = ResizeDebouncer::new(DebounceConfig::default(), 1200.0);
        assert_eq!(debouncer.handle_resize_at(1200.0, Instant::now()), DebounceAction::None);
        assert_eq!(debouncer.stats().skipped, 1);
        assert!(!debouncer.has_pending());
    }

    #[test]
    fn burst_applies_latest_width_once() {
        let start = Instant::now();
        let mut debouncer = ResizeDebouncer::new(DebounceConfig::default(), 1200.0);
        for (i, width) in [1190.0, 1170.0, 1150.0, 1130.0].into_iter().enumerate() {
            let now = start + ms(10 * i as u64);
            assert_eq!(debouncer.handle_resize_at(width, now), DebounceAction::Pending);
            assert_eq!(debouncer.tick_at(now + ms(5)), DebounceAction::None);
        }
        // Last event at 30 ms; the quiet period ends at 110 ms.
        assert_eq!(debouncer.tick_at(start + ms(109)), DebounceAction::None);
        assert_eq!(
            debouncer.tick_at(start + ms(110)),
            DebounceAction::Apply {
                width: 1130.0,
                coalesced: 4,
                forced_by_deadline: false,
            }
        );
        assert_eq!(debouncer.last_applied(), 1130.0);
        assert_eq!(debouncer.tick_at(start + ms(500)), DebounceAction::None);
        assert_eq!(debouncer.stats().applies, 1);
    }

    #[test]
    fn returning_to_applied_width_still_settles() {
        let start = Instant::now();
        let mut debouncer = ResizeDebouncer::new(DebounceConfig::default(), 1200.0);
        debouncer.handle_resize_at(1000.0, start);
        assert_eq!(
            debouncer.handle_resize_at(1200.0, start + ms(10)),
            DebounceAction::Pending
        );
        assert!(matches!(
            debouncer.tick_at(start + ms(90)),
            DebounceAction::Apply { width, .. } if width == 1200.0
        ));
    }

    #[test]
    fn hard_deadline_bounds_latency() {
        let start = Instant::now();
        let config = DebounceConfig::with_delay(ms(80)).hard_deadline(ms(200));
        let mut debouncer = ResizeDebouncer::new(config, 1200.0);
        let mut forced = None;
        for i in 0..30u64 {
            let now = start + ms(i * 20);
            if let DebounceAction::Apply {
                forced_by_deadline: true,
                ..
            } = debouncer.handle_resize_at(1000.0 + i as f64, now)
            {
                forced = Some(i);
                break;
            }
        }
        assert_eq!(forced, Some(10));
        assert_eq!(debouncer.stats().forced, 1);
    }

    #[test]
    fn time_until_apply_counts_down() {
        let start = Instant::now();
        let mut debouncer = ResizeDebouncer::new(DebounceConfig::default(), 1200.0);
        assert_eq!(debouncer.time_until_apply(start), None);
        debouncer.handle_resize_at(1000.0, start);
        assert_eq!(debouncer.time_until_apply(start + ms(30)), Some(ms(50)));
        assert_eq!(debouncer.time_until_apply(start + ms(300)), Some(Duration::ZERO));
    }

    #[test]
    fn flush_and_external_apply() {
        let start = Instant::now();
        let mut debouncer = ResizeDebouncer::new(DebounceConfig::default(), 1200.0);
        assert_eq!(debouncer.flush(), DebounceAction::None);
        debouncer.handle_resize_at(800.0, start);
        assert!(matches!(debouncer.flush(), DebounceAction::Apply { width, .. } if width == 800.0));

        debouncer.handle_resize_at(1000.0, start + ms(5));
        debouncer.record_external_apply(1000.0);
        assert!(!debouncer.has_pending());
        assert_eq!(debouncer.tick_at(start + ms(500)), DebounceAction::None);
        assert_eq!(debouncer.last_applied(), 1000.0);
    }
}
