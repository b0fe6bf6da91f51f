//! Countdown clock
//!
//! A `Clock` counts down a fixed duration and reports a tick at every
//! `tick_interval_ms` boundary before the deadline, then a single finish.
//! It does not read wall time: the owner feeds elapsed milliseconds through
//! [`Clock::advance`], which keeps the engine deterministic and lets the
//! same code run under a real-time driver or a test.
//!
//! Cancellation is idempotent. A [`CancelHandle`] can be cloned out of the
//! clock so a tick callback can cancel mid-delivery; nothing further is
//! delivered once the handle is cancelled.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Lifecycle of a countdown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockStatus {
    Running,
    Finished,
    Cancelled,
}

/// Shared cancellation flag for a single clock
#[derive(Debug, Clone, Default)]
pub struct CancelHandle(Arc<AtomicBool>);

impl CancelHandle {
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

#[derive(Debug)]
pub struct Clock {
    duration_ms: u32,
    tick_interval_ms: u32,
    elapsed_ms: u32,
    next_tick_ms: u32,
    status: ClockStatus,
    cancel: CancelHandle,
}

impl Clock {
    /// Begin a countdown of `duration_ms`
    ///
    /// A `tick_interval_ms` of 0 disables ticks; only the finish is reported.
    pub fn start(duration_ms: u32, tick_interval_ms: u32) -> Self {
        Self {
            duration_ms,
            tick_interval_ms,
            elapsed_ms: 0,
            next_tick_ms: tick_interval_ms,
            status: ClockStatus::Running,
            cancel: CancelHandle::default(),
        }
    }

    /// Handle that cancels this clock from anywhere, including its own callbacks
    pub fn handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    /// Stop the countdown. No-op once finished or already cancelled.
    pub fn cancel(&mut self) {
        if self.status == ClockStatus::Running {
            self.status = ClockStatus::Cancelled;
        }
        self.cancel.cancel();
    }

    pub fn status(&self) -> ClockStatus {
        if self.status == ClockStatus::Running && self.cancel.is_cancelled() {
            ClockStatus::Cancelled
        } else {
            self.status
        }
    }

    pub fn is_running(&self) -> bool {
        self.status() == ClockStatus::Running
    }

    pub fn duration_ms(&self) -> u32 {
        self.duration_ms
    }

    pub fn remaining_ms(&self) -> u32 {
        self.duration_ms.saturating_sub(self.elapsed_ms)
    }

    /// Move the countdown forward by `elapsed_ms`
    ///
    /// Calls `on_tick(remaining_ms)` for every tick boundary crossed (in order),
    /// then `on_finish()` if the deadline was reached. Returns `true` when this
    /// call finished the clock.
    pub fn advance(
        &mut self,
        elapsed_ms: u32,
        mut on_tick: impl FnMut(u32),
        on_finish: impl FnOnce(),
    ) -> bool {
        if !self.sync_cancel() {
            return false;
        }

        let target = self
            .elapsed_ms
            .saturating_add(elapsed_ms)
            .min(self.duration_ms);

        if self.tick_interval_ms > 0 {
            while self.next_tick_ms < self.duration_ms && self.next_tick_ms <= target {
                self.elapsed_ms = self.next_tick_ms;
                self.next_tick_ms = self.next_tick_ms.saturating_add(self.tick_interval_ms);
                on_tick(self.duration_ms - self.elapsed_ms);

                if !self.sync_cancel() {
                    return false;
                }
            }
        }

        self.elapsed_ms = target;
        if self.elapsed_ms >= self.duration_ms {
            self.status = ClockStatus::Finished;
            on_finish();
            return true;
        }

        false
    }

    /// Fold an external cancellation into `status`. Returns whether still running.
    fn sync_cancel(&mut self) -> bool {
        if self.status == ClockStatus::Running && self.cancel.is_cancelled() {
            self.status = ClockStatus::Cancelled;
        }
        self.status == ClockStatus::Running
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(clock: &mut Clock, elapsed_ms: u32) -> (Vec<u32>, bool) {
        let mut ticks = Vec::new();
        let mut finished = false;
        clock.advance(elapsed_ms, |r| ticks.push(r), || finished = true);
        (ticks, finished)
    }

    #[test]
    fn test_ticks_then_finish() {
        let mut clock = Clock::start(3000, 1000);

        assert_eq!(collect(&mut clock, 999), (vec![], false));
        assert_eq!(collect(&mut clock, 1), (vec![2000], false));
        assert_eq!(collect(&mut clock, 1000), (vec![1000], false));
        assert_eq!(collect(&mut clock, 1000), (vec![], true));
        assert_eq!(clock.status(), ClockStatus::Finished);
        assert_eq!(clock.remaining_ms(), 0);
    }

    #[test]
    fn test_large_step_delivers_all_ticks_in_order() {
        let mut clock = Clock::start(5000, 1000);
        assert_eq!(collect(&mut clock, 10_000), (vec![4000, 3000, 2000, 1000], true));
    }

    #[test]
    fn test_finish_fires_exactly_once() {
        let mut clock = Clock::start(1000, 1000);
        assert_eq!(collect(&mut clock, 1000), (vec![], true));
        assert_eq!(collect(&mut clock, 1000), (vec![], false));
        assert_eq!(collect(&mut clock, 0), (vec![], false));
    }

    #[test]
    fn test_zero_interval_has_no_ticks() {
        let mut clock = Clock::start(1000, 0);
        assert_eq!(collect(&mut clock, 500), (vec![], false));
        assert_eq!(clock.remaining_ms(), 500);
        assert_eq!(collect(&mut clock, 500), (vec![], true));
    }

    #[test]
    fn test_zero_duration_finishes_on_first_advance() {
        let mut clock = Clock::start(0, 1000);
        assert_eq!(collect(&mut clock, 0), (vec![], true));
    }

    #[test]
    fn test_cancel_before_finish_suppresses_everything() {
        let mut clock = Clock::start(3000, 1000);
        clock.cancel();
        assert_eq!(collect(&mut clock, 5000), (vec![], false));
        assert_eq!(clock.status(), ClockStatus::Cancelled);
    }

    #[test]
    fn test_cancel_is_idempotent() {
        let mut clock = Clock::start(1000, 0);
        clock.cancel();
        clock.cancel();
        assert_eq!(clock.status(), ClockStatus::Cancelled);

        let mut done = Clock::start(0, 0);
        assert_eq!(collect(&mut done, 0), (vec![], true));
        done.cancel();
        assert_eq!(done.status(), ClockStatus::Finished);
    }

    #[test]
    fn test_cancel_from_inside_tick_callback() {
        let mut clock = Clock::start(5000, 1000);
        let handle = clock.handle();

        let mut ticks = Vec::new();
        let mut finished = false;
        clock.advance(
            10_000,
            |remaining| {
                ticks.push(remaining);
                if remaining == 3000 {
                    handle.cancel();
                }
            },
            || finished = true,
        );

        assert_eq!(ticks, vec![4000, 3000]);
        assert!(!finished);
        assert_eq!(clock.status(), ClockStatus::Cancelled);
        assert_eq!(collect(&mut clock, 10_000), (vec![], false));
    }

    #[test]
    fn test_handle_cancel_seen_by_status() {
        let clock = Clock::start(1000, 0);
        clock.handle().cancel();
        assert!(!clock.is_running());
    }
}
