// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Cancellable, deadline-based timers.
//!
//! All time-dependent policy in this crate (resize debouncing, unmount grace
//! periods) is built on these two primitives. They never sleep: the caller
//! supplies `Instant`s and polls for expiry, so the host event loop stays in
//! control and tests run without real delays.

use std::time::{Duration, Instant};

/// A single-shot timer that can be armed, cancelled, and re-armed.
///
/// Arming while already armed replaces the previous deadline, which gives the
/// cancel-and-reschedule semantic used by debouncing.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DeadlineTimer {
    deadline: Option<Instant>,
}

impl DeadlineTimer {
    /// Creates a disarmed timer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Arms (or re-arms) the timer to fire `after` from `now`.
    pub fn arm(&mut self, now: Instant, after: Duration) {
        self.deadline = Some(now + after);
    }

    /// Disarms the timer without firing it.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// Returns `true` while a deadline is pending.
    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// Fires the timer if its deadline has passed.
    ///
    /// Returns `true` at most once per arming; firing disarms the timer.
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    /// Time left until the deadline, or `None` when disarmed.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.deadline.map(|d| d.saturating_duration_since(now))
    }
}

/// Collapses bursts of events into a single delayed notification.
///
/// Each [`record`](Debouncer::record) cancels the pending deadline and
/// reschedules it `delay` into the future; [`ready`](Debouncer::ready)
/// reports (once) when the burst has gone quiet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Debouncer {
    delay: Duration,
    timer: DeadlineTimer,
}

impl Debouncer {
    /// Creates a debouncer with the given quiet period.
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            timer: DeadlineTimer::new(),
        }
    }

    /// Notes an event at `now`, rescheduling the pending notification.
    pub fn record(&mut self, now: Instant) {
        self.timer.arm(now, self.delay);
    }

    /// Returns `true` once the quiet period has elapsed since the last event.
    pub fn ready(&mut self, now: Instant) -> bool {
        self.timer.fire(now)
    }

    /// Returns `true` while an event is waiting out its quiet period.
    pub fn is_pending(&self) -> bool {
        self.timer.is_armed()
    }

    /// Drops any pending notification.
    pub fn cancel(&mut self) {
        self.timer.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn deadline_timer_fires_once() {
        let t0 = Instant::now();
        let mut timer = DeadlineTimer::new();
        timer.arm(t0, ms(100));

        assert!(!timer.fire(t0 + ms(50)));
        assert!(timer.is_armed());
        assert!(timer.fire(t0 + ms(100)));
        // Disarmed after firing.
        assert!(!timer.fire(t0 + ms(200)));
        assert!(!timer.is_armed());
    }

    #[test]
    fn deadline_timer_cancel_prevents_firing() {
        let t0 = Instant::now();
        let mut timer = DeadlineTimer::new();
        timer.arm(t0, ms(100));
        timer.cancel();
        assert!(!timer.fire(t0 + ms(500)));
    }

    #[test]
    fn rearming_replaces_deadline() {
        let t0 = Instant::now();
        let mut timer = DeadlineTimer::new();
        timer.arm(t0, ms(100));
        timer.arm(t0 + ms(80), ms(100));

        assert!(!timer.fire(t0 + ms(120)));
        assert!(timer.fire(t0 + ms(180)));
    }

    #[test]
    fn debouncer_coalesces_bursts() {
        let t0 = Instant::now();
        let mut debounce = Debouncer::new(ms(150));

        debounce.record(t0);
        debounce.record(t0 + ms(100));
        debounce.record(t0 + ms(200));

        // Still within the quiet period of the last event.
        assert!(!debounce.ready(t0 + ms(300)));
        assert!(debounce.ready(t0 + ms(350)));
        // Only notifies once per burst.
        assert!(!debounce.ready(t0 + ms(400)));
    }

    #[test]
    fn debouncer_remaining_tracks_last_event() {
        let t0 = Instant::now();
        let mut timer = DeadlineTimer::new();
        timer.arm(t0, ms(100));
        assert_eq!(timer.remaining(t0 + ms(40)), Some(ms(60)));
        assert_eq!(timer.remaining(t0 + ms(200)), Some(ms(0)));
    }
}
