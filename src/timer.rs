//! Interactive-mode redraw timer and the host services it runs on.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use chrono::FixedOffset;

/// Redraw cadence while interactive.
pub const INTERACTIVE_UPDATE_RATE_MS: i64 = 1_000;
/// Cadence of the host's time tick while ambient.
pub const TIME_TICK_RATE_MS: i64 = 60_000;

/// Services the face consumes from whatever is hosting it.
pub trait Host {
    /// Wall-clock time, milliseconds since the Unix epoch.
    fn now_millis(&self) -> i64;
    fn time_zone(&self) -> FixedOffset;
    fn notification_count(&self) -> u32;
    /// Ask for `on_draw` to be called soon.
    fn invalidate(&mut self);
    /// Deliver `message` back to the face after `delay`.
    fn send_update_delayed(&mut self, delay: Duration, message: UpdateMessage);
    /// Drop any update message not yet delivered. Must be a no-op when none is pending.
    fn remove_pending_updates(&mut self);
    /// Start or stop time-zone change notifications.
    fn set_time_zone_listener(&mut self, enabled: bool);
}

/// Delay until the next wall-clock multiple of `period_ms`, in `(0, period_ms]` ms.
pub fn delay_until_next_tick(now_millis: i64, period_ms: i64) -> Duration {
    let delay = period_ms - now_millis.rem_euclid(period_ms);
    Duration::from_millis(delay as u64)
}

/// Token carried by every scheduled update. Goes stale once its face is torn down.
#[derive(Debug, Clone)]
pub struct UpdateMessage {
    alive: Rc<Cell<bool>>,
}

impl UpdateMessage {
    pub fn is_live(&self) -> bool {
        self.alive.get()
    }
}

/// Owns the liveness flag shared with outstanding messages.
#[derive(Debug)]
pub struct UpdateTimer {
    alive: Rc<Cell<bool>>,
}

impl Default for UpdateTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl UpdateTimer {
    pub fn new() -> Self {
        Self {
            alive: Rc::new(Cell::new(true)),
        }
    }

    pub fn message(&self) -> UpdateMessage {
        UpdateMessage {
            alive: Rc::clone(&self.alive),
        }
    }

    /// Cancel whatever is pending, then start right away if `should_run`.
    pub fn restart(&self, should_run: bool, host: &mut impl Host) {
        host.remove_pending_updates();
        if should_run && self.alive.get() {
            host.send_update_delayed(Duration::ZERO, self.message());
        }
    }

    /// Re-arm for the next second boundary.
    pub fn rearm(&self, host: &mut impl Host) {
        let delay = delay_until_next_tick(host.now_millis(), INTERACTIVE_UPDATE_RATE_MS);
        host.send_update_delayed(delay, self.message());
    }

    pub fn shutdown(&self, host: &mut impl Host) {
        host.remove_pending_updates();
        self.alive.set(false);
    }
}
