use crate::scheduler::Scheduler;
use ribbon_core::{event::TimerToken, Visibility};
use std::time::Duration;
use tracing::debug;

/// Result of feeding the machine one interaction or timer firing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Collapsed → Expanded.
    Expanded,
    /// Expanded → Collapsed.
    Collapsed,
    /// Expanded → Expanded; only the timer moved.
    Rescheduled,
    /// Nothing happened (stale timer, or timer while already collapsed).
    None,
}

/// Expanded/collapsed state with its single inactivity timer.
///
/// At most one collapse timer is armed at any time: every (re)schedule
/// cancels the previous one first.  There is no timeout out of `Collapsed`;
/// only an interaction leaves it.
#[derive(Debug, Clone)]
pub struct VisibilityMachine {
    state:   Visibility,
    delay:   Duration,
    pending: Option<TimerToken>,
}

impl VisibilityMachine {
    pub fn new(delay: Duration) -> Self {
        Self { state: Visibility::Expanded, delay, pending: None }
    }

    pub fn state(&self) -> Visibility {
        self.state
    }

    pub fn pending(&self) -> Option<TimerToken> {
        self.pending
    }

    /// Enter the initial `Expanded` state and arm the first timer.
    pub fn start(&mut self, scheduler: &mut dyn Scheduler) {
        self.state = Visibility::Expanded;
        self.reschedule(scheduler);
    }

    /// Disarm.  The state is left as-is.
    pub fn stop(&mut self, scheduler: &mut dyn Scheduler) {
        if let Some(token) = self.pending.take() {
            scheduler.cancel(token);
        }
    }

    /// Any qualifying user activity.
    pub fn interact(&mut self, scheduler: &mut dyn Scheduler) -> Transition {
        self.reschedule(scheduler);
        match self.state {
            Visibility::Collapsed => {
                self.state = Visibility::Expanded;
                Transition::Expanded
            }
            Visibility::Expanded => Transition::Rescheduled,
        }
    }

    /// A timer fired.  Only the currently armed token collapses the strip.
    pub fn on_timer(&mut self, token: TimerToken) -> Transition {
        if self.pending != Some(token) {
            debug!("ignoring stale collapse timer {token:?}");
            return Transition::None;
        }
        self.pending = None;

        match self.state {
            Visibility::Expanded => {
                self.state = Visibility::Collapsed;
                Transition::Collapsed
            }
            Visibility::Collapsed => Transition::None,
        }
    }

    fn reschedule(&mut self, scheduler: &mut dyn Scheduler) {
        if let Some(old) = self.pending.take() {
            scheduler.cancel(old);
        }
        self.pending = Some(scheduler.schedule(self.delay));
    }
}
