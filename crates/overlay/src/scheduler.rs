use ribbon_core::{event::TimerToken, Message};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;
use std::time::Duration;

/// Deferred-callback capability.
///
/// A due timer is delivered as [`Message::TimerFired`] on the controller's
/// event queue, never by calling back into the controller directly, so
/// firings are serialised with input like every other event.
pub trait Scheduler {
    /// Fire once after `delay`.
    fn schedule(&mut self, delay: Duration) -> TimerToken;
    /// Fire every `period` until cancelled.
    fn schedule_repeating(&mut self, period: Duration) -> TimerToken;
    /// Cancel a pending timer.  Unknown or already-fired tokens are ignored.
    fn cancel(&mut self, token: TimerToken);
}

// ── Manual (virtual-time) scheduler ───────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
struct Entry {
    due:    Duration,
    period: Option<Duration>,
}

#[derive(Debug, Default)]
struct Clock {
    now:     Duration,
    next_id: u64,
    timers:  BTreeMap<TimerToken, Entry>,
}

/// Scheduler driven by explicit [`advance`](ManualScheduler::advance) calls.
///
/// Cloning shares the same virtual clock, so a test can keep one handle while
/// the controller owns another.
#[derive(Debug, Clone, Default)]
pub struct ManualScheduler {
    inner: Rc<RefCell<Clock>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Duration {
        self.inner.borrow().now
    }

    /// Number of timers still armed.
    pub fn pending(&self) -> usize {
        self.inner.borrow().timers.len()
    }

    pub fn is_pending(&self, token: TimerToken) -> bool {
        self.inner.borrow().timers.contains_key(&token)
    }

    /// Move virtual time forward and return every firing that became due,
    /// in due order (ties broken by scheduling order).
    pub fn advance(&self, by: Duration) -> Vec<Message> {
        let mut clock = self.inner.borrow_mut();
        let target = clock.now + by;
        let mut fired = Vec::new();

        loop {
            let next = clock
                .timers
                .iter()
                .filter(|(_, e)| e.due <= target)
                .min_by_key(|(token, e)| (e.due, **token))
                .map(|(token, e)| (*token, *e));

            let Some((token, entry)) = next else { break };
            clock.now = entry.due;
            fired.push(Message::TimerFired(token));

            match entry.period {
                Some(period) => {
                    if let Some(e) = clock.timers.get_mut(&token) {
                        e.due += period;
                    }
                }
                None => {
                    clock.timers.remove(&token);
                }
            }
        }

        clock.now = target;
        fired
    }

    fn arm(&self, delay: Duration, period: Option<Duration>) -> TimerToken {
        let mut clock = self.inner.borrow_mut();
        clock.next_id += 1;
        let token = TimerToken(clock.next_id);
        let due = clock.now + delay;
        clock.timers.insert(token, Entry { due, period });
        token
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&mut self, delay: Duration) -> TimerToken {
        self.arm(delay, None)
    }

    fn schedule_repeating(&mut self, period: Duration) -> TimerToken {
        // A zero period would spin `advance` forever.
        let period = period.max(Duration::from_millis(1));
        self.arm(period, Some(period))
    }

    fn cancel(&mut self, token: TimerToken) {
        self.inner.borrow_mut().timers.remove(&token);
    }
}
