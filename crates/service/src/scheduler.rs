use ribbon_core::{event::TimerToken, Message};
use ribbon_overlay::Scheduler;
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time;

/// [`Scheduler`] backed by tokio timers.
///
/// Each timer is a task that sleeps and then posts [`Message::TimerFired`]
/// on the controller queue.  Cancelling aborts the task; a firing that was
/// already queued before the abort is filtered out by the controller's token
/// check.  Must be used inside a tokio runtime.
pub struct TokioScheduler {
    tx:      UnboundedSender<Message>,
    next_id: u64,
    tasks:   HashMap<TimerToken, JoinHandle<()>>,
}

impl TokioScheduler {
    pub fn new(tx: UnboundedSender<Message>) -> Self {
        Self { tx, next_id: 0, tasks: HashMap::new() }
    }

    fn token(&mut self) -> TimerToken {
        // Forget one-shots that already fired.
        self.tasks.retain(|_, task| !task.is_finished());
        self.next_id += 1;
        TimerToken(self.next_id)
    }
}

impl Scheduler for TokioScheduler {
    fn schedule(&mut self, delay: Duration) -> TimerToken {
        let token = self.token();
        let tx = self.tx.clone();
        let deadline = time::Instant::now() + delay;
        let task = tokio::spawn(async move {
            time::sleep_until(deadline).await;
            let _ = tx.send(Message::TimerFired(token));
        });
        self.tasks.insert(token, task);
        token
    }

    fn schedule_repeating(&mut self, period: Duration) -> TimerToken {
        let token = self.token();
        let tx = self.tx.clone();
        let period = period.max(Duration::from_millis(1));
        let first = time::Instant::now() + period;
        let task = tokio::spawn(async move {
            let mut ticker = time::interval_at(first, period);
            ticker.set_missed_tick_behavior(time::MissedTickBehavior::Skip);
            loop {
                ticker.tick().await;
                if tx.send(Message::TimerFired(token)).is_err() {
                    break; // controller queue gone
                }
            }
        });
        self.tasks.insert(token, task);
        token
    }

    fn cancel(&mut self, token: TimerToken) {
        if let Some(task) = self.tasks.remove(&token) {
            task.abort();
        }
    }
}

impl Drop for TokioScheduler {
    fn drop(&mut self) {
        for (_, task) in self.tasks.drain() {
            task.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    #[tokio::test(start_paused = true)]
    async fn one_shot_fires_after_delay() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut s = TokioScheduler::new(tx);
        let token = s.schedule(Duration::from_secs(7));

        time::advance(Duration::from_millis(6_999)).await;
        assert!(rx.try_recv().is_err());
        assert_eq!(rx.recv().await, Some(Message::TimerFired(token)));
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_timer_stays_silent() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut s = TokioScheduler::new(tx);
        let dead = s.schedule(Duration::from_secs(1));
        s.cancel(dead);
        let live = s.schedule(Duration::from_secs(2));

        assert_eq!(rx.recv().await, Some(Message::TimerFired(live)));
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn repeating_timer_ticks_until_cancelled() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut s = TokioScheduler::new(tx);
        let tick = s.schedule_repeating(Duration::from_secs(1));

        for _ in 0..3 {
            assert_eq!(rx.recv().await, Some(Message::TimerFired(tick)));
        }
        s.cancel(tick);
        time::advance(Duration::from_secs(5)).await;
        assert!(rx.try_recv().is_err());
    }
}
