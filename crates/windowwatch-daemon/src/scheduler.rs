//! Fixed-cadence recurring tasks on the tokio timer.
//!
//! A [`Scheduler`] does not run anything itself: [`Scheduler::next`] waits for
//! the earliest due task and hands back its id, so a single loop owns all the
//! state the tasks touch and two tasks can never run at once.

use tokio::time::{sleep_until, Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(usize);

#[derive(Debug)]
struct Recurring {
    name: &'static str,
    period: Duration,
    next_due: Instant,
}

#[derive(Debug, Default)]
pub struct Scheduler {
    tasks: Vec<Recurring>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a task that is due immediately and then every `period`.
    /// Tasks due at the same instant run in registration order.
    pub fn every(&mut self, name: &'static str, period: Duration) -> TaskId {
        let id = TaskId(self.tasks.len());
        self.tasks.push(Recurring {
            name,
            period: period.max(Duration::from_millis(1)),
            next_due: Instant::now(),
        });
        tracing::debug!(task = name, period_ms = period.as_millis() as u64, "Task scheduled");
        id
    }

    pub fn name(&self, id: TaskId) -> &'static str {
        self.tasks.get(id.0).map(|t| t.name).unwrap_or("unknown")
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Wait for the next due task. Ticks missed while the caller was busy are
    /// skipped rather than replayed. Never resolves when nothing is registered.
    ///
    /// Cancel safe: nothing is updated until the wait completes.
    pub async fn next(&mut self) -> TaskId {
        let Some((index, due)) = self
            .tasks
            .iter()
            .enumerate()
            .min_by_key(|(i, t)| (t.next_due, *i))
            .map(|(i, t)| (i, t.next_due))
        else {
            return std::future::pending().await;
        };

        sleep_until(due).await;

        let now = Instant::now();
        let task = &mut self.tasks[index];
        task.next_due += task.period;
        if task.next_due <= now {
            let behind = now.duration_since(task.next_due);
            let skipped = (behind.as_nanos() / task.period.as_nanos()) as u32 + 1;
            tracing::debug!(task = task.name, skipped, "Skipping missed ticks");
            task.next_due += task.period * skipped;
        }

        TaskId(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_tasks_due_immediately_in_order() {
        let mut scheduler = Scheduler::new();
        let clock = scheduler.every("clock", Duration::from_secs(1));
        let countdown = scheduler.every("countdown", Duration::from_secs(1));
        let start = Instant::now();

        assert_eq!(scheduler.next().await, clock);
        assert_eq!(scheduler.next().await, countdown);
        assert_eq!(Instant::now(), start);

        assert_eq!(scheduler.next().await, clock);
        assert_eq!(scheduler.next().await, countdown);
        assert_eq!(Instant::now(), start + Duration::from_secs(1));
        assert_eq!(scheduler.name(countdown), "countdown");
    }

    #[tokio::test(start_paused = true)]
    async fn test_independent_periods() {
        let mut scheduler = Scheduler::new();
        let fast = scheduler.every("fast", Duration::from_millis(400));
        let slow = scheduler.every("slow", Duration::from_secs(1));
        let start = Instant::now();

        let mut seen = Vec::new();
        while Instant::now() < start + Duration::from_millis(1200) {
            let id = scheduler.next().await;
            seen.push((id, Instant::now().duration_since(start).as_millis()));
        }

        assert_eq!(
            seen,
            vec![
                (fast, 0),
                (slow, 0),
                (fast, 400),
                (fast, 800),
                (slow, 1000),
                (fast, 1200),
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_missed_ticks_are_skipped() {
        let mut scheduler = Scheduler::new();
        let id = scheduler.every("tick", Duration::from_secs(1));
        let start = Instant::now();

        scheduler.next().await;
        tokio::time::advance(Duration::from_millis(3500)).await;

        assert_eq!(scheduler.next().await, id);
        assert_eq!(Instant::now(), start + Duration::from_millis(3500));

        scheduler.next().await;
        assert_eq!(Instant::now(), start + Duration::from_secs(4));
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_scheduler_never_fires() {
        let mut scheduler = Scheduler::new();
        assert!(scheduler.is_empty());
        let result = tokio::time::timeout(Duration::from_secs(60), scheduler.next()).await;
        assert!(result.is_err());
    }
}
