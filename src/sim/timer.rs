//! Cooperative timer queue
//!
//! Stand-in for browser `setInterval`/`setTimeout` that the session drives
//! from its own clock. Everything runs on the caller's thread: a timer only
//! fires from inside [`TimerQueue::pop_due`], never concurrently with a tick.
//! A cancelled handle is dropped from the queue and cannot fire.

/// What a timer does when it fires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    /// Create one adversary
    Spawn,
    /// Halve the spawn interval
    Escalate,
    /// Toggle player visibility during invincibility
    Blink,
    /// Invincibility window is over
    InvincibilityEnd,
}

/// Cancellation handle returned when a timer is scheduled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(u64);

/// A timer that came due
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fired {
    pub handle: TimerHandle,
    pub kind: TimerKind,
    /// Scheduled fire time (ms); the session clock reads this while dispatching
    pub due_ms: f64,
}

#[derive(Debug, Clone)]
struct Entry {
    handle: TimerHandle,
    kind: TimerKind,
    due_ms: f64,
    /// Repeat period for intervals, `None` for one-shot timeouts
    period_ms: Option<f64>,
}

/// Pending timers, fired in (due time, creation order)
#[derive(Debug, Clone, Default)]
pub struct TimerQueue {
    entries: Vec<Entry>,
    next_id: u64,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Repeat `kind` every `period_ms`, first firing one period from `now_ms`
    pub fn set_interval(&mut self, kind: TimerKind, now_ms: f64, period_ms: f64) -> TimerHandle {
        self.insert(kind, now_ms + period_ms, Some(period_ms))
    }

    /// Fire `kind` once, `delay_ms` from `now_ms`
    pub fn set_timeout(&mut self, kind: TimerKind, now_ms: f64, delay_ms: f64) -> TimerHandle {
        self.insert(kind, now_ms + delay_ms, None)
    }

    fn insert(&mut self, kind: TimerKind, due_ms: f64, period_ms: Option<f64>) -> TimerHandle {
        self.next_id += 1;
        let handle = TimerHandle(self.next_id);
        self.entries.push(Entry {
            handle,
            kind,
            due_ms,
            period_ms,
        });
        handle
    }

    /// Cancel a timer. Returns false if it already fired (timeout) or was cancelled.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.handle != handle);
        self.entries.len() != before
    }

    /// Cancel the timer in `slot`, if any, and empty the slot
    pub fn cancel_slot(&mut self, slot: &mut Option<TimerHandle>) {
        if let Some(handle) = slot.take() {
            self.cancel(handle);
        }
    }

    #[cfg(test)]
    fn is_pending(&self, handle: TimerHandle) -> bool {
        self.entries.iter().any(|e| e.handle == handle)
    }

    /// Take the earliest timer due at or before `now_ms`.
    ///
    /// Intervals are rescheduled one period after their due time; timeouts are
    /// removed. Call repeatedly until `None` so callbacks that cancel or
    /// schedule timers are observed by later firings.
    pub fn pop_due(&mut self, now_ms: f64) -> Option<Fired> {
        let idx = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.due_ms <= now_ms)
            .min_by(|(_, a), (_, b)| {
                a.due_ms
                    .partial_cmp(&b.due_ms)
                    .unwrap_or(std::cmp::Ordering::Equal)
                    .then(a.handle.cmp(&b.handle))
            })
            .map(|(i, _)| i)?;

        let entry = &mut self.entries[idx];
        let fired = Fired {
            handle: entry.handle,
            kind: entry.kind,
            due_ms: entry.due_ms,
        };
        match entry.period_ms {
            Some(period) => entry.due_ms += period,
            None => {
                self.entries.swap_remove(idx);
            }
        }
        Some(fired)
    }

    /// Number of pending timers
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(queue: &mut TimerQueue, now_ms: f64) -> Vec<(TimerKind, f64)> {
        let mut out = Vec::new();
        while let Some(f) = queue.pop_due(now_ms) {
            out.push((f.kind, f.due_ms));
        }
        out
    }

    #[test]
    fn test_interval_repeats() {
        let mut queue = TimerQueue::new();
        queue.set_interval(TimerKind::Spawn, 0.0, 2000.0);
        assert!(drain(&mut queue, 1999.0).is_empty());
        assert_eq!(
            drain(&mut queue, 6000.0),
            vec![
                (TimerKind::Spawn, 2000.0),
                (TimerKind::Spawn, 4000.0),
                (TimerKind::Spawn, 6000.0)
            ]
        );
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn test_timeout_fires_once() {
        let mut queue = TimerQueue::new();
        let h = queue.set_timeout(TimerKind::InvincibilityEnd, 0.0, 1000.0);
        assert!(queue.is_pending(h));
        assert_eq!(drain(&mut queue, 5000.0).len(), 1);
        assert!(!queue.is_pending(h));
        assert!(queue.is_empty());
    }

    #[test]
    fn test_cancelled_never_fires() {
        let mut queue = TimerQueue::new();
        let h = queue.set_interval(TimerKind::Blink, 0.0, 100.0);
        assert!(queue.cancel(h));
        assert!(!queue.cancel(h));
        assert!(drain(&mut queue, 10_000.0).is_empty());

        let mut slot = Some(queue.set_timeout(TimerKind::Spawn, 0.0, 10.0));
        queue.cancel_slot(&mut slot);
        assert!(slot.is_none());
        assert!(queue.is_empty());
    }

    #[test]
    fn test_order_is_due_then_creation() {
        let mut queue = TimerQueue::new();
        queue.set_timeout(TimerKind::InvincibilityEnd, 0.0, 100.0);
        queue.set_interval(TimerKind::Blink, 0.0, 100.0);
        queue.set_timeout(TimerKind::Spawn, 0.0, 50.0);
        let kinds: Vec<_> = drain(&mut queue, 100.0).into_iter().map(|(k, _)| k).collect();
        assert_eq!(
            kinds,
            vec![TimerKind::Spawn, TimerKind::InvincibilityEnd, TimerKind::Blink]
        );
    }
}
