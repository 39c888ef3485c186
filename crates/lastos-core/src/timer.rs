/// Handle to a scheduled timer. Ids are never reused within one queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

#[derive(Debug, Clone)]
struct Entry<T> {
    id: TimerId,
    due_ms: u64,
    /// `Some` for repeating timers.
    period_ms: Option<u64>,
    tag: T,
}

/// Deterministic timer queue driven by an explicit millisecond clock.
///
/// Replaces the browser's interval/timeout callbacks: owners schedule
/// tagged timers, advance the clock by the frame delta, and pop due timers
/// one at a time. Popping one at a time lets a handler cancel timers that
/// would otherwise fire later in the same frame.
#[derive(Debug, Clone)]
pub struct TimerQueue<T> {
    now_ms: u64,
    next_id: u64,
    entries: Vec<Entry<T>>,
}

impl<T: Clone> TimerQueue<T> {
    pub fn new() -> Self {
        Self {
            now_ms: 0,
            next_id: 1,
            entries: Vec::new(),
        }
    }

    /// Current clock value in milliseconds.
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Schedule a repeating timer firing every `period_ms` (minimum 1 ms).
    pub fn every(&mut self, period_ms: u64, tag: T) -> TimerId {
        let period_ms = period_ms.max(1);
        self.push(period_ms, Some(period_ms), tag)
    }

    /// Schedule a one-shot timer firing once after `delay_ms`.
    pub fn after(&mut self, delay_ms: u64, tag: T) -> TimerId {
        self.push(delay_ms, None, tag)
    }

    fn push(&mut self, delay_ms: u64, period_ms: Option<u64>, tag: T) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.entries.push(Entry {
            id,
            due_ms: self.now_ms.saturating_add(delay_ms),
            period_ms,
            tag,
        });
        id
    }

    /// Cancel a timer. Returns false if it already fired (one-shot) or was cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        self.entries.len() != before
    }

    /// Cancel every pending timer.
    pub fn cancel_all(&mut self) {
        self.entries.clear();
    }

    pub fn is_active(&self, id: TimerId) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    /// Number of pending timers.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Pop the earliest timer due at or before `until_ms`, moving the clock
    /// to its due time. Repeating timers are rescheduled; one-shots removed.
    /// Ties fire in scheduling order.
    pub fn pop_due(&mut self, until_ms: u64) -> Option<(TimerId, T)> {
        let idx = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.due_ms <= until_ms)
            .min_by_key(|(_, e)| (e.due_ms, e.id.0))
            .map(|(i, _)| i)?;

        let due = self.entries[idx].due_ms;
        self.now_ms = self.now_ms.max(due);

        let fired = match self.entries[idx].period_ms {
            Some(period) => {
                let entry = &mut self.entries[idx];
                entry.due_ms = due.saturating_add(period);
                (entry.id, entry.tag.clone())
            },
            None => {
                let entry = self.entries.remove(idx);
                (entry.id, entry.tag)
            },
        };
        Some(fired)
    }

    /// Move the clock forward to `until_ms` without firing anything.
    /// Call after draining `pop_due` for the same target.
    pub fn settle(&mut self, until_ms: u64) {
        self.now_ms = self.now_ms.max(until_ms);
    }

    /// Advance by `dt_ms`, returning every firing in order. Suitable for owners
    /// whose handlers never cancel other timers.
    pub fn advance(&mut self, dt_ms: u64) -> Vec<(TimerId, T)> {
        let target = self.now_ms.saturating_add(dt_ms);
        let mut fired = Vec::new();
        while let Some(f) = self.pop_due(target) {
            fired.push(f);
        }
        self.settle(target);
        fired
    }
}

impl<T: Clone> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    enum Tag {
        Tick,
        Flash,
    }

    #[test]
    fn interval_fires_each_period() {
        let mut q = TimerQueue::new();
        q.every(1000, Tag::Tick);
        assert!(q.advance(999).is_empty());
        assert_eq!(q.advance(1).len(), 1);
        assert_eq!(q.advance(3000).len(), 3);
        assert_eq!(q.now_ms(), 4000);
    }

    #[test]
    fn one_shot_fires_once() {
        let mut q = TimerQueue::new();
        let id = q.after(600, Tag::Flash);
        let fired = q.advance(10_000);
        assert_eq!(fired, vec![(id, Tag::Flash)]);
        assert!(!q.is_active(id));
        assert!(q.advance(10_000).is_empty());
    }

    #[test]
    fn cancelled_timer_never_fires() {
        let mut q = TimerQueue::new();
        let id = q.after(100, Tag::Flash);
        assert!(q.cancel(id));
        assert!(!q.cancel(id));
        assert!(q.advance(1000).is_empty());
    }

    #[test]
    fn firings_ordered_by_due_time() {
        let mut q = TimerQueue::new();
        q.every(300, Tag::Tick);
        q.after(500, Tag::Flash);
        let tags: Vec<Tag> = q.advance(900).into_iter().map(|(_, t)| t).collect();
        assert_eq!(tags, vec![Tag::Tick, Tag::Flash, Tag::Tick, Tag::Tick]);
    }

    #[test]
    fn pop_due_lets_handler_cancel_later_timers() {
        let mut q = TimerQueue::new();
        q.after(100, Tag::Tick);
        let later = q.after(200, Tag::Flash);

        let (_, first) = q.pop_due(1000).unwrap();
        assert_eq!(first, Tag::Tick);
        assert_eq!(q.now_ms(), 100);
        q.cancel(later);
        assert!(q.pop_due(1000).is_none());
        q.settle(1000);
        assert_eq!(q.now_ms(), 1000);
    }

    #[test]
    fn scheduling_is_relative_to_current_clock() {
        let mut q = TimerQueue::new();
        q.advance(5000);
        q.after(100, Tag::Flash);
        assert!(q.advance(99).is_empty());
        assert_eq!(q.advance(1).len(), 1);
    }

    #[test]
    fn cancel_all_clears_queue() {
        let mut q = TimerQueue::new();
        q.every(10, Tag::Tick);
        q.after(10, Tag::Flash);
        q.cancel_all();
        assert!(q.is_empty());
        assert!(q.advance(100).is_empty());
    }
}
