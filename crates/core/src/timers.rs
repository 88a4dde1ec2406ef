use std::collections::VecDeque;

/// Handle for cancelling a scheduled timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

#[derive(Debug, Clone)]
struct Entry<E> {
    id: TimerId,
    deadline: f64,
    event: E,
}

/// Deadline-ordered queue of pending callbacks.
///
/// Entries with equal deadlines fire in the order they were scheduled.
/// Nothing here reads a clock: callers pass `now` and drain what is due.
#[derive(Debug, Clone)]
pub struct TimerQueue<E> {
    entries: VecDeque<Entry<E>>,
    next_id: u64,
}

impl<E> Default for TimerQueue<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> TimerQueue<E> {
    pub fn new() -> Self {
        Self {
            entries: VecDeque::new(),
            next_id: 0,
        }
    }

    pub fn schedule(&mut self, deadline: f64, event: E) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        let at = self.entries.partition_point(|e| e.deadline <= deadline);
        self.entries.insert(at, Entry { id, deadline, event });
        id
    }

    pub fn cancel(&mut self, id: TimerId) -> Option<E> {
        let at = self.entries.iter().position(|e| e.id == id)?;
        self.entries.remove(at).map(|e| e.event)
    }

    /// Drop every pending event matching `pred`. Returns how many were dropped.
    pub fn cancel_where(&mut self, mut pred: impl FnMut(&E) -> bool) -> usize {
        let before = self.entries.len();
        self.entries.retain(|e| !pred(&e.event));
        before - self.entries.len()
    }

    /// Remove and return the earliest event whose deadline is `<= now`,
    /// together with that deadline.
    pub fn pop_due(&mut self, now: f64) -> Option<(f64, E)> {
        if self.entries.front()?.deadline > now {
            return None;
        }
        self.entries.pop_front().map(|e| (e.deadline, e.event))
    }

    pub fn next_deadline(&self) -> Option<f64> {
        self.entries.front().map(|e| e.deadline)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (f64, &E)> {
        self.entries.iter().map(|e| (e.deadline, &e.event))
    }
}
