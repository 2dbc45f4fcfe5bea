// File: crates/chart-core/src/scheduler.rs
// Summary: Deferred "after paint" task queue, drained explicitly by the session on each frame.

use std::collections::VecDeque;
use std::fmt;

/// Work deferred until the next frame; receives the state it runs against.
pub type Task<T> = Box<dyn FnOnce(&mut T)>;

/// FIFO queue of after-paint tasks.
///
/// Attribute writes made before scheduling are visible immediately; the
/// scheduled task only runs when the owner drains the queue, which stands in
/// for the host's animation-frame tick.
pub struct FrameScheduler<T> {
    queue: VecDeque<(&'static str, Task<T>)>,
}

impl<T> Default for FrameScheduler<T> {
    fn default() -> Self {
        Self { queue: VecDeque::new() }
    }
}

impl<T> fmt::Debug for FrameScheduler<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.queue.iter().map(|(name, _)| name)).finish()
    }
}

impl<T> FrameScheduler<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `task` to run after the next paint. A task already queued under
    /// `name` is dropped, so repeated requests coalesce into the latest one.
    pub fn schedule_after_paint(&mut self, name: &'static str, task: impl FnOnce(&mut T) + 'static) {
        self.queue.retain(|(queued, _)| *queued != name);
        self.queue.push_back((name, Box::new(task)));
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Take every queued task, leaving the queue empty.
    pub fn drain(&mut self) -> Vec<(&'static str, Task<T>)> {
        self.queue.drain(..).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tasks_run_in_order_only_when_drained() {
        let mut sched: FrameScheduler<Vec<u8>> = FrameScheduler::new();
        sched.schedule_after_paint("one", |v| v.push(1));
        sched.schedule_after_paint("two", |v| v.push(2));
        assert_eq!(sched.pending(), 2);

        let mut state = Vec::new();
        for (_, task) in sched.drain() {
            task(&mut state);
        }
        assert_eq!(state, vec![1, 2]);
        assert_eq!(sched.pending(), 0);
    }

    #[test]
    fn same_name_coalesces_to_latest() {
        let mut sched: FrameScheduler<Vec<u8>> = FrameScheduler::new();
        sched.schedule_after_paint("refresh", |v| v.push(1));
        sched.schedule_after_paint("other", |v| v.push(2));
        sched.schedule_after_paint("refresh", |v| v.push(3));
        assert_eq!(sched.pending(), 2);

        let mut state = Vec::new();
        for (_, task) in sched.drain() {
            task(&mut state);
        }
        assert_eq!(state, vec![2, 3]);
    }
}
