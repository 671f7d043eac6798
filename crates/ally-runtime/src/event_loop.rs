//! Event Loop Implementation
//!
//! Virtual-time timer queue. Nothing here reads a wall clock: time only
//! moves when the host advances it, which keeps every deferral and timeout
//! deterministic.

use std::cell::Cell;
use std::rc::Rc;

/// Timer identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

/// Lifecycle of a scheduled task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskState {
    Pending,
    Done,
    Cancelled,
}

/// Handle to a scheduled task.
///
/// Dropping the handle cancels the task unless it was [`detach`]ed, so a
/// task owned by a component can never outlive it.
///
/// [`detach`]: TaskHandle::detach
#[derive(Debug)]
#[must_use = "dropping a TaskHandle cancels the task; call detach() to let it run"]
pub struct TaskHandle {
    id: TimerId,
    state: Rc<Cell<TaskState>>,
    detached: bool,
}

impl TaskHandle {
    pub fn id(&self) -> TimerId {
        self.id
    }

    /// Cancel the task if it has not run yet
    pub fn cancel(&self) {
        if self.state.get() == TaskState::Pending {
            self.state.set(TaskState::Cancelled);
        }
    }

    pub fn state(&self) -> TaskState {
        self.state.get()
    }

    pub fn is_pending(&self) -> bool {
        self.state.get() == TaskState::Pending
    }

    /// Let the task run even after the handle is gone
    pub fn detach(mut self) {
        self.detached = true;
    }
}

impl Drop for TaskHandle {
    fn drop(&mut self) {
        if !self.detached {
            self.cancel();
        }
    }
}

#[derive(Debug)]
struct Timer<T> {
    id: TimerId,
    due: u64,
    state: Rc<Cell<TaskState>>,
    task: T,
}

/// Timer queue ordered by due time, then by scheduling order
#[derive(Debug)]
pub struct EventLoop<T> {
    timers: Vec<Timer<T>>,
    next_timer_id: u64,
    current_time: u64,
}

impl<T> Default for EventLoop<T> {
    fn default() -> Self {
        Self {
            timers: Vec::new(),
            next_timer_id: 0,
            current_time: 0,
        }
    }
}

impl<T> EventLoop<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `task` to run `delay_ms` from now
    pub fn set_timeout(&mut self, task: T, delay_ms: u64) -> TaskHandle {
        let id = TimerId(self.next_timer_id);
        self.next_timer_id += 1;
        let state = Rc::new(Cell::new(TaskState::Pending));
        self.timers.push(Timer {
            id,
            due: self.current_time.saturating_add(delay_ms),
            state: Rc::clone(&state),
            task,
        });
        TaskHandle { id, state, detached: false }
    }

    /// Current virtual time (ms)
    pub fn current_time(&self) -> u64 {
        self.current_time
    }

    /// Due time of the earliest live timer
    pub fn next_due(&self) -> Option<u64> {
        self.live().map(|t| t.due).min()
    }

    /// Remove and return the earliest live timer due at or before
    /// `deadline`, moving the clock to its due time. The task is marked
    /// done before it is handed out.
    pub fn pop_due(&mut self, deadline: u64) -> Option<(TimerId, T)> {
        self.timers.retain(|t| t.state.get() == TaskState::Pending);
        let index = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due <= deadline)
            .min_by_key(|(_, t)| (t.due, t.id))
            .map(|(i, _)| i)?;
        let timer = self.timers.remove(index);
        self.current_time = self.current_time.max(timer.due);
        timer.state.set(TaskState::Done);
        Some((timer.id, timer.task))
    }

    /// Move the clock forward without running anything
    pub fn advance_clock_to(&mut self, time: u64) {
        self.current_time = self.current_time.max(time);
    }

    /// Number of timers still waiting to run
    pub fn pending_count(&self) -> usize {
        self.live().count()
    }

    /// Check if there's pending work
    pub fn has_pending_work(&self) -> bool {
        self.live().next().is_some()
    }

    fn live(&self) -> impl Iterator<Item = &Timer<T>> {
        self.timers.iter().filter(|t| t.state.get() == TaskState::Pending)
    }
}
