use std::cell::RefCell;
use std::time::Duration;

pub type TaskId = u64;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControlFlow {
    Continue,
    Break,
}

pub trait Scheduler {
    fn schedule_once(&self, delay: Duration, callback: Box<dyn FnOnce()>) -> TaskId;
    fn schedule_repeating(
        &self,
        interval: Duration,
        callback: Box<dyn FnMut() -> ControlFlow>,
    ) -> TaskId;
    fn cancel(&self, task: TaskId);
}

enum TaskKind {
    Once(Option<Box<dyn FnOnce()>>),
    Repeating {
        interval_ms: u64,
        callback: Box<dyn FnMut() -> ControlFlow>,
    },
}

struct Task {
    id: TaskId,
    due_ms: u64,
    kind: TaskKind,
}

#[derive(Default)]
struct SchedulerInner {
    now_ms: u64,
    next_id: TaskId,
    tasks: Vec<Task>,
    cancelled_inflight: Vec<TaskId>,
}

// Deterministic hand-stepped scheduler. Tasks run outside the queue
// borrow, so a running callback may schedule or cancel freely.
pub struct ManualScheduler {
    inner: RefCell<SchedulerInner>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        ManualScheduler { inner: RefCell::new(SchedulerInner::default()) }
    }

    pub fn now_ms(&self) -> u64 {
        self.inner.borrow().now_ms
    }

    pub fn pending_tasks(&self) -> usize {
        self.inner.borrow().tasks.len()
    }

    pub fn advance(&self, duration: Duration) {
        self.advance_ms(duration.as_millis() as u64);
    }

    pub fn advance_ms(&self, ms: u64) {
        let target = self.inner.borrow().now_ms.saturating_add(ms);
        loop {
            let next = {
                let mut inner = self.inner.borrow_mut();
                let due = inner
                    .tasks
                    .iter()
                    .enumerate()
                    .filter(|(_, task)| task.due_ms <= target)
                    .min_by_key(|(_, task)| (task.due_ms, task.id))
                    .map(|(position, _)| position);
                match due {
                    Some(position) => {
                        let task = inner.tasks.remove(position);
                        inner.now_ms = inner.now_ms.max(task.due_ms);
                        Some(task)
                    }
                    None => None,
                }
            };
            let Some(mut task) = next else {
                break;
            };

            let reschedule_after = match &mut task.kind {
                TaskKind::Once(callback) => {
                    if let Some(callback) = callback.take() {
                        callback();
                    }
                    None
                }
                TaskKind::Repeating { interval_ms, callback } => {
                    let interval = *interval_ms;
                    match callback() {
                        ControlFlow::Continue => Some(interval),
                        ControlFlow::Break => None,
                    }
                }
            };

            let mut inner = self.inner.borrow_mut();
            let was_cancelled = inner.cancelled_inflight.contains(&task.id);
            inner.cancelled_inflight.retain(|&id| id != task.id);
            if let Some(interval) = reschedule_after
                && !was_cancelled
            {
                task.due_ms += interval;
                inner.tasks.push(task);
            }
        }
        self.inner.borrow_mut().now_ms = target;
    }
}

impl Default for ManualScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler for ManualScheduler {
    fn schedule_once(&self, delay: Duration, callback: Box<dyn FnOnce()>) -> TaskId {
        let mut inner = self.inner.borrow_mut();
        inner.next_id += 1;
        let id = inner.next_id;
        let due_ms = inner.now_ms + delay.as_millis() as u64;
        inner.tasks.push(Task { id, due_ms, kind: TaskKind::Once(Some(callback)) });
        id
    }

    fn schedule_repeating(
        &self,
        interval: Duration,
        callback: Box<dyn FnMut() -> ControlFlow>,
    ) -> TaskId {
        let mut inner = self.inner.borrow_mut();
        inner.next_id += 1;
        let id = inner.next_id;
        let interval_ms = (interval.as_millis() as u64).max(1);
        let due_ms = inner.now_ms + interval_ms;
        inner.tasks.push(Task {
            id,
            due_ms,
            kind: TaskKind::Repeating { interval_ms, callback },
        });
        id
    }

    fn cancel(&self, task: TaskId) {
        let mut inner = self.inner.borrow_mut();
        if let Some(position) = inner.tasks.iter().position(|t| t.id == task) {
            inner.tasks.remove(position);
        } else {
            inner.cancelled_inflight.push(task);
        }
    }
}
