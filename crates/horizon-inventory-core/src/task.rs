//! Next-tick task queue.
//!
//! Some follow-up work must not run while the host is still dispatching the
//! event that triggered it (for example redrawing a slot the client just
//! tried to move an item out of). Such work is posted here and executed when
//! the host calls [`TaskQueue::run_tick`] at the start of its next tick.
//!
//! Tasks run at most once, in FIFO order. A task posted while a tick is being
//! processed runs on the following tick.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::logging::{span_names, targets, PerfSpan};

/// A unique identifier for a deferred task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(u64);

impl TaskId {
    /// Get the raw u64 value of this task ID.
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

/// Global counter for generating unique task IDs.
static NEXT_TASK_ID: AtomicU64 = AtomicU64::new(1);

fn next_task_id() -> TaskId {
    TaskId(NEXT_TASK_ID.fetch_add(1, Ordering::Relaxed))
}

/// A boxed task closure.
type BoxedTask = Box<dyn FnOnce() + Send + 'static>;

struct TaskData {
    id: TaskId,
    task: BoxedTask,
}

/// FIFO queue of tasks deferred to the next tick.
pub struct TaskQueue {
    tasks: VecDeque<TaskData>,
    /// Maximum number of tasks run per tick, `None` for no limit.
    batch_size: Option<usize>,
}

impl TaskQueue {
    /// Create a queue without a per-tick limit.
    pub fn new() -> Self {
        Self {
            tasks: VecDeque::new(),
            batch_size: None,
        }
    }

    /// Create a queue that runs at most `batch_size` tasks per tick.
    pub fn with_batch_size(batch_size: usize) -> Self {
        Self {
            tasks: VecDeque::new(),
            batch_size: Some(batch_size),
        }
    }

    /// Post a task to run on the next tick.
    pub fn post<F>(&mut self, task: F) -> TaskId
    where
        F: FnOnce() + Send + 'static,
    {
        let id = next_task_id();
        tracing::trace!(target: targets::TASK, ?id, "task posted");
        self.tasks.push_back(TaskData {
            id,
            task: Box::new(task),
        });
        id
    }

    /// Whether any task is waiting.
    pub fn has_pending(&self) -> bool {
        !self.tasks.is_empty()
    }

    /// Number of waiting tasks.
    pub fn pending_count(&self) -> usize {
        self.tasks.len()
    }

    /// Run the tasks due this tick.
    ///
    /// Returns the number of tasks run.
    pub fn run_tick(&mut self) -> usize {
        let due = self.due_count();
        let batch: Vec<TaskData> = self.tasks.drain(..due).collect();
        run_batch(batch)
    }

    fn due_count(&self) -> usize {
        match self.batch_size {
            Some(limit) => self.tasks.len().min(limit),
            None => self.tasks.len(),
        }
    }
}

impl Default for TaskQueue {
    fn default() -> Self {
        Self::new()
    }
}

fn run_batch(batch: Vec<TaskData>) -> usize {
    let count = batch.len();
    if count > 0 {
        let _span = PerfSpan::new(span_names::TASK);
        tracing::trace!(target: targets::TASK, count, "running tick");
        for task_data in batch {
            tracing::trace!(target: targets::TASK, id = ?task_data.id, "running task");
            (task_data.task)();
        }
    }
    count
}

/// A cloneable, thread-safe handle to a [`TaskQueue`].
///
/// Tasks may post further tasks through a clone of the handle; those run on
/// the following tick.
#[derive(Clone, Default)]
pub struct SharedTaskQueue {
    inner: Arc<Mutex<TaskQueue>>,
}

impl SharedTaskQueue {
    /// Create an empty shared queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an existing queue.
    pub fn from_queue(queue: TaskQueue) -> Self {
        Self {
            inner: Arc::new(Mutex::new(queue)),
        }
    }

    /// Post a task to run on the next tick.
    pub fn post<F>(&self, task: F) -> TaskId
    where
        F: FnOnce() + Send + 'static,
    {
        self.inner.lock().post(task)
    }

    /// Whether any task is waiting.
    pub fn has_pending(&self) -> bool {
        self.inner.lock().has_pending()
    }

    /// Number of waiting tasks.
    pub fn pending_count(&self) -> usize {
        self.inner.lock().pending_count()
    }

    /// Run the tasks due this tick without holding the lock while they run.
    pub fn run_tick(&self) -> usize {
        let batch: Vec<TaskData> = {
            let mut queue = self.inner.lock();
            let due = queue.due_count();
            queue.tasks.drain(..due).collect()
        };
        run_batch(batch)
    }
}

static_assertions::assert_impl_all!(SharedTaskQueue: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn test_tasks_run_in_fifo_order() {
        let order = Arc::new(Mutex::new(Vec::new()));
        let mut queue = TaskQueue::new();

        for value in 0..3 {
            let order = Arc::clone(&order);
            queue.post(move || order.lock().push(value));
        }

        assert_eq!(queue.pending_count(), 3);
        assert_eq!(queue.run_tick(), 3);
        assert_eq!(*order.lock(), vec![0, 1, 2]);
        assert!(!queue.has_pending());
    }

    #[test]
    fn test_tasks_run_at_most_once() {
        let counter = Arc::new(AtomicUsize::new(0));
        let mut queue = TaskQueue::new();
        let c = Arc::clone(&counter);
        queue.post(move || {
            c.fetch_add(1, Ordering::SeqCst);
        });

        queue.run_tick();
        queue.run_tick();

        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_batch_size_limits_tick() {
        let mut queue = TaskQueue::with_batch_size(2);
        for _ in 0..5 {
            queue.post(|| {});
        }

        assert_eq!(queue.run_tick(), 2);
        assert_eq!(queue.pending_count(), 3);
    }

    #[test]
    fn test_task_posted_during_tick_runs_next_tick() {
        let queue = SharedTaskQueue::new();
        let counter = Arc::new(AtomicUsize::new(0));

        let inner_queue = queue.clone();
        let c = Arc::clone(&counter);
        queue.post(move || {
            let c = Arc::clone(&c);
            inner_queue.post(move || {
                c.fetch_add(1, Ordering::SeqCst);
            });
        });

        assert_eq!(queue.run_tick(), 1);
        assert_eq!(counter.load(Ordering::SeqCst), 0);
        assert_eq!(queue.pending_count(), 1);

        assert_eq!(queue.run_tick(), 1);
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_task_ids_are_unique() {
        let mut queue = TaskQueue::new();
        let a = queue.post(|| {});
        let b = queue.post(|| {});
        assert_ne!(a, b);
        assert!(b.as_u64() > a.as_u64());
    }
}
