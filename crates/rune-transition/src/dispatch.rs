//! UI dispatch queue.
//!
//! The host pumps this queue after each UI event. Work posted here runs
//! after the event that posted it has fully unwound, which keeps navigation
//! stack mutations out of the host's own leave/back handlers.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;

use tracing::trace;

type Task = Box<dyn FnOnce()>;

/// Shared, single-threaded FIFO of deferred UI work.
///
/// Clones share the same queue.
#[derive(Clone, Default)]
pub struct DispatchQueue {
    tasks: Rc<RefCell<VecDeque<Task>>>,
}

impl DispatchQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `task` to run on a later dispatch cycle.
    pub fn post<F>(&self, task: F)
    where
        F: FnOnce() + 'static,
    {
        self.tasks.borrow_mut().push_back(Box::new(task));
    }

    /// Number of tasks waiting to run.
    pub fn len(&self) -> usize {
        self.tasks.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.borrow().is_empty()
    }

    /// Run the tasks that were queued when this call started.
    ///
    /// Tasks posted while running are left for the next cycle. Returns the
    /// number of tasks executed.
    pub fn run_pending(&self) -> usize {
        let batch: Vec<Task> = self.tasks.borrow_mut().drain(..).collect();
        let count = batch.len();
        for task in batch {
            task();
        }
        if count > 0 {
            trace!(count, "dispatch cycle");
        }
        count
    }

    /// Pump cycles until the queue stays empty or `max_cycles` is reached.
    ///
    /// Returns the total number of tasks executed.
    pub fn run_until_idle(&self, max_cycles: usize) -> usize {
        let mut total = 0;
        for _ in 0..max_cycles {
            let ran = self.run_pending();
            if ran == 0 {
                break;
            }
            total += ran;
        }
        total
    }
}

impl fmt::Debug for DispatchQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DispatchQueue")
            .field("pending", &self.len())
            .finish()
    }
}
