//! Bounded worker pool for artifact downloads

use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::error::{Result, cache};

/// A fixed number of worker threads; jobs beyond the width wait in a queue.
pub struct WorkerPool {
    pool: ThreadPool,
    width: usize,
}

impl WorkerPool {
    /// Create a pool running at most `width` jobs at once (at least one)
    pub fn new(width: usize) -> Result<Self> {
        let width = width.max(1);
        let pool = ThreadPoolBuilder::new()
            .num_threads(width)
            .thread_name(|index| format!("npm-unwrap-fetch-{index}"))
            .build()
            .map_err(|e| cache::operation_failed(format!("Failed to start worker pool: {e}")))?;

        Ok(Self { pool, width })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Submit one job per input and wait for all of them.
    ///
    /// Jobs start in input order; results come back in input order regardless
    /// of completion order.
    pub fn run<T, R, F>(&self, inputs: &[T], work: F) -> Vec<R>
    where
        T: Sync,
        R: Send,
        F: Fn(&T) -> R + Sync,
    {
        let mut slots: Vec<Option<R>> = inputs.iter().map(|_| None).collect();
        let work = &work;

        self.pool.scope_fifo(|scope| {
            for (slot, input) in slots.iter_mut().zip(inputs) {
                scope.spawn_fifo(move |_| *slot = Some(work(input)));
            }
        });

        slots.into_iter().flatten().collect()
    }
}
