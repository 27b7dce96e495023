//! Worker pool for the pair-enumeration outer loop
//!
//! Each run builds its own rayon pool sized from `parallel.num_workers`
//! (0 = one worker per CPU). Results always come back in input order, so
//! parallel and sequential runs produce identical output.

use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuildError, ThreadPoolBuilder};
use std::ops::Range;
use tracing::debug;

pub struct WorkerPool {
    pool: Option<ThreadPool>,
    workers: usize,
}

impl std::fmt::Debug for WorkerPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkerPool")
            .field("workers", &self.workers)
            .field("parallel", &self.is_parallel())
            .finish()
    }
}

impl WorkerPool {
    /// Build a pool; `enable_rayon = false` yields the sequential pool
    pub fn new(num_workers: usize, enable_rayon: bool) -> Result<Self, ThreadPoolBuildError> {
        if !enable_rayon {
            return Ok(Self::sequential());
        }

        let workers = if num_workers == 0 {
            num_cpus::get()
        } else {
            num_workers
        };

        let pool = ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("donorgraph-worker-{}", i))
            .build()?;

        debug!("Built worker pool with {} threads", workers);
        Ok(Self {
            pool: Some(pool),
            workers,
        })
    }

    pub fn sequential() -> Self {
        Self {
            pool: None,
            workers: 1,
        }
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    pub fn is_parallel(&self) -> bool {
        self.pool.is_some()
    }

    /// Map `f` over `range`, returning results in range order
    pub fn map_range<R, F>(&self, range: Range<u32>, f: F) -> Vec<R>
    where
        R: Send,
        F: Fn(u32) -> R + Sync + Send,
    {
        match &self.pool {
            Some(pool) => pool.install(|| range.into_par_iter().map(&f).collect()),
            None => range.map(f).collect(),
        }
    }
}
