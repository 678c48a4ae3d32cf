//! Partition scheduler.
//!
//! Splits `[0, node_count)` into contiguous batches, builds one task per
//! batch around that batch's [`AdjacencyRows`] and runs the tasks on a
//! caller-owned rayon pool. The calling thread blocks until every task has
//! finished or one of them failed.

use std::ops::Range;

use rayon::prelude::*;
use rayon::ThreadPool;

use super::adjacency::{AdjacencyMatrix, AdjacencyRows};
use crate::{Error, Result};

/// One unit of parallel import work.
pub trait ImportTask: Send {
    fn run(&mut self) -> Result<()>;
}

/// Effective batch size for `node_count` nodes on `concurrency` threads.
///
/// Large enough that at most `concurrency` batches result, never below
/// `requested`, never zero. A `concurrency` of 0 counts as 1.
pub fn compute_batch_size(node_count: usize, concurrency: usize, requested: usize) -> usize {
    let per_thread = node_count.div_ceil(concurrency.max(1));
    per_thread.max(requested).max(1)
}

/// Contiguous, non-overlapping ranges of at most `batch_size` node ids.
pub fn partition(node_count: usize, batch_size: usize) -> Vec<Range<u32>> {
    let batch_size = batch_size.max(1);
    (0..node_count)
        .step_by(batch_size)
        .map(|start| start as u32..(start + batch_size).min(node_count) as u32)
        .collect()
}

/// Build one task per batch of `matrix` rows and run them all on `pool`.
///
/// A single task runs inline on the calling thread. Returns the completed
/// tasks in batch order; the first error aborts the remaining tasks and is
/// returned instead.
pub fn read_parallel<'m, T, F>(
    pool: &ThreadPool,
    matrix: &'m mut AdjacencyMatrix,
    batch_size: usize,
    factory: F,
) -> Result<Vec<T>>
where
    T: ImportTask,
    F: FnMut(AdjacencyRows<'m>) -> T,
{
    let mut tasks: Vec<T> = matrix.split_rows(batch_size).into_iter().map(factory).collect();

    tracing::debug!(
        tasks = tasks.len(),
        batch_size,
        threads = pool.current_num_threads(),
        "running import tasks"
    );

    match tasks.as_mut_slice() {
        [] => {}
        [task] => task.run()?,
        tasks => pool.install(|| tasks.par_iter_mut().try_for_each(|task| task.run()))?,
    }
    Ok(tasks)
}

/// Build a pool with `concurrency` import threads.
pub fn thread_pool(concurrency: usize) -> Result<ThreadPool> {
    rayon::ThreadPoolBuilder::new()
        .num_threads(concurrency.max(1))
        .thread_name(|i| format!("graph-import-{i}"))
        .build()
        .map_err(|e| Error::ThreadPool(e.to_string()))
}
