//! Background task execution for applets.
//!
//! Applets must not block the dock's thread. Slow work (rendering an icon,
//! polling some external state) is spawned here and reports back through the
//! dock's worker queue, which the engine drains once per tick.

use std::fmt;
use std::future::Future;
use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use async_executor::{Executor, Task};

/// Returned when a pool ends up with no worker threads.
#[derive(Debug)]
pub enum TaskPoolError {
    /// Every worker thread failed to start; carries the last OS error.
    NoWorkers(io::Error),
}

impl fmt::Display for TaskPoolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskPoolError::NoWorkers(err) => write!(f, "No task pool thread could be started: {}", err),
        }
    }
}

impl std::error::Error for TaskPoolError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TaskPoolError::NoWorkers(err) => Some(err),
        }
    }
}

pub type TaskPoolResult<T> = Result<T, TaskPoolError>;

type Work = Box<dyn FnOnce() + Send + 'static>;

/// A thread pool for executing async tasks.
///
/// # Example
///
/// ```
/// use docklight::TaskPool;
///
/// let pool = TaskPool::new(2).unwrap();
/// let task = pool.spawn(async { 21 * 2 });
/// assert_eq!(pollster::block_on(task), 42);
/// ```
pub struct TaskPool {
    executor: Arc<Executor<'static>>,
    threads: Vec<thread::JoinHandle<()>>,
    shutdown: Arc<AtomicBool>,
}

impl TaskPool {
    /// Create a pool with `num_threads` workers, at least one.
    ///
    /// Threads the OS refuses to start are logged and skipped; tasks run on
    /// whichever workers did start. Fails only if none did.
    pub fn new(num_threads: usize) -> TaskPoolResult<Self> {
        Self::with_spawner(num_threads, |name, work| {
            thread::Builder::new().name(name).spawn(work)
        })
    }

    fn with_spawner<S>(num_threads: usize, mut spawn: S) -> TaskPoolResult<Self>
    where
        S: FnMut(String, Work) -> io::Result<thread::JoinHandle<()>>,
    {
        let num_threads = num_threads.max(1);
        let executor = Arc::new(Executor::new());
        let shutdown = Arc::new(AtomicBool::new(false));
        let mut threads = Vec::with_capacity(num_threads);
        let mut last_error = None;

        for i in 0..num_threads {
            let exec = executor.clone();
            let shutdown_flag = shutdown.clone();
            let work: Work = Box::new(move || {
                while !shutdown_flag.load(Ordering::Relaxed) {
                    if !exec.try_tick() {
                        thread::sleep(Duration::from_millis(1));
                    }
                }
            });

            match spawn(format!("docklight-task-{}", i), work) {
                Ok(handle) => threads.push(handle),
                Err(err) => {
                    tracing::warn!("Failed to spawn task pool thread {}: {}", i, err);
                    last_error = Some(err);
                }
            }
        }

        if threads.is_empty() {
            let err = last_error.unwrap_or_else(|| io::Error::other("no worker thread started"));
            tracing::error!("TaskPool has no workers: {}", err);
            return Err(TaskPoolError::NoWorkers(err));
        }

        tracing::debug!("TaskPool created with {} threads", threads.len());

        Ok(Self {
            executor,
            threads,
            shutdown,
        })
    }

    /// Create a task pool using the number of available CPU cores.
    pub fn with_num_cpus() -> TaskPoolResult<Self> {
        Self::new(num_cpus::get())
    }

    /// Uses `max(1, num_cpus - 1)` threads, leaving a core for the dock.
    pub fn default_threads() -> TaskPoolResult<Self> {
        Self::new(num_cpus::get().saturating_sub(1))
    }

    /// Spawn an async task on the pool.
    pub fn spawn<T>(&self, future: impl Future<Output = T> + Send + 'static) -> Task<T>
    where
        T: Send + 'static,
    {
        self.executor.spawn(future)
    }

    /// Run blocking `job` on the pool and report its output through `post`.
    ///
    /// The task is detached; `post` returning `false` (the dock is gone) is
    /// logged and otherwise ignored.
    pub fn spawn_report<T, J, P>(&self, job: J, post: P)
    where
        T: Send + 'static,
        J: FnOnce() -> T + Send + 'static,
        P: FnOnce(T) -> bool + Send + 'static,
    {
        self.executor
            .spawn(async move {
                futures_lite::future::yield_now().await;
                if !post(job()) {
                    tracing::debug!("Dropping worker result, the dock has shut down");
                }
            })
            .detach();
    }

    pub fn thread_count(&self) -> usize {
        self.threads.len()
    }

    /// Stop the workers and wait for them to finish their current task.
    /// Tasks not yet started are dropped.
    pub fn shutdown(mut self) {
        tracing::debug!("Shutting down TaskPool with {} threads", self.threads.len());
        self.shutdown.store(true, Ordering::Relaxed);

        let threads = std::mem::take(&mut self.threads);
        for handle in threads {
            if let Err(e) = handle.join() {
                tracing::error!("Task pool thread panicked: {:?}", e);
            }
        }

        tracing::debug!("TaskPool shutdown complete");
    }
}

impl Drop for TaskPool {
    fn drop(&mut self) {
        self.shutdown.store(true, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_pool_creation() {
        let pool = TaskPool::new(2).unwrap();
        assert_eq!(pool.thread_count(), 2);
    }

    #[test]
    fn test_zero_threads_gets_one() {
        let pool = TaskPool::new(0).unwrap();
        assert_eq!(pool.thread_count(), 1);
    }

    #[test]
    fn test_spawn_and_await() {
        let pool = TaskPool::new(2).unwrap();
        let task = pool.spawn(async { 42 });
        assert_eq!(pollster::block_on(task), 42);
    }

    #[test]
    fn test_multiple_tasks() {
        let pool = TaskPool::new(4).unwrap();
        let tasks: Vec<_> = (0..10).map(|i| pool.spawn(async move { i * 2 })).collect();
        let results: Vec<_> = tasks.into_iter().map(pollster::block_on).collect();
        assert_eq!(results, vec![0, 2, 4, 6, 8, 10, 12, 14, 16, 18]);
    }

    #[test]
    fn test_worker_threads_are_named() {
        let pool = TaskPool::new(1).unwrap();
        let name = pollster::block_on(pool.spawn(async {
            thread::current().name().map(str::to_owned)
        }));
        assert_eq!(name.as_deref(), Some("docklight-task-0"));
    }

    #[test]
    fn test_spawn_report_posts_result() {
        let pool = TaskPool::new(1).unwrap();
        let (tx, rx) = std::sync::mpsc::channel();
        pool.spawn_report(|| 7, move |v| tx.send(v).is_ok());
        assert_eq!(rx.recv_timeout(Duration::from_secs(5)), Ok(7));
    }

    #[test]
    fn test_pool_without_workers_is_an_error() {
        let result = TaskPool::with_spawner(3, |_, _| Err(io::Error::other("thread limit reached")));
        let Err(TaskPoolError::NoWorkers(err)) = result else {
            panic!("pool without workers was accepted");
        };
        assert_eq!(err.to_string(), "thread limit reached");
    }

    #[test]
    fn test_partial_spawn_failure_keeps_the_started_workers() {
        let mut attempts = 0;
        let pool = TaskPool::with_spawner(3, |name, work| {
            attempts += 1;
            if attempts == 2 {
                return Err(io::Error::other("thread limit reached"));
            }
            thread::Builder::new().name(name).spawn(work)
        })
        .unwrap();
        assert_eq!(pool.thread_count(), 2);
        assert_eq!(pollster::block_on(pool.spawn(async { 5 })), 5);
    }

    #[test]
    fn test_shutdown() {
        let pool = TaskPool::new(2).unwrap();
        let _task1 = pool.spawn(async { 1 });
        let _task2 = pool.spawn(async { 2 });
        pool.shutdown();
    }
}
