//! Background job submission.
//!
//! Provides the runtimes asynchronous commands can be handed to.

use std::thread;

use tokio::runtime::Handle;

use crate::error::{CommandError, CommandResult, DispatchErrorKind};

/// A zero-argument unit of work.
pub type Job = Box<dyn FnOnce() + Send + 'static>;

/// The host's background job facility.
///
/// `submit` must return without waiting for the job. No ordering is
/// guaranteed between two submitted jobs.
pub trait JobSubmitter: Send + Sync {
    fn submit(&self, job: Job) -> CommandResult<()>;
}

/// Runs jobs on a Tokio runtime's blocking pool.
///
/// Command bodies are synchronous code, so they go through `spawn_blocking`
/// rather than occupying an async worker.
#[derive(Debug, Clone)]
pub struct TokioJobSubmitter {
    handle: Handle,
}

impl TokioJobSubmitter {
    pub fn new(handle: Handle) -> Self {
        Self { handle }
    }

    /// Use the runtime the caller is running inside.
    pub fn current() -> CommandResult<Self> {
        Handle::try_current()
            .map(Self::new)
            .map_err(|e| CommandError::Dispatch {
                kind: DispatchErrorKind::SubmissionFailed {
                    message: format!("No Tokio runtime available: {}", e),
                },
            })
    }
}

impl JobSubmitter for TokioJobSubmitter {
    fn submit(&self, job: Job) -> CommandResult<()> {
        // The join handle is dropped: the dispatcher never observes the outcome.
        drop(self.handle.spawn_blocking(job));
        Ok(())
    }
}

/// Runs each job on its own OS thread.
#[derive(Debug, Clone)]
pub struct ThreadJobSubmitter {
    thread_name: String,
}

impl ThreadJobSubmitter {
    pub fn new(thread_name: impl Into<String>) -> Self {
        Self {
            thread_name: thread_name.into(),
        }
    }
}

impl Default for ThreadJobSubmitter {
    fn default() -> Self {
        Self::new("command-job")
    }
}

impl JobSubmitter for ThreadJobSubmitter {
    fn submit(&self, job: Job) -> CommandResult<()> {
        thread::Builder::new()
            .name(self.thread_name.clone())
            .spawn(job)
            .map(drop)
            .map_err(|e| CommandError::Dispatch {
                kind: DispatchErrorKind::SubmissionFailed {
                    message: format!("Failed to spawn job thread: {}", e),
                },
            })
    }
}
