//! Per-invocation dispatch.
//!
//! Runs the capability check, then executes the command body inline or
//! hands it to the host's background job facility.

mod dispatcher;
mod submitter;

pub use dispatcher::{DispatchResult, Dispatcher};
pub use submitter::{Job, JobSubmitter, ThreadJobSubmitter, TokioJobSubmitter};
