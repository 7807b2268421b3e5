//! Declarative command registration and dispatch.
//!
//! Commands are described as [`commands::CommandDescriptor`] values. A flat
//! list of them is assembled once into a [`registry::RegistrationTree`]
//! (roots with their sub-commands), bound to the host, and then consulted
//! by the [`dispatch::Dispatcher`] for every invocation: the source's
//! capability is checked, and the command body runs inline or as a
//! background job.

pub mod auth;
pub mod commands;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod registry;
pub mod source;
pub mod telemetry;
