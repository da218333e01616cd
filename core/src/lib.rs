//! The concurrent runtime core of the engine.
//!
//! This crate owns the five pieces every other subsystem is built on:
//!
//! - [`sync`]: a value-and-lock pair with RAII access tokens, and an
//!   unbounded blocking queue used as the scheduler's hand-off point.
//! - [`scheduler`]: a fixed worker-thread pool draining that queue.
//! - [`plan`]: a build-once / execute-many phased job DAG, runnable
//!   synchronously or on the scheduler.
//! - [`service`]: a process-wide service registry and the [`service::Kernel`]
//!   that drives the application main loop.
//! - [`ecs`]: archetype-keyed, struct-of-arrays entity storage with
//!   queries, views and systems.
//!
//! The renderer, window manager, resource manager and logger are external
//! collaborators; [`external`] defines only the interfaces this crate
//! consumes from them.

#![cfg_attr(not(debug_assertions), deny(clippy::unwrap_used))]

pub mod config;
pub mod error;
pub mod external;

pub mod sync;

pub mod scheduler;
pub use scheduler::Scheduler;

pub mod plan;
pub use plan::ExecutionPlan;

pub mod service;
pub use service::{Kernel, Service, ServiceProvider};

pub mod ecs;
pub use ecs::EntityAdmin;
