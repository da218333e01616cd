//! Interfaces the core consumes from its external collaborators.
//!
//! The core never implements a renderer, window backend or resource manager
//! itself — per spec, those are opaque to it. This module defines only the
//! seams the [`crate::service::Kernel`] needs to drive them, plus the
//! `Logger` facade every subsystem logs through.

mod logger;
mod window;

pub use logger::{Logger, NullLogger, StdLogger};
pub use window::{NullWindowManager, WindowHandle, WindowManager, WindowParams};

use crate::service::Service;

/// Opaque GPU-facing collaborator. The core neither reads nor writes its
/// state; it exists only so the [`crate::service::Kernel`] can name a
/// concrete type in its fixed registration order and destroy it at the
/// right point in teardown.
pub trait Renderer: Service {}

/// Opaque asset-loading collaborator, destroyed by the kernel but otherwise
/// untouched by the core.
pub trait ResourceManager: Service {}

/// A [`Renderer`] stand-in that does nothing, for boots that have no real
/// rendering backend wired in yet.
#[derive(Default)]
pub struct NullRenderer;

impl Service for NullRenderer {}
impl Renderer for NullRenderer {}

/// A [`ResourceManager`] stand-in that does nothing.
#[derive(Default)]
pub struct NullResourceManager;

impl Service for NullResourceManager {}
impl ResourceManager for NullResourceManager {}
