//! The application main loop and its fixed service-registration order.

use std::sync::atomic::{AtomicBool, AtomicI32, Ordering};
use std::sync::Arc;

use super::{Service, ServiceProvider, Status};
use crate::config::Config;
use crate::external::{Logger, StdLogger, WindowManager};
use crate::scheduler::Scheduler;

impl Service for Scheduler {}

/// A thin `Service` wrapping the kernel's shutdown flag and exit code, so a
/// service that only holds a [`ServiceProvider`] reference can request
/// shutdown via `provider.locate::<KernelProxy>()` instead of needing a
/// direct handle to the [`Kernel`] itself.
pub struct KernelProxy {
    shutdown_requested: Arc<AtomicBool>,
    exit_code: Arc<AtomicI32>,
}

impl KernelProxy {
    pub fn request_shutdown(&self, code: i32) {
        self.exit_code.store(code, Ordering::Release);
        self.shutdown_requested.store(true, Ordering::Release);
    }
}

impl Service for KernelProxy {}

/// Owns the process-wide [`ServiceProvider`] and drives the application
/// main loop until shutdown is requested.
///
/// Services are registered in the fixed order spec mandates: logger (a
/// bootstrap value held directly by the kernel, not a `Service`),
/// [`KernelProxy`], scheduler, window manager, renderer, resource manager.
/// A `required` service that reports [`Status::Failed`] on construction
/// marks the boot as failed: every later [`register`](Self::register) call
/// becomes a no-op and [`run`](Self::run) returns immediately. Teardown
/// still proceeds in reverse registration order via `ServiceProvider`'s
/// `Drop` impl regardless of how far boot got.
pub struct Kernel {
    provider: ServiceProvider,
    logger: Box<dyn Logger>,
    shutdown_requested: Arc<AtomicBool>,
    exit_code: Arc<AtomicI32>,
    boot_failed: bool,
}

impl Kernel {
    /// Boots the kernel: installs the logger, the self-proxy, and a
    /// required scheduler sized from `config` (worker count `0` defers to
    /// [`Scheduler::new`]'s hardware-concurrency default).
    pub fn new(config: &Config) -> Self {
        let mut logger: Box<dyn Logger> = Box::new(StdLogger::default());
        logger.set_level(config.log_level);
        let shutdown_requested = Arc::new(AtomicBool::new(false));
        let exit_code = Arc::new(AtomicI32::new(0));

        let mut provider = ServiceProvider::new();
        {
            let shutdown_requested = Arc::clone(&shutdown_requested);
            let exit_code = Arc::clone(&exit_code);
            provider.provide(move |_| KernelProxy { shutdown_requested, exit_code });
        }

        let mut kernel =
            Self { provider, logger, shutdown_requested, exit_code, boot_failed: false };
        kernel.register(true, |_| Scheduler::new(0, config));
        kernel
    }

    /// Registers a service in the next fixed-order slot. If `required` and
    /// the constructed service reports [`Status::Failed`], marks the boot
    /// as failed (defaulting the exit code to `1` unless one was already
    /// set) and every subsequent call to this method becomes a no-op.
    pub fn register<S, F>(&mut self, required: bool, ctor: F) -> &mut Self
    where
        S: Service,
        F: FnOnce(&ServiceProvider) -> S,
    {
        if self.boot_failed {
            return self;
        }
        let service = self.provider.provide(ctor);
        let (status, reason) = service.check_status();
        if required && status == Status::Failed {
            self.logger.error(&format!("required service failed to initialize: {reason}"));
            if self.exit_code.load(Ordering::Acquire) == 0 {
                self.exit_code.store(1, Ordering::Release);
            }
            self.boot_failed = true;
        }
        self
    }

    /// `true` once a required service has reported [`Status::Failed`]
    /// during registration.
    pub fn boot_failed(&self) -> bool {
        self.boot_failed
    }

    pub fn provider(&self) -> &ServiceProvider {
        &self.provider
    }

    pub fn provider_mut(&mut self) -> &mut ServiceProvider {
        &mut self.provider
    }

    pub fn logger(&self) -> &dyn Logger {
        self.logger.as_ref()
    }

    /// Thread-safe shutdown request, equivalent to what [`KernelProxy`]
    /// exposes to services holding only a `ServiceProvider` reference.
    pub fn request_shutdown(&self, code: i32) {
        self.exit_code.store(code, Ordering::Release);
        self.shutdown_requested.store(true, Ordering::Release);
    }

    fn shutdown_requested(&self) -> bool {
        self.shutdown_requested.load(Ordering::Acquire)
    }

    /// Drives the main loop: ticks `W`'s `update` once per iteration until
    /// shutdown is requested (by a service via [`KernelProxy`], or by
    /// [`request_shutdown`](Self::request_shutdown)). Returns immediately
    /// with the boot exit code if registration already failed.
    pub fn run<W: WindowManager + Service>(&mut self) -> i32 {
        if self.boot_failed {
            return self.exit_code.load(Ordering::Acquire);
        }

        while !self.shutdown_requested() {
            if let Some(window_manager) = self.provider.locate_mut::<W>() {
                window_manager.update();
            }
            self.logger.flush();
        }

        // One last flush so nothing logged during the final iteration or
        // during shutdown is left sitting unflushed.
        self.logger.flush();
        self.exit_code.load(Ordering::Acquire)
    }
}
