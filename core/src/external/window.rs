//! Window-management seam. The core ships only a deterministic test double;
//! a real windowing backend is out of scope (see spec's Non-goals).

use crate::service::Service;

/// Parameters for creating a window. Opaque beyond title/size: the core
/// never interprets these past passing them through to the collaborator.
#[derive(Debug, Clone)]
pub struct WindowParams {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

/// A handle to a created window. `should_close` is the only thing the
/// kernel's main loop reads from it.
pub trait WindowHandle: Send {
    fn should_close(&self) -> bool;
}

/// The window-management collaborator the [`crate::service::Kernel`] ticks
/// once per main-loop iteration.
pub trait WindowManager: Send {
    fn update(&mut self);

    fn create_window(&mut self, params: WindowParams) -> Box<dyn WindowHandle>;

    fn on_window_created(&mut self, callback: Box<dyn FnMut(&dyn WindowHandle) + Send>);

    fn on_window_destroyed(&mut self, callback: Box<dyn FnMut(&dyn WindowHandle) + Send>);
}

/// A [`WindowManager`] test double that creates inert handles which never
/// report a close request unless explicitly told to via
/// [`NullWindowHandle::request_close`].
#[derive(Default)]
pub struct NullWindowManager {
    created: Vec<Box<dyn FnMut(&dyn WindowHandle) + Send>>,
    destroyed: Vec<Box<dyn FnMut(&dyn WindowHandle) + Send>>,
}

impl NullWindowManager {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Service for NullWindowManager {}

impl WindowManager for NullWindowManager {
    fn update(&mut self) {}

    fn create_window(&mut self, _params: WindowParams) -> Box<dyn WindowHandle> {
        let handle = NullWindowHandle::default();
        for callback in &mut self.created {
            callback(&handle);
        }
        Box::new(handle)
    }

    fn on_window_created(&mut self, callback: Box<dyn FnMut(&dyn WindowHandle) + Send>) {
        self.created.push(callback);
    }

    fn on_window_destroyed(&mut self, callback: Box<dyn FnMut(&dyn WindowHandle) + Send>) {
        self.destroyed.push(callback);
    }
}

/// An inert [`WindowHandle`] whose close state is set manually, for
/// deterministic tests of kernel shutdown paths.
#[derive(Default, Clone)]
pub struct NullWindowHandle {
    closing: std::sync::Arc<std::sync::atomic::AtomicBool>,
}

impl NullWindowHandle {
    pub fn request_close(&self) {
        self.closing.store(true, std::sync::atomic::Ordering::Release);
    }
}

impl WindowHandle for NullWindowHandle {
    fn should_close(&self) -> bool {
        self.closing.load(std::sync::atomic::Ordering::Acquire)
    }
}
