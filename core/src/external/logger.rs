//! A thin logging facade over the `log` crate, so subsystems depend on a
//! trait object rather than a concrete backend.

use crate::config::LogLevel;

/// A named logging sink. The default implementation (`StdLogger`) is a
/// direct pass-through to `log::{debug,info,warn,error}!`; `NullLogger`
/// discards everything and is used by tests that don't want `log`'s global
/// logger involved.
pub trait Logger: Send + Sync {
    fn debug(&self, message: &str);
    fn info(&self, message: &str);
    fn warning(&self, message: &str);
    fn error(&self, message: &str);
    /// Logs at error severity and marks the record as fatal in its target,
    /// since `log::Level` has no variant above `Error`.
    fn fatal(&self, message: &str);

    fn set_level(&mut self, level: LogLevel);

    /// Returns a child logger whose target is this logger's target with
    /// `name` appended, for per-subsystem log namespacing.
    fn add_child(&self, name: &str) -> Box<dyn Logger>;

    fn is_enabled_for(&self, level: LogLevel) -> bool;

    /// Flushes any buffered records to their destination. The kernel's main
    /// loop calls this once per iteration ("tick log drain" in spec terms)
    /// so records emitted during a frame become visible promptly rather
    /// than waiting for the global logger's own buffering policy.
    fn flush(&self);
}

/// Default [`Logger`] implementation: routes through the `log` crate with a
/// `target` string built from the child-name chain.
pub struct StdLogger {
    target: String,
    level: LogLevel,
}

impl StdLogger {
    pub fn new(target: impl Into<String>) -> Self {
        Self { target: target.into(), level: LogLevel::Info }
    }
}

impl Default for StdLogger {
    fn default() -> Self {
        Self::new("stratum")
    }
}

impl Logger for StdLogger {
    fn debug(&self, message: &str) {
        if self.is_enabled_for(LogLevel::Debug) {
            log::debug!(target: &self.target, "{message}");
        }
    }

    fn info(&self, message: &str) {
        if self.is_enabled_for(LogLevel::Info) {
            log::info!(target: &self.target, "{message}");
        }
    }

    fn warning(&self, message: &str) {
        if self.is_enabled_for(LogLevel::Warning) {
            log::warn!(target: &self.target, "{message}");
        }
    }

    fn error(&self, message: &str) {
        if self.is_enabled_for(LogLevel::Error) {
            log::error!(target: &self.target, "{message}");
        }
    }

    fn fatal(&self, message: &str) {
        if self.is_enabled_for(LogLevel::Fatal) {
            log::error!(target: &self.target, "fatal: {message}");
        }
    }

    /// Stores this logger's own threshold (consulted by `is_enabled_for`
    /// and every emit method above) and also raises or lowers the `log`
    /// crate's global max level, so the installed backend (`env_logger`)
    /// never re-suppresses a record this logger just decided to let
    /// through.
    fn set_level(&mut self, level: LogLevel) {
        self.level = level;
        log::set_max_level(level.to_level_filter());
    }

    fn add_child(&self, name: &str) -> Box<dyn Logger> {
        Box::new(StdLogger { target: format!("{}::{name}", self.target), level: self.level })
    }

    fn is_enabled_for(&self, level: LogLevel) -> bool {
        level >= self.level
    }

    fn flush(&self) {
        log::logger().flush();
    }
}

/// A [`Logger`] that discards every record, for tests that don't want to
/// exercise the global `log` backend.
#[derive(Default, Clone, Copy)]
pub struct NullLogger;

impl Logger for NullLogger {
    fn debug(&self, _message: &str) {}
    fn info(&self, _message: &str) {}
    fn warning(&self, _message: &str) {}
    fn error(&self, _message: &str) {}
    fn fatal(&self, _message: &str) {}
    fn set_level(&mut self, _level: LogLevel) {}

    fn add_child(&self, _name: &str) -> Box<dyn Logger> {
        Box::new(NullLogger)
    }

    fn is_enabled_for(&self, _level: LogLevel) -> bool {
        false
    }

    fn flush(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn std_logger_child_target_is_namespaced() {
        let root = StdLogger::new("stratum");
        let child = root.add_child("ecs");
        assert!(child.is_enabled_for(LogLevel::Info));
    }

    #[test]
    fn null_logger_is_never_enabled() {
        let logger = NullLogger;
        assert!(!logger.is_enabled_for(LogLevel::Fatal));
    }
}
