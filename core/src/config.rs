//! Build-time configuration knobs.
//!
//! Everything here corresponds to a named configuration option in the
//! engine's external interface contract: multithreading on/off, whether
//! worker threads get human-readable names, the ECS fingerprint width, and
//! the logging threshold. These are plain values rather than `cfg!` flags
//! because, unlike the original C++ engine, none of them need to change the
//! shape of a type to take effect.

/// Default archetype fingerprint width, in bits. Must stay in sync with
/// [`crate::ecs::fingerprint::Fingerprint`]'s bit capacity.
pub const DEFAULT_MAX_ECS_COMPONENTS: usize = 64;

/// Threshold below which a log record is dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
    Fatal,
}

impl LogLevel {
    /// Maps to the closest `log::LevelFilter`, since `Fatal` has no
    /// equivalent in the `log` crate and is instead treated as `Error`
    /// severity with routing handled by the caller (see
    /// [`crate::external::Logger::fatal`]).
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Warning => log::LevelFilter::Warn,
            LogLevel::Error | LogLevel::Fatal => log::LevelFilter::Error,
        }
    }
}

/// Runtime-checked build configuration for one [`crate::service::Kernel`] /
/// [`crate::ecs::EntityAdmin`] pair.
///
/// Unlike the original engine's preprocessor defines, these are ordinary
/// values so that tests can exercise more than one configuration within the
/// same binary.
#[derive(Debug, Clone)]
pub struct Config {
    /// If `false`, the scheduler spawns zero workers and execution plans run
    /// synchronously on the caller thread.
    pub multithread_enabled: bool,
    /// If `true`, worker threads are given human-readable names.
    pub thread_labels_enabled: bool,
    /// Archetype fingerprint bit-width. Must be a power of two, at least 8,
    /// and must equal the fingerprint type's compiled-in capacity (see
    /// [`crate::ecs::fingerprint::Fingerprint::CAPACITY`]).
    pub max_ecs_components: usize,
    /// Threshold beneath which log records are dropped.
    pub log_level: LogLevel,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            multithread_enabled: true,
            thread_labels_enabled: true,
            max_ecs_components: DEFAULT_MAX_ECS_COMPONENTS,
            log_level: LogLevel::Info,
        }
    }
}

impl Config {
    /// Returns `true` if `max_ecs_components` is a power of two and at
    /// least 8, per spec.
    pub fn has_valid_component_width(&self) -> bool {
        self.max_ecs_components >= 8 && self.max_ecs_components.is_power_of_two()
    }
}
