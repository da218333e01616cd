//! Typed errors for the core's fallible boundaries.
//!
//! Per the error handling design: failures that prevent correct execution of
//! a subsystem are converted to status flags the [`crate::service::Kernel`]
//! can poll, never propagated across threads as exceptions. `CoreError` is
//! the payload those status flags carry, plus the handful of errors that are
//! genuinely local (config validation, component id exhaustion).

use std::any::type_name;

/// Errors surfaced by core subsystems.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A service's constructor reported failure.
    #[error("service {type_name} failed to initialize: {reason}")]
    ServiceInitFailed {
        type_name: &'static str,
        reason: String,
    },

    /// More distinct component types were registered than
    /// `max_ecs_components` allows.
    #[error("component {type_name} exceeds the configured limit of {max} component types")]
    ComponentIdOverflow {
        type_name: &'static str,
        max: usize,
    },

    /// More distinct service types were registered than the provider's
    /// id space supports (`usize::MAX`, in practice unreachable, but kept
    /// as a typed error rather than a panic so callers can propagate it).
    #[error("service id space exhausted")]
    ServiceIdOverflow,

    /// `Config::max_ecs_components` does not match the fingerprint type's
    /// compiled-in capacity.
    #[error(
        "configured max_ecs_components ({configured}) does not match the compiled fingerprint \
         width ({compiled})"
    )]
    FingerprintWidthMismatch { configured: usize, compiled: usize },
}

impl CoreError {
    /// Convenience constructor capturing a component type's name via its
    /// Rust type, mirroring `original_source`'s `ComponentCounter` allocating
    /// on first registration.
    pub fn component_overflow<T: 'static>(max: usize) -> Self {
        CoreError::ComponentIdOverflow {
            type_name: type_name::<T>(),
            max,
        }
    }
}
