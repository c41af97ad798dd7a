//! Error types for the shader-program subsystem
//!
//! Two families of failure exist and callers must be able to tell them apart:
//! fatal packaging/configuration defects (missing shader binary, exhausted
//! program pool) where the correct behavior is to halt rather than render
//! wrong, and caller contract violations (draw while unbound, oversized
//! submissions) which are fixed in the caller, not in the data.

use std::fmt;

/// Result type for shader-program subsystem operations
pub type Result<T> = std::result::Result<T, Error>;

/// Shader-program subsystem errors
#[derive(Debug, Clone)]
pub enum Error {
    /// Missing or unreadable precompiled shader binary.
    ///
    /// Shader binaries are build-time artifacts; their absence is a packaging
    /// defect, not a runtime condition to recover from.
    BinaryUnavailable {
        /// Path that was resolved from the descriptor and stage
        path: String,
        /// Underlying I/O detail
        detail: String,
    },

    /// The fixed-capacity program pool is full.
    ///
    /// Program identities must stay stable for the session once bound into a
    /// draw sequence, so there is no eviction; requesting more distinct
    /// shading configurations than the pool holds is a configuration defect.
    PoolExhausted {
        /// Pool capacity that was exceeded
        capacity: usize,
    },

    /// Caller contract violation (unbound draw, oversized submission, ...)
    InvalidOperation(String),

    /// Backend-specific driver failure
    DriverError(String),
}

impl Error {
    /// Whether this error indicates a build/packaging defect.
    ///
    /// Fatal errors reproduce deterministically on retry; the host should
    /// halt instead of degrading, since silently skipping a shader produces
    /// visibly wrong rendering.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Error::BinaryUnavailable { .. } | Error::PoolExhausted { .. }
        )
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::BinaryUnavailable { path, detail } => {
                write!(f, "Shader binary unavailable: {} ({})", path, detail)
            }
            Error::PoolExhausted { capacity } => {
                write!(f, "Program pool exhausted ({} entries)", capacity)
            }
            Error::InvalidOperation(msg) => write!(f, "Invalid operation: {}", msg),
            Error::DriverError(msg) => write!(f, "Driver error: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

/// Log an ERROR entry and return an `Error::InvalidOperation` built from the
/// same format arguments.
///
/// # Example
///
/// ```ignore
/// if vertex_count > MAX_INDICES {
///     crate::gfx_bail!("combiner_gfx::RenderContext",
///         "submission of {} vertices exceeds index capacity", vertex_count);
/// }
/// ```
#[macro_export]
macro_rules! gfx_bail {
    ($source:expr, $($arg:tt)*) => {{
        $crate::gfx_error!($source, $($arg)*);
        return Err($crate::Error::InvalidOperation(format!($($arg)*)));
    }};
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
