//! Domain-level constants.
//!
//! These constants define security parameters and service defaults.

// =============================================================================
// Password hashing
// =============================================================================

/// Argon2id memory cost in KiB (19 MiB)
pub const PASSWORD_MEMORY_COST_KIB: u32 = 19_456;

/// Argon2id iteration count
pub const PASSWORD_TIME_COST: u32 = 2;

/// Argon2id lanes
pub const PASSWORD_PARALLELISM: u32 = 1;

// =============================================================================
// Authentication
// =============================================================================

/// Minimum signing secret length for a tenant application
pub const MIN_APP_SECRET_LENGTH: usize = 32;

// =============================================================================
// Identifiers
// =============================================================================

/// Identifier value that the transport uses for "not set"
pub const EMPTY_ID: i64 = 0;
