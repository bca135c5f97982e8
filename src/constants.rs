//! Application-wide constants
//!
//! This module contains all constant values used throughout the client.
//! Constants are grouped by their purpose for better organization.

// =============================================================================
// BACKEND DEFAULTS
// =============================================================================

/// Default base URL of the CodeQuest backend
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";

/// Header carrying the anti-forgery token on every state-mutating request
pub const CSRF_HEADER: &str = "X-CSRFToken";

/// Marker header distinguishing programmatic requests from full-page form posts
pub const REQUESTED_WITH_HEADER: &str = "X-Requested-With";

/// Value of the programmatic request marker
pub const REQUESTED_WITH_VALUE: &str = "XMLHttpRequest";

// =============================================================================
// JUDGE DEFAULTS
// =============================================================================

/// Default base URL of the external code-execution service
pub const DEFAULT_JUDGE_URL: &str = "http://localhost:2358";

/// Status ids at or above this value mean the judge run is finished.
/// Finer-grained ids are owned by the judge and treated as opaque.
pub const JUDGE_TERMINAL_STATUS: i32 = 3;

/// Delay between consecutive status polls against the judge
pub const JUDGE_POLL_INTERVAL_MS: u64 = 500;

/// Default ceiling on a full judge poll series
pub const DEFAULT_JUDGE_TIMEOUT_SECONDS: u64 = 60;

// =============================================================================
// STATS POLLING DEFAULTS
// =============================================================================

/// Interval between dashboard stats refreshes
pub const STATS_POLL_INTERVAL_SECONDS: u64 = 10;

/// Interval applied after a failed stats fetch
pub const STATS_RETRY_INTERVAL_SECONDS: u64 = 15;

// =============================================================================
// SUBMISSION LIMITS
// =============================================================================

/// Maximum accepted source code size in bytes
pub const MAX_SOURCE_CODE_BYTES: usize = 65_536;

// =============================================================================
// SUPPORTED LANGUAGES
// =============================================================================

/// Language identifiers accepted by the submit endpoint
pub mod languages {
    pub const PYTHON: &str = "python";
    pub const JAVASCRIPT: &str = "javascript";
    pub const JAVA: &str = "java";
    pub const CPP: &str = "cpp";

    /// All supported language identifiers
    pub const ALL: &[&str] = &[PYTHON, JAVASCRIPT, JAVA, CPP];
}

/// Language ids understood by the external judge
pub mod judge_language_ids {
    pub const PYTHON: i32 = 71;
    pub const JAVASCRIPT: i32 = 63;
    pub const JAVA: i32 = 62;
    pub const CPP: i32 = 54;
}
