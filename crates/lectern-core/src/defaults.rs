//! Centralized default constants for the lectern system.
//!
//! **This module is the single source of truth** for all shared default
//! values. Crates reference these constants instead of defining their own
//! magic numbers.

// =============================================================================
// SERVER
// =============================================================================

/// Default HTTP server port.
pub const SERVER_PORT: u16 = 5000;

/// Default SQLite database URL (created on first run).
pub const DATABASE_URL: &str = "sqlite://lectern.db?mode=rwc";

/// Default directory for uploaded originals.
pub const UPLOADS_DIR: &str = "uploads";

/// Maximum upload size in bytes (16 MiB), enforced as the request body limit
/// on the upload route.
pub const MAX_UPLOAD_SIZE_BYTES: usize = 16 * 1024 * 1024;

// =============================================================================
// INFERENCE
// =============================================================================

/// Default Anthropic API base URL.
pub const ANTHROPIC_BASE_URL: &str = "https://api.anthropic.com";

/// Anthropic API version header value.
pub const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Default generation model.
pub const GEN_MODEL: &str = "claude-sonnet-4-20250514";

/// Response token budget for analysis generations.
pub const GEN_MAX_TOKENS: u32 = 1000;

/// Timeout for generation requests in seconds.
pub const GEN_TIMEOUT_SECS: u64 = 120;

// =============================================================================
// ANALYSIS
// =============================================================================

/// Number of leading characters of document text sent to the model.
pub const ANALYSIS_SAMPLE_CHARS: usize = 5000;

/// Summary used when the model call or parse fails.
pub const FALLBACK_SUMMARY: &str = "Analysis unavailable";

/// Topic used when the model call or parse fails.
pub const FALLBACK_TOPIC: &str = "General";

// =============================================================================
// FILE SAFETY
// =============================================================================

/// Maximum filename length (ext4/NTFS compatible).
pub const FILENAME_MAX_LENGTH: usize = 255;

/// `chrono` format string for the stored-filename collision prefix.
pub const STORED_NAME_TIME_FORMAT: &str = "%Y%m%d_%H%M%S_";
