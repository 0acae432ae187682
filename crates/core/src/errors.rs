use thiserror::Error;

/// Unified error type for the entire campus-dashboard-core library.
/// Every public function returns `Result<T, CoreError>`.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Document / DOM ──────────────────────────────────────────────
    #[error("Element not found: #{0}")]
    MissingElement(String),

    // ── Models ──────────────────────────────────────────────────────
    #[error("Invalid theme: {0}")]
    InvalidTheme(String),

    #[error("Invalid color: {0}")]
    InvalidColor(String),

    #[error("Chart validation failed: {0}")]
    ValidationError(String),

    // ── Storage / File ──────────────────────────────────────────────
    #[error("Preference storage error: {0}")]
    Storage(String),

    #[error("Unsupported preference file version: {0}")]
    UnsupportedVersion(u16),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    // ── File I/O (native only) ──────────────────────────────────────
    #[error("File I/O error: {0}")]
    FileIO(String),

    // ── Rendering ───────────────────────────────────────────────────
    #[error("Render error ({renderer}): {message}")]
    Render { renderer: String, message: String },

    // ── Configuration ───────────────────────────────────────────────
    #[error("Configuration error: {0}")]
    Config(String),
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<std::io::Error> for CoreError {
    fn from(e: std::io::Error) -> Self {
        CoreError::FileIO(e.to_string())
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Deserialization(e.to_string())
    }
}
