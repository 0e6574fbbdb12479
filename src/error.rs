use thiserror::Error;

// ─── Top-level error hierarchy ───────────────────────────────────────────────

/// Structured error hierarchy for `heartlock`.
///
/// Each subsystem defines its own error variant. Library callers can match on
/// these to decide recovery strategy; internal code continues to use
/// `anyhow::Result` for ad-hoc context chains.
///
/// None of these are fatal in normal operation: every gate and delivery
/// failure has a local recovery path and a non-technical user-facing message.
#[derive(Debug, Error)]
pub enum HeartlockError {
    // ── Config ───────────────────────────────────────────────────────────
    #[error("config: {0}")]
    Config(#[from] ConfigError),

    // ── Passcode gate ───────────────────────────────────────────────────
    #[error("gate: {0}")]
    Gate(#[from] GateError),

    // ── Gift delivery ───────────────────────────────────────────────────
    #[error("delivery: {0}")]
    Delivery(#[from] DeliveryError),

    // ── Generic fallthrough (wraps anyhow for interop) ──────────────────
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ─── Config errors ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load config: {0}")]
    Load(String),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

// ─── Passcode gate errors ───────────────────────────────────────────────────

/// Recoverable gate failures, surfaced to the user as the transient
/// "access denied" flash or the lockout countdown.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GateError {
    #[error("wrong passcode")]
    InvalidCode,

    #[error("too many attempts, locked for {remaining_secs}s")]
    LockedOut { remaining_secs: u64 },
}

// ─── Gift delivery errors ───────────────────────────────────────────────────

/// Why a remote wish submission did not go through. Every variant is
/// recovered by the mail-compose fallback; the user never sees a hard
/// failure.
#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("no delivery endpoint configured")]
    Unconfigured,

    #[error("endpoint returned status {status}")]
    RemoteStatus { status: u16 },

    #[error("remote submission failed: {0}")]
    RemoteSubmitFailed(String),
}

// ─── Convenience re-exports ─────────────────────────────────────────────────

/// Shorthand result type for the crate.
pub type Result<T> = std::result::Result<T, HeartlockError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_displays_correctly() {
        let err = HeartlockError::Config(ConfigError::Validation("empty secret".into()));
        assert!(err.to_string().contains("validation failed"));
    }

    #[test]
    fn locked_out_displays_remaining() {
        let err = HeartlockError::Gate(GateError::LockedOut { remaining_secs: 30 });
        assert!(err.to_string().contains("30s"));
    }

    #[test]
    fn anyhow_interop() {
        let anyhow_err = anyhow::anyhow!("something went wrong");
        let hl_err: HeartlockError = anyhow_err.into();
        assert!(hl_err.to_string().contains("something went wrong"));
    }

    #[test]
    fn delivery_status_displays_correctly() {
        let err = HeartlockError::Delivery(DeliveryError::RemoteStatus { status: 503 });
        assert!(err.to_string().contains("503"));
    }
}
