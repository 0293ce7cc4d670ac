use chrono::TimeDelta;

pub const DEFAULT_VERIFICATION_DELAY_SECS: i64 = 10;
pub const DEFAULT_EXPIRY_WINDOW_SECS: i64 = 300;
pub const DEFAULT_SESSION_TTL_MINS: i64 = 30;
pub const SUCCESS_VIEW: &str = "/success";

/// Timing rules for the verification flow.
#[derive(Debug, Clone, PartialEq)]
pub struct VerificationPolicy {
    /// Elapsed time after which a verifying payment is treated as confirmed.
    pub verification_delay: TimeDelta,
    /// Time from creation to expiry. Also the base for `secondsRemaining`.
    pub expiry_window: TimeDelta,
    pub session_ttl: TimeDelta,
    pub success_target: String,
}

impl Default for VerificationPolicy {
    fn default() -> Self {
        Self {
            verification_delay: TimeDelta::seconds(DEFAULT_VERIFICATION_DELAY_SECS),
            expiry_window: TimeDelta::seconds(DEFAULT_EXPIRY_WINDOW_SECS),
            session_ttl: TimeDelta::minutes(DEFAULT_SESSION_TTL_MINS),
            success_target: SUCCESS_VIEW.to_string(),
        }
    }
}
