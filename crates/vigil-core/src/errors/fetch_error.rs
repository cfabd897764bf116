/// Errors from the external fleet-management API boundary.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Remote call failed after all retry attempts.
    #[error("external API unavailable: {reason}")]
    Unavailable { reason: String },

    /// Fast-fail while the circuit breaker is open.
    #[error("circuit open, retry in {retry_after_secs}s")]
    CircuitOpen { retry_after_secs: i64 },

    /// The remote answered with a body we could not interpret.
    #[error("invalid response: {reason}")]
    InvalidResponse { reason: String },
}
