use thiserror::Error;

/// User-facing failures of one attendance attempt. Display strings are
/// shown verbatim.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AttendanceError {
    #[error(
        "Invalid event ID format: '{0}'\n\nPlease scan a valid QR code from the Passport system."
    )]
    InvalidEventId(String),

    #[error("Please sign in to attend events")]
    NotSignedIn,

    #[error("Authentication failed - please sign in again")]
    MissingToken,

    #[error("Failed to get authentication token: {0}")]
    TokenFailed(String),

    #[error(
        "Server returned error code: {status}\n\nResponse: {body}\n\nSent data:\n{sent}"
    )]
    Server {
        status: u16,
        /// Response body, truncated.
        body: String,
        /// Pretty-printed request JSON.
        sent: String,
    },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Unexpected response from server: {0}")]
    MalformedReply(String),
}

impl AttendanceError {
    /// Everything but a missing sign-in is reported in a dialog; that one
    /// sends the user to the sign-in screen instead.
    pub fn wants_dialog(&self) -> bool {
        !matches!(self, Self::NotSignedIn)
    }
}
