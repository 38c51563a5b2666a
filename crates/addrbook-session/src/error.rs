use thiserror::Error;

const GENERIC_SERVER_MESSAGE: &str = "Failed to fetch addresses";

/// Every way a workflow step can fail. `Display` is the user-facing message
/// shown in the session's single error slot.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SessionError {
    // ── Local validation ──
    #[error("Post code and house number fields mandatory!")]
    MissingLookupFields,

    #[error("No address selected, try to select an address or find one if you haven't")]
    NoAddressSelected,

    #[error("First name and last name fields mandatory!")]
    MissingPersonFields,

    #[error("Selected address not found")]
    AddressNotFound,

    // ── Remote ──
    /// Non-success status from the backend.
    #[error("{}", .message.as_deref().unwrap_or(GENERIC_SERVER_MESSAGE))]
    Server { status: u16, message: Option<String> },

    /// Unreachable backend or undecodable response.
    #[error("Failed to fetch addresses, please try again later.")]
    Transport,

    // ── Session bookkeeping, never shown in the error slot ──
    #[error("An address lookup is already in progress")]
    LookupInFlight,

    #[error("Address lookup was cancelled")]
    LookupCancelled,

    #[error("Could not save address: {0}")]
    Store(String),
}

impl SessionError {
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::MissingLookupFields
                | Self::NoAddressSelected
                | Self::MissingPersonFields
                | Self::AddressNotFound
        )
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, Self::Server { .. } | Self::Transport)
    }
}
