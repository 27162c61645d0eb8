//! Port for submitting synthetic identities to a registration endpoint.
//!
//! The simulator depends on this trait only, so it never sees transport
//! details. Adapters report the raw outcome and leave interpretation of the
//! response body to callers.

use async_trait::async_trait;
use synthetic_data::SyntheticIdentity;

use super::define_port_error;

define_port_error! {
    /// Failures while submitting one registration.
    pub enum RegistrationError {
        /// The request could not be sent or the response could not be read.
        Transport { message: String } => "registration transport failed: {message}",
        /// The request exceeded its deadline.
        Timeout { message: String } => "registration timed out: {message}",
        /// The endpoint answered with a non-success status.
        Rejected { status: u16, message: String } =>
            "registration rejected with status {status}: {message}",
    }
}

/// Raw outcome of an accepted registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationReceipt {
    /// HTTP status code returned by the endpoint.
    pub status: u16,
    /// Response body as text.
    pub body: String,
}

/// Outbound registration port.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRegistrationClient: Send + Sync {
    /// Submit one identity.
    async fn register(
        &self,
        identity: &SyntheticIdentity,
    ) -> Result<RegistrationReceipt, RegistrationError>;
}
