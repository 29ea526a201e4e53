use thiserror::Error;

/// Reasons a pre sign-up trigger rejects an account.
///
/// The `Display` text is what Cognito shows to the person signing up.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SignupError {
    #[error("An email address is required to sign up.")]
    MissingEmail,

    #[error("Email domain '{domain}' is not allowed to sign up. Please contact an administrator.")]
    DomainNotAllowed { domain: String },
}

/// Failures talking to the user pool directory
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DirectoryError {
    #[error("Group '{group}' not found")]
    GroupNotFound { group: String },

    #[error("{operation} failed: {message}")]
    Api {
        operation: &'static str,
        message: String,
    },
}

impl DirectoryError {
    pub fn api(operation: &'static str, message: impl Into<String>) -> Self {
        Self::Api {
            operation,
            message: message.into(),
        }
    }
}
