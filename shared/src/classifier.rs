use std::sync::Arc;

use crate::config::TriggerConfig;
use crate::directory::Directory;
use crate::email::domain_of;
use crate::error::DirectoryError;
use crate::types::{
    attribute, ConfirmationEvent, UserAttributes, ATTR_APPROVAL_STATUS, ATTR_EMAIL,
    ATTR_EMPLOYEE_ID, ATTR_USER_TYPE,
};

pub const INTERNAL_USERS_GROUP: &str = "internal-users";
pub const PENDING_APPROVAL_GROUP: &str = "pending-approval";

/// Which rule made a user internal
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InternalReason {
    EmailDomain(String),
    EmployeeId(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    Internal(InternalReason),
    External,
}

impl Classification {
    pub fn is_internal(&self) -> bool {
        matches!(self, Self::Internal(_))
    }

    pub fn group(&self) -> &'static str {
        match self {
            Self::Internal(_) => INTERNAL_USERS_GROUP,
            Self::External => PENDING_APPROVAL_GROUP,
        }
    }

    pub fn user_type(&self) -> &'static str {
        match self {
            Self::Internal(_) => "internal",
            Self::External => "external",
        }
    }

    pub fn approval_status(&self) -> &'static str {
        match self {
            Self::Internal(_) => "approved",
            Self::External => "pending",
        }
    }

    /// Custom attributes written back to the directory
    pub fn attributes(&self) -> [(&'static str, &'static str); 2] {
        [
            (ATTR_USER_TYPE, self.user_type()),
            (ATTR_APPROVAL_STATUS, self.approval_status()),
        ]
    }
}

/// Classify a user from the attributes present at confirmation time.
///
/// Internal when the email domain is on the internal list, or when the
/// employee id starts with a configured prefix. External otherwise.
pub fn classify(config: &TriggerConfig, attributes: &UserAttributes) -> Classification {
    let domain = domain_of(attribute(attributes, ATTR_EMAIL));
    if !domain.is_empty() && config.internal_email_domains.iter().any(|d| *d == domain) {
        tracing::info!("Internal user detected by email domain: {}", domain);
        return Classification::Internal(InternalReason::EmailDomain(domain));
    }

    let employee_id = attribute(attributes, ATTR_EMPLOYEE_ID);
    if !employee_id.is_empty() {
        let normalized = employee_id.to_uppercase();
        if let Some(prefix) = config
            .employee_id_prefixes
            .iter()
            .find(|prefix| normalized.starts_with(prefix.as_str()))
        {
            tracing::info!("Internal user detected by employee_id: {}", employee_id);
            return Classification::Internal(InternalReason::EmployeeId(prefix.clone()));
        }
    }

    Classification::External
}

pub fn is_internal(config: &TriggerConfig, attributes: &UserAttributes) -> bool {
    classify(config, attributes).is_internal()
}

/// What the post confirmation trigger actually achieved.
///
/// Confirmation itself always goes through; `DirectoryFailed` records a
/// classification that could not be written and needs manual reconciliation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmationOutcome {
    Skipped { trigger_source: String },
    Applied { classification: Classification },
    DirectoryFailed {
        classification: Classification,
        error: DirectoryError,
    },
}

impl ConfirmationOutcome {
    pub fn classification(&self) -> Option<&Classification> {
        match self {
            Self::Skipped { .. } => None,
            Self::Applied { classification } | Self::DirectoryFailed { classification, .. } => {
                Some(classification)
            }
        }
    }
}

/// Post confirmation classifier: sorts users into internal or pending groups
pub struct ConfirmationClassifier<D> {
    config: Arc<TriggerConfig>,
    directory: D,
}

impl<D: Directory> ConfirmationClassifier<D> {
    pub fn new(config: Arc<TriggerConfig>, directory: D) -> Self {
        Self { config, directory }
    }

    /// Classify the user and write the result to the directory.
    ///
    /// Group membership is written first; the first failing call ends the
    /// sequence. Nothing is retried.
    pub async fn apply(&self, event: &ConfirmationEvent) -> ConfirmationOutcome {
        let trigger_source = &event.header.trigger_source;
        if !trigger_source.is_confirmation() {
            tracing::info!("Skipping trigger source: {}", trigger_source);
            return ConfirmationOutcome::Skipped {
                trigger_source: trigger_source.to_string(),
            };
        }

        let user_pool_id = event.header.user_pool_id.as_str();
        let username = event.header.user_name.as_str();
        let classification = classify(&self.config, &event.request.user_attributes);

        let result = async {
            self.directory
                .add_user_to_group(user_pool_id, username, classification.group())
                .await?;
            self.directory
                .update_user_attributes(user_pool_id, username, &classification.attributes())
                .await
        }
        .await;

        match result {
            Ok(()) => {
                tracing::info!(
                    %username,
                    user_type = classification.user_type(),
                    approval_status = classification.approval_status(),
                    group = classification.group(),
                    "User classified"
                );
                ConfirmationOutcome::Applied { classification }
            }
            Err(error) => {
                tracing::error!(
                    %username,
                    user_type = classification.user_type(),
                    group = classification.group(),
                    "Error processing user: {}",
                    error
                );
                ConfirmationOutcome::DirectoryFailed {
                    classification,
                    error,
                }
            }
        }
    }

    /// Run `apply` and hand the event back unchanged, whatever happened
    pub async fn process(&self, event: ConfirmationEvent) -> ConfirmationEvent {
        let outcome = self.apply(&event).await;
        if let ConfirmationOutcome::DirectoryFailed { .. } = outcome {
            tracing::warn!(
                username = %event.header.user_name,
                "Confirmation completed without directory classification; reconcile manually"
            );
        }
        event
    }
}
