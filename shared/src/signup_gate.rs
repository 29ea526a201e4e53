use std::sync::Arc;

use crate::config::TriggerConfig;
use crate::email::domain_of;
use crate::error::SignupError;
use crate::types::{attribute, SignupEvent, SignupTrigger, ATTR_EMAIL};

/// Pre sign-up gate: only addresses from allowed domains may self-register.
///
/// Accounts created by an administrator skip the check. Federated sign-ups
/// that pass it are confirmed and their email marked verified, since the
/// identity provider already vouched for the address.
pub struct SignupGate {
    config: Arc<TriggerConfig>,
}

impl SignupGate {
    pub fn new(config: Arc<TriggerConfig>) -> Self {
        Self { config }
    }

    pub fn evaluate(&self, mut event: SignupEvent) -> Result<SignupEvent, SignupError> {
        let trigger_source = event.header.trigger_source.clone();
        let source_ip = event
            .header
            .caller_context
            .source_ip
            .clone()
            .unwrap_or_else(|| "unknown".to_string());

        if trigger_source == SignupTrigger::AdminCreateUser {
            tracing::info!(%source_ip, "Admin created user - skipping domain validation");
            return Ok(event);
        }

        let email = attribute(&event.request.user_attributes, ATTR_EMAIL).to_string();
        if email.is_empty() {
            tracing::error!(%source_ip, %trigger_source, "Email is required for signup");
            return Err(SignupError::MissingEmail);
        }

        tracing::info!(%email, %source_ip, %trigger_source, "Signup attempt");

        let domain = domain_of(&email);
        if !self.is_domain_allowed(&domain) {
            tracing::warn!(%domain, %source_ip, "Signup blocked: unauthorized domain");
            return Err(SignupError::DomainNotAllowed { domain });
        }

        if trigger_source == SignupTrigger::ExternalProvider {
            event.response.auto_confirm_user = true;
            event.response.auto_verify_email = true;
            tracing::info!(%email, "External provider user auto-confirmed");
        }

        tracing::info!(%email, %domain, %source_ip, "Signup allowed");
        Ok(event)
    }

    /// Exact, case-insensitive match against the allow-list. Fails closed.
    pub fn is_domain_allowed(&self, domain: &str) -> bool {
        let allowed = &self.config.allowed_signup_domains;

        if allowed.is_empty() {
            tracing::warn!("SECURITY WARNING: ALLOWED_SIGNUP_DOMAINS is not configured. Blocking all signups.");
            return false;
        }

        let domain = domain.trim().to_lowercase();
        allowed.iter().any(|allowed_domain| *allowed_domain == domain)
    }
}
