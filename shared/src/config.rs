use std::env;

pub const INTERNAL_EMAIL_DOMAINS: &str = "INTERNAL_EMAIL_DOMAINS";
pub const EMPLOYEE_ID_PREFIX: &str = "EMPLOYEE_ID_PREFIX";
pub const ALLOWED_SIGNUP_DOMAINS: &str = "ALLOWED_SIGNUP_DOMAINS";

const DEFAULT_INTERNAL_EMAIL_DOMAINS: &str = "your-company.co.kr";
const DEFAULT_EMPLOYEE_ID_PREFIX: &str = "EMP,ADM";
const DEFAULT_ALLOWED_SIGNUP_DOMAINS: &str = "";

/// Classification and sign-up policy, read once per cold start.
///
/// Lists are already normalized: entries trimmed, empties dropped,
/// domains lower-cased and employee id prefixes upper-cased.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TriggerConfig {
    pub internal_email_domains: Vec<String>,
    pub employee_id_prefixes: Vec<String>,
    pub allowed_signup_domains: Vec<String>,
}

impl TriggerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the config from any key lookup. A key that is set but empty
    /// yields an empty list rather than the default.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        Self {
            internal_email_domains: parse_list(
                &read(INTERNAL_EMAIL_DOMAINS, DEFAULT_INTERNAL_EMAIL_DOMAINS),
                str::to_lowercase,
            ),
            employee_id_prefixes: parse_list(
                &read(EMPLOYEE_ID_PREFIX, DEFAULT_EMPLOYEE_ID_PREFIX),
                str::to_uppercase,
            ),
            allowed_signup_domains: parse_list(
                &read(ALLOWED_SIGNUP_DOMAINS, DEFAULT_ALLOWED_SIGNUP_DOMAINS),
                str::to_lowercase,
            ),
        }
    }

    /// An empty allow-list blocks every self-service sign-up
    pub fn signup_fail_closed(&self) -> bool {
        self.allowed_signup_domains.is_empty()
    }

    pub fn log_summary(&self) {
        tracing::info!(
            internal_email_domains = ?self.internal_email_domains,
            employee_id_prefixes = ?self.employee_id_prefixes,
            allowed_signup_domains = ?self.allowed_signup_domains,
            "Trigger configuration loaded"
        );
        if self.signup_fail_closed() {
            tracing::warn!("{} is empty; every self-service signup will be rejected", ALLOWED_SIGNUP_DOMAINS);
        }
    }
}

fn parse_list(raw: &str, normalize: fn(&str) -> String) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(normalize)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> TriggerConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        TriggerConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]);
        assert_eq!(config.internal_email_domains, vec!["your-company.co.kr"]);
        assert_eq!(config.employee_id_prefixes, vec!["EMP", "ADM"]);
        assert!(config.allowed_signup_domains.is_empty());
        assert!(config.signup_fail_closed());
    }

    #[test]
    fn test_lists_are_normalized() {
        let config = config_from(&[
            (INTERNAL_EMAIL_DOMAINS, " Corp.com, ,LAB.corp.com "),
            (EMPLOYEE_ID_PREFIX, "emp, adm,"),
            (ALLOWED_SIGNUP_DOMAINS, "Partner.com,,corp.com"),
        ]);
        assert_eq!(config.internal_email_domains, vec!["corp.com", "lab.corp.com"]);
        assert_eq!(config.employee_id_prefixes, vec!["EMP", "ADM"]);
        assert_eq!(config.allowed_signup_domains, vec!["partner.com", "corp.com"]);
        assert!(!config.signup_fail_closed());
    }

    #[test]
    fn test_set_but_empty_overrides_default() {
        let config = config_from(&[(INTERNAL_EMAIL_DOMAINS, ""), (EMPLOYEE_ID_PREFIX, " , ")]);
        assert!(config.internal_email_domains.is_empty());
        assert!(config.employee_id_prefixes.is_empty());
    }
}
