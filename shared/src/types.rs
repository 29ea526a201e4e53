use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Cognito delivers every user attribute as a string, custom ones prefixed with `custom:`
pub type UserAttributes = HashMap<String, String>;

pub const ATTR_EMAIL: &str = "email";
pub const ATTR_EMPLOYEE_ID: &str = "custom:employee_id";
pub const ATTR_USER_TYPE: &str = "custom:user_type";
pub const ATTR_APPROVAL_STATUS: &str = "custom:approval_status";
pub const ATTR_IS_AGENCY: &str = "custom:is_agency";
pub const ATTR_COMPANY_NAME: &str = "custom:company_name";

/// Prefix shared by every post confirmation trigger source
pub const CONFIRMATION_PREFIX: &str = "PostConfirmation";

/// Read an attribute, treating a missing key as an empty value
pub fn attribute<'a>(attributes: &'a UserAttributes, name: &str) -> &'a str {
    attributes.get(name).map(String::as_str).unwrap_or("")
}

/// Cognito sends `null` for empty lists and maps as often as it omits them
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// ========== COMMON ==========
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CallerContext {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aws_sdk_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_ip: Option<String>,
}

/// Fields every user pool trigger carries next to `request` and `response`
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TriggerHeader<T> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default)]
    pub user_pool_id: String,
    #[serde(default)]
    pub user_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub caller_context: CallerContext,
    #[serde(default)]
    pub trigger_source: T,
}

// ========== PRE SIGN-UP ==========
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SignupTrigger {
    SignUp,
    AdminCreateUser,
    ExternalProvider,
    Other(String),
}

impl SignupTrigger {
    pub fn as_str(&self) -> &str {
        match self {
            Self::SignUp => "PreSignUp_SignUp",
            Self::AdminCreateUser => "PreSignUp_AdminCreateUser",
            Self::ExternalProvider => "PreSignUp_ExternalProvider",
            Self::Other(source) => source,
        }
    }
}

impl Default for SignupTrigger {
    fn default() -> Self {
        Self::Other(String::new())
    }
}

impl From<String> for SignupTrigger {
    fn from(source: String) -> Self {
        match source.as_str() {
            "PreSignUp_SignUp" => Self::SignUp,
            "PreSignUp_AdminCreateUser" => Self::AdminCreateUser,
            "PreSignUp_ExternalProvider" => Self::ExternalProvider,
            _ => Self::Other(source),
        }
    }
}

impl From<SignupTrigger> for String {
    fn from(trigger: SignupTrigger) -> Self {
        match trigger {
            SignupTrigger::Other(source) => source,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for SignupTrigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    #[serde(default, deserialize_with = "null_as_default")]
    pub user_attributes: UserAttributes,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation_data: Option<HashMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_metadata: Option<HashMap<String, String>>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct SignupResponse {
    pub auto_confirm_user: bool,
    pub auto_verify_email: bool,
    pub auto_verify_phone: bool,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct SignupEvent {
    #[serde(flatten)]
    pub header: TriggerHeader<SignupTrigger>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub request: SignupRequest,
    #[serde(default, deserialize_with = "null_as_default")]
    pub response: SignupResponse,
}

// ========== POST CONFIRMATION ==========
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ConfirmationTrigger {
    ConfirmSignUp,
    ConfirmForgotPassword,
    Other(String),
}

impl ConfirmationTrigger {
    pub fn as_str(&self) -> &str {
        match self {
            Self::ConfirmSignUp => "PostConfirmation_ConfirmSignUp",
            Self::ConfirmForgotPassword => "PostConfirmation_ConfirmForgotPassword",
            Self::Other(source) => source,
        }
    }

    pub fn is_confirmation(&self) -> bool {
        self.as_str().starts_with(CONFIRMATION_PREFIX)
    }
}

impl Default for ConfirmationTrigger {
    fn default() -> Self {
        Self::Other(String::new())
    }
}

impl From<String> for ConfirmationTrigger {
    fn from(source: String) -> Self {
        match source.as_str() {
            "PostConfirmation_ConfirmSignUp" => Self::ConfirmSignUp,
            "PostConfirmation_ConfirmForgotPassword" => Self::ConfirmForgotPassword,
            _ => Self::Other(source),
        }
    }
}

impl From<ConfirmationTrigger> for String {
    fn from(trigger: ConfirmationTrigger) -> Self {
        match trigger {
            ConfirmationTrigger::Other(source) => source,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for ConfirmationTrigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmationRequest {
    #[serde(default, deserialize_with = "null_as_default")]
    pub user_attributes: UserAttributes,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_metadata: Option<HashMap<String, String>>,
}

/// Post confirmation expects an empty response object back
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct ConfirmationResponse {}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct ConfirmationEvent {
    #[serde(flatten)]
    pub header: TriggerHeader<ConfirmationTrigger>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub request: ConfirmationRequest,
    #[serde(default, deserialize_with = "null_as_default")]
    pub response: ConfirmationResponse,
}

// ========== PRE TOKEN GENERATION ==========
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct GroupConfiguration {
    #[serde(deserialize_with = "null_as_default")]
    pub groups_to_override: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub iam_roles_to_override: Vec<String>,
    pub preferred_role: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TokenRequest {
    #[serde(default, deserialize_with = "null_as_default")]
    pub user_attributes: UserAttributes,
    #[serde(default, deserialize_with = "null_as_default")]
    pub group_configuration: GroupConfiguration,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_metadata: Option<HashMap<String, String>>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ClaimsOverrideDetails {
    #[serde(default, deserialize_with = "null_as_default")]
    pub claims_to_add_or_override: HashMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub claims_to_suppress: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_override_details: Option<GroupConfiguration>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub claims_override_details: Option<ClaimsOverrideDetails>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct TokenEvent {
    #[serde(flatten)]
    pub header: TriggerHeader<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub request: TokenRequest,
    #[serde(default, deserialize_with = "null_as_default")]
    pub response: TokenResponse,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_pre_signup_event() {
        let payload = json!({
            "version": "1",
            "region": "ap-northeast-2",
            "userPoolId": "ap-northeast-2_abc123",
            "userName": "3f2a-sub",
            "callerContext": {
                "awsSdkVersion": "aws-sdk-unknown-unknown",
                "clientId": "client-1",
                "sourceIp": "1.2.3.4"
            },
            "triggerSource": "PreSignUp_ExternalProvider",
            "request": {
                "userAttributes": { "email": "user@example.com" },
                "validationData": null
            },
            "response": {
                "autoConfirmUser": false,
                "autoVerifyEmail": false,
                "autoVerifyPhone": false
            }
        });

        let event: SignupEvent = serde_json::from_value(payload).unwrap();
        assert_eq!(event.header.trigger_source, SignupTrigger::ExternalProvider);
        assert_eq!(event.header.user_pool_id, "ap-northeast-2_abc123");
        assert_eq!(event.header.caller_context.source_ip.as_deref(), Some("1.2.3.4"));
        assert_eq!(attribute(&event.request.user_attributes, ATTR_EMAIL), "user@example.com");
        assert!(!event.response.auto_confirm_user);
    }

    #[test]
    fn test_unknown_trigger_source_is_preserved() {
        let payload = json!({
            "triggerSource": "PreSignUp_SomethingNew",
            "request": { "userAttributes": {} }
        });

        let event: SignupEvent = serde_json::from_value(payload).unwrap();
        assert_eq!(
            event.header.trigger_source,
            SignupTrigger::Other("PreSignUp_SomethingNew".to_string())
        );

        let out = serde_json::to_value(&event).unwrap();
        assert_eq!(out["triggerSource"], "PreSignUp_SomethingNew");
    }

    #[test]
    fn test_missing_response_defaults_to_false_flags() {
        let payload = json!({
            "triggerSource": "PreSignUp_SignUp",
            "request": { "userAttributes": { "email": "a@b.com" } }
        });

        let event: SignupEvent = serde_json::from_value(payload).unwrap();
        assert_eq!(event.response, SignupResponse::default());
    }

    #[test]
    fn test_confirmation_trigger_prefix() {
        assert!(ConfirmationTrigger::ConfirmSignUp.is_confirmation());
        assert!(ConfirmationTrigger::ConfirmForgotPassword.is_confirmation());
        assert!(ConfirmationTrigger::from("PostConfirmation_Future".to_string()).is_confirmation());
        assert!(!ConfirmationTrigger::from("PreSignUp_SignUp".to_string()).is_confirmation());
        assert!(!ConfirmationTrigger::default().is_confirmation());
    }

    #[test]
    fn test_parse_token_event_with_null_override() {
        let payload = json!({
            "version": "1",
            "triggerSource": "TokenGeneration_HostedAuth",
            "userPoolId": "pool",
            "userName": "user",
            "request": {
                "userAttributes": { "custom:approval_status": "approved" },
                "groupConfiguration": {
                    "groupsToOverride": ["internal-users"],
                    "iamRolesToOverride": [],
                    "preferredRole": null
                }
            },
            "response": { "claimsOverrideDetails": null }
        });

        let event: TokenEvent = serde_json::from_value(payload).unwrap();
        assert_eq!(event.header.trigger_source, "TokenGeneration_HostedAuth");
        assert_eq!(event.request.group_configuration.groups_to_override, vec!["internal-users"]);
        assert!(event.response.claims_override_details.is_none());
    }

    #[test]
    fn test_null_collections_parse_as_empty() {
        let payload = json!({
            "triggerSource": "TokenGeneration_Authentication",
            "callerContext": null,
            "request": {
                "userAttributes": {},
                "groupConfiguration": {
                    "groupsToOverride": null,
                    "iamRolesToOverride": null,
                    "preferredRole": null
                }
            },
            "response": { "claimsOverrideDetails": null }
        });

        let event: TokenEvent = serde_json::from_value(payload).unwrap();
        assert_eq!(event.request.group_configuration, GroupConfiguration::default());

        let out = serde_json::to_value(&event).unwrap();
        assert_eq!(out["request"]["groupConfiguration"]["groupsToOverride"], json!([]));
        assert_eq!(out["request"]["groupConfiguration"]["iamRolesToOverride"], json!([]));

        let again: TokenEvent = serde_json::from_value(out).unwrap();
        assert_eq!(again, event);
    }

    #[test]
    fn test_null_request_maps_parse_as_empty() {
        let payload = json!({
            "triggerSource": "PreSignUp_SignUp",
            "request": { "userAttributes": null, "validationData": null },
            "response": null
        });

        let event: SignupEvent = serde_json::from_value(payload).unwrap();
        assert!(event.request.user_attributes.is_empty());
        assert_eq!(event.response, SignupResponse::default());

        let override_payload = json!({
            "claimsToAddOrOverride": null,
            "claimsToSuppress": ["email"]
        });
        let details: ClaimsOverrideDetails = serde_json::from_value(override_payload).unwrap();
        assert!(details.claims_to_add_or_override.is_empty());
    }

    #[test]
    fn test_absent_optional_request_maps_are_not_serialized() {
        let payload = json!({
            "triggerSource": "PreSignUp_SignUp",
            "request": { "userAttributes": { "email": "a@b.com" } }
        });

        let event: SignupEvent = serde_json::from_value(payload).unwrap();
        let out = serde_json::to_value(&event).unwrap();
        assert!(out["request"].get("validationData").is_none());
        assert!(out["request"].get("clientMetadata").is_none());
    }

    #[test]
    fn test_attribute_missing_is_empty() {
        let attributes = UserAttributes::new();
        assert_eq!(attribute(&attributes, ATTR_EMPLOYEE_ID), "");
    }
}
