use std::collections::HashMap;

use crate::types::{
    attribute, TokenEvent, UserAttributes, ATTR_APPROVAL_STATUS, ATTR_COMPANY_NAME,
    ATTR_EMPLOYEE_ID, ATTR_IS_AGENCY, ATTR_USER_TYPE,
};

pub const CLAIM_APPROVAL_STATUS: &str = "approval_status";
pub const CLAIM_USER_TYPE: &str = "user_type";
pub const CLAIM_IS_AGENCY: &str = "is_agency";
pub const CLAIM_COMPANY_NAME: &str = "company_name";
pub const CLAIM_EMPLOYEE_ID: &str = "employee_id";
pub const CLAIM_SERVICE_ACCESS_ALLOWED: &str = "service_access_allowed";

fn attribute_or<'a>(attributes: &'a UserAttributes, name: &str, default: &'a str) -> &'a str {
    match attribute(attributes, name) {
        "" => default,
        value => value,
    }
}

/// Token claims derived from the custom attributes written at confirmation
pub fn derive_claims(attributes: &UserAttributes) -> HashMap<String, String> {
    let mut claims = HashMap::new();

    let approval_status = attribute_or(attributes, ATTR_APPROVAL_STATUS, "pending");
    claims.insert(CLAIM_APPROVAL_STATUS.to_string(), approval_status.to_string());
    claims.insert(
        CLAIM_USER_TYPE.to_string(),
        attribute_or(attributes, ATTR_USER_TYPE, "unknown").to_string(),
    );
    claims.insert(
        CLAIM_IS_AGENCY.to_string(),
        attribute_or(attributes, ATTR_IS_AGENCY, "false").to_string(),
    );

    // Optional claims are left out entirely rather than sent empty
    for (attribute_name, claim) in [
        (ATTR_COMPANY_NAME, CLAIM_COMPANY_NAME),
        (ATTR_EMPLOYEE_ID, CLAIM_EMPLOYEE_ID),
    ] {
        let value = attribute(attributes, attribute_name);
        if !value.is_empty() {
            claims.insert(claim.to_string(), value.to_string());
        }
    }

    let access_allowed = approval_status == "approved";
    claims.insert(CLAIM_SERVICE_ACCESS_ALLOWED.to_string(), access_allowed.to_string());

    claims
}

/// Add the derived claims to the token, replacing any claim with the same name
pub fn enrich(mut event: TokenEvent) -> TokenEvent {
    let claims = derive_claims(&event.request.user_attributes);
    tracing::info!(username = %event.header.user_name, "Claims added: {:?}", claims);

    event
        .response
        .claims_override_details
        .get_or_insert_with(Default::default)
        .claims_to_add_or_override
        .extend(claims);

    event
}
