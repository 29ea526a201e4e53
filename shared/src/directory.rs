use async_trait::async_trait;
use aws_sdk_cognitoidentityprovider::error::DisplayErrorContext;
use aws_sdk_cognitoidentityprovider::types::AttributeType;
use aws_sdk_cognitoidentityprovider::Client as CognitoClient;

use crate::error::DirectoryError;

/// Mutations the post confirmation trigger makes against the user pool.
///
/// Both calls are idempotent: repeating them with the same arguments leaves
/// the user in the same state.
#[async_trait]
pub trait Directory: Send + Sync {
    async fn add_user_to_group(
        &self,
        user_pool_id: &str,
        username: &str,
        group_name: &str,
    ) -> Result<(), DirectoryError>;

    async fn update_user_attributes(
        &self,
        user_pool_id: &str,
        username: &str,
        attributes: &[(&str, &str)],
    ) -> Result<(), DirectoryError>;
}

/// `Directory` backed by the Cognito admin API
pub struct CognitoDirectory {
    client: CognitoClient,
}

impl CognitoDirectory {
    pub fn new(client: CognitoClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Directory for CognitoDirectory {
    async fn add_user_to_group(
        &self,
        user_pool_id: &str,
        username: &str,
        group_name: &str,
    ) -> Result<(), DirectoryError> {
        let result = self
            .client
            .admin_add_user_to_group()
            .user_pool_id(user_pool_id)
            .username(username)
            .group_name(group_name)
            .send()
            .await;

        match result {
            Ok(_) => {
                tracing::info!("User {} added to group {}", username, group_name);
                Ok(())
            }
            Err(e) => {
                let service_error = e.into_service_error();
                if service_error.is_resource_not_found_exception() {
                    tracing::error!("Group {} not found", group_name);
                    return Err(DirectoryError::GroupNotFound {
                        group: group_name.to_string(),
                    });
                }

                let message = DisplayErrorContext(&service_error).to_string();
                tracing::error!("Error adding user to group: {}", message);
                Err(DirectoryError::api("AdminAddUserToGroup", message))
            }
        }
    }

    async fn update_user_attributes(
        &self,
        user_pool_id: &str,
        username: &str,
        attributes: &[(&str, &str)],
    ) -> Result<(), DirectoryError> {
        let mut user_attributes = Vec::with_capacity(attributes.len());
        for (name, value) in attributes {
            let attribute = AttributeType::builder()
                .name(*name)
                .value(*value)
                .build()
                .map_err(|e| DirectoryError::api("AdminUpdateUserAttributes", e.to_string()))?;
            user_attributes.push(attribute);
        }

        self.client
            .admin_update_user_attributes()
            .user_pool_id(user_pool_id)
            .username(username)
            .set_user_attributes(Some(user_attributes))
            .send()
            .await
            .map_err(|e| {
                let message = DisplayErrorContext(&e).to_string();
                tracing::error!("Error updating user attributes: {}", message);
                DirectoryError::api("AdminUpdateUserAttributes", message)
            })?;

        tracing::info!("User {} attributes updated: {:?}", username, attributes);
        Ok(())
    }
}
