use lambda_runtime::{Error, LambdaEvent};
use userpool_shared::claims;
use userpool_shared::types::TokenEvent;

/// Pre token generation trigger: copies approval state into token claims
pub(crate) async fn function_handler(event: LambdaEvent<TokenEvent>) -> Result<TokenEvent, Error> {
    tracing::info!(
        request_id = %event.context.request_id,
        trigger_source = %event.payload.header.trigger_source,
        "Pre token generation event received"
    );
    tracing::debug!("Event: {}", serde_json::to_string(&event.payload)?);

    Ok(claims::enrich(event.payload))
}
