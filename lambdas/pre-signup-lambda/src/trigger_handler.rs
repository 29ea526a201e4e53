use lambda_runtime::{Error, LambdaEvent};
use userpool_shared::types::SignupEvent;
use userpool_shared::SignupGate;

/// Pre sign-up trigger. Returning an error aborts account creation and
/// Cognito shows the error text to the user.
pub(crate) async fn function_handler(
    event: LambdaEvent<SignupEvent>,
    gate: &SignupGate,
) -> Result<SignupEvent, Error> {
    tracing::info!(request_id = %event.context.request_id, "Pre sign-up event received");
    tracing::debug!("Event: {}", serde_json::to_string(&event.payload)?);

    Ok(gate.evaluate(event.payload)?)
}
