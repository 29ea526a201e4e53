use lambda_runtime::{Error, LambdaEvent};
use userpool_shared::types::ConfirmationEvent;
use userpool_shared::{ConfirmationClassifier, Directory};

/// Post confirmation trigger. Directory failures are logged by the
/// classifier and never fail the confirmation.
pub(crate) async fn function_handler<D: Directory>(
    event: LambdaEvent<ConfirmationEvent>,
    classifier: &ConfirmationClassifier<D>,
) -> Result<ConfirmationEvent, Error> {
    tracing::info!(
        request_id = %event.context.request_id,
        trigger_source = %event.payload.header.trigger_source,
        "Post confirmation event received"
    );
    tracing::debug!("Event: {}", serde_json::to_string(&event.payload)?);

    Ok(classifier.process(event.payload).await)
}
