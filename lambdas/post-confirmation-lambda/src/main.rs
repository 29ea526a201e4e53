use aws_sdk_cognitoidentityprovider::Client as CognitoClient;
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use std::sync::Arc;
use userpool_shared::types::ConfirmationEvent;
use userpool_shared::{CognitoDirectory, ConfirmationClassifier, TriggerConfig};

mod trigger_handler;

#[tokio::main]
async fn main() -> Result<(), Error> {
    userpool_shared::init_tracing();

    let config = Arc::new(TriggerConfig::from_env());
    config.log_summary();

    // Initialize the Cognito client once at startup
    let aws_config = aws_config::load_from_env().await;
    let directory = CognitoDirectory::new(CognitoClient::new(&aws_config));
    let classifier = Arc::new(ConfirmationClassifier::new(config, directory));

    run(service_fn(move |event: LambdaEvent<ConfirmationEvent>| {
        let classifier = Arc::clone(&classifier);
        async move { trigger_handler::function_handler(event, &classifier).await }
    }))
    .await
}
