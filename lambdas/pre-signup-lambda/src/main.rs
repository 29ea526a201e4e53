use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use std::sync::Arc;
use userpool_shared::types::SignupEvent;
use userpool_shared::{SignupGate, TriggerConfig};

mod trigger_handler;

#[tokio::main]
async fn main() -> Result<(), Error> {
    userpool_shared::init_tracing();

    // Policy is read once per cold start and shared by every invocation
    let config = Arc::new(TriggerConfig::from_env());
    config.log_summary();
    let gate = Arc::new(SignupGate::new(config));

    run(service_fn(move |event: LambdaEvent<SignupEvent>| {
        let gate = Arc::clone(&gate);
        async move { trigger_handler::function_handler(event, &gate).await }
    }))
    .await
}
