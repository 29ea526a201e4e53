use lambda_runtime::{run, service_fn, Error};

mod trigger_handler;

#[tokio::main]
async fn main() -> Result<(), Error> {
    userpool_shared::init_tracing();

    run(service_fn(trigger_handler::function_handler)).await
}
