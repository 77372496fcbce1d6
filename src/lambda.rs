#[cfg(feature = "lambda")]
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
#[cfg(feature = "lambda")]
use skill_gate::adapters::{handle_proxy_event, ProxyRequest, ProxyResponse};
#[cfg(feature = "lambda")]
use skill_gate::utils::{logger, validation::Validate};
#[cfg(feature = "lambda")]
use skill_gate::{build_adapter, LambdaConfig, RequestAdapter};

#[cfg(feature = "lambda")]
async fn function_handler(
    adapter: &RequestAdapter,
    event: LambdaEvent<ProxyRequest>,
) -> Result<ProxyResponse, Error> {
    tracing::debug!(request_id = %event.context.request_id, "Received skill request");

    let response = handle_proxy_event(adapter, event.payload).await;

    tracing::info!(status = response.status_code, "Skill request completed");
    Ok(response)
}

#[cfg(feature = "lambda")]
#[tokio::main]
async fn main() -> Result<(), Error> {
    let config = LambdaConfig::from_env()?;
    logger::init_lambda_logger(config.log_level.as_deref());

    config.validate()?;
    let adapter = build_adapter(&config)?;
    let adapter = &adapter;

    run(service_fn(move |event: LambdaEvent<ProxyRequest>| async move {
        function_handler(adapter, event).await
    }))
    .await
}
