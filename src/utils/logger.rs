use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub fn init_cli_logger(verbose: bool, level: Option<&str>) {
    let filter = if verbose {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("skill_gate=debug,info"))
    } else {
        let default_directive = format!("skill_gate={}", level.unwrap_or("info"));
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive))
    };

    // stdout carries the response JSON, so logs go to stderr
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .init();
}

pub fn init_lambda_logger(level: Option<&str>) {
    let default_directive = format!("skill_gate={}", level.unwrap_or("info"));
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .without_time()
                .json(), // Lambda uses JSON format for better CloudWatch integration
        )
        .init();
}
