use std::process::ExitCode;

use clinic_api::config::ServerConfig;

#[tokio::main]
async fn main() -> ExitCode {
    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("clinic-api: {e}");
            return ExitCode::FAILURE;
        }
    };

    clinic_api::init_tracing(&config.log_filter);

    match clinic_api::run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
