use intern_core::init_logging;
use intern_server::config::ServerConfig;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("configuration error: {err}");
            return ExitCode::FAILURE;
        }
    };

    let log_dir = config.log_dir.to_string_lossy().into_owned();
    if let Err(err) = init_logging(&config.log_level, &log_dir) {
        eprintln!("logging setup failed: {err}");
        return ExitCode::FAILURE;
    }

    match intern_server::run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("event=server_exit module=http status=error error={err}");
            ExitCode::FAILURE
        }
    }
}
