use clap::Parser;
use metaselect::utils::error::{ErrorSeverity, ServiceError};
use metaselect::utils::{logger, validation::Validate};
use metaselect::{load_model_handle, run_server, CliConfig};

fn exit_code(e: &ServiceError) -> i32 {
    match e.severity() {
        ErrorSeverity::Low => 1,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    let settings = match config.resolve() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
            std::process::exit(exit_code(&e));
        }
    };

    if settings.json_logs {
        logger::init_json_logger(settings.verbose);
    } else {
        logger::init_cli_logger(settings.verbose);
    }

    tracing::info!("Starting MetaSelect API");
    tracing::debug!(?settings, "Resolved settings");

    if let Err(e) = settings.validate() {
        tracing::error!(
            category = ?e.category(),
            severity = ?e.severity(),
            "❌ Configuration validation failed: {}",
            e
        );
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(exit_code(&e));
    }

    // a missing model is not fatal; requests report it instead
    let model = load_model_handle(&settings.model_path);
    if !model.is_loaded() {
        tracing::warn!(
            model_path = %settings.model_path,
            "Serving without a model; /predict and /model-info will fail"
        );
    }

    run_server(settings, model).await
}
