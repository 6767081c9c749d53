use clap::Parser;
use pokedex_service::utils::error::{ErrorSeverity, PokedexError};
use pokedex_service::utils::{logger, validation::Validate};
use pokedex_service::{server, CliConfig, ServiceConfig};

fn report_and_exit(e: &PokedexError) -> ! {
    tracing::error!(
        "❌ Pokedex service failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

    // 根據錯誤嚴重程度決定退出碼
    let exit_code = match e.severity() {
        ErrorSeverity::Low | ErrorSeverity::High => 1,
        ErrorSeverity::Medium => 2, // 可重試
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    let config = match ServiceConfig::resolve(&cli) {
        Ok(config) => config,
        Err(e) => {
            logger::init_cli_logger(cli.verbose, None);
            report_and_exit(&e);
        }
    };

    // 初始化日誌
    if config.json_logs {
        logger::init_json_logger(config.verbose, config.log_level.as_deref());
    } else {
        logger::init_cli_logger(config.verbose, config.log_level.as_deref());
    }

    tracing::info!("Starting pokedex service");
    tracing::debug!("Effective config: {:?}", config);

    if let Err(e) = config.validate() {
        report_and_exit(&e);
    }

    if let Err(e) = server::run(config).await {
        report_and_exit(&e);
    }
}
