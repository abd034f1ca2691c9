use amadeus_enterprise_rest::config::cli::CliConfig;
use amadeus_enterprise_rest::utils::error::ErrorCategory;
use amadeus_enterprise_rest::utils::logger;
use amadeus_enterprise_rest::utils::validation::Validate;
use amadeus_enterprise_rest::{AmadeusConfig, FlightSdk, SdkOptions, TomlConfig};
use clap::Parser;

fn build_sdk(cli: &CliConfig) -> amadeus_enterprise_rest::Result<FlightSdk> {
    let (config, options) = match &cli.config {
        Some(path) => TomlConfig::from_file(path)?.into_parts(),
        None => (AmadeusConfig::from_env()?, SdkOptions::default()),
    };
    config.validate()?;

    let options = cli.apply_to(options);
    tracing::debug!("SDK options: {:?}", options);
    tracing::debug!("Amadeus config: {:?}", config);

    FlightSdk::new(config, options)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌，--debug 需要 debug 等級才看得到請求追蹤
    if cli.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose || cli.debug);
    }

    tracing::info!("Running '{}' command", cli.command.name());

    let result = match build_sdk(&cli) {
        Ok(sdk) => cli.command.execute(&sdk).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(response) => {
            println!("HTTP {}", response.status);
            println!("{}", serde_json::to_string_pretty(&response.body)?);

            if !response.is_success() {
                tracing::warn!(
                    "⚠️ Request was rejected: {}",
                    response.error_message().unwrap_or_default()
                );
                std::process::exit(2);
            }
        }
        Err(e) => {
            tracing::error!("❌ {} failed: {} (Category: {:?})", cli.command.name(), e, e.category());
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            let exit_code = match e.category() {
                ErrorCategory::Input => 1,
                ErrorCategory::Vendor => 2,
                ErrorCategory::Configuration => 3,
                ErrorCategory::Network => 4,
                ErrorCategory::Authentication => 5,
            };
            std::process::exit(exit_code);
        }
    }

    Ok(())
}
