use clap::Parser;
use pattern_catalog::utils::{logger, validation::Validate};
use pattern_catalog::{CatalogConfig, CatalogError, CliConfig, Showcase};

fn main() {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("🚀 Starting pattern-catalog");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    // 載入配置，沒有指定檔案就用預設值
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            match CatalogConfig::from_file(path) {
                Ok(config) => config,
                Err(e) => {
                    tracing::error!("❌ Failed to load config file '{}'", path);
                    fail(&e)
                }
            }
        }
        None => CatalogConfig::default(),
    };

    cli.apply_overrides(&mut config);

    if let Err(e) = config.validate() {
        fail(&e);
    }

    let showcase = Showcase::new(config);
    match showcase.run() {
        Ok(report) => {
            for line in report {
                println!("{}", line);
            }
            tracing::info!("✅ Showcase completed");
        }
        Err(e) => fail(&e),
    }
}

fn fail(e: &CatalogError) -> ! {
    tracing::error!(
        "❌ Showcase failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

    // 根據錯誤嚴重程度決定退出碼
    std::process::exit(e.severity().exit_code());
}
