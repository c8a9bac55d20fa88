use clap::Parser;
use woo_order_etl::utils::logger;
use woo_order_etl::{CliConfig, EtlEngine, EtlError, LocalStorage, OrderExportPipeline, RunReport};

fn main() {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.json_logs {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting woo-order-etl");
    tracing::debug!("CLI config: {:?}", cli);

    if let Err(e) = run(&cli) {
        // 記錄詳細錯誤信息
        tracing::error!(
            "❌ ETL process failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
        std::process::exit(e.exit_code());
    }
}

fn run(cli: &CliConfig) -> Result<(), EtlError> {
    let settings = cli.settings()?;
    tracing::info!("📄 Input: {}", settings.input_path);

    if cli.monitor {
        tracing::info!("🔍 System monitoring enabled");
    }

    let storage = LocalStorage::new(settings.output_dir.clone());
    let pipeline = OrderExportPipeline::new(storage, settings)?;
    let engine = EtlEngine::new_with_monitoring(pipeline, cli.monitor);

    let report = engine.run()?;
    print_report(&report, cli.json_summary)?;
    Ok(())
}

fn print_report(report: &RunReport, as_json: bool) -> Result<(), EtlError> {
    tracing::info!("✅ ETL process completed successfully!");
    for output in &report.outputs {
        tracing::info!("📁 Output saved to: {}", output);
    }

    if as_json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        println!("✅ ETL process completed successfully!");
        for output in &report.outputs {
            println!("📁 {}", output);
        }
        println!("{}", report.summary);
    }
    Ok(())
}
