use anyhow::Context;
use clap::Parser;
use fleet_effort::utils::error::{EffortError, ErrorSeverity};
use fleet_effort::utils::{logger, validation::Validate};
use fleet_effort::{
    fleet_source_for, CliConfig, EffortConfig, EffortEngine, LocalStorage, ReportPipeline,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliConfig::parse();

    if args.log_json {
        logger::init_json_logger(args.verbose);
    } else {
        logger::init_cli_logger(args.verbose);
    }

    tracing::info!("🚀 Starting fleet-effort");
    tracing::info!("📁 Loading configuration from: {}", args.config);

    let mut config = EffortConfig::from_file(&args.config).with_context(|| {
        format!(
            "failed to load config file '{}' (make sure it exists and is valid TOML)",
            args.config
        )
    })?;

    args.apply_to(&mut config);

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    tracing::info!("✅ Configuration loaded and validated successfully");

    if args.dry_run {
        display_config_summary(&config);
        return Ok(());
    }

    let storage = LocalStorage::new(".".to_string());
    let source = fleet_source_for(&config);
    let pipeline = match ReportPipeline::new(storage, config, source) {
        Ok(pipeline) => pipeline,
        Err(e) => fail(e),
    };

    match EffortEngine::new(pipeline).run().await {
        Ok(outcome) => {
            tracing::info!(
                "✅ Report for {} months written to {}",
                outcome.report.months.len(),
                outcome.destination
            );
            if outcome.destination != "stdout" {
                println!("📁 Report saved to: {}", outcome.destination);
            }
        }
        Err(e) => fail(e),
    }

    Ok(())
}

fn fail(e: EffortError) -> ! {
    tracing::error!(
        "❌ Report run failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

    let exit_code = match e.severity() {
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}

fn display_config_summary(config: &EffortConfig) {
    println!("📋 Configuration Summary:");
    println!("  Report: {}", config.report.name);
    println!("  Reference nation: {}", config.reference_nation());
    println!("  Top N: {}", config.top_n());
    if config.fleet_source_enabled() {
        println!(
            "  Fleet source: {} (timeout {}s, first {} rows)",
            config.endpoint(),
            config.timeout_seconds(),
            config.max_entries()
        );
    } else {
        println!("  Fleet source: disabled (built-in tables)");
    }
    println!("  Format: {:?}", config.output_format());
    println!("  Output: {}", config.output_path().unwrap_or("stdout"));
    println!("  Months:");
    for month in &config.months {
        println!("    {} ({} nations)", month.label, month.operations.len());
    }
    println!();
    println!("🔍 Dry run complete, nothing was fetched or written.");
}
