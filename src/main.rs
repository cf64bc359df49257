use clap::Parser;
use seqgen_analysis::app::report::{compare_report, export_report, release_report};
use seqgen_analysis::config::{Commands, CliConfig};
use seqgen_analysis::core::deviation::{format_frequency, SECONDS_TO_MILLISECONDS};
use seqgen_analysis::domain::model::RunReport;
use seqgen_analysis::utils::error::{AnalysisError, ErrorSeverity, Result};
use seqgen_analysis::utils::{logger, validation::Validate};
use seqgen_analysis::{
    AnalysisConfig, AnalysisEngine, CompareConfig, ComparePipeline, LocalStorage, ReleaseConfig,
    ReleasePipeline,
};
use std::path::PathBuf;

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.json_logs {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting seqgen-analysis CLI");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    if let Err(e) = run(&cli).await {
        report_failure(&e);

        let exit_code = e.exit_code();
        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }
}

async fn run(cli: &CliConfig) -> Result<()> {
    let file = match &cli.config {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            AnalysisConfig::from_file(path)?
        }
        None => AnalysisConfig::default(),
    };

    let monitor_enabled = cli.monitor || file.monitoring_enabled();
    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }
    let summary = cli
        .summary
        .as_deref()
        .or(file.summary_file())
        .map(PathBuf::from);

    let report = match &cli.command {
        Commands::Releases(args) => {
            let mut config = ReleaseConfig::from_section(file.releases.as_ref());
            args.apply(&mut config);
            config.validate()?;
            tracing::debug!("Release config: {:?}", config);

            let storage = LocalStorage::new(config.output_dir.clone());
            let pipeline = ReleasePipeline::new(storage, config)?;
            let engine = AnalysisEngine::new_with_monitoring(pipeline, monitor_enabled);
            let outcome = engine.run().await?;

            for analysis in &outcome.output {
                println!(
                    "⏱️ {}Hz: {} releases, max deviation {:.3}ms",
                    format_frequency(analysis.frequency_hz),
                    analysis.release_count,
                    analysis.max_deviation_s * SECONDS_TO_MILLISECONDS
                );
            }
            release_report(&outcome)
        }
        Commands::Compare(args) => {
            let mut config = CompareConfig::from_section(file.compare.as_ref());
            args.apply(&mut config);
            config.validate()?;
            tracing::debug!("Compare config: {:?}", config);

            let storage = LocalStorage::new(config.output_dir.clone());
            let pipeline = ComparePipeline::new(storage, config);
            let engine = AnalysisEngine::new_with_monitoring(pipeline, monitor_enabled);
            compare_report(&engine.run().await?)
        }
    };

    print_success(&report);

    if let Some(path) = summary {
        export_report(&report, &path).await?;
        println!("📊 Summary saved to: {}", path.display());
    }

    Ok(())
}

fn print_success(report: &RunReport) {
    tracing::info!(
        "✅ {} analysis completed in {}ms",
        report.command,
        report.elapsed_ms
    );
    println!("✅ Analysis completed successfully!");
    for image in &report.images {
        println!("📁 Plot saved to: {}", image);
    }
}

fn report_failure(e: &AnalysisError) {
    // 低嚴重度只是提示
    if e.severity() == ErrorSeverity::Low {
        tracing::warn!("⚠️ {}", e);
        println!("{}", e.user_friendly_message());
        return;
    }

    tracing::error!(
        "❌ Analysis failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 建議: {}", e.recovery_suggestion());
}
