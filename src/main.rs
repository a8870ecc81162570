use clap::Parser;
use store_api_suites::app::{report, suites};
use store_api_suites::utils::logger;
use store_api_suites::{CliConfig, LocalStorage, SuiteError, SuiteReport, SuiteRunner};

fn fail(e: SuiteError) -> ! {
    tracing::error!("❌ {} (Category: {:?}, Severity: {:?})", e, e.category(), e.severity());
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
    std::process::exit(report::exit_code_for_error(&e));
}

#[tokio::main]
async fn main() {
    let config = CliConfig::parse();

    if config.json_logs {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("🚀 Starting store-api-suites");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    let file = config.load_run_config().unwrap_or_else(|e| fail(e));
    let (run, selected) = config.resolve(&file).unwrap_or_else(|e| fail(e));

    if selected.is_empty() {
        tracing::warn!("⚠️ No suite enabled, known suites: {}", suites::names().join(", "));
        return;
    }

    if config.dry_run {
        tracing::info!("🔍 DRY RUN MODE - no request will be sent");
        println!("{}", report::render_plan(&run, &selected));
        return;
    }

    let mut reports: Vec<SuiteReport> = Vec::with_capacity(selected.len());
    for (definition, settings) in &selected {
        let runner = suites::build_runner(definition, settings, &run).unwrap_or_else(|e| fail(e));
        let suite_report = runner.execute_all().await;
        println!("{}\n", report::render_text(&suite_report));

        if let Some(dir) = &run.report_dir {
            let storage = LocalStorage::new(dir.clone());
            if let Err(e) = report::write_report(&storage, &suite_report).await {
                fail(e);
            }
        }
        reports.push(suite_report);
    }

    let summary = SuiteRunner::get_execution_summary(&reports);
    tracing::info!(
        "📈 {} suites: {} passed, {} failed, {} skipped ({}ms)",
        summary["total_suites"],
        summary["passed"],
        summary["failed"],
        summary["skipped"],
        summary["total_duration_ms"]
    );

    let code = report::exit_code_for_reports(&reports);
    if code != 0 {
        std::process::exit(code);
    }
}
