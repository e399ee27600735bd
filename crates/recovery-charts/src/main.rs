mod bootstrap;
mod report;

use anyhow::{Context, Result};
use chrono::Utc;

use recovery_core::chart_config::ChartConfig;
use recovery_core::settings::Settings;
use recovery_runtime::orchestrator::RefreshOrchestrator;
use recovery_runtime::pipeline::run_pipeline;
use recovery_ui::app::App;

#[tokio::main]
async fn main() -> Result<()> {
    let settings = Settings::load();

    bootstrap::ensure_directories(settings.log_file.as_deref())?;
    bootstrap::setup_logging(&settings.log_level, settings.log_file.as_deref())?;

    tracing::info!("Recovery Charts v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        data_file = %settings.data_file.display(),
        theme = %settings.theme,
        policy = ?settings.refresh_policy,
        "settings loaded"
    );

    let config = ChartConfig::load_or_default(settings.chart_config.as_deref())
        .context("failed to load chart configuration")?;

    if settings.once {
        let result = run_pipeline(&settings.data_file, &config, Utc::now())
            .with_context(|| format!("failed to chart {}", settings.data_file.display()))?;
        print!("{}", report::render_report(&result)?);
        return Ok(());
    }

    let orchestrator =
        RefreshOrchestrator::new(settings.data_file.clone(), config, settings.refresh_policy);
    let (rx, trigger, handle) = orchestrator.start();

    let app = App::new(&settings.theme, settings.data_file.display().to_string());

    // The TUI exits on 'q' / Ctrl+C itself; the OS-level signal covers the
    // moments before raw mode is enabled.
    tokio::select! {
        result = app.run(rx, trigger) => {
            handle.abort();
            result?;
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Ctrl+C received; shutting down refresh task");
            handle.abort();
        }
    }

    Ok(())
}
