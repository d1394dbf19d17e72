mod bootstrap;

use anyhow::{Context, Result};
use sismo_core::settings::Settings;
use sismo_runtime::jobs::ChartJob;
use sismo_runtime::orchestrator::{ChartOrchestrator, JobContext};

fn main() -> Result<()> {
    let settings = Settings::load();

    bootstrap::setup_logging(&settings.log_level)?;

    tracing::info!("sismo v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "Chart: {:?}, data: {}, output: {}",
        settings.chart,
        settings.data.display(),
        settings.output_dir.display()
    );

    let jobs = ChartJob::for_selection(settings.chart);
    if jobs.iter().any(|job| !job.output_files().is_empty()) {
        bootstrap::ensure_output_dir(&settings.output_dir).with_context(|| {
            format!(
                "could not prepare output directory {}",
                settings.output_dir.display()
            )
        })?;
    }

    let context = JobContext::from_settings(&settings)?;
    let orchestrator = ChartOrchestrator::new(context);
    let report = orchestrator
        .run(&settings.data, &jobs)
        .with_context(|| format!("failed to chart {}", settings.data.display()))?;

    if let Some(summary) = &report.summary {
        println!("{}", summary.to_json()?);
    }
    for path in &report.written {
        tracing::debug!("written: {}", path.display());
    }
    tracing::info!("Done: {} image(s) written", report.written.len());

    Ok(())
}
