use anyhow::Context;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use hero_onboarding::config::WizardConfig;
use hero_onboarding::onboarding::OnboardingFlow;
use hero_onboarding::session::{SessionEnd, run_session};
use hero_onboarding::surface::TerminalSurface;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = WizardConfig::from_env()?;

    // Keep the guard alive so buffered log lines are flushed on exit
    let _log_guard = init_tracing(&config);

    let mut flow =
        OnboardingFlow::from_config(&config).with_context(|| match &config.catalog_path {
            Some(path) => format!("preparing onboarding from {}", path.display()),
            None => "preparing onboarding".to_string(),
        })?;

    let mut surface = TerminalSurface::stdio();
    let report = run_session(&mut flow, &mut surface).await?;

    match report.end {
        SessionEnd::Completed => {
            tracing::info!(
                answers = %serde_json::to_string(&report.state.answers)?,
                "Collected onboarding answers"
            );
        }
        SessionEnd::Quit | SessionEnd::InputClosed => {
            eprintln!("\nOnboarding not finished. Nothing was saved.");
        }
    }

    Ok(())
}

/// Log to a file under `log_dir` when set, otherwise to stderr. Defaults to
/// `warn` so log lines stay out of the way of the questionnaire.
fn init_tracing(config: &WizardConfig) -> Option<WorkerGuard> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    match &config.log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::never(dir, "onboarding.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(writer)
                .with_ansi(false)
                .init();
            Some(guard)
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .with_target(false)
                .init();
            None
        }
    }
}
