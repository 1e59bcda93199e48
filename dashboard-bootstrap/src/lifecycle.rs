use std::time::Duration;

use anyhow::{Context, Result};
use tokio::sync::broadcast::{self, error::TryRecvError};
use tracing::{info, warn};

use dashboard_application::commands::{
    alert_commands, analysis_commands, auth_commands, prediction_commands, report_commands,
};
use dashboard_application::ops::{start_monitoring, stop_monitoring};
use dashboard_application::queries::{health_queries, history_queries, results_queries};
use dashboard_application::{Notice, NoticeKind, SessionController};
use dashboard_domain::{render_prediction, AlertId, ReportKind};
use dashboard_infrastructure::{read_upload, AppConfig};

use crate::cli::{AlertCommand, AnalyzeArgs, Command};
use crate::context::AppContext;
use crate::output::{format_configured_alert, format_display, format_history, format_notice};

pub async fn run(command: Command, config: AppConfig) -> Result<()> {
    let context = AppContext::new(config).await?;
    let session = context.session;

    // The monitor prints notices live; other commands flush them on exit.
    let live_notices = matches!(command, Command::Monitor { .. });
    let mut notices = session.notices.subscribe();
    let outcome = run_command(&session, command).await;
    if !live_notices {
        print_pending_notices(&mut notices);
    }
    outcome
}

async fn run_command(session: &SessionController, command: Command) -> Result<()> {
    match command {
        Command::Health => {
            let status = health_queries::check_api_health(session)
                .await
                .context("analysis service unavailable")?;
            match status.version.as_deref() {
                Some(version) => println!("API status: {} (version {})", status.status, version),
                None => println!("API status: {}", status.status),
            }
        }
        Command::Login { email, password } => {
            let user = auth_commands::login(session, &email, &password).await?;
            println!("Signed in as {} <{}> ({})", user.name, user.email, user.role);
        }
        Command::Register {
            name,
            email,
            password,
            role,
        } => {
            auth_commands::register(session, &name, &email, &password, role.as_deref()).await?;
        }
        Command::Logout => auth_commands::logout(session).await?,
        Command::Whoami => match auth_commands::current_user(session).await {
            Some(user) => println!("{} <{}> ({})", user.name, user.email, user.role),
            None => println!("Not signed in"),
        },
        Command::Analyze(args) => run_analysis(session, args).await?,
        Command::Alert(AlertCommand::Add {
            alert_type,
            threshold,
            vehicle,
        }) => {
            let alert = alert_commands::configure_alert(
                session,
                &alert_type,
                Some(threshold),
                vehicle.as_deref(),
            )
            .await?;
            print!("{}", format_configured_alert(&alert));
        }
        Command::Alert(AlertCommand::Remove { id }) => {
            alert_commands::remove_alert(session, &AlertId::from(id.as_str())).await?;
        }
        Command::History => {
            let history = history_queries::list_history(session).await?;
            print!("{}", format_history(&history));
        }
        Command::Monitor { interval_minutes } => {
            let minutes = interval_minutes.unwrap_or(session.config.monitoring_interval_minutes);
            run_monitor(session, minutes).await?;
        }
    }
    Ok(())
}

async fn run_analysis(session: &SessionController, args: AnalyzeArgs) -> Result<()> {
    let file = read_upload(&args.file).await?;
    analysis_commands::select_file(session, file).await?;
    analysis_commands::analyze(session, args.filters()).await?;

    if let Some(model) = results_queries::display_model(session).await {
        if args.json {
            println!("{}", serde_json::to_string_pretty(&model)?);
        } else {
            print!("{}", format_display(&model));
        }
    }

    let mut kinds = Vec::new();
    if args.report {
        kinds.push(ReportKind::Summary);
    }
    if args.chart_report {
        kinds.push(ReportKind::Charts);
    }
    for kind in kinds {
        let path = report_commands::generate_report(session, kind).await?;
        println!("Report saved to {}", path.display());
    }

    if let Some(period) = args.predict.as_deref() {
        let prediction =
            prediction_commands::predict(session, period, args.predict_vehicle.as_deref()).await?;
        for line in render_prediction(&prediction) {
            println!("{}", line);
        }
    }
    Ok(())
}

async fn run_monitor(session: &SessionController, minutes: u64) -> Result<()> {
    let mut notices = session.notices.subscribe();
    start_monitoring(session, Duration::from_secs(minutes.saturating_mul(60)))?;
    info!(minutes, "waiting for updates, press Ctrl-C to stop");

    let printer = tokio::spawn(async move {
        loop {
            match notices.recv().await {
                Ok(notice) => print_notice(&notice),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(skipped, "notice stream lagged");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    });

    shutdown_signal().await;
    stop_monitoring(session);
    printer.abort();
    info!("monitoring finished");
    Ok(())
}

fn print_pending_notices(notices: &mut broadcast::Receiver<Notice>) {
    loop {
        match notices.try_recv() {
            // Errors are reported once, through the command result.
            Ok(notice) if notice.kind == NoticeKind::Error => {}
            Ok(notice) => print_notice(&notice),
            Err(TryRecvError::Lagged(_)) => continue,
            Err(TryRecvError::Empty | TryRecvError::Closed) => break,
        }
    }
}

fn print_notice(notice: &Notice) {
    eprintln!("{}", format_notice(notice));
}

async fn shutdown_signal() {
    let ctrl_c = async {
        let _ = tokio::signal::ctrl_c().await;
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                warn!("sigterm handler unavailable: {}", err);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
