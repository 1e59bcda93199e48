use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueHint};

use dashboard_domain::{AnalysisFilters, MAX_MONITORING_MINUTES};

#[derive(Parser, Debug)]
#[command(name = "fuel-dashboard")]
#[command(version, about = "Fuel consumption anomaly dashboard", long_about = None)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Command {
    /// Check that the analysis service is reachable
    Health,
    /// Sign in and remember the session
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Create an account
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        role: Option<String>,
    },
    /// Forget the stored session
    Logout,
    /// Show the signed-in user
    Whoami,
    /// Upload a spreadsheet and show the detected anomalies
    Analyze(AnalyzeArgs),
    /// Manage consumption alerts
    #[command(subcommand)]
    Alert(AlertCommand),
    /// List summaries of past analyses
    History,
    /// Poll the service for new data until interrupted
    Monitor {
        #[arg(long, value_parser = clap::value_parser!(u64).range(1..=MAX_MONITORING_MINUTES))]
        interval_minutes: Option<u64>,
    },
}

#[derive(Args, Debug, PartialEq)]
pub struct AnalyzeArgs {
    /// Excel workbook (.xlsx or .xls)
    #[arg(value_hint = ValueHint::FilePath)]
    pub file: PathBuf,

    #[arg(long)]
    pub date_from: Option<String>,
    #[arg(long)]
    pub date_to: Option<String>,
    #[arg(long)]
    pub vehicle: Option<String>,
    #[arg(long)]
    pub zone: Option<String>,

    /// Download the summary PDF report
    #[arg(long)]
    pub report: bool,
    /// Download the PDF report with charts
    #[arg(long)]
    pub chart_report: bool,

    /// Project consumption for a period (e.g. mensual)
    #[arg(long, value_name = "PERIOD")]
    pub predict: Option<String>,
    #[arg(long, requires = "predict")]
    pub predict_vehicle: Option<String>,

    /// Print the display model as JSON
    #[arg(long)]
    pub json: bool,
}

impl AnalyzeArgs {
    pub fn filters(&self) -> Option<AnalysisFilters> {
        let clean = |value: &Option<String>| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|text| !text.is_empty())
                .map(ToString::to_string)
        };
        let filters = AnalysisFilters {
            date_from: clean(&self.date_from),
            date_to: clean(&self.date_to),
            vehicle: clean(&self.vehicle),
            zone: clean(&self.zone),
        };
        (!filters.is_empty()).then_some(filters)
    }
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum AlertCommand {
    /// Configure a new alert
    Add {
        #[arg(long = "type")]
        alert_type: String,
        #[arg(long)]
        threshold: f64,
        #[arg(long)]
        vehicle: Option<String>,
    },
    /// Remove an alert by id
    Remove { id: String },
}
