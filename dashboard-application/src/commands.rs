pub mod alert_commands;
pub mod analysis_commands;
pub mod auth_commands;
pub mod prediction_commands;
pub mod report_commands;
