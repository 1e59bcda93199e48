pub mod health_queries;
pub mod history_queries;
pub mod results_queries;
