pub mod cli;
pub mod context;
pub mod lifecycle;
pub mod logging;
pub mod output;

pub use lifecycle::run;
