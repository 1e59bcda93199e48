pub mod http_client;
pub mod report_sink;

pub use http_client::*;
pub use report_sink::*;
