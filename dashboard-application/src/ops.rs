pub mod monitoring;
pub mod notice_hub;

pub use monitoring::*;
pub use notice_hub::*;
