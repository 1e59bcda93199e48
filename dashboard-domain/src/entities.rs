// Domain entities
pub mod alert;
pub mod analysis;
pub mod anomaly;
pub mod model;
pub mod session;
pub mod upload;

pub use alert::*;
pub use analysis::*;
pub use anomaly::*;
pub use model::*;
pub use session::*;
pub use upload::*;
