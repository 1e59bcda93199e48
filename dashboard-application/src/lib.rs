// Dashboard Application Layer

pub mod commands;
pub mod error;
pub mod ops;
pub mod queries;
pub mod session;
pub mod state;

#[cfg(test)]
pub(crate) mod testing;

pub use error::AppError;
pub use ops::{Notice, NoticeBoard, NoticeKind};
pub use session::SessionController;
pub use state::{SessionPhase, SessionState};
