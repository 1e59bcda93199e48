pub mod session_files;

pub use session_files::*;
