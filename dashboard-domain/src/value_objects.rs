// Domain value objects
pub mod file_kind;
pub mod identifiers;
pub mod risk_level;

pub use file_kind::*;
pub use identifiers::*;
pub use risk_level::*;
