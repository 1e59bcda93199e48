// Domain services
pub mod file_validation;
pub mod renderer;

pub use file_validation::*;
pub use renderer::*;
