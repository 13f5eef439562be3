//! Command implementations

mod audit;
mod serve;

pub use audit::audit;
pub use serve::serve;
