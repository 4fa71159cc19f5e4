pub mod compatibility;
pub mod config;
pub mod error;
pub mod logging;
pub mod validation;

pub use compatibility::*;
pub use config::*;
pub use error::*;
pub use logging::*;
pub use validation::*;
