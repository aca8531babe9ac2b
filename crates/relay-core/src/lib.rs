mod cancel;
mod config;
mod scanner;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use config::{Config, ConfigError};
pub use scanner::{Connections, Scanner};
