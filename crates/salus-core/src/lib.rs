pub mod config;
pub mod error;
pub mod types;

pub use config::{Credentials, SalusConfig};
pub use error::{Result, SalusError};
pub use types::*;
