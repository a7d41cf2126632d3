//! Configuration for the pet records service.
//!
//! Everything is read from environment variables (a `.env` file is loaded
//! first by `main`). Unparsable values fall back to their defaults.
mod server_config;
pub use server_config::*;

mod rate_limit;
pub use rate_limit::*;

mod error;
pub use error::*;
