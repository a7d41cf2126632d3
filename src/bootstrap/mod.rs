//! Startup routines for the pet records service.
//!
//! Builds the record repositories for the configured backend and wraps them
//! in the shared application state.
mod initialize_app_state;
pub use initialize_app_state::*;
