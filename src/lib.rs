//! Pet Records Service Library
//!
//! A small record keeping web backend for cats and dogs. Records live in a
//! document store (in memory or Redis), the most recently added cat and dog
//! are tracked, and a handful of HTML pages are rendered on the server.
//!
//! # Module Structure
//!
//! - `api`: Routes, controllers and HTML views
//! - `bootstrap`: Repository and application state setup
//! - `config`: Environment driven configuration
//! - `logging`: Logger setup and log file rolling
//! - `metrics`: Prometheus registry and request middleware
//! - `models`: Records, request payloads, errors and shared state
//! - `repositories`: Record stores
//! - `utils`: Redis connection, HTML escaping and test helpers

pub mod api;
pub mod bootstrap;
pub mod config;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod repositories;
pub mod utils;

pub use models::{ApiError, AppState};
