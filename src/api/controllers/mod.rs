//! # API Controllers Module
//!
//! Handles HTTP request processing and business logic coordination.
//!
//! ## Controllers
//!
//! * `cat` - Cat records and the last added cat
//! * `dog` - Dog records and the last added dog
//! * `pages` - HTML pages and the 404 page

pub mod cat;
pub mod dog;
pub mod pages;
