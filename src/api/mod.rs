//! # API Module
//!
//! HTTP surface of the pet records service.
//!
//! ## Structure
//!
//! * `controllers` - Request handling over the record stores and tracker
//! * `routes` - Endpoint definitions and routing
//! * `views` - Server-rendered HTML pages

pub mod controllers;

pub mod routes;

pub mod views;
