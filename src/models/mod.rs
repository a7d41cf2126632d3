//! # Models Module
//!
//! Record schemas, request and response payloads, and the shared
//! application state.

mod record;
pub use record::*;

mod cat;
pub use cat::*;

mod dog;
pub use dog::*;

mod last_added;
pub use last_added::*;

mod app_state;
pub use app_state::*;

mod api_response;
pub use api_response::*;

mod error;
pub use error::*;
