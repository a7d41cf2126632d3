mod redis;
pub use redis::*;

mod html;
pub use html::*;
