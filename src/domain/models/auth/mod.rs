pub mod request_context;
pub mod user_locator;

pub use request_context::*;
pub use user_locator::*;
