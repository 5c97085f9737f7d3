pub mod auth;
pub mod response;

pub use auth::{ensure_owner, require_bearer};
pub use response::{ApiResponse, ApiResult, Message};
