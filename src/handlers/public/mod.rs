// Endpoints reachable without a bearer token: service info, health and
// token acquisition.

pub mod auth;
pub mod system;

pub use auth::login;
pub use system::{health, not_found, root};
