// Endpoints behind the bearer middleware. Handlers read the resolved
// identity from the `AuthUser` request extension.

pub mod auth;
pub mod favorites;

pub use auth::logout;
