pub mod app;
pub mod auth;
pub mod cli;
pub mod config;
pub mod error;
pub mod favorites;
pub mod handlers;
pub mod middleware;
pub mod state;

#[cfg(test)]
pub mod testing;
