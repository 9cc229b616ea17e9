//! PR Relay — a thin HTTP service over the GitHub REST API.
//!
//! Callers hand us a pull request URL; we resolve it to owner/repo/number
//! and relay two operations upstream: listing changed files and updating
//! the pull request description.

pub mod config;
pub mod github;
pub mod pr;
pub mod server;
