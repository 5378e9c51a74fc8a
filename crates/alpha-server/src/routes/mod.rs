//! Route handlers
//!
//! - [`pages`]: the dashboard document and the navigation triggers
//! - [`api`]: JSON endpoints for profiles, explanations and header polling
//! - [`health`]: liveness

pub mod api;
pub mod health;
pub mod pages;
