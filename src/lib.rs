//! Translation relay service and the client that builds requests for it.

pub mod api;
pub mod app_state;
pub mod client;
pub mod config;
pub mod core;
pub mod debug;
pub mod domain;
pub mod errors;
pub mod logging;
pub mod routes;

#[cfg(test)]
mod test_support;
