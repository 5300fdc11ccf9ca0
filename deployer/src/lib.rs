//! Stack deployer library
//!
//! Updates an existing stack on a Portainer-compatible management
//! server: resolves the target stack, rebuilds its definition text, and
//! pushes the result for redeployment.

pub mod app;
pub mod config;
pub mod definition;
pub mod deploy;
pub mod errors;
pub mod http;
pub mod logs;
pub mod models;
pub mod utils;
