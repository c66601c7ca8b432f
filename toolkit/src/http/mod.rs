//! Compute platform HTTP API

pub mod client;
pub mod deploys;
pub mod services;
