//! Composer HTTP server

pub mod handlers;
pub mod page;
pub mod serve;
pub mod state;
