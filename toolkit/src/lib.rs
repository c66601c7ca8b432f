//! cicd toolkit
//!
//! Release orchestration for the cicd-demo backend and frontend, plus a small
//! request composer for poking at the deployed API.

pub mod app;
pub mod composer;
pub mod deploy;
pub mod errors;
pub mod filesys;
pub mod http;
pub mod logs;
pub mod models;
pub mod server;
pub mod storage;
pub mod utils;
