//! Release workflow building blocks

pub mod attempt;
pub mod frontend;
pub mod git;
pub mod lookup;
pub mod platform;
pub mod poller;
pub mod resolver;
pub mod tooling;
pub mod vercel;
