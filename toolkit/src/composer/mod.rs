//! Request composer

pub mod client;
pub mod request;
