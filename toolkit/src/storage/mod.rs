//! On-disk locations and credentials

pub mod credentials;
pub mod layout;
