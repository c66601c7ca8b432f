//! Request composer wire models

pub mod models;
