//! Compute hosting platform wire models

pub mod models;
