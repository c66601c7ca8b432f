//! Integration tests

mod test_preflight;
mod test_release;
mod test_server;
