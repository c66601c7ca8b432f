//! Server state

use std::sync::Arc;

use crate::app::options::ComposerOptions;
use crate::composer::client::Composer;

/// Server state shared across handlers
pub struct ServerState {
    pub composer: Arc<Composer>,
    pub options: ComposerOptions,
}

impl ServerState {
    pub fn new(composer: Arc<Composer>, options: ComposerOptions) -> Self {
        Self { composer, options }
    }
}
