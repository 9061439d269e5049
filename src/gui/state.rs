use std::sync::Arc;

use crate::pipeline::RunOutput;

/// Shared application state: the run whose scratch workspace must stay alive
/// while its previews and archive are on screen. Replacing it drops the
/// previous run's scratch directories.
#[derive(Debug)]
pub struct AppState {
    pub current_run: Option<Arc<RunOutput>>,
}

impl Default for AppState {
    fn default() -> Self {
        Self { current_run: None }
    }
}
