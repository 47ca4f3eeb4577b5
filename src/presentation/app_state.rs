// Application state for HTTP handlers
use crate::application::controller::Controller;
use crate::infrastructure::command_buffer::{CommandMap, CommandSurface};
use tokio::sync::Mutex;

pub type TrackerController = Controller<CommandMap, CommandSurface>;

/// Events are applied one at a time through the lock
pub struct AppState {
    pub controller: Mutex<TrackerController>,
}

impl AppState {
    pub fn new(controller: TrackerController) -> Self {
        Self {
            controller: Mutex::new(controller),
        }
    }
}
