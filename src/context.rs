use crate::logic::{FetchCommand, SharedState, fetch_task};
use crate::model::{AppState, Interpolator};
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

/// Fixed application name, used for the native window and as the
/// persistence namespace.
pub const APP_NAME: &str = "egui_hostview";

/// Everything the view layer needs, built once at startup and passed along
/// by reference. There is no global registry to look things up in.
pub struct AppContext {
    pub state: SharedState,
    pub commands: mpsc::Sender<FetchCommand>,
    pub interpolator: Interpolator,
}

impl AppContext {
    /// Wires the restored state to a background tokio runtime running
    /// `fetch_task` and installs the bracket interpolation delimiters, so
    /// `{{ }}` markers inside server-rendered text stay inert.
    pub fn bootstrap(restored: AppState) -> Self {
        let state = Arc::new(Mutex::new(restored));
        let (commands, receiver) = mpsc::channel(32);

        let task_state = state.clone();
        std::thread::spawn(move || {
            tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()
                .expect("failed to build the fetch runtime")
                .block_on(fetch_task(task_state, receiver));
        });

        Self::assemble(state, commands)
    }

    /// Context without the background task, for harnesses that drive the
    /// command channel themselves.
    pub fn detached(state: SharedState, commands: mpsc::Sender<FetchCommand>) -> Self {
        Self::assemble(state, commands)
    }

    fn assemble(state: SharedState, commands: mpsc::Sender<FetchCommand>) -> Self {
        Self {
            state,
            commands,
            interpolator: Interpolator::brackets(),
        }
    }
}
