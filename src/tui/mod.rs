//! Interactive movie search and watched-list screen
mod app;
mod events;
mod layout;
mod rendering;
mod terminal;

use std::sync::Arc;

use anyhow::Result;
pub use app::{App, DEFAULT_TITLE};
pub use events::Focus;
use terminal::TerminalManager;
use tokio::runtime::Handle;
use tracing::info;

use crate::api::MovieApi;
use crate::watched::WatchedStore;

/// Run the interactive TUI until the user quits.
///
/// Fetches are spawned on `runtime`; the UI loop itself stays on the calling thread.
pub fn run_interactive(
    api: Arc<dyn MovieApi>,
    watched: WatchedStore,
    min_query_len: usize,
    runtime: Handle,
) -> Result<()> {
    info!(watched = watched.len(), path = %watched.path().display(), "starting interactive session");

    let mut manager = TerminalManager::new()?;
    let mut app = App::new(api, watched, min_query_len, runtime);

    let res = app.run(manager.terminal_mut());

    manager.restore()?;
    info!("interactive session ended");
    res
}
