//! TUI application state and event handling.
//!
//! The `App` owns the search and detail controllers, the watched store and the
//! scoped key listeners, and runs the main event loop via `run()`. Each turn of
//! the loop:
//!
//! - drains finished fetches from both controllers,
//! - updates the terminal title,
//! - redraws when state changed,
//! - polls one keyboard event and applies it.
//!
//! Global keys go through [`KeyListeners`]: Enter is subscribed for the whole
//! life of the search input (the app), Escape only while a detail view is open.
//!
//! # Example
//!
//! ```rust,ignore
//! let mut app = App::new(api, watched, config.min_query_len, runtime.handle().clone());
//! app.run(&mut terminal)?;
//! ```

use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::execute;
use crossterm::terminal::SetTitle;
use ratatui::Terminal;
use ratatui::backend::Backend;
use tokio::runtime::Handle;
use tracing::{info, warn};

use super::events::{Action, Focus, poll_event};
use super::rendering::{RenderState, render_ui};
use crate::api::MovieApi;
use crate::controller::{DetailController, Hotkey, KeyListeners, SearchController, Subscription};
use crate::utils::sanitize_text;
use crate::watched::WatchedStore;

/// Duration for success status messages (milliseconds)
const STATUS_SUCCESS_DURATION_MS: u64 = 3000;
/// Duration for error status messages (milliseconds)
const STATUS_ERROR_DURATION_MS: u64 = 5000;
/// Rows moved by PageUp/PageDown
const PAGE_SIZE: isize = 10;
/// Terminal title when no movie is open
pub const DEFAULT_TITLE: &str = "usePopcorn";

/// Type of status message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageType {
    Success,
    Error,
}

/// Transient status message with expiry
#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub message_type: MessageType,
    pub expires_at: Instant,
}

pub struct App {
    search: SearchController,
    detail: DetailController,
    watched: WatchedStore,
    listeners: KeyListeners,
    // Held while the search input exists
    _enter_listener: Subscription,
    // Held while a detail view is open
    escape_listener: Option<Subscription>,
    focus: Focus,
    results_idx: usize,
    watched_idx: usize,
    left_open: bool,
    right_open: bool,
    should_quit: bool,
    status_message: Option<StatusMessage>,
    applied_title: Option<String>,
    // Dirty state tracking for efficient rendering
    needs_redraw: bool,
    last_draw_time: Instant,
}

impl App {
    pub fn new(
        api: Arc<dyn MovieApi>,
        watched: WatchedStore,
        min_query_len: usize,
        runtime: Handle,
    ) -> Self {
        let listeners = KeyListeners::new();
        let enter_listener = listeners.subscribe(Hotkey::Enter);

        let mut search = SearchController::new(Arc::clone(&api), min_query_len, runtime.clone());
        search.refresh();

        Self {
            search,
            detail: DetailController::new(api, runtime),
            watched,
            listeners,
            _enter_listener: enter_listener,
            escape_listener: None,
            focus: Focus::Search,
            results_idx: 0,
            watched_idx: 0,
            left_open: true,
            right_open: true,
            should_quit: false,
            status_message: None,
            applied_title: None,
            needs_redraw: true, // Initial draw needed
            last_draw_time: Instant::now(),
        }
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn search(&self) -> &SearchController {
        &self.search
    }

    pub fn detail(&self) -> &DetailController {
        &self.detail
    }

    pub fn watched(&self) -> &WatchedStore {
        &self.watched
    }

    pub fn listeners(&self) -> &KeyListeners {
        &self.listeners
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Terminal title for the current state
    pub fn window_title(&self) -> String {
        match self.detail.detail() {
            Some(detail) => format!("Movie-{}", sanitize_text(&detail.title)),
            None => DEFAULT_TITLE.to_string(),
        }
    }

    /// Set a transient status message with automatic expiry
    fn set_status(&mut self, text: impl Into<String>, message_type: MessageType, duration_ms: u64) {
        self.status_message = Some(StatusMessage {
            text: text.into(),
            message_type,
            expires_at: Instant::now() + Duration::from_millis(duration_ms),
        });
        self.needs_redraw = true;
    }

    /// Check and clear expired status messages
    fn check_and_clear_expired_status(&mut self) {
        let should_clear = self
            .status_message
            .as_ref()
            .map(|msg| Instant::now() >= msg.expires_at)
            .unwrap_or(false);
        if should_clear {
            self.status_message = None;
            self.needs_redraw = true;
        }
    }

    /// Apply finished fetches from both controllers
    fn process_fetches(&mut self) {
        if self.search.poll() {
            self.clamp_selections();
            self.needs_redraw = true;
        }
        if self.detail.poll() {
            self.needs_redraw = true;
        }
    }

    fn apply_window_title<W: io::Write>(&mut self, out: &mut W) -> Result<()> {
        let title = self.window_title();
        if self.applied_title.as_deref() != Some(title.as_str()) {
            execute!(out, SetTitle(&title))?;
            self.applied_title = Some(title);
        }
        Ok(())
    }

    pub fn run<B: Backend + io::Write>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        while !self.should_quit {
            self.check_and_clear_expired_status();
            self.process_fetches();
            self.apply_window_title(terminal.backend_mut())?;

            // Draw if dirty or if it's been >100ms (for terminal resize handling)
            let now = Instant::now();
            let elapsed = now.duration_since(self.last_draw_time);
            if self.needs_redraw || elapsed >= Duration::from_millis(100) {
                terminal.draw(|f| render_ui(f, &self.render_state()))?;
                self.needs_redraw = false;
                self.last_draw_time = now;
            }

            let action = poll_event(Duration::from_millis(100), self.focus)?;
            self.handle_action(action);
        }

        Ok(())
    }

    fn render_state(&self) -> RenderState<'_> {
        RenderState {
            search: &self.search,
            detail: &self.detail,
            watched: &self.watched,
            focus: self.focus,
            results_idx: self.results_idx,
            watched_idx: self.watched_idx,
            left_open: self.left_open,
            right_open: self.right_open,
            status_message: self.status_message.as_ref(),
        }
    }

    /// Handle a user action (extracted for testing)
    fn handle_action(&mut self, action: Action) {
        match action {
            Action::None => return,
            Action::Quit => self.should_quit = true,
            Action::Escape => {
                if self.listeners.is_listening(Hotkey::Escape) {
                    self.close_detail();
                }
            }
            Action::Enter => {
                if self.listeners.is_listening(Hotkey::Enter) && self.focus != Focus::Search {
                    self.focus = Focus::Search;
                    if self.search.clear() {
                        self.on_query_changed();
                    }
                }
            }
            Action::NextFocus => self.next_focus(),
            Action::MoveUp => self.move_selection(-1),
            Action::MoveDown => self.move_selection(1),
            Action::PageUp => self.move_selection(-PAGE_SIZE),
            Action::PageDown => self.move_selection(PAGE_SIZE),
            Action::UpdateSearch(c) => {
                if self.search.push_char(c) {
                    self.on_query_changed();
                }
            }
            Action::DeleteChar => {
                if self.search.pop_char() {
                    self.on_query_changed();
                }
            }
            Action::ToggleSelect => self.toggle_selected_result(),
            Action::DeleteWatched => self.delete_selected_watched(),
            Action::AddWatched => self.add_to_watched(),
            Action::SetRating(rating) => self.detail.set_rating(rating),
            Action::RatingDown => self.detail.adjust_rating(-1),
            Action::RatingUp => self.detail.adjust_rating(1),
            Action::ToggleLeftBox => self.left_open = !self.left_open,
            Action::ToggleRightBox => self.right_open = !self.right_open,
        }
        self.needs_redraw = true;
    }

    /// A new query closes the detail view and resets the results cursor
    fn on_query_changed(&mut self) {
        self.results_idx = 0;
        if self.detail.is_open() {
            self.close_detail();
        }
    }

    fn close_detail(&mut self) {
        self.detail.close();
        self.sync_listeners();
    }

    /// Hold the Escape listener exactly while a detail view is open
    fn sync_listeners(&mut self) {
        if self.detail.is_open() {
            if self.escape_listener.is_none() {
                self.escape_listener = Some(self.listeners.subscribe(Hotkey::Escape));
            }
        } else {
            self.escape_listener = None;
            if self.focus == Focus::Detail {
                self.focus = Focus::Watched;
            }
        }
    }

    fn next_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Search => Focus::Results,
            Focus::Results if self.detail.is_open() => Focus::Detail,
            Focus::Results => Focus::Watched,
            Focus::Watched | Focus::Detail => Focus::Search,
        };
    }

    fn move_selection(&mut self, delta: isize) {
        let (idx, total) = match self.focus {
            Focus::Results => (&mut self.results_idx, self.search.results().len()),
            Focus::Watched => (&mut self.watched_idx, self.watched.len()),
            Focus::Search | Focus::Detail => return,
        };

        if total == 0 {
            *idx = 0;
            return;
        }
        let new_idx = (*idx as isize + delta).clamp(0, total as isize - 1);
        *idx = new_idx as usize;
    }

    fn clamp_selections(&mut self) {
        self.results_idx = self.results_idx.min(self.search.results().len().saturating_sub(1));
        self.watched_idx = self.watched_idx.min(self.watched.len().saturating_sub(1));
    }

    fn toggle_selected_result(&mut self) {
        if self.focus != Focus::Results {
            return;
        }
        let Some(id) = self.search.results().get(self.results_idx).map(|r| r.id.clone()) else {
            return;
        };

        self.detail.toggle(&id);
        self.sync_listeners();
        if self.detail.is_open() {
            self.focus = Focus::Detail;
        }
    }

    fn add_to_watched(&mut self) {
        if !self.detail.is_open() {
            return;
        }
        if self.detail.watched_rating(&self.watched).is_some() {
            self.set_status("Already in your watched list", MessageType::Error, STATUS_ERROR_DURATION_MS);
            return;
        }

        match self.detail.add_to_watched(&mut self.watched) {
            Ok(Some(entry)) => {
                info!(id = %entry.id, rating = entry.user_rating, "added to watched list");
                self.watched_idx = self.watched.len().saturating_sub(1);
                self.set_status(
                    format!("✓ Added {}", sanitize_text(&entry.title)),
                    MessageType::Success,
                    STATUS_SUCCESS_DURATION_MS,
                );
            }
            Ok(None) => {
                self.set_status(
                    "✗ Choose a rating before adding",
                    MessageType::Error,
                    STATUS_ERROR_DURATION_MS,
                );
            }
            Err(e) => {
                warn!(error = %e, "failed to save watched list");
                self.set_status(
                    format!("✗ Could not save watched list: {:#}", e),
                    MessageType::Error,
                    STATUS_ERROR_DURATION_MS,
                );
            }
        }
        self.sync_listeners();
    }

    fn delete_selected_watched(&mut self) {
        if self.focus != Focus::Watched {
            return;
        }
        let Some(entry) = self.watched.entries().get(self.watched_idx).cloned() else {
            return;
        };

        match self.watched.remove(&entry.id) {
            Ok(_) => {
                info!(id = %entry.id, "removed from watched list");
                self.set_status(
                    format!("✓ Removed {}", sanitize_text(&entry.title)),
                    MessageType::Success,
                    STATUS_SUCCESS_DURATION_MS,
                );
            }
            Err(e) => {
                warn!(id = %entry.id, error = %e, "failed to save watched list");
                self.set_status(
                    format!("✗ Could not save watched list: {:#}", e),
                    MessageType::Error,
                    STATUS_ERROR_DURATION_MS,
                );
            }
        }
        self.clamp_selections();
    }
}
