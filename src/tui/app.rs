//! Main TUI application loop.

use std::io;
use std::time::Duration;

use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::auth::IdentityProvider;
use crate::editor::FormMode;
use crate::prefs::Prefs;
use crate::store::RecordStore;
use crate::store::worker::{StoreReply, StoreRequest, StoreWorker};

use super::event::{Event, EventHandler};
use super::input::{KeyAction, handle_key};
use super::render::render;
use super::state::{AppState, Popup};

/// Main TUI application.
pub struct App {
    state: AppState,
    prefs: Prefs,
    should_quit: bool,
}

impl App {
    pub fn new(prefs: Prefs) -> Self {
        Self {
            state: AppState::new(prefs.theme),
            prefs,
            should_quit: false,
        }
    }

    /// Runs the event loop until quit. Owns the terminal for its whole
    /// lifetime; the store worker is shut down on drop.
    pub fn run(
        mut self,
        store: Box<dyn RecordStore>,
        identity: Box<dyn IdentityProvider>,
        tick_rate: Duration,
    ) -> io::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let events = EventHandler::new(tick_rate);
        let reply_tx = events.sender();
        let worker = StoreWorker::spawn(store, identity, move |reply| {
            let _ = reply_tx.send(Event::Store(reply));
        });

        // Identity first; the initial fetch is issued from its reply.
        worker.send(StoreRequest::ResolveIdentity);

        loop {
            self.state.refresh_view();
            terminal.draw(|frame| render(frame, &mut self.state))?;

            match events.next() {
                Ok(Event::Tick) => self.state.tick(),
                Ok(Event::Key(key)) => {
                    let action = handle_key(&mut self.state, key);
                    self.apply_action(action, &worker);
                }
                Ok(Event::Resize) => {}
                Ok(Event::Store(reply)) => self.apply_reply(reply, &worker),
                Err(_) => self.should_quit = true,
            }

            if self.should_quit {
                break;
            }
        }

        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        Ok(())
    }

    /// Issues a fetch. Never called before identity resolution; the
    /// loading flag flips true here and false when the reply lands.
    fn request_fetch(&mut self, worker: &StoreWorker) {
        let Some(identity) = &self.state.identity else {
            return;
        };
        self.state.inventory.begin_fetch();
        worker.send(StoreRequest::Fetch {
            owner: identity.id.clone(),
        });
    }

    fn apply_action(&mut self, action: KeyAction, worker: &StoreWorker) {
        match action {
            KeyAction::None => {}
            KeyAction::Quit => self.should_quit = true,
            KeyAction::Fetch => self.request_fetch(worker),
            KeyAction::Insert(patch) => worker.send(StoreRequest::Insert { patch }),
            KeyAction::Update { id, patch } => worker.send(StoreRequest::Update { id, patch }),
            KeyAction::Delete { id } => worker.send(StoreRequest::Delete { id }),
            KeyAction::SignOut => worker.send(StoreRequest::SignOut),
            KeyAction::ToggleTheme => {
                self.prefs.toggle_theme();
                self.state.theme = self.prefs.theme;
            }
        }
    }

    fn apply_reply(&mut self, reply: StoreReply, worker: &StoreWorker) {
        match reply {
            StoreReply::Identity(identity) => {
                self.state.resolving_identity = false;
                let changed = self.state.identity != identity;
                self.state.identity = identity;
                // Refetch whenever the resolved identity changes,
                // including from none to a value.
                if self.state.identity.is_some() && changed {
                    self.request_fetch(worker);
                }
            }
            StoreReply::Fetched(result) => {
                self.state.inventory.apply_fetch(result);
            }
            StoreReply::Inserted(Ok(record)) => {
                // Success clears the draft to blank (the next `a` opens
                // an empty form) and refetches.
                if matches!(&self.state.form, Some(form) if form.mode == FormMode::Create) {
                    self.state.form = None;
                }
                self.state.set_status(format!("Added {}", record.name), false);
                self.request_fetch(worker);
            }
            StoreReply::Inserted(Err(e)) => match self.state.form.as_mut() {
                Some(form) if form.mode == FormMode::Create => {
                    form.submit_failed(e.to_string());
                }
                _ => self.state.set_status(e.to_string(), true),
            },
            StoreReply::Updated { id, result: Ok(()) } => {
                let editing_this = self
                    .state
                    .form
                    .as_ref()
                    .is_some_and(|form| form.mode == FormMode::Edit { id: id.clone() });
                if editing_this {
                    self.state.form = None;
                }
                self.state.set_status("Saved", false);
                self.request_fetch(worker);
            }
            StoreReply::Updated {
                id,
                result: Err(e),
            } => {
                let editing_this = self
                    .state
                    .form
                    .as_ref()
                    .is_some_and(|form| form.mode == FormMode::Edit { id: id.clone() });
                if editing_this {
                    // Back to Editing; the buffer is retained for retry.
                    if let Some(form) = self.state.form.as_mut() {
                        form.submit_failed(e.to_string());
                    }
                } else {
                    self.state.set_status(e.to_string(), true);
                }
            }
            StoreReply::Deleted { result: Ok(()), .. } => {
                self.state.set_status("Deleted", false);
                self.request_fetch(worker);
            }
            StoreReply::Deleted {
                result: Err(e), ..
            } => {
                // The record stays in the list; only a message is shown.
                self.state.set_status(e.to_string(), true);
            }
            StoreReply::SignedOut => {
                self.state.identity = None;
                self.state.signed_out = true;
                self.state.inventory.clear();
                self.state.form = None;
                self.state.popup = Popup::None;
                self.state.search_input.clear();
            }
        }
    }
}
