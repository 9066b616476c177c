//! Terminal controller
//!
//! Owns the session, the document store, and both output surfaces, and
//! threads them through the line editor, dispatcher, and animator. The host
//! feeds it keys and wall-clock instants; it never sleeps or spawns.

use crate::animator::{Action, Pacing, Playback, Script};
use crate::boot::{boot_script, prompt};
use crate::dispatcher::Dispatcher;
use crate::ghost::Completer;
use crate::line_editor::{EditOutcome, LineEditor};
use crate::session::Session;
use crate::terminal::{Key, TerminalSurface};
use crate::viewer::{DocumentSurface, DocumentView};
use owo_colors::OwoColorize;
use std::time::{Duration, Instant};
use titan_common::{DocumentStore, TitanConfig};
use tracing::{debug, error, info};

/// The session asked to leave for another tool
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    pub target: String,
}

pub struct TerminalController<T: TerminalSurface, V: DocumentSurface> {
    session: Session,
    store: DocumentStore,
    editor: LineEditor,
    dispatcher: Dispatcher,
    pacing: Pacing,
    playback: Playback,
    hostname: String,
    char_delay: Duration,
    pending_navigation: Option<(Instant, String)>,
    terminal: T,
    viewer: V,
}

impl<T: TerminalSurface, V: DocumentSurface> TerminalController<T, V> {
    pub fn new(config: &TitanConfig, store: DocumentStore, terminal: T, viewer: V) -> Self {
        Self {
            session: Session::new(),
            store,
            editor: LineEditor::new(config.hostname.clone()),
            dispatcher: Dispatcher::new(config),
            pacing: Pacing::new(&config.typing),
            playback: Playback::new(),
            hostname: config.hostname.clone(),
            char_delay: config.typing.char_delay(),
            pending_navigation: None,
            terminal,
            viewer,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn store(&self) -> &DocumentStore {
        &self.store
    }

    pub fn editor(&self) -> &LineEditor {
        &self.editor
    }

    pub fn terminal(&self) -> &T {
        &self.terminal
    }

    pub fn viewer(&self) -> &V {
        &self.viewer
    }

    /// Start the boot sequence
    pub fn boot(&mut self, now: Instant) {
        info!(documents = self.store.len(), "session starting");
        let script = boot_script(&self.hostname, self.char_delay);
        self.start_script(script, now);
    }

    /// Feed one key
    pub fn handle_key(&mut self, key: Key, now: Instant) {
        if self.session.viewer_open {
            self.handle_viewer_key(key, now);
            return;
        }

        if self.session.rendering {
            if key == Key::Enter {
                debug!(pending = self.playback.pending(), "skip requested");
                self.session.skip_requested = true;
                self.pump(now);
            }
            return;
        }

        let completer = Completer::new(&self.store, self.session.role);
        let outcome = self
            .editor
            .handle(key, &mut self.session, &completer, &mut self.terminal);

        if let EditOutcome::Submit(line) = outcome {
            let script = self
                .dispatcher
                .submit(&line, &mut self.session, &mut self.store);
            self.start_script(script, now);
        }
    }

    /// Feed a chunk of pasted or raw text
    pub fn handle_text(&mut self, text: &str, now: Instant) {
        for key in crate::terminal::decode_raw(text) {
            self.handle_key(key, now);
        }
    }

    /// Emit everything that is due. Returns a navigation once its delay has passed.
    pub fn advance(&mut self, now: Instant) -> Option<Navigation> {
        self.pump(now);
        match &self.pending_navigation {
            Some((at, _)) if now >= *at => self
                .pending_navigation
                .take()
                .map(|(_, target)| Navigation { target }),
            _ => None,
        }
    }

    /// Earliest instant at which `advance` has something to do
    pub fn next_deadline(&self) -> Option<Instant> {
        let playback = if self.session.viewer_open {
            None
        } else {
            self.playback.next_deadline()
        };
        let navigation = self.pending_navigation.as_ref().map(|(at, _)| *at);
        match (playback, navigation) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    pub fn is_rendering(&self) -> bool {
        self.session.rendering
    }

    /// The host terminal changed size
    pub fn resize(&mut self, columns: u16, rows: u16) {
        debug!(columns, rows, "terminal resized");
        if self.session.viewer_open {
            if let Err(e) = self.viewer.redraw() {
                error!("viewer redraw failed: {}", e);
            }
        }
    }

    fn start_script(&mut self, script: Script, now: Instant) {
        self.session.skip_requested = false;
        let units = self.pacing.expand(script);
        self.playback.start(units, now);
        self.pump(now);
    }

    fn pump(&mut self, now: Instant) {
        if !self.session.viewer_open {
            while let Some(action) = self.playback.next_due(now, self.session.skip_requested) {
                self.perform(action, now);
                if self.session.viewer_open {
                    break;
                }
            }
        }
        self.session.rendering = !self.playback.is_idle();
    }

    fn perform(&mut self, action: Action, now: Instant) {
        match action {
            Action::Write(text) => self.terminal.write(&text),
            Action::Clear => self.terminal.clear(),
            Action::Prompt => {
                self.terminal.write(&prompt(self.session.role, &self.hostname));
                self.session.skip_requested = false;
            }
            Action::OpenViewer(view) => self.open_viewer(&view),
            Action::Navigate { target, after } => {
                self.pending_navigation = Some((now + after, target));
            }
        }
    }

    fn open_viewer(&mut self, view: &DocumentView) {
        match self.viewer.show(view) {
            Ok(()) => {
                debug!(heading = %view.heading, "viewer opened");
                self.session.viewer_open = true;
            }
            Err(e) => {
                error!(kind = e.kind(), "viewer failed: {}", e);
                self.terminal
                    .write(&format!("\r\n{} {}\r\n", "SYSTEM ERROR:".red(), e));
            }
        }
    }

    fn handle_viewer_key(&mut self, key: Key, now: Instant) {
        let result = match key {
            Key::Escape | Key::Enter | Key::Char('q') => {
                let hidden = self.viewer.hide();
                self.session.viewer_open = false;
                self.playback.resume(now);
                self.pump(now);
                hidden
            }
            Key::Up => self.viewer.scroll(-1),
            Key::Down => self.viewer.scroll(1),
            _ => Ok(()),
        };
        if let Err(e) = result {
            error!(kind = e.kind(), "viewer input failed: {}", e);
        }
    }
}
