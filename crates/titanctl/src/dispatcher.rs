//! Command Dispatcher
//!
//! Turns a parsed [`Command`] into a [`Script`] of output. Handlers may
//! change the session role and, for admin login, apply the narrative reveal
//! to the store. Every script ends with a prompt, including error paths.

use crate::animator::Script;
use crate::commands::Command;
use crate::session::Session;
use crate::viewer::DocumentView;
use owo_colors::OwoColorize;
use std::time::Duration;
use titan_common::config::{Credentials, TypingSettings};
use titan_common::policy::{clearance, display_entry, Clearance};
use titan_common::redaction::{contains_mask, RedactedIndex};
use titan_common::{DocumentStore, Role, TitanConfig};
use tracing::{info, warn};

const HELP_DELAY: Duration = Duration::from_millis(5);
const RESTRICTED_PAUSE: Duration = Duration::from_millis(500);
const CODE_COLUMN: usize = 25;
const HELP_COLUMN: usize = 14;
const LIST_FOOTER: &str = "------------------------------";

fn error_line(message: &str) -> String {
    format!("\r\n{} {}\r\n", "ERROR:".red(), message)
}

pub struct Dispatcher {
    hostname: String,
    builder_url: String,
    credentials: Credentials,
    typing: TypingSettings,
    index: RedactedIndex,
}

impl Dispatcher {
    pub fn new(config: &TitanConfig) -> Self {
        Self {
            hostname: config.hostname.clone(),
            builder_url: config.builder_url.clone(),
            credentials: config.credentials.clone(),
            typing: config.typing.clone(),
            index: RedactedIndex::new(),
        }
    }

    /// Record a submitted line in history, then run it
    pub fn submit(&mut self, line: &str, session: &mut Session, store: &mut DocumentStore) -> Script {
        session.record_command(line);
        self.dispatch(Command::parse(line), session, store)
    }

    pub fn dispatch(
        &mut self,
        command: Command,
        session: &mut Session,
        store: &mut DocumentStore,
    ) -> Script {
        if command != Command::Empty {
            info!(command = command.name(), role = %session.role, "dispatching command");
        }

        let script = match command {
            Command::Empty => Script::new(),
            Command::Help => self.help(session.role),
            Command::Clear => Script::new().clear(),
            Command::Login(secret) => self.login(secret.as_deref(), session, store),
            Command::Build => self.build(session.role),
            Command::List => self.list(session.role, store),
            Command::Access(code) => self.access(code.as_deref(), session.role, store),
            Command::Unknown(verb) => Script::new().write(format!("\r\nCommand not found: {}\r\n", verb)),
        };
        script.prompt()
    }

    fn help(&self, role: Role) -> Script {
        let entry = |name: &str, desc: &str, privileged: bool| {
            let styled = if privileged {
                name.cyan().bold().to_string()
            } else {
                name.yellow().bold().to_string()
            };
            let pad = " ".repeat(HELP_COLUMN.saturating_sub(name.len()));
            format!("  {}{}{}\r\n", styled, pad, desc)
        };

        let mut script = Script::new()
            .write("\r\n")
            .type_text(entry("login [pass]", "Elevate privileges", false), HELP_DELAY)
            .type_text(entry("list", "Show file index", false), HELP_DELAY)
            .type_text(entry("access [code]", "Open specific document", false), HELP_DELAY);
        if role.is_privileged() {
            script = script.type_text(entry("build", "Launch Document Builder", true), HELP_DELAY);
        }
        script
            .type_text(entry("clear", "Clear viewport", false), HELP_DELAY)
            .write("\r\n")
    }

    fn login(&mut self, secret: Option<&str>, session: &mut Session, store: &mut DocumentStore) -> Script {
        let char_delay = self.typing.char_delay();
        match secret {
            Some(s) if s == self.credentials.admin => {
                session.role = Role::Admin;
                let revealed = store.reveal_narrative();
                self.index.invalidate();
                info!(revealed, "admin login");
                Script::new()
                    .write(format!("\r\n{}\r\n", "AUTHENTICATION SUCCESSFUL.".green().bold()))
                    .type_text("WELCOME BACK, COMMANDER.\r\n", char_delay)
            }
            Some(s) if s == self.credentials.builder => {
                session.role = Role::Builder;
                self.index.invalidate();
                info!("builder login");
                Script::new()
                    .write(format!("\r\n{}\r\n", "BUILDER TOOLS AUTHORIZED.".cyan().bold()))
                    .type_text(
                        format!(
                            "Type {} to access the construction matrix.\r\n",
                            "build".yellow().bold()
                        ),
                        char_delay,
                    )
            }
            _ => {
                warn!(role = %session.role, "authentication failed");
                Script::new().write(format!(
                    "\r\n{} ACCESS DENIED.\r\n",
                    "AUTHENTICATION FAILED.".red().bold()
                ))
            }
        }
    }

    fn build(&self, role: Role) -> Script {
        if !role.is_privileged() {
            return Script::new().write(error_line("UNAUTHORIZED. BUILDER CLEARANCE REQUIRED."));
        }
        info!(target_url = %self.builder_url, "navigation to builder scheduled");
        Script::new()
            .write("\r\nINITIALIZING BUILDER PROTOCOLS...\r\n")
            .write("Redirecting to secure construction environment...\r\n")
            .navigate(self.builder_url.clone(), self.typing.navigation_delay())
    }

    fn list(&self, role: Role, store: &DocumentStore) -> Script {
        let header = format!("--- {} DATABASE INDEX ---", self.hostname);
        let lines: Vec<String> = store
            .listing_order()
            .into_iter()
            .map(|(code, record)| {
                let entry = display_entry(code, record, role);
                let status = if entry.clearance.is_locked() {
                    "[LOCK]".red().to_string()
                } else {
                    "[OPEN]".green().to_string()
                };
                format!(
                    "{}   {:<width$} : {}\r\n",
                    status,
                    entry.code,
                    entry.description,
                    width = CODE_COLUMN
                )
            })
            .collect();

        Script::new()
            .write(format!("\r\n{}\r\n", header.white().bold()))
            .listing(lines)
            .write(format!("{}\r\n", LIST_FOOTER))
    }

    fn access(&mut self, code: Option<&str>, role: Role, store: &DocumentStore) -> Script {
        let Some(code) = code else {
            return Script::new().write(error_line("Usage: access [codename]"));
        };

        let target = if contains_mask(code) {
            self.index
                .resolve(code, store, role)
                .map(str::to_string)
                .unwrap_or_else(|| code.to_string())
        } else {
            code.to_string()
        };

        let Some(record) = store.get(&target) else {
            info!(code, "document not found");
            return Script::new().write(error_line(&format!("File '{}' not found.", code)));
        };

        // Privilege is settled before any content is looked at
        if clearance(record, role) == Clearance::VisibleLocked {
            warn!(role = %role, "restricted document requested");
            return Script::new()
                .write(format!(
                    "\r\n{} RESTRICTED FILE. DISPLAYING PARTIAL DECRYPTION...\r\n",
                    "WARNING:".yellow()
                ))
                .pause(RESTRICTED_PAUSE)
                .open_viewer(DocumentView::restricted());
        }

        let view = match record.literal_content() {
            Some(content) => DocumentView::from_content(&target, content, record.access_level, role),
            None => DocumentView::simulated(record),
        };
        Script::new()
            .write(format!("\r\nOPENING FILE: {}...\r\n", target))
            .open_viewer(view)
    }
}
