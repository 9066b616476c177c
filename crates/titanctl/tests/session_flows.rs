//! End-to-end session flows driven through the controller with fake surfaces

use std::time::{Duration, Instant};
use titan_common::config::TypingSettings;
use titan_common::redaction::redact_identifier;
use titan_common::{
    AccessLevel, DocumentRecord, DocumentStore, Result, Role, TitanConfig, TitanError,
};
use titanctl::dispatcher::Dispatcher;
use titanctl::session::Session;
use titanctl::{
    DocumentSurface, DocumentView, FooterStatus, Key, TerminalController, TerminalSurface,
};

#[derive(Default)]
struct RecordingTerminal {
    output: String,
    clears: usize,
}

impl TerminalSurface for RecordingTerminal {
    fn write(&mut self, text: &str) {
        self.output.push_str(text);
    }

    fn clear(&mut self) {
        self.clears += 1;
        self.output.clear();
    }
}

#[derive(Default)]
struct RecordingViewer {
    shown: Vec<DocumentView>,
    hidden: usize,
    scrolled: i32,
    fail: bool,
}

impl DocumentSurface for RecordingViewer {
    fn show(&mut self, view: &DocumentView) -> Result<()> {
        if self.fail {
            return Err(TitanError::Render("no display".to_string()));
        }
        self.shown.push(view.clone());
        Ok(())
    }

    fn scroll(&mut self, delta: i32) -> Result<()> {
        self.scrolled += delta;
        Ok(())
    }

    fn redraw(&mut self) -> Result<()> {
        Ok(())
    }

    fn hide(&mut self) -> Result<()> {
        self.hidden += 1;
        Ok(())
    }
}

type Controller = TerminalController<RecordingTerminal, RecordingViewer>;

fn store() -> DocumentStore {
    DocumentStore::from_records([
        (
            "alpha-roster",
            DocumentRecord::new("[ENCRYPTED] Personnel Roster", AccessLevel::Restricted)
                .with_content("<p>Roster body</p>"),
        ),
        (
            "field-memo",
            DocumentRecord::new("Field memo", AccessLevel::Public)
                .with_content("<p>Director Hollender signed off.</p>"),
        ),
        ("gamma-log", DocumentRecord::new("Gamma log", AccessLevel::Public)),
    ])
}

fn instant_config() -> TitanConfig {
    let mut config = TitanConfig::default();
    config.typing = TypingSettings::instant();
    config
}

fn booted(config: &TitanConfig, viewer: RecordingViewer) -> (Controller, Instant) {
    let now = Instant::now();
    let mut controller = Controller::new(config, store(), RecordingTerminal::default(), viewer);
    controller.boot(now);
    // Long enough for any boot pacing
    let now = now + Duration::from_secs(60);
    assert!(controller.advance(now).is_none());
    assert!(!controller.is_rendering());
    (controller, now)
}

fn type_line(controller: &mut Controller, line: &str, now: Instant) {
    for c in line.chars() {
        controller.handle_key(Key::Char(c), now);
    }
    controller.handle_key(Key::Enter, now);
}

/// Submit a line and let its output play out. Returns the later instant.
fn run_line(controller: &mut Controller, line: &str, now: Instant) -> Instant {
    type_line(controller, line, now);
    let later = now + Duration::from_secs(10);
    let _ = controller.advance(later);
    later
}

fn output(controller: &Controller) -> &str {
    &controller.terminal().output
}

#[test]
fn test_boot_ends_at_guest_prompt() {
    let (controller, _) = booted(&TitanConfig::default(), RecordingViewer::default());
    let out = output(&controller);
    assert!(out.contains("INITIALIZING TITAN-1 SECURE UPLINK"));
    assert!(out.contains("CONNECTION ESTABLISHED."));
    assert!(out.contains("guest@TITAN-1"));
    assert_eq!(controller.session().role, Role::Guest);
}

#[test]
fn test_history_walks_back_and_returns_to_empty() {
    let config = instant_config();
    let (mut controller, mut now) = booted(&config, RecordingViewer::default());
    for line in ["help", "list", "bogus"] {
        now = run_line(&mut controller, line, now);
    }

    controller.handle_key(Key::Up, now);
    assert_eq!(controller.session().current_line, "bogus");
    controller.handle_key(Key::Up, now);
    controller.handle_key(Key::Up, now);
    assert_eq!(controller.session().current_line, "help");
    // Clamped at the oldest entry
    controller.handle_key(Key::Up, now);
    assert_eq!(controller.session().current_line, "help");

    for _ in 0..3 {
        controller.handle_key(Key::Down, now);
    }
    assert_eq!(controller.session().current_line, "");
    assert_eq!(controller.session().history_cursor, None);
}

#[test]
fn test_ghost_appears_and_clears() {
    let config = instant_config();
    let (mut controller, now) = booted(&config, RecordingViewer::default());
    for c in "access ga".chars() {
        controller.handle_key(Key::Char(c), now);
    }
    assert_eq!(
        controller.editor().ghost().map(|g| g.remaining.as_str()),
        Some("mma-log")
    );

    controller.handle_key(Key::Char('x'), now);
    assert!(controller.editor().ghost().is_none());
    assert_eq!(controller.session().current_line, "access gax");
}

#[test]
fn test_ghost_never_offers_restricted_codes_to_guest() {
    let config = instant_config();
    let (mut controller, now) = booted(&config, RecordingViewer::default());
    for c in "access al".chars() {
        controller.handle_key(Key::Char(c), now);
    }
    assert!(controller.editor().ghost().is_none());
    controller.handle_key(Key::Tab, now);
    assert_eq!(controller.session().current_line, "access al");
}

#[test]
fn test_admin_login_unlocks_build_and_unmasked_list() {
    let config = instant_config();
    let (mut controller, mut now) = booted(&config, RecordingViewer::default());

    now = run_line(&mut controller, "login titan", now);
    assert_eq!(controller.session().role, Role::Admin);
    assert!(output(&controller).contains("WELCOME BACK, COMMANDER."));
    assert!(output(&controller).contains("admin@TITAN-1"));

    now = run_line(&mut controller, "help", now);
    assert!(output(&controller).contains("Launch Document Builder"));

    run_line(&mut controller, "list", now);
    let out = output(&controller);
    assert!(out.contains("alpha-roster"));
    assert!(out.contains("Active personnel list."));
}

#[test]
fn test_wrong_password_keeps_guest() {
    let config = instant_config();
    let (mut controller, now) = booted(&config, RecordingViewer::default());
    run_line(&mut controller, "login wrongpass", now);
    assert_eq!(controller.session().role, Role::Guest);
    assert!(output(&controller).contains("AUTHENTICATION FAILED."));
}

#[test]
fn test_guest_list_hides_restricted_identity() {
    let config = instant_config();
    let (mut controller, now) = booted(&config, RecordingViewer::default());
    run_line(&mut controller, "list", now);
    let out = output(&controller);
    assert!(out.contains("--- TITAN-1 DATABASE INDEX ---"));
    assert!(out.contains("gamma-log"));
    assert!(out.contains(&redact_identifier("alpha-roster", Role::Guest)));
    assert!(!out.contains("alpha-roster"));
    assert!(!out.contains("Personnel"));
}

#[test]
fn test_access_by_redacted_form_matches_real_code() {
    let config = instant_config();
    let mut dispatcher = Dispatcher::new(&config);
    let mut session = Session::new();
    let mut store = store();
    let masked = redact_identifier("alpha-roster", Role::Guest);

    let by_mask = dispatcher.submit(&format!("access {}", masked), &mut session, &mut store);
    let by_code = dispatcher.submit("access alpha-roster", &mut session, &mut store);
    assert!(by_mask.opens_viewer());
    assert!(by_mask.transcript().contains("RESTRICTED FILE"));
    assert_eq!(by_mask.transcript(), by_code.transcript());
}

#[test]
fn test_skip_flushes_listing() {
    let mut config = TitanConfig::default();
    config.typing.jitter_ms = 0;
    let (mut controller, now) = booted(&config, RecordingViewer::default());

    type_line(&mut controller, "list", now);
    assert!(controller.is_rendering());
    assert!(!output(&controller).contains("------------------------------"));

    // Ordinary typing is ignored mid-animation
    controller.handle_key(Key::Char('z'), now);
    assert_eq!(controller.session().current_line, "");

    controller.handle_key(Key::Enter, now);
    assert!(!controller.is_rendering());
    let out = output(&controller);
    assert!(out.contains("------------------------------"));
    assert!(out.trim_end().ends_with('$'));
    assert!(!controller.session().skip_requested);
}

#[test]
fn test_listing_finishes_within_budget() {
    let mut config = TitanConfig::default();
    config.typing.jitter_ms = 0;
    let (mut controller, now) = booted(&config, RecordingViewer::default());

    type_line(&mut controller, "list", now);
    assert!(controller.is_rendering());
    controller.advance(now + config.typing.list_budget() + Duration::from_millis(50));
    assert!(!controller.is_rendering());
}

#[test]
fn test_access_without_code_never_opens_viewer() {
    let config = instant_config();
    let (mut controller, mut now) = booted(&config, RecordingViewer::default());
    now = run_line(&mut controller, "access", now);
    assert!(output(&controller).contains("Usage: access [codename]"));
    assert!(controller.viewer().shown.is_empty());

    run_line(&mut controller, "access nothing-here", now);
    assert!(output(&controller).contains("File 'nothing-here' not found."));
    assert!(controller.viewer().shown.is_empty());
}

#[test]
fn test_viewer_holds_prompt_until_closed() {
    let config = instant_config();
    let (mut controller, now) = booted(&config, RecordingViewer::default());
    let prompts_before = output(&controller).matches("guest@TITAN-1").count();

    type_line(&mut controller, "access field-memo", now);
    assert!(controller.session().viewer_open);
    let shown = &controller.viewer().shown[0];
    assert_eq!(shown.status, FooterStatus::Declassified);
    assert!(shown.body.contains("Director █████"));
    assert_eq!(output(&controller).matches("guest@TITAN-1").count(), prompts_before);

    // Keys belong to the viewer while it is open
    controller.handle_key(Key::Char('a'), now);
    controller.handle_key(Key::Down, now);
    assert_eq!(controller.session().current_line, "");
    assert_eq!(controller.viewer().scrolled, 1);

    controller.handle_key(Key::Escape, now);
    assert!(!controller.session().viewer_open);
    assert_eq!(controller.viewer().hidden, 1);
    assert_eq!(output(&controller).matches("guest@TITAN-1").count(), prompts_before + 1);
}

#[test]
fn test_guest_restricted_access_shows_stand_in() {
    let config = instant_config();
    let (mut controller, now) = booted(&config, RecordingViewer::default());
    run_line(&mut controller, "access alpha-roster", now);

    let shown = &controller.viewer().shown[0];
    assert_eq!(shown.status, FooterStatus::Unauthorized);
    assert!(!shown.body.contains("Roster"));
    assert!(!shown.heading.contains("alpha-roster"));
}

#[test]
fn test_viewer_failure_reports_and_continues() {
    let config = instant_config();
    let viewer = RecordingViewer {
        fail: true,
        ..RecordingViewer::default()
    };
    let (mut controller, now) = booted(&config, viewer);
    run_line(&mut controller, "access gamma-log", now);

    assert!(!controller.session().viewer_open);
    let out = output(&controller);
    assert!(out.contains("SYSTEM ERROR:"));
    assert!(out.trim_end().ends_with('$'));
}

#[test]
fn test_build_navigates_after_delay() {
    let mut config = instant_config();
    config.typing.navigation_delay_ms = 1000;
    let (mut controller, now) = booted(&config, RecordingViewer::default());

    let now = run_line(&mut controller, "login builder", now);
    type_line(&mut controller, "build", now);
    assert!(controller.advance(now).is_none());
    assert_eq!(controller.next_deadline(), Some(now + Duration::from_millis(1000)));

    let navigation = controller
        .advance(now + Duration::from_millis(1000))
        .expect("navigation due");
    assert_eq!(navigation.target, "./builder.html");
}

#[test]
fn test_clear_wipes_the_screen() {
    let config = instant_config();
    let (mut controller, now) = booted(&config, RecordingViewer::default());
    run_line(&mut controller, "clear", now);
    assert_eq!(controller.terminal().clears, 1);
    assert!(!output(&controller).contains("CONNECTION ESTABLISHED."));
    assert!(output(&controller).contains("guest@TITAN-1"));
}

#[test]
fn test_pasted_redacted_code_opens_same_document() {
    let config = instant_config();
    let masked = redact_identifier("alpha-roster", Role::Guest);

    let (mut pasted, now) = booted(&config, RecordingViewer::default());
    pasted.handle_text(&format!("access {}\r", masked), now);
    let _ = pasted.advance(now + Duration::from_secs(10));

    let (mut typed, now) = booted(&config, RecordingViewer::default());
    run_line(&mut typed, "access alpha-roster", now);

    assert!(!output(&pasted).contains("not found"));
    assert_eq!(pasted.session().history.last(), Some(&format!("access {}", masked)));
    assert_eq!(pasted.viewer().shown.len(), 1);
    assert_eq!(pasted.viewer().shown, typed.viewer().shown);
}

#[test]
fn test_skip_midway_does_not_replay_listing() {
    let mut config = TitanConfig::default();
    config.typing.jitter_ms = 0;
    // Force line-by-line pacing: 3 entries over 3s
    config.typing.min_char_delay_ms = 1000;
    let (mut controller, now) = booted(&config, RecordingViewer::default());
    let masked = redact_identifier("alpha-roster", Role::Guest);

    type_line(&mut controller, "list", now);
    let midway = now + Duration::from_secs(1);
    assert!(controller.advance(midway).is_none());
    assert!(controller.is_rendering());

    let before = output(&controller).to_string();
    assert!(before.contains("field-memo"));
    assert!(before.contains("gamma-log"));
    assert!(!before.contains(&masked));

    controller.handle_key(Key::Enter, midway);
    let after = output(&controller);
    assert!(after.starts_with(&before));
    for entry in ["field-memo", "gamma-log", masked.as_str(), "DATABASE INDEX"] {
        assert_eq!(after.matches(entry).count(), 1, "{}", entry);
    }
    assert!(after.contains("------------------------------"));
    assert!(after.trim_end().ends_with('$'));
    assert!(!controller.is_rendering());
    assert_eq!(controller.next_deadline(), None);
}
