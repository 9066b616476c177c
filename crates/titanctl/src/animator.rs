//! Typing Animator
//!
//! Command handlers describe their output as a [`Script`]. The script is
//! expanded into a queue of output units, each followed by a delay, and the
//! controller drains that queue from its host loop. Nothing here sleeps:
//! the host asks for [`Playback::next_deadline`] and polls for keys until
//! then, so key events interleave with output on one thread.
//!
//! Skip does not abort the queue. It only makes every remaining unit due
//! immediately.

use crate::viewer::DocumentView;
use rand::Rng;
use std::collections::VecDeque;
use std::time::{Duration, Instant};
use titan_common::config::TypingSettings;

/// One piece of command output, before pacing
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// Written at once
    Write(String),
    /// Typed glyph by glyph
    Type { text: String, delay: Duration },
    /// Lines streamed within the listing budget
    Listing(Vec<String>),
    Pause(Duration),
    Clear,
    OpenViewer(Box<DocumentView>),
    /// Leave the session for `target` once `after` has passed
    Navigate { target: String, after: Duration },
    Prompt,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Script {
    steps: Vec<Step>,
}

impl Script {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn write(mut self, text: impl Into<String>) -> Self {
        self.steps.push(Step::Write(text.into()));
        self
    }

    pub fn type_text(mut self, text: impl Into<String>, delay: Duration) -> Self {
        self.steps.push(Step::Type {
            text: text.into(),
            delay,
        });
        self
    }

    pub fn listing(mut self, lines: Vec<String>) -> Self {
        self.steps.push(Step::Listing(lines));
        self
    }

    pub fn pause(mut self, duration: Duration) -> Self {
        self.steps.push(Step::Pause(duration));
        self
    }

    pub fn clear(mut self) -> Self {
        self.steps.push(Step::Clear);
        self
    }

    pub fn open_viewer(mut self, view: DocumentView) -> Self {
        self.steps.push(Step::OpenViewer(Box::new(view)));
        self
    }

    pub fn navigate(mut self, target: impl Into<String>, after: Duration) -> Self {
        self.steps.push(Step::Navigate {
            target: target.into(),
            after,
        });
        self
    }

    pub fn prompt(mut self) -> Self {
        self.steps.push(Step::Prompt);
        self
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// All text the script would put on the terminal, in order
    pub fn transcript(&self) -> String {
        let mut out = String::new();
        for step in &self.steps {
            match step {
                Step::Write(text) | Step::Type { text, .. } => out.push_str(text),
                Step::Listing(lines) => lines.iter().for_each(|l| out.push_str(l)),
                _ => {}
            }
        }
        out
    }

    pub fn opens_viewer(&self) -> bool {
        self.steps.iter().any(|s| matches!(s, Step::OpenViewer(_)))
    }
}

/// What the controller does with a unit
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Write(String),
    Clear,
    OpenViewer(Box<DocumentView>),
    Navigate { target: String, after: Duration },
    Prompt,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Unit {
    pub action: Action,
    /// Wait after this unit before the next one is due
    pub delay: Duration,
}

impl Unit {
    fn new(action: Action, delay: Duration) -> Self {
        Self { action, delay }
    }
}

/// Granularity chosen for a listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingMode {
    Immediate,
    PerGlyph(Duration),
    PerLine(Duration),
}

/// Fit a listing into `budget`. Per-glyph pacing is preferred; when that
/// would need less than `floor` per glyph, fall back to per-line pacing.
pub fn listing_mode(lines: &[String], budget: Duration, floor: Duration) -> ListingMode {
    let glyph_count: usize = lines.iter().map(|l| glyphs(l).len()).sum();
    if lines.is_empty() || glyph_count == 0 || budget.is_zero() {
        return ListingMode::Immediate;
    }

    let per_glyph = budget / clamp_u32(glyph_count);
    if per_glyph >= floor && !per_glyph.is_zero() {
        ListingMode::PerGlyph(per_glyph)
    } else {
        ListingMode::PerLine(budget / clamp_u32(lines.len()))
    }
}

fn clamp_u32(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

/// Split text into visible glyphs. Escape sequences never stand alone:
/// they travel with the glyph that follows them (or the last one).
pub fn glyphs(text: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut start = 0;
    let mut prev_start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((_, c)) = chars.next() {
        if c == '\u{1b}' {
            if let Some(&(_, '[')) = chars.peek() {
                chars.next();
                for (_, p) in chars.by_ref() {
                    if ('@'..='~').contains(&p) {
                        break;
                    }
                }
            }
            continue;
        }
        let end = chars.peek().map_or(text.len(), |&(i, _)| i);
        out.push(&text[start..end]);
        prev_start = start;
        start = end;
    }

    if start < text.len() {
        if out.pop().is_some() {
            out.push(&text[prev_start..]);
        } else {
            out.push(&text[start..]);
        }
    }
    out
}

/// Turns scripts into timed units
#[derive(Debug, Clone)]
pub struct Pacing {
    jitter: Duration,
    list_budget: Duration,
    min_char_delay: Duration,
}

impl Pacing {
    pub fn new(settings: &TypingSettings) -> Self {
        Self {
            jitter: settings.jitter(),
            list_budget: settings.list_budget(),
            min_char_delay: settings.min_char_delay(),
        }
    }

    pub fn expand(&self, script: Script) -> VecDeque<Unit> {
        let mut units = VecDeque::new();
        for step in script.steps {
            match step {
                Step::Write(text) => units.push_back(Unit::new(Action::Write(text), Duration::ZERO)),
                Step::Type { text, delay } => {
                    for glyph in glyphs(&text) {
                        units.push_back(Unit::new(
                            Action::Write(glyph.to_string()),
                            self.jittered(delay),
                        ));
                    }
                }
                Step::Listing(lines) => self.expand_listing(lines, &mut units),
                Step::Pause(duration) => match units.back_mut() {
                    Some(last) => last.delay += duration,
                    None => units.push_back(Unit::new(Action::Write(String::new()), duration)),
                },
                Step::Clear => units.push_back(Unit::new(Action::Clear, Duration::ZERO)),
                Step::OpenViewer(view) => {
                    units.push_back(Unit::new(Action::OpenViewer(view), Duration::ZERO))
                }
                Step::Navigate { target, after } => units.push_back(Unit::new(
                    Action::Navigate { target, after },
                    Duration::ZERO,
                )),
                Step::Prompt => units.push_back(Unit::new(Action::Prompt, Duration::ZERO)),
            }
        }
        units
    }

    fn expand_listing(&self, lines: Vec<String>, units: &mut VecDeque<Unit>) {
        match listing_mode(&lines, self.list_budget, self.min_char_delay) {
            ListingMode::Immediate => {
                for line in lines {
                    units.push_back(Unit::new(Action::Write(line), Duration::ZERO));
                }
            }
            ListingMode::PerLine(delay) => {
                for line in lines {
                    units.push_back(Unit::new(Action::Write(line), delay));
                }
            }
            ListingMode::PerGlyph(delay) => {
                for line in &lines {
                    for glyph in glyphs(line) {
                        units.push_back(Unit::new(Action::Write(glyph.to_string()), delay));
                    }
                }
            }
        }
    }

    fn jittered(&self, delay: Duration) -> Duration {
        if delay.is_zero() || self.jitter.is_zero() {
            return delay;
        }
        let extra = rand::thread_rng().gen_range(0..=self.jitter.as_millis() as u64);
        delay + Duration::from_millis(extra)
    }
}

/// The in-flight queue of output units
#[derive(Debug, Default)]
pub struct Playback {
    queue: VecDeque<Unit>,
    ready_at: Option<Instant>,
}

impl Playback {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the queue and make its first unit due now
    pub fn start(&mut self, units: VecDeque<Unit>, now: Instant) {
        self.queue = units;
        self.ready_at = Some(now);
    }

    pub fn is_idle(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        if self.queue.is_empty() {
            None
        } else {
            self.ready_at
        }
    }

    /// Rebase timing after the queue was held (e.g. while the viewer was open)
    pub fn resume(&mut self, now: Instant) {
        if !self.queue.is_empty() {
            self.ready_at = Some(now);
        }
    }

    /// Pop the next unit if it is due. With `skip`, every unit is due.
    ///
    /// Deadlines accumulate from the previous deadline rather than from
    /// `now`, so a late host catches up instead of stretching the total.
    pub fn next_due(&mut self, now: Instant, skip: bool) -> Option<Action> {
        let ready_at = self.ready_at.unwrap_or(now);
        if !skip && now < ready_at {
            return None;
        }
        let unit = self.queue.pop_front()?;
        self.ready_at = Some(if skip { now } else { ready_at + unit.delay });
        Some(unit.action)
    }
}
