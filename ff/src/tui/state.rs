//! TUI application state
//!
//! Pure data structures for the TUI. No rendering logic here. The chat
//! transcript is derived entirely from the [`Session`] - the screen shows
//! one conversation at a time, exactly like the session itself.

use crate::session::{Phase, Session};

/// Spinner frames for in-flight activity lines
pub const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Activity line shown while the blueprint is being designed
pub const PLANNING_STATUS: &str = "Architect is designing your workflow...";

/// Activity line shown while the workflow document is being generated
pub const GENERATING_STATUS: &str = "Coder is writing the workflow implementation...";

/// Main TUI application state
#[derive(Debug, Default)]
pub struct AppState {
    /// The conversation being displayed and driven
    pub session: Session,

    /// Current input buffer
    pub input: String,

    /// Submission queued for the runner to dispatch
    pub pending_submit: Option<String>,

    /// Confirmation queued for the runner to dispatch
    pub pending_confirm: bool,

    /// Scroll offset for the conversation area
    pub scroll: u16,

    /// Current spinner frame index
    pub spinner_frame: usize,

    /// Should the app quit
    pub should_quit: bool,
}

impl AppState {
    /// Create new AppState
    pub fn new() -> Self {
        Self::default()
    }

    /// Tick - called on each frame update
    pub fn tick(&mut self) {
        if self.session.phase().is_waiting() {
            self.spinner_frame = (self.spinner_frame + 1) % SPINNER_FRAMES.len();
        }
    }

    /// Current spinner glyph
    pub fn spinner(&self) -> &'static str {
        SPINNER_FRAMES[self.spinner_frame]
    }

    /// Whether typing a new request is allowed right now
    pub fn submission_enabled(&self) -> bool {
        self.session.phase().accepts_submission()
    }

    /// Whether confirming the blueprint is allowed right now
    pub fn confirmation_enabled(&self) -> bool {
        self.session.phase() == Phase::Review
    }

    /// Queue the input buffer as a submission
    ///
    /// Blank input and disallowed phases leave everything untouched; the
    /// session applies the same guard again when the runner dispatches.
    pub fn queue_submit(&mut self) {
        if !self.submission_enabled() || self.input.trim().is_empty() {
            return;
        }
        self.pending_submit = Some(std::mem::take(&mut self.input));
        self.scroll = 0;
    }

    /// Queue a confirmation of the reviewed blueprint
    pub fn queue_confirm(&mut self) {
        if self.confirmation_enabled() {
            self.pending_confirm = true;
        }
    }
}
