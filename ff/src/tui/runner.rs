//! TUI Runner - main loop that owns the terminal and the planner
//!
//! The TuiRunner is responsible for:
//! - Dispatching events to App for handling
//! - Spawning one background task per planner call (never more than one -
//!   the session guards enforce single-flight)
//! - Applying planner results to the session
//! - Rendering each loop iteration

use std::sync::Arc;
use std::time::Duration;

use eyre::Result;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::planner::{PlanCreated, PlannerClient, PlannerError};

use super::Tui;
use super::app::App;
use super::events::{Event, EventHandler};
use super::views;

/// Result from a background planner task
#[derive(Debug)]
enum PlannerTaskResult {
    /// Blueprint creation resolved
    Plan(Result<PlanCreated, PlannerError>),
    /// Workflow generation resolved
    Artifact(Result<serde_json::Value, PlannerError>),
}

/// TUI Runner that manages the terminal and event loop
pub struct TuiRunner {
    /// Application state
    app: App,
    /// Terminal handle
    terminal: Tui,
    /// Planning service client
    planner: Arc<dyn PlannerClient>,
    /// Event handler
    event_handler: EventHandler,
    /// Receiver for the in-flight planner task, if any
    result_rx: Option<mpsc::Receiver<PlannerTaskResult>>,
    /// Handle for the in-flight planner task, if any
    planner_task: Option<JoinHandle<()>>,
}

impl TuiRunner {
    /// Create a new TuiRunner
    pub fn new(terminal: Tui, planner: Arc<dyn PlannerClient>, tick_rate: Duration) -> Self {
        Self {
            app: App::new(),
            terminal,
            planner,
            event_handler: EventHandler::new(tick_rate),
            result_rx: None,
            planner_task: None,
        }
    }

    /// Run the TUI main loop
    pub async fn run(&mut self) -> Result<()> {
        debug!("TuiRunner::run: entering main loop");
        loop {
            // Draw the UI
            self.terminal.draw(|frame| views::render(self.app.state(), frame))?;

            // Wait for either a terminal event or a planner result
            tokio::select! {
                event = self.event_handler.next() => {
                    match event? {
                        Event::Tick => {
                            self.handle_tick();
                        }
                        Event::Key(key_event) => {
                            if self.app.handle_key(key_event) {
                                break;
                            }
                        }
                        Event::Resize(_, _) => {}
                    }
                }
                Some(result) = async {
                    if let Some(rx) = &mut self.result_rx {
                        rx.recv().await
                    } else {
                        std::future::pending::<Option<PlannerTaskResult>>().await
                    }
                } => {
                    self.handle_planner_result(result);
                }
            }

            if self.app.state().should_quit {
                debug!("TuiRunner::run: should_quit is true, breaking");
                break;
            }
        }

        debug!("TuiRunner::run: exiting");
        Ok(())
    }

    /// Handle tick event - advance the spinner and dispatch queued actions
    fn handle_tick(&mut self) {
        self.app.state_mut().tick();

        if let Some(text) = self.app.state_mut().pending_submit.take() {
            self.start_plan_request(&text);
        }

        if std::mem::take(&mut self.app.state_mut().pending_confirm) {
            self.start_confirm_request();
        }
    }

    /// Start blueprint creation in a background task
    fn start_plan_request(&mut self, text: &str) {
        // The session applies the real guard: no-op while a request is in
        // flight or a blueprint is under review
        let Some(request) = self.app.state_mut().session.submit(text) else {
            debug!("start_plan_request: submission rejected by session");
            return;
        };

        info!(request_len = request.len(), "Requesting blueprint");

        let planner = Arc::clone(&self.planner);
        let (result_tx, result_rx) = mpsc::channel::<PlannerTaskResult>(1);
        self.result_rx = Some(result_rx);

        self.planner_task = Some(tokio::spawn(async move {
            let result = planner.create_plan(&request).await;
            let _ = result_tx.send(PlannerTaskResult::Plan(result)).await;
        }));
    }

    /// Start workflow generation in a background task
    fn start_confirm_request(&mut self) {
        let Some(thread_id) = self.app.state_mut().session.confirm() else {
            debug!("start_confirm_request: confirmation rejected by session");
            return;
        };

        info!(%thread_id, "Confirming blueprint");

        let planner = Arc::clone(&self.planner);
        let (result_tx, result_rx) = mpsc::channel::<PlannerTaskResult>(1);
        self.result_rx = Some(result_rx);

        self.planner_task = Some(tokio::spawn(async move {
            let result = planner.confirm_plan(&thread_id).await;
            let _ = result_tx.send(PlannerTaskResult::Artifact(result)).await;
        }));
    }

    /// Apply a planner task result to the session
    fn handle_planner_result(&mut self, result: PlannerTaskResult) {
        let session = &mut self.app.state_mut().session;

        match result {
            PlannerTaskResult::Plan(Ok(created)) => {
                info!(thread_id = %created.thread_id, "Blueprint ready for review");
                session.complete_planning(created.thread_id, created.plan);
            }
            PlannerTaskResult::Plan(Err(e)) => {
                warn!(message = %e.message(), "Blueprint creation failed");
                session.fail(&e);
            }
            PlannerTaskResult::Artifact(Ok(artifact)) => {
                info!("Workflow document generated");
                session.complete_generation(artifact);
            }
            PlannerTaskResult::Artifact(Err(e)) => {
                warn!(message = %e.message(), "Workflow generation failed");
                session.fail(&e);
            }
        }

        self.result_rx = None;
        self.planner_task = None;
    }
}
