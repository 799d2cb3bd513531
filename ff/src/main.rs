//! FlowForge - conversational workflow generator client
//!
//! CLI entry point for the chat TUI and the terminal planning flows.

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::Parser;
use colored::Colorize;
use eyre::{Context, Result, bail};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tracing::info;

use flowforge::cli::{Cli, Command};
use flowforge::config::Config;
use flowforge::planner::{HttpPlanner, PlannerClient, WorkflowPlan};
use flowforge::session::{Phase, SessionController};
use flowforge::tui;

fn setup_logging(verbose: bool) -> Result<()> {
    // Create log directory
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("flowforge")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    // Write to a log file, not stdout/stderr - the TUI owns the terminal
    let level = if verbose { tracing::Level::DEBUG } else { tracing::Level::INFO };
    let log_file = fs::File::create(log_dir.join("flowforge.log")).context("Failed to create log file")?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    info!("Logging initialized (verbose: {})", verbose);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose).context("Failed to setup logging")?;

    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    config.validate()?;

    info!("FlowForge loaded config: planner={}", config.planner.base_url);

    match cli.command {
        None | Some(Command::Tui) => cmd_tui(&config).await,
        Some(Command::Plan { request, yes, output }) => cmd_plan(&config, request, yes, output).await,
        Some(Command::Health) => cmd_health(&config).await,
    }
}

/// Launch the chat TUI
async fn cmd_tui(config: &Config) -> Result<()> {
    let planner: Arc<dyn PlannerClient> = Arc::new(HttpPlanner::from_config(&config.planner)?);
    tui::run(config, planner).await
}

/// Plan and generate a workflow from the terminal
async fn cmd_plan(config: &Config, request: Option<String>, yes: bool, output: Option<PathBuf>) -> Result<()> {
    let planner: Arc<dyn PlannerClient> = Arc::new(HttpPlanner::from_config(&config.planner)?);

    match request {
        Some(text) => plan_once(planner, &text, yes, output.as_deref()).await,
        None => plan_interactive(planner, yes).await,
    }
}

/// Check that the planning service is reachable
async fn cmd_health(config: &Config) -> Result<()> {
    let planner = HttpPlanner::from_config(&config.planner)?;

    match planner.health().await {
        Ok(health) => {
            println!(
                "{} {} ({})",
                "ok".bright_green(),
                config.planner.base_url,
                if health.service.is_empty() { health.status } else { health.service }
            );
            Ok(())
        }
        Err(e) => {
            bail!("Planning service at {} is unreachable: {}", config.planner.base_url, e);
        }
    }
}

/// One-shot flow: plan, review on stdin, generate, emit JSON
async fn plan_once(planner: Arc<dyn PlannerClient>, text: &str, yes: bool, output: Option<&Path>) -> Result<()> {
    let mut controller = SessionController::new(planner);

    if !controller.submit(text).await {
        bail!("The request must not be empty");
    }

    if controller.session().phase() == Phase::Error {
        bail!("{}", controller.session().last_error().unwrap_or("Plan creation failed"));
    }

    if let Some(plan) = controller.session().plan() {
        print_blueprint(plan);
    }

    if !yes && !read_yes_no("Generate this workflow? [y/N] ")? {
        println!("Discarded.");
        return Ok(());
    }

    controller.confirm().await;

    if controller.session().phase() == Phase::Error {
        bail!("{}", controller.session().last_error().unwrap_or("Workflow generation failed"));
    }

    let Some(artifact) = controller.session().artifact() else {
        bail!("The planning service returned no workflow document");
    };

    let pretty = serde_json::to_string_pretty(artifact)?;
    match output {
        Some(path) => {
            fs::write(path, &pretty).context(format!("Failed to write {}", path.display()))?;
            println!("Workflow written to {}", path.display());
        }
        None => println!("{}", pretty),
    }

    Ok(())
}

/// Interactive flow: rustyline loop, one conversation per accepted request
async fn plan_interactive(planner: Arc<dyn PlannerClient>, yes: bool) -> Result<()> {
    print_welcome();

    let mut rl = DefaultEditor::new().map_err(|e| eyre::eyre!("Failed to initialize readline: {}", e))?;

    loop {
        let readline = rl.readline(&format!("{} ", ">".bright_green()));

        match readline {
            Ok(line) => {
                let input = line.trim();
                if input.is_empty() {
                    continue;
                }

                let _ = rl.add_history_entry(input);

                match input {
                    "/help" | "/h" => {
                        print_help();
                        continue;
                    }
                    "/quit" | "/q" | "/exit" => break,
                    _ => {}
                }

                // Each accepted request is a fresh conversation
                let mut controller = SessionController::new(Arc::clone(&planner));
                run_conversation(&mut controller, input, yes, &mut rl).await?;
            }
            Err(ReadlineError::Interrupted) => {
                // Ctrl+C - just show new prompt
                println!("^C");
                continue;
            }
            Err(ReadlineError::Eof) => {
                // Ctrl+D - exit
                println!();
                break;
            }
            Err(err) => {
                return Err(eyre::eyre!("Readline error: {}", err));
            }
        }
    }

    println!("Goodbye!");
    Ok(())
}

/// Drive a single conversation to done, error, or discard
async fn run_conversation(
    controller: &mut SessionController,
    input: &str,
    yes: bool,
    rl: &mut DefaultEditor,
) -> Result<()> {
    println!("{}", "Architect is designing your workflow...".dimmed());
    controller.submit(input).await;

    if controller.session().phase() == Phase::Error {
        print_error(controller.session().last_error().unwrap_or("Plan creation failed"));
        return Ok(());
    }

    if let Some(plan) = controller.session().plan() {
        print_blueprint(plan);
    }

    if !yes {
        let answer = match rl.readline(&"Generate this workflow? [y/N] ".bold().to_string()) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => String::new(),
            Err(err) => return Err(eyre::eyre!("Readline error: {}", err)),
        };
        if !is_yes(&answer) {
            println!("{}", "Discarded.".dimmed());
            return Ok(());
        }
    }

    println!("{}", "Coder is writing the workflow implementation...".dimmed());
    controller.confirm().await;

    if controller.session().phase() == Phase::Error {
        print_error(controller.session().last_error().unwrap_or("Workflow generation failed"));
        return Ok(());
    }

    if let Some(artifact) = controller.session().artifact() {
        let path = write_artifact_file(artifact, controller.session().user_request())?;
        println!("{} {}", "Workflow written to".bright_green(), path.display());
    }

    Ok(())
}

/// Print welcome message
fn print_welcome() {
    println!();
    println!("{}", "FlowForge Interactive Planner".bright_cyan().bold());
    println!("Describe your workflow logic (e.g., 'Every hour check RSS and post to Slack if related to AI')");
    println!("Type {} for help, {} to quit", "/help".yellow(), "/quit".yellow());
    println!();
}

/// Print help message
fn print_help() {
    println!();
    println!("{}", "Available Commands:".bright_cyan());
    println!("  {:10} Show this help", "/help".yellow());
    println!("  {:10} Exit the planner", "/quit".yellow());
    println!();
    println!("Anything else is sent to the planning service as an automation request.");
    println!("Generated workflows are saved under workflows/ as importable JSON.");
    println!();
}

/// Print a blueprint for terminal review
fn print_blueprint(plan: &WorkflowPlan) {
    println!();
    println!("{}", "Workflow Blueprint".bright_cyan().bold());
    println!();
    println!("{}", "Summary".bright_cyan());
    println!("  {}", plan.summary);

    if !plan.questions_to_user.is_empty() {
        println!();
        println!("{}", "Pre-flight Checks".yellow().bold());
        for question in &plan.questions_to_user {
            println!("  {} {}", "!".yellow(), question);
        }
        println!(
            "  {}",
            "Ensure these conditions are met, otherwise the workflow might fail.".yellow().italic()
        );
    }

    println!();
    println!("{}", "Execution Flow".bright_cyan());
    for (index, node) in plan.nodes.iter().enumerate() {
        println!(
            "  {}. {} {}",
            index + 1,
            node.name.bold(),
            format!("[{}]", node.r#type).cyan()
        );
        println!("     {}", node.purpose.dimmed());
    }

    if !plan.connections_logic.is_empty() {
        println!();
        println!("{}", "Logic & Data Flow".bright_cyan());
        println!("  {}", plan.connections_logic);
    }
    println!();
}

/// Print a failure banner
fn print_error(message: &str) {
    println!("{} {}", "✗".bright_red().bold(), message.bright_red());
    println!("{}", "Submit a new request to try again.".dimmed());
}

/// Prompt on stdout and read a y/N answer from stdin
fn read_yes_no(prompt: &str) -> Result<bool> {
    print!("{}", prompt.bold());
    io::stdout().flush()?;

    let stdin = io::stdin();
    let handle = stdin.lock();
    let answer = match handle.lines().next() {
        Some(Ok(line)) => line,
        Some(Err(e)) => return Err(e.into()),
        // EOF - treat as decline
        None => String::new(),
    };

    Ok(is_yes(&answer))
}

/// Interpret a confirmation answer
fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

/// Write the generated workflow under workflows/ with a timestamped name
fn write_artifact_file(artifact: &serde_json::Value, request: &str) -> Result<PathBuf> {
    let dir = PathBuf::from("workflows");
    fs::create_dir_all(&dir).context("Failed to create workflows directory")?;

    let slug = slugify(request);
    let timestamp = chrono::Utc::now().format("%Y%m%d-%H%M%S");
    let path = dir.join(format!("{}-{}.json", timestamp, slug));

    let pretty = serde_json::to_string_pretty(artifact)?;
    fs::write(&path, pretty).context("Failed to write workflow file")?;

    Ok(path)
}

/// Slugify a string for use in filenames
fn slugify(s: &str) -> String {
    s.to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '-' { c } else { '-' })
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
        .chars()
        .take(50)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Hello World"), "hello-world");
        assert_eq!(slugify("Every hour check RSS!"), "every-hour-check-rss");
        assert_eq!(slugify("  Multiple   Spaces  "), "multiple-spaces");
    }

    #[test]
    fn test_is_yes() {
        assert!(is_yes("y"));
        assert!(is_yes("Y"));
        assert!(is_yes(" yes "));
        assert!(!is_yes(""));
        assert!(!is_yes("n"));
        assert!(!is_yes("nope"));
    }
}
