//! TUI views and rendering
//!
//! The conversation area is a pure function of the session: request bubble,
//! activity line, blueprint card, generated workflow, error banner - in the
//! order the conversation produced them.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::session::Phase;

use super::state::{AppState, GENERATING_STATUS, PLANNING_STATUS};

/// Main render function
pub fn render(state: &AppState, frame: &mut Frame) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Conversation
            Constraint::Length(3), // Input
            Constraint::Length(1), // Footer
        ])
        .split(frame.area());

    render_header(state, frame, chunks[0]);
    render_conversation(state, frame, chunks[1]);
    render_input(state, frame, chunks[2]);
    render_footer(state, frame, chunks[3]);
}

/// Render the header bar
fn render_header(state: &AppState, frame: &mut Frame, area: Rect) {
    let phase = state.session.phase();
    let phase_color = match phase {
        Phase::Idle => Color::Gray,
        Phase::Planning | Phase::Generating => Color::Yellow,
        Phase::Review => Color::Cyan,
        Phase::Done => Color::Green,
        Phase::Error => Color::Red,
    };

    let header = Paragraph::new(Line::from(vec![
        Span::styled("FlowForge ", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
        Span::raw("│ "),
        Span::styled(phase.to_string(), Style::default().fg(phase_color)),
    ]))
    .block(Block::default().borders(Borders::ALL).title(" Workflow Chat "));

    frame.render_widget(header, area);
}

/// Render the conversation area
fn render_conversation(state: &AppState, frame: &mut Frame, area: Rect) {
    let mut lines: Vec<Line> = Vec::new();
    let session = &state.session;

    // User request bubble
    if !session.user_request().is_empty() {
        lines.push(Line::from(vec![
            Span::styled("You ▸ ", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
            Span::raw(session.user_request().to_string()),
        ]));
        lines.push(Line::from(""));
    }

    // Planning activity
    if session.phase() == Phase::Planning {
        lines.push(activity_line(state.spinner(), PLANNING_STATUS));
    }

    // Blueprint card
    if let Some(plan) = session.plan() {
        lines.push(Line::from(Span::styled(
            "Workflow Blueprint",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(""));

        lines.push(section_title("Summary"));
        lines.push(Line::from(format!("  {}", plan.summary)));
        lines.push(Line::from(""));

        // Pre-flight checks rendered distinctly as warnings
        if !plan.questions_to_user.is_empty() {
            lines.push(Line::from(Span::styled(
                "  Pre-flight Checks",
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            )));
            for question in &plan.questions_to_user {
                lines.push(Line::from(Span::styled(
                    format!("  ! {}", question),
                    Style::default().fg(Color::Yellow),
                )));
            }
            lines.push(Line::from(Span::styled(
                "  Ensure these conditions are met, otherwise the workflow might fail.",
                Style::default().fg(Color::Yellow).add_modifier(Modifier::ITALIC),
            )));
            lines.push(Line::from(""));
        }

        lines.push(section_title("Execution Flow"));
        for (index, node) in plan.nodes.iter().enumerate() {
            lines.push(Line::from(vec![
                Span::styled(
                    format!("  {:>2}. ", index + 1),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(node.name.clone(), Style::default().add_modifier(Modifier::BOLD)),
                Span::styled(format!("  [{}]", node.r#type), Style::default().fg(Color::Cyan)),
            ]));
            lines.push(Line::from(Span::styled(
                format!("      {}", node.purpose),
                Style::default().fg(Color::Gray),
            )));
        }
        lines.push(Line::from(""));

        if !plan.connections_logic.is_empty() {
            lines.push(section_title("Logic & Data Flow"));
            lines.push(Line::from(format!("  {}", plan.connections_logic)));
            lines.push(Line::from(""));
        }
    }

    // Generating activity
    if session.phase() == Phase::Generating {
        lines.push(activity_line(state.spinner(), GENERATING_STATUS));
    }

    // Generated workflow document
    if let Some(artifact) = session.artifact() {
        lines.push(Line::from(Span::styled(
            "Generated Workflow",
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        )));
        let pretty = serde_json::to_string_pretty(artifact).unwrap_or_else(|_| artifact.to_string());
        for json_line in pretty.lines() {
            lines.push(Line::from(format!("  {}", json_line)));
        }
        lines.push(Line::from(""));
    }

    // Error banner
    if let Some(error) = session.last_error() {
        lines.push(Line::from(vec![
            Span::styled("✗ ", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
            Span::styled(error.to_string(), Style::default().fg(Color::Red)),
        ]));
        lines.push(Line::from(Span::styled(
            "  Submit a new request to try again.",
            Style::default().fg(Color::DarkGray),
        )));
    }

    if lines.is_empty() {
        lines.push(Line::from(Span::styled(
            "Describe your workflow logic (e.g., 'Every hour check RSS and post to Slack if related to AI')",
            Style::default().fg(Color::DarkGray),
        )));
    }

    let conversation = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Conversation "))
        .wrap(Wrap { trim: false })
        .scroll((state.scroll, 0));

    frame.render_widget(conversation, area);
}

/// Render the input bar
fn render_input(state: &AppState, frame: &mut Frame, area: Rect) {
    let (title, content, style) = if state.confirmation_enabled() {
        (
            " Review ",
            "Press Enter to confirm & generate the workflow".to_string(),
            Style::default().fg(Color::Cyan),
        )
    } else if state.session.phase().is_waiting() {
        (
            " New request (disabled) ",
            "Waiting for the planning service...".to_string(),
            Style::default().fg(Color::DarkGray),
        )
    } else {
        (" New request ", format!("{}█", state.input), Style::default())
    };

    let input = Paragraph::new(Line::from(Span::styled(content, style)))
        .block(Block::default().borders(Borders::ALL).title(title));

    frame.render_widget(input, area);
}

/// Render the footer key hints
fn render_footer(state: &AppState, frame: &mut Frame, area: Rect) {
    let mut spans = vec![
        Span::styled(" Esc", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
        Span::raw(" Quit "),
        Span::styled(" ↑↓", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
        Span::raw(" Scroll "),
    ];

    if state.confirmation_enabled() {
        spans.push(Span::styled(
            " Enter",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::raw(" Confirm "));
    } else if state.submission_enabled() {
        spans.push(Span::styled(
            " Enter",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::raw(" Submit "));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// A spinner + status text activity line
fn activity_line(spinner: &str, status: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{} ", spinner), Style::default().fg(Color::Yellow)),
        Span::styled(status.to_string(), Style::default().fg(Color::Gray)),
    ])
}

/// A dim uppercase section title within the blueprint card
fn section_title(title: &str) -> Line<'static> {
    Line::from(Span::styled(
        format!("  {}", title.to_uppercase()),
        Style::default().fg(Color::DarkGray).add_modifier(Modifier::BOLD),
    ))
}
