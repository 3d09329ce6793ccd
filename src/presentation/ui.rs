use crate::application::{App, AppMode, Focus};
use crate::domain::{Field, SubmissionOutcome};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use std::time::Instant;

const FORM_WIDTH: u16 = 60;
const SPINNER: [&str; 4] = ["|", "/", "-", "\\"];

pub const SUCCESS_MESSAGE: &str = "Signup completed successfully!";
pub const ERROR_MESSAGE: &str = "Signup failed. Please try again.";

pub fn render_ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(f.area());

    render_header(f, chunks[0]);
    match app.mode {
        AppMode::Landing => render_landing(f, chunks[1]),
        AppMode::Form => render_form(f, app, chunks[1]),
    }
    render_status_bar(f, app, chunks[2]);
}

fn render_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new("signup - Terminal Signup Form")
        .style(Style::default().fg(Color::Cyan));
    f.render_widget(header, area);
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn render_landing(f: &mut Frame, area: Rect) {
    let popup = centered(area, FORM_WIDTH, 7);
    let lines = vec![
        Line::from("Welcome to the signup form demo").style(Style::default().add_modifier(Modifier::BOLD)),
        Line::from(""),
        Line::from("Press Enter to open the signup form."),
        Line::from(""),
        Line::from("[ Sign up ]").style(Style::default().bg(Color::Blue).fg(Color::White)),
    ];

    let landing = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Welcome"));
    f.render_widget(Clear, popup);
    f.render_widget(landing, popup);
}

fn render_form(f: &mut Frame, app: &App, area: Rect) {
    let height = Field::ALL.len() as u16 * 4 + 3 + 3 + 2;
    let form_area = centered(area, FORM_WIDTH, height);

    let block = Block::default().borders(Borders::ALL).title("User signup");
    let inner = block.inner(form_area);
    f.render_widget(block, form_area);

    let mut constraints: Vec<Constraint> = Field::ALL
        .iter()
        .flat_map(|_| [Constraint::Length(3), Constraint::Length(1)])
        .collect();
    constraints.push(Constraint::Length(3));
    constraints.push(Constraint::Length(3));

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    for (idx, field) in Field::ALL.iter().enumerate() {
        render_field(f, app, *field, rows[idx * 2], rows[idx * 2 + 1]);
    }

    let button_row = rows[Field::ALL.len() * 2];
    let banner_row = rows[Field::ALL.len() * 2 + 1];
    render_submit_button(f, app, button_row);
    render_banner(f, app, banner_row);
}

fn render_field(f: &mut Frame, app: &App, field: Field, input_area: Rect, error_area: Rect) {
    let value = app.form.value(field);
    let focused = app.focus == Focus::Field(field);

    // Scroll so the cursor column stays inside the box.
    let inner_width = usize::from(input_area.width.saturating_sub(2));
    let offset = if focused && inner_width > 0 {
        app.cursor_position.saturating_sub(inner_width - 1)
    } else {
        0
    };
    let shown: String = if field.is_secret() {
        "•".repeat(value.chars().count().saturating_sub(offset).min(inner_width))
    } else {
        value.chars().skip(offset).take(inner_width).collect()
    };

    let error = app.form.error(field);
    let border_style = match (error.is_some(), focused) {
        (true, _) => Style::default().fg(Color::Red),
        (false, true) => Style::default().fg(Color::Yellow),
        (false, false) => Style::default().fg(Color::Gray),
    };

    let input = Paragraph::new(shown).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(field.label()),
    );
    f.render_widget(input, input_area);

    if let Some(message) = error {
        let text = Paragraph::new(message).style(Style::default().fg(Color::Red));
        f.render_widget(text, error_area);
    }

    if focused && inner_width > 0 {
        let col = (app.cursor_position - offset).min(inner_width - 1);
        let x = input_area
            .x
            .saturating_add(1)
            .saturating_add(u16::try_from(col).unwrap_or(u16::MAX));
        f.set_cursor_position(Position::new(x, input_area.y.saturating_add(1)));
    }
}

fn render_submit_button(f: &mut Frame, app: &App, area: Rect) {
    let (label, style) = if app.form.is_loading() {
        let spinner = SPINNER[app.tick_count % SPINNER.len()];
        let remaining = app
            .submission_remaining(Instant::now())
            .map(|d| format!(" ({:.1}s)", d.as_secs_f32()))
            .unwrap_or_default();
        (
            format!("{spinner} Processing...{remaining}"),
            Style::default().bg(Color::DarkGray).fg(Color::Gray),
        )
    } else if app.focus == Focus::Submit {
        (
            "Sign up".to_string(),
            Style::default().bg(Color::LightBlue).fg(Color::Black).add_modifier(Modifier::BOLD),
        )
    } else {
        ("Sign up".to_string(), Style::default().bg(Color::Blue).fg(Color::White))
    };

    let button = Paragraph::new(label)
        .alignment(Alignment::Center)
        .style(style)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(button, area);
}

fn render_banner(f: &mut Frame, app: &App, area: Rect) {
    let (message, color) = match app.form.outcome {
        SubmissionOutcome::Unset => return,
        SubmissionOutcome::Success => (SUCCESS_MESSAGE, Color::Green),
        SubmissionOutcome::Error => (ERROR_MESSAGE, Color::Red),
    };

    let banner = Paragraph::new(message)
        .alignment(Alignment::Center)
        .style(Style::default().fg(color))
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(color)));
    f.render_widget(banner, area);
}

fn render_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let text = match app.mode {
        AppMode::Landing => "Enter: open signup form | q: quit".to_string(),
        AppMode::Form if app.form.is_loading() => {
            "Submitting... | Tab/↑↓: move | Esc: back | Ctrl+C: quit".to_string()
        }
        AppMode::Form => {
            "Tab/↑↓: move | Enter: submit | Esc: back | Ctrl+C: quit".to_string()
        }
    };

    let status = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL).title("Status"))
        .style(match app.mode {
            AppMode::Landing => Style::default(),
            AppMode::Form => Style::default().fg(Color::Green),
        });
    f.render_widget(status, area);
}
