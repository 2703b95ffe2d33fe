//! TUI rendering using ratatui.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, Tabs, Wrap};

use fitscribe_core::plan::{Difficulty, format_duration};
use fitscribe_core::{EXAMPLE_PROMPTS, MAX_PROMPT_CHARS, View};

use super::app::App;

/// Render the current view.
pub fn render(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),    // main content
            Constraint::Length(1), // status bar
        ])
        .split(f.area());

    if app.show_help {
        render_help(f, chunks[0]);
    } else {
        match app.view() {
            View::Prompt => render_prompt(f, app, chunks[0]),
            View::Plan => render_plan(f, app, chunks[0]),
        }
    }

    render_status_bar(f, app, chunks[1]);
}

fn render_prompt(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(8)])
        .split(area);

    let count = app.input.chars().count();
    let input = Paragraph::new(format!("{}_", app.input))
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Describe your ideal workout program ")
                .title_bottom(format!(" {count}/{MAX_PROMPT_CHARS} ")),
        );
    f.render_widget(input, chunks[0]);

    let mut lines = vec![Line::from(Span::styled(
        " Tab inserts an example:",
        Style::default().fg(Color::Yellow),
    ))];
    lines.extend(
        EXAMPLE_PROMPTS
            .iter()
            .map(|p| Line::from(format!("   \"{p}\""))),
    );
    let examples = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Examples "),
    );
    f.render_widget(examples, chunks[1]);
}

fn render_plan(f: &mut Frame, app: &App, area: Rect) {
    let (Some(plan), Some(meta)) = (app.plan(), app.metadata()) else {
        f.render_widget(Paragraph::new("No plan loaded."), area);
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // overview
            Constraint::Length(3), // week tabs
            Constraint::Length(3), // day tabs
            Constraint::Min(5),    // exercises
        ])
        .split(area);

    // Overview.
    let focus: Vec<String> = meta.focus.iter().map(ToString::to_string).collect();
    let overview = vec![
        Line::from(vec![
            Span::styled(
                format!("{}  ", format_duration(meta.total_weeks)),
                Style::default().fg(Color::Cyan),
            ),
            Span::raw(format!(
                "{} workout days  {} exercises  ",
                meta.total_workout_days, meta.total_exercises
            )),
            difficulty_colored(meta.difficulty),
        ]),
        Line::from(Span::styled(
            if focus.is_empty() {
                "No specific focus".to_owned()
            } else {
                focus.join(" · ")
            },
            Style::default().fg(Color::DarkGray),
        )),
    ];
    let header = Paragraph::new(overview).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", plan.name)),
    );
    f.render_widget(header, chunks[0]);

    // Week tabs.
    let weeks: Vec<String> = plan
        .weeks
        .iter()
        .map(|w| format!("Week {}", w.week_number))
        .collect();
    let week_tabs = Tabs::new(weeks)
        .select(app.selected_week)
        .highlight_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::ALL).title(" Weeks "));
    f.render_widget(week_tabs, chunks[1]);

    // Day tabs.
    let days: Vec<String> = plan
        .weeks
        .get(app.selected_week)
        .map(|w| {
            w.days
                .iter()
                .map(|d| format!("Day {}: {}", d.day_number, d.title))
                .collect()
        })
        .unwrap_or_default();
    let day_tabs = Tabs::new(days)
        .select(app.selected_day)
        .highlight_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::ALL).title(" Days "));
    f.render_widget(day_tabs, chunks[2]);

    // Exercises.
    let Some(day) = app.current_day() else {
        f.render_widget(Paragraph::new("This week has no days."), chunks[3]);
        return;
    };
    if day.is_rest_day() {
        let rest = Paragraph::new("Rest and recovery").block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ", day.title)),
        );
        f.render_widget(rest, chunks[3]);
        return;
    }

    let header_cells = ["", "Exercise", "Sets", "Reps", "Rest", "Notes"]
        .iter()
        .map(|h| Cell::from(*h).style(Style::default().fg(Color::Yellow)));
    let header = Row::new(header_cells).height(1);

    let rows = day.exercises.iter().enumerate().map(|(i, e)| {
        let style = if i == app.selected_exercise {
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };

        Row::new(vec![
            Cell::from(e.circuit.clone()),
            Cell::from(e.exercise_name.clone()),
            Cell::from(e.sets.to_string()),
            Cell::from(e.reps.clone()),
            Cell::from(e.rest.clone().unwrap_or_else(|| "-".to_string())),
            Cell::from(e.notes.clone()),
        ])
        .style(style)
    });

    let table = Table::new(
        rows,
        [
            Constraint::Length(3),
            Constraint::Percentage(30),
            Constraint::Length(5),
            Constraint::Length(12),
            Constraint::Length(8),
            Constraint::Min(10),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", day.title)),
    );

    f.render_widget(table, chunks[3]);
}

fn render_help(f: &mut Frame, area: Rect) {
    let heading = |s: &'static str| {
        Line::from(Span::styled(
            s,
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ))
    };
    let text = vec![
        Line::from(""),
        heading("  Prompt"),
        Line::from("    Enter       Generate plan"),
        Line::from("    Tab         Insert example prompt"),
        Line::from("    Ctrl-R      Retry failed prompt"),
        Line::from("    Esc         Quit"),
        Line::from(""),
        heading("  Plan"),
        Line::from("    j/k         Select exercise"),
        Line::from("    h/l         Previous / next day"),
        Line::from("    [ ] Tab     Previous / next week"),
        Line::from("    K/J         Move exercise up / down"),
        Line::from("    d           Delete exercise"),
        Line::from("    s           Save to file"),
        Line::from("    n           New plan (discards this one)"),
        Line::from("    q/Esc       Quit"),
        Line::from(""),
        Line::from("  Press any key to close this help."),
    ];

    let help = Paragraph::new(text).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Help "),
    );
    f.render_widget(help, area);
}

fn render_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let view_name = match app.view() {
        View::Prompt => "Prompt",
        View::Plan => "Plan",
    };

    let warnings = app.session.warnings().len();
    let status_msg = app.status_message.as_deref().unwrap_or("");

    let mut spans = vec![
        Span::styled(
            format!(" {view_name} "),
            Style::default().bg(Color::Blue).fg(Color::White),
        ),
        Span::raw("  "),
    ];
    if app.view() == View::Plan {
        spans.push(if warnings > 0 {
            Span::styled(
                format!("{warnings} validation warning(s)"),
                Style::default().fg(Color::Yellow),
            )
        } else {
            Span::styled("valid", Style::default().fg(Color::DarkGray))
        });
        if app.dirty {
            spans.push(Span::styled(" [modified]", Style::default().fg(Color::Magenta)));
        }
        spans.push(Span::raw("  "));
    }
    spans.push(Span::styled(status_msg, Style::default().fg(Color::Green)));
    spans.push(Span::raw("  ?:help"));

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

// -- Helpers --

fn difficulty_colored(difficulty: Difficulty) -> Span<'static> {
    let color = match difficulty {
        Difficulty::Beginner => Color::Green,
        Difficulty::Intermediate => Color::Yellow,
        Difficulty::Advanced => Color::Red,
    };
    Span::styled(difficulty.to_string(), Style::default().fg(color))
}
