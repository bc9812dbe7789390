//! Rendering for the TUI.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Tabs, Wrap},
};

use super::app::{App, Tab};

pub fn draw(frame: &mut Frame, app: &App) {
    let layout = Layout::vertical([
        Constraint::Length(3), // Tabs
        Constraint::Min(8),    // Actions and output
        Constraint::Length(3), // Input line
        Constraint::Length(1), // Status
    ])
    .split(frame.area());

    draw_tabs(frame, app, layout[0]);

    let body = Layout::horizontal([Constraint::Percentage(30), Constraint::Percentage(70)])
        .split(layout[1]);
    draw_actions(frame, app, body[0]);
    draw_output(frame, app, body[1]);

    draw_input(frame, app, layout[2]);
    draw_status(frame, app, layout[3]);
}

fn draw_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<&str> = Tab::ALL.iter().map(Tab::title).collect();
    let selected = Tab::ALL.iter().position(|t| *t == app.tab).unwrap_or(0);
    let tabs = Tabs::new(titles)
        .block(Block::default().borders(Borders::ALL).title(" flo "))
        .select(selected)
        .highlight_style(Style::default().fg(Color::Yellow).bold());
    frame.render_widget(tabs, area);
}

fn draw_actions(frame: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = app
        .tab
        .actions()
        .iter()
        .map(|action| ListItem::new(action.label()))
        .collect();
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(" Actions "))
        .highlight_style(Style::default().bg(Color::Blue).fg(Color::White))
        .highlight_symbol("> ");

    let mut state = ListState::default();
    state.select(Some(app.selected()));
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_output(frame: &mut Frame, app: &App, area: Rect) {
    let visible = area.height.saturating_sub(2) as usize;
    let start = app.output.len().saturating_sub(visible);
    let lines: Vec<Line> = app.output[start..]
        .iter()
        .map(|line| {
            if line.starts_with("── ") {
                Line::from(line.as_str()).style(Style::default().fg(Color::Cyan).bold())
            } else {
                Line::from(line.as_str())
            }
        })
        .collect();

    let title = match &app.chat_session {
        Some(session) if app.tab == Tab::Chat => format!(" Output (chat: {}) ", session),
        _ => " Output ".to_string(),
    };
    let output = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(title))
        .wrap(Wrap { trim: false });
    frame.render_widget(output, area);
}

fn draw_input(frame: &mut Frame, app: &App, area: Rect) {
    let (title, text, style) = match &app.input {
        Some(input) => (
            format!(" {} ", input.prompt()),
            format!("{}_", input.buffer),
            Style::default().fg(Color::Yellow),
        ),
        None => (
            " Input ".to_string(),
            String::new(),
            Style::default().fg(Color::DarkGray),
        ),
    };
    let input = Paragraph::new(text)
        .style(style)
        .block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(input, area);
}

fn draw_status(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans = Vec::new();
    if app.is_busy() {
        spans.push(Span::styled(
            format!(" {} ", app.spinner()),
            Style::default().fg(Color::Yellow),
        ));
    } else {
        spans.push(Span::raw(" "));
    }
    spans.push(Span::raw(app.status.as_str()));
    spans.push(Span::styled(
        "  │ Tab/Shift-Tab: tabs  ↑↓: select  Enter: run  c: clear  q: quit",
        Style::default().fg(Color::DarkGray),
    ));
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
