//! Inbox screen rendering

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};
use crate::storage::Message;
use crate::tui::app::App;
use super::helpers::{category_color, format_age, truncate};

/// Renders the screen
pub fn render_inbox(f: &mut Frame, app: &App) {
    let size = f.size();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(5),    // List and detail
            Constraint::Length(3), // Status message
            Constraint::Length(3), // Help text
        ])
        .split(size);

    // Title
    let unread = app.inbox.unread_count();
    let title_text = if unread > 0 {
        format!("Messages ({} unread)", unread)
    } else {
        "Messages".to_string()
    };
    let title = Paragraph::new(title_text)
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, chunks[0]);

    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(chunks[1]);

    render_list(f, app, panes[0]);
    render_detail(f, app, panes[1]);

    // Status message
    let status_text = app.status_message.as_deref().unwrap_or("");
    let status_widget = Paragraph::new(status_text)
        .style(Style::default().fg(Color::Green))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Status"));
    f.render_widget(status_widget, chunks[2]);

    // Help text
    let help_text =
        "↑↓/j/k: Navigate | Enter: Open | m: Read/Unread | d/Del: Delete | n: New | r: Reload | q: Quit";
    let help = Paragraph::new(help_text)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, chunks[3]);
}

fn render_list(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!("Inbox ({})", app.inbox.len()));

    if app.inbox.is_empty() {
        let empty_msg = Paragraph::new("No messages yet")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(block);
        f.render_widget(empty_msg, area);
        return;
    }

    let width = area.width.saturating_sub(6) as usize;
    let items: Vec<ListItem> = app
        .inbox
        .messages()
        .iter()
        .enumerate()
        .map(|(i, message)| list_item(message, i == app.inbox.cursor(), width))
        .collect();

    f.render_widget(List::new(items).block(block), area);
}

fn list_item(message: &Message, highlighted: bool, width: usize) -> ListItem<'static> {
    let style = if message.is_unread() {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };
    let marker = if highlighted {
        Span::styled("→ ", Style::default().fg(Color::Cyan))
    } else {
        Span::raw("  ")
    };

    ListItem::new(vec![
        Line::from(vec![
            marker,
            Span::styled(format!("{} ", message.status.indicator()), style),
            Span::styled(truncate(&message.sender, width / 2), style),
            Span::raw(" "),
            Span::styled(
                format!("[{}]", message.category),
                Style::default().fg(category_color(message.category)),
            ),
        ]),
        Line::from(Span::styled(
            format!("    {}", truncate(&message.property_title, width)),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(Span::styled(
            format!("    {}", message.display_date()),
            Style::default().fg(Color::DarkGray),
        )),
    ])
}

fn render_detail(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title("Message");

    let Some(message) = app.inbox.selected_message() else {
        let hint = Paragraph::new("Select a message to view its contents")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(block);
        f.render_widget(hint, area);
        return;
    };

    let label = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);
    let lines = vec![
        Line::from(Span::styled(
            message.subject.clone(),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![Span::styled("From: ", label), Span::raw(message.sender.clone())]),
        Line::from(vec![
            Span::styled("Property: ", label),
            Span::raw(format!("{} ({})", message.property_title, message.property_id)),
        ]),
        Line::from(vec![
            Span::styled("Received: ", label),
            Span::raw(format!(
                "{} ({})",
                message.timestamp.format("%Y-%m-%d %H:%M"),
                format_age(message.timestamp)
            )),
        ]),
        Line::from(vec![
            Span::styled("Type: ", label),
            Span::styled(
                message.category.to_string(),
                Style::default().fg(category_color(message.category)),
            ),
            Span::raw("  "),
            Span::styled("Status: ", label),
            Span::raw(message.status.to_string()),
        ]),
        Line::from(""),
        Line::from(message.body.clone()),
    ];

    let detail = Paragraph::new(lines).wrap(Wrap { trim: false }).block(block);
    f.render_widget(detail, area);
}
