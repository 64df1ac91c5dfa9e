//! Compose screen rendering

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use crate::compose::MessageTemplate;
use crate::tui::app::App;
use crate::tui::types::ComposeField;

/// Renders the screen
pub fn render_compose(f: &mut Frame, app: &App) {
    let size = f.size();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Length(3), // Templates
            Constraint::Length(3), // Property ID
            Constraint::Length(3), // Property title
            Constraint::Length(3), // Subject
            Constraint::Min(4),    // Message
            Constraint::Length(3), // Status message
            Constraint::Length(3), // Help text
        ])
        .split(size);

    // Title
    let title = Paragraph::new(format!("Message {}", landlord_label(app)))
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, chunks[0]);

    // Templates
    let mut template_spans = Vec::new();
    for (i, template) in MessageTemplate::all().iter().enumerate() {
        let style = if app.compose.template == Some(*template) {
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        template_spans.push(Span::styled(format!("F{}: {}", i + 1, template.label()), style));
        template_spans.push(Span::raw("   "));
    }
    let templates = Paragraph::new(Line::from(template_spans))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Quick Message Templates"));
    f.render_widget(templates, chunks[1]);

    let fields = [
        (ComposeField::PropertyId, &app.compose.property_id, chunks[2]),
        (ComposeField::PropertyTitle, &app.compose.property_title, chunks[3]),
        (ComposeField::Subject, &app.compose.subject, chunks[4]),
        (ComposeField::Body, &app.compose.body, chunks[5]),
    ];
    for (field, value, area) in fields {
        let focused = app.compose_field == field;
        let border = if focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };
        let text = if focused {
            format!("{}_", value)
        } else {
            value.clone()
        };
        let input = Paragraph::new(text)
            .wrap(Wrap { trim: false })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(border)
                    .title(field.label()),
            );
        f.render_widget(input, area);
    }

    // Status message
    let status_text = app.status_message.as_deref().unwrap_or("");
    let status_widget = Paragraph::new(status_text)
        .style(Style::default().fg(Color::Red))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Status"));
    f.render_widget(status_widget, chunks[6]);

    // Help text
    let help = Paragraph::new("Tab: Next field | F1-F4: Template | Enter: Send | Esc: Cancel")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, chunks[7]);
}

fn landlord_label(app: &App) -> String {
    if app.compose.property_title.is_empty() {
        "Landlord".to_string()
    } else {
        format!("Landlord about {}", app.compose.property_title)
    }
}
