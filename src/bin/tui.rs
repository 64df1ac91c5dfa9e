//! HomeLease Inbox TUI (Terminal User Interface)
//!
//! Usage: `homelease-inbox [settings.json]`

use anyhow::Context;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use homelease_inbox::compose::MessageTemplate;
use homelease_inbox::tui::{ui::ui, App, Screen};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;

fn main() -> anyhow::Result<()> {
    let settings_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "settings.json".to_string());

    // Open the store before touching the terminal so errors print normally
    let mut app = App::new_with_settings(&settings_path)
        .with_context(|| format!("Failed to open inbox using {}", settings_path))?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run main loop
    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res.context("Terminal UI failed")
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if event::poll(std::time::Duration::from_millis(250))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }

                match app.current_screen {
                    Screen::Inbox => match key.code {
                        KeyCode::Char('q') => app.should_quit = true,
                        KeyCode::Esc => app.close_detail(),
                        KeyCode::Down | KeyCode::Char('j') => app.next(),
                        KeyCode::Up | KeyCode::Char('k') => app.previous(),
                        KeyCode::Enter => app.open_selected(),
                        KeyCode::Char('m') => app.toggle_read(),
                        KeyCode::Char('d') | KeyCode::Delete => app.delete_selected(),
                        KeyCode::Char('n') => app.show_compose_screen(),
                        KeyCode::Char('r') => app.refresh(),
                        _ => {}
                    },
                    Screen::Compose => match key.code {
                        KeyCode::Esc => app.cancel_compose(),
                        KeyCode::Tab => app.next_field(),
                        KeyCode::Enter => app.send_compose(),
                        KeyCode::Backspace => app.backspace(),
                        KeyCode::F(n @ 1..=4) => {
                            app.apply_template(MessageTemplate::all()[(n - 1) as usize]);
                        }
                        KeyCode::Char(c) => app.input_char(c),
                        _ => {}
                    },
                }
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
