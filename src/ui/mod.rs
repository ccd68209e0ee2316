//! Terminal rendering for the integration client.

mod connect;
mod toast;

pub use connect::{connect_label, render_connect_control, render_footer, render_items};
pub use toast::{render_toasts, Toast, ToastLevel, ToastState};

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;

/// Draw the whole frame.
pub fn draw(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(f.size());

    let header = Paragraph::new("Hublink")
        .style(Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(header, chunks[0]);

    let state = app.state();
    render_connect_control(f, chunks[1], state);

    let items = app.items();
    render_items(f, chunks[2], &items, &mut app.scroll);

    render_footer(f, chunks[3], state);

    render_toasts(f, &app.toasts);
}
