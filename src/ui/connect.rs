//! Rendering for the connect control and the connected-record list.

use ratatui::{
    layout::{Alignment, Margin, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{
        Block, Borders, List, ListItem, Paragraph, Scrollbar, ScrollbarOrientation,
    },
    Frame,
};

use crate::app::ScrollState;
use crate::integration::{FlowState, Item};

/// Label for the connect control in each state.
pub fn connect_label(state: FlowState) -> &'static str {
    match state {
        FlowState::Idle => "Connect to HubSpot",
        FlowState::Connecting => "Connecting...",
        FlowState::Connected => "HubSpot Connected",
    }
}

fn connect_style(state: FlowState) -> Style {
    match state {
        FlowState::Idle => Style::default().fg(Color::Cyan),
        // Disabled while the attempt runs
        FlowState::Connecting => Style::default().fg(Color::Yellow).add_modifier(Modifier::DIM),
        FlowState::Connected => Style::default().fg(Color::Green),
    }
}

/// Render the connect control: disabled while connecting, non-interactive
/// once connected.
pub fn render_connect_control(f: &mut Frame, area: Rect, state: FlowState) {
    let label = Line::from(Span::styled(
        connect_label(state),
        connect_style(state).add_modifier(Modifier::BOLD),
    ));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(connect_style(state))
        .title(" Integration ");

    f.render_widget(
        Paragraph::new(label).alignment(Alignment::Center).block(block),
        area,
    );
}

/// Render the read-only list of connected records.
pub fn render_items(f: &mut Frame, area: Rect, items: &[Item], scroll: &mut ScrollState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(format!(" Connected Records ({}) ", items.len()));

    if items.is_empty() {
        let hint = Paragraph::new("No records connected yet. Press Enter to connect.")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(block);
        f.render_widget(hint, area);
        return;
    }

    let max_offset = items.len().saturating_sub(1);
    scroll.offset = scroll.offset.min(max_offset);
    scroll.update(items.len());

    let rows: Vec<ListItem> = items
        .iter()
        .skip(scroll.offset)
        .map(|item| {
            ListItem::new(vec![
                Line::from(Span::styled(
                    item.name.clone(),
                    Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    item.secondary_line(),
                    Style::default().fg(Color::DarkGray),
                )),
            ])
        })
        .collect();

    f.render_widget(List::new(rows).block(block), area);

    let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
        .begin_symbol(None)
        .end_symbol(None);
    f.render_stateful_widget(
        scrollbar,
        area.inner(&Margin {
            vertical: 1,
            horizontal: 0,
        }),
        &mut scroll.scrollbar,
    );
}

/// Render the key-hint footer for the current state.
pub fn render_footer(f: &mut Frame, area: Rect, state: FlowState) {
    let hints = match state {
        FlowState::Idle => "Enter: connect | Up/Down: scroll | q: quit",
        FlowState::Connecting => "d: done authorizing in browser | q: quit",
        FlowState::Connected => "Up/Down: scroll | q: quit",
    };
    f.render_widget(
        Paragraph::new(hints).style(Style::default().fg(Color::DarkGray)),
        area,
    );
}
