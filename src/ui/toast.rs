//! Toast notifications for transient alerts.
//!
//! Every failure path in the connection flow surfaces here, along with
//! connection status updates. Toasts stack in the top-right corner and
//! auto-dismiss after a per-level duration.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Severity of a toast, determining color and lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Success,
    Error,
}

impl ToastLevel {
    /// Border and prefix color for this level.
    pub fn color(&self) -> Color {
        match self {
            ToastLevel::Info => Color::Cyan,
            ToastLevel::Success => Color::Green,
            ToastLevel::Error => Color::Red,
        }
    }

    /// Prefix icon shown before the message.
    pub fn prefix(&self) -> &'static str {
        match self {
            ToastLevel::Info => "[i]",
            ToastLevel::Success => "[+]",
            ToastLevel::Error => "[x]",
        }
    }

    /// How long a toast of this level stays visible.
    pub fn duration(&self) -> Duration {
        match self {
            ToastLevel::Info => Duration::from_secs(3),
            ToastLevel::Success => Duration::from_secs(4),
            // Errors linger: the user may be looking at the browser.
            ToastLevel::Error => Duration::from_secs(8),
        }
    }
}

/// A single toast notification.
#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub level: ToastLevel,
    created_at: Instant,
}

impl Toast {
    fn new(message: impl Into<String>, level: ToastLevel) -> Self {
        Self {
            message: message.into(),
            level,
            created_at: Instant::now(),
        }
    }

    /// Whether this toast has outlived its duration.
    pub fn is_expired(&self) -> bool {
        self.created_at.elapsed() >= self.level.duration()
    }
}

/// Queue of active toasts, newest last.
#[derive(Debug, Default)]
pub struct ToastState {
    pub toasts: VecDeque<Toast>,
}

/// Most toasts shown at once; older ones are dropped first.
const MAX_VISIBLE: usize = 3;

impl ToastState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a toast, dropping the oldest beyond the visible limit.
    pub fn push(&mut self, message: impl Into<String>, level: ToastLevel) {
        self.toasts.push_back(Toast::new(message, level));
        while self.toasts.len() > MAX_VISIBLE {
            self.toasts.pop_front();
        }
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push(message, ToastLevel::Info);
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.push(message, ToastLevel::Success);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(message, ToastLevel::Error);
    }

    /// Drop expired toasts. Call once per frame.
    pub fn tick(&mut self) {
        self.toasts.retain(|t| !t.is_expired());
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }

    pub fn len(&self) -> usize {
        self.toasts.len()
    }
}

/// Truncate a message to at most `max_len` bytes, appending an ellipsis
/// when anything was cut. Server error details may be non-ASCII, so the
/// cut point must land on a char boundary.
fn truncated(message: &str, max_len: usize) -> String {
    if message.len() <= max_len {
        return message.to_string();
    }
    let mut cut = max_len.saturating_sub(3);
    while !message.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}...", &message[..cut])
}

/// Render the toast stack in the top-right corner.
pub fn render_toasts(f: &mut Frame, state: &ToastState) {
    if state.is_empty() {
        return;
    }

    let frame_area = f.size();
    let width = 44u16.min(frame_area.width.saturating_sub(4));
    let height = 3u16;

    let x = frame_area.width.saturating_sub(width + 2);
    for (i, toast) in state.toasts.iter().enumerate() {
        let y = 1 + (i as u16) * height;
        if y + height > frame_area.height {
            break;
        }

        let area = Rect::new(x, y, width, height);
        f.render_widget(Clear, area);

        let color = toast.level.color();
        let max_len = (width as usize).saturating_sub(toast.level.prefix().len() + 5);
        let message = truncated(&toast.message, max_len);

        let content = Line::from(vec![
            Span::styled(toast.level.prefix(), Style::default().fg(color)),
            Span::raw(" "),
            Span::styled(message, Style::default().fg(Color::White)),
        ]);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color))
            .style(Style::default().bg(Color::Black));
        f.render_widget(Paragraph::new(content).block(block), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_colors() {
        assert_eq!(ToastLevel::Info.color(), Color::Cyan);
        assert_eq!(ToastLevel::Success.color(), Color::Green);
        assert_eq!(ToastLevel::Error.color(), Color::Red);
    }

    #[test]
    fn test_error_toasts_outlive_info() {
        assert!(ToastLevel::Error.duration() > ToastLevel::Info.duration());
    }

    #[test]
    fn test_push_and_len() {
        let mut state = ToastState::new();
        state.error("Authorization failed");
        state.info("Checking connection");
        assert_eq!(state.len(), 2);
        assert_eq!(state.toasts.front().unwrap().level, ToastLevel::Error);
    }

    #[test]
    fn test_oldest_dropped_beyond_limit() {
        let mut state = ToastState::new();
        for i in 0..5 {
            state.info(format!("toast {i}"));
        }
        assert_eq!(state.len(), MAX_VISIBLE);
        assert_eq!(state.toasts.front().unwrap().message, "toast 2");
    }

    #[test]
    fn test_short_message_not_truncated() {
        assert_eq!(truncated("Checking connection...", 36), "Checking connection...");
    }

    #[test]
    fn test_long_message_truncated_with_ellipsis() {
        let message = "x".repeat(50);
        let cut = truncated(&message, 36);
        assert_eq!(cut.len(), 36);
        assert!(cut.ends_with("..."));
    }

    #[test]
    fn test_truncation_backs_off_to_char_boundary() {
        // 32 ASCII bytes, then two-byte chars: byte 33 falls inside a char.
        let message = format!("{}ééééé", "x".repeat(32));
        let cut = truncated(&message, 36);
        assert_eq!(cut, format!("{}...", "x".repeat(32)));
    }

    #[test]
    fn test_fresh_toast_not_expired() {
        let toast = Toast::new("hello", ToastLevel::Info);
        assert!(!toast.is_expired());
    }

    #[test]
    fn test_tick_keeps_fresh_toasts() {
        let mut state = ToastState::new();
        state.success("HubSpot connected");
        state.tick();
        assert_eq!(state.len(), 1);
    }
}
