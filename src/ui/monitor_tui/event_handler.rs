use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};

/// Events that can occur in the process monitor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorEvent {
    /// Quit the application
    Quit,
    /// Toggle help overlay
    ToggleHelp,
    /// Refresh the process list now
    Refresh,
    /// Toggle periodic refresh
    ToggleAutoRefresh,
    SelectUp,
    SelectDown,
    PageUp,
    PageDown,
    SelectFirst,
    SelectLast,
    /// No action
    None,
}

impl MonitorEvent {
    /// Map a key press to an event; releases and repeats map to `None`
    pub fn from_key(key: KeyEvent) -> Self {
        if key.kind != KeyEventKind::Press {
            return MonitorEvent::None;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => MonitorEvent::Quit,
            KeyCode::Char('?') | KeyCode::Char('h') => MonitorEvent::ToggleHelp,
            KeyCode::Char('r') | KeyCode::F(5) => MonitorEvent::Refresh,
            KeyCode::Char('a') => MonitorEvent::ToggleAutoRefresh,
            KeyCode::Up | KeyCode::Char('k') => MonitorEvent::SelectUp,
            KeyCode::Down | KeyCode::Char('j') => MonitorEvent::SelectDown,
            KeyCode::PageUp => MonitorEvent::PageUp,
            KeyCode::PageDown => MonitorEvent::PageDown,
            KeyCode::Home => MonitorEvent::SelectFirst,
            KeyCode::End => MonitorEvent::SelectLast,
            _ => MonitorEvent::None,
        }
    }
}
