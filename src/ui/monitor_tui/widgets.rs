use std::time::Duration;

use ratatui::prelude::*;

/// Cut a process name down to `width` characters for display
pub fn truncate_name(name: &str, width: usize) -> String {
    name.chars().take(width).collect()
}

/// Get color for a CPU percentage
pub fn cpu_color(cpu: f32) -> Color {
    match cpu {
        c if c < 25.0 => Color::Reset,
        c if c < 50.0 => Color::Cyan,
        c if c < 90.0 => Color::LightYellow,
        _ => Color::LightRed,
    }
}

/// Short label for a refresh interval, e.g. "5s" or "500ms"
pub fn format_interval(interval: Duration) -> String {
    if interval.subsec_millis() == 0 && interval.as_secs() > 0 {
        format!("{}s", interval.as_secs())
    } else {
        format!("{}ms", interval.as_millis())
    }
}
