use ratatui::{
    prelude::*,
    widgets::{
        Block, Borders, Cell, Clear, Paragraph, Row, Scrollbar, ScrollbarOrientation,
        ScrollbarState, Table,
    },
};

use super::app::MonitorApp;
use super::widgets::{cpu_color, format_interval, truncate_name};

/// Main render function
pub fn render_ui(frame: &mut Frame, app: &mut MonitorApp) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(3),    // Process table
            Constraint::Length(1), // Actions
            Constraint::Length(1), // Status line
        ])
        .split(area);

    render_title(frame, chunks[0]);
    render_process_table(frame, chunks[1], app);
    render_actions(frame, chunks[2], app);
    render_status(frame, chunks[3], app);

    if app.show_help {
        render_help_overlay(frame, area, app);
    }
}

fn render_title(frame: &mut Frame, area: Rect) {
    let title = Paragraph::new("System Process Monitor")
        .alignment(Alignment::Center)
        .style(Style::default().add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(title, area);
}

fn render_process_table(frame: &mut Frame, area: Rect, app: &mut MonitorApp) {
    let block = Block::default()
        .title(format!(" Processes ({}) ", app.table.len()))
        .borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    // Not enough space for header + at least one row
    if inner.height < 2 {
        return;
    }

    let bold = Style::default().add_modifier(Modifier::BOLD);
    let header = Row::new(vec![
        Cell::from("PID").style(bold),
        Cell::from("Process Name").style(bold),
        Cell::from("CPU %").style(bold),
        Cell::from("Memory %").style(bold),
        Cell::from("Status").style(bold),
        Cell::from("User").style(bold),
    ])
    .height(1);

    let name_width = app.name_width;
    let rows: Vec<Row> = app
        .table
        .rows()
        .iter()
        .map(|proc| {
            Row::new(vec![
                Cell::from(proc.pid.to_string()),
                Cell::from(truncate_name(&proc.name, name_width)),
                Cell::from(format!("{:.1}", proc.cpu_percent))
                    .style(Style::default().fg(cpu_color(proc.cpu_percent))),
                Cell::from(format!("{:.1}", proc.memory_percent)),
                Cell::from(proc.status.clone()),
                Cell::from(proc.user.clone()),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(8),
            Constraint::Length(name_width.min(u16::MAX as usize) as u16),
            Constraint::Length(8),
            Constraint::Length(10),
            Constraint::Length(12),
            Constraint::Min(12),
        ],
    )
    .header(header)
    .row_highlight_style(
        Style::default()
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD),
    );

    frame.render_stateful_widget(table, inner, &mut app.table_state);

    let mut scrollbar_state = ScrollbarState::new(app.table.len())
        .position(app.table_state.selected().unwrap_or(0));
    frame.render_stateful_widget(
        Scrollbar::new(ScrollbarOrientation::VerticalRight),
        area,
        &mut scrollbar_state,
    );
}

fn render_actions(frame: &mut Frame, area: Rect, app: &MonitorApp) {
    let checkbox = if app.auto_refresh { "[x]" } else { "[ ]" };
    let text = format!(
        " r: Refresh Processes │ a: {} Auto-refresh ({}) │ ?: Help │ q: Exit ",
        checkbox,
        format_interval(app.refresh_interval)
    );
    let para = Paragraph::new(text).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(para, area);
}

fn render_status(frame: &mut Frame, area: Rect, app: &MonitorApp) {
    let color = if app.status.starts_with("Error") {
        Color::Red
    } else {
        Color::White
    };
    let para = Paragraph::new(format!(" {}", app.status))
        .alignment(Alignment::Center)
        .style(Style::default().fg(color));
    frame.render_widget(para, area);
}

fn render_help_overlay(frame: &mut Frame, area: Rect, app: &MonitorApp) {
    let help_text = format!(
        r#"
    System Process Monitor - Help

    Keyboard Shortcuts:
    ─────────────────────────────────────
    r / F5        Refresh processes now
    a             Toggle auto-refresh ({})
    ↑↓ / j k      Move selection
    PgUp / PgDn   Move selection by a page
    Home / End    First / last process
    ? / h         Toggle this help screen
    q / Esc       Exit

    Press any key to close this help
    "#,
        format_interval(app.refresh_interval)
    );

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .style(Style::default().bg(Color::DarkGray));

    let paragraph = Paragraph::new(help_text)
        .block(block)
        .alignment(Alignment::Left);

    // Center the help popup
    let popup_area = centered_rect(60, 60, area);
    frame.render_widget(Clear, popup_area);
    frame.render_widget(paragraph, popup_area);
}

/// Helper function to create a centered rect
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
