use std::io;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, widgets::TableState, Terminal};

use crate::core::config::Config;
use crate::core::process_monitor::{
    ProcessEnumerator, RefreshScheduler, RefreshUpdate, TriggerOutcome,
};
use crate::error::ProcwatchError;
use crate::platform::SysinfoEnumerator;

use super::event_handler::MonitorEvent;
use super::render::render_ui;
use super::table::ProcessTable;

const PAGE_SIZE: usize = 10;

/// What the UI may ask of the refresh machinery
pub trait RefreshControl {
    fn trigger_refresh(&mut self) -> TriggerOutcome;
    fn set_periodic(&mut self, enabled: bool, interval: Duration);
}

impl<E: ProcessEnumerator> RefreshControl for RefreshScheduler<E> {
    fn trigger_refresh(&mut self) -> TriggerOutcome {
        RefreshScheduler::trigger_refresh(self)
    }

    fn set_periodic(&mut self, enabled: bool, interval: Duration) {
        RefreshScheduler::set_periodic(self, enabled, interval)
    }
}

/// Monitor application state
pub struct MonitorApp {
    pub table: ProcessTable,
    pub table_state: TableState,
    pub status: String,
    pub should_quit: bool,
    pub show_help: bool,
    pub auto_refresh: bool,
    pub refresh_interval: Duration,
    pub name_width: usize,
    selected_pid: Option<u32>,
}

impl MonitorApp {
    pub fn new(config: &Config) -> Self {
        Self {
            table: ProcessTable::new(),
            table_state: TableState::default(),
            status: "Loading processes...".to_string(),
            should_quit: false,
            show_help: false,
            auto_refresh: false,
            refresh_interval: config.refresh_interval(),
            name_width: config.name_width,
            selected_pid: None,
        }
    }

    pub fn selected_pid(&self) -> Option<u32> {
        self.selected_pid
    }

    /// Apply a finished refresh cycle to the table
    pub fn apply_update(&mut self, update: RefreshUpdate) {
        self.table.apply(&update.operations);
        self.status = update.status;

        // Keep the selection on the same process; if it is gone, stay near
        // the row it used to occupy
        let fallback = self.table_state.selected();
        let index = self
            .selected_pid
            .and_then(|pid| self.table.position_of(pid))
            .or(fallback);
        self.select_index(index);
    }

    /// Handle keyboard events
    pub fn handle_event(&mut self, event: MonitorEvent, refresh: &mut dyn RefreshControl) {
        if self.show_help && event != MonitorEvent::None {
            // Any key closes the help overlay
            self.show_help = false;
            if event != MonitorEvent::Quit {
                return;
            }
        }

        match event {
            MonitorEvent::Quit => self.should_quit = true,
            MonitorEvent::ToggleHelp => self.show_help = !self.show_help,
            MonitorEvent::Refresh => {
                if refresh.trigger_refresh() == TriggerOutcome::Dropped {
                    log::debug!("Manual refresh ignored, one is already running");
                }
            }
            MonitorEvent::ToggleAutoRefresh => {
                self.auto_refresh = !self.auto_refresh;
                refresh.set_periodic(self.auto_refresh, self.refresh_interval);
            }
            MonitorEvent::SelectUp => self.move_selection(-1),
            MonitorEvent::SelectDown => self.move_selection(1),
            MonitorEvent::PageUp => self.move_selection(-(PAGE_SIZE as isize)),
            MonitorEvent::PageDown => self.move_selection(PAGE_SIZE as isize),
            MonitorEvent::SelectFirst => self.select_index(Some(0)),
            MonitorEvent::SelectLast => self.select_index(Some(usize::MAX)),
            MonitorEvent::None => {}
        }
    }

    fn move_selection(&mut self, delta: isize) {
        let next = match self.table_state.selected() {
            Some(current) => (current as isize + delta).max(0) as usize,
            None => 0,
        };
        self.select_index(Some(next));
    }

    fn select_index(&mut self, index: Option<usize>) {
        if self.table.is_empty() {
            self.table_state.select(None);
            self.selected_pid = None;
            return;
        }

        let index = index.map(|i| i.min(self.table.len() - 1));
        self.table_state.select(index);
        self.selected_pid = index.map(|i| self.table.rows()[i].pid);
    }
}

/// Run the process monitor TUI application
pub fn run_monitor_app(config: Config) -> Result<()> {
    let mut scheduler = RefreshScheduler::new(SysinfoEnumerator::new())
        .context("Failed to start refresh scheduler")?;

    let mut terminal = setup_terminal()?;

    let result = event_loop(&mut terminal, &mut scheduler, &config);

    // Restore the terminal even when the loop failed
    let restored = restore_terminal(&mut terminal);
    scheduler.shutdown();

    result?;
    restored
}

type Backend = CrosstermBackend<io::Stdout>;

fn setup_terminal() -> crate::Result<Terminal<Backend>> {
    enable_raw_mode().map_err(|e| {
        ProcwatchError::presentation_init(format!("failed to enable raw mode: {}", e))
    })?;

    let mut stdout = io::stdout();
    if let Err(e) = execute!(stdout, EnterAlternateScreen) {
        let _ = disable_raw_mode();
        return Err(ProcwatchError::presentation_init(format!(
            "failed to enter alternate screen: {}",
            e
        )));
    }

    Terminal::new(CrosstermBackend::new(stdout)).map_err(|e| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        ProcwatchError::presentation_init(format!("failed to create terminal: {}", e))
    })
}

fn restore_terminal(terminal: &mut Terminal<Backend>) -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to leave alternate screen")?;
    terminal.show_cursor().context("Failed to show cursor")?;
    Ok(())
}

fn event_loop<E: ProcessEnumerator>(
    terminal: &mut Terminal<Backend>,
    scheduler: &mut RefreshScheduler<E>,
    config: &Config,
) -> Result<()> {
    let mut app = MonitorApp::new(config);
    let tick = config.ui_tick();

    scheduler.trigger_refresh();
    if config.auto_refresh {
        app.auto_refresh = true;
        scheduler.set_periodic(true, app.refresh_interval);
    }

    loop {
        terminal.draw(|frame| render_ui(frame, &mut app))?;

        if event::poll(tick).context("Event poll failed")? {
            if let Event::Key(key) = event::read().context("Event read failed")? {
                app.handle_event(MonitorEvent::from_key(key), scheduler);
            }
        }

        if app.should_quit {
            break;
        }

        for update in scheduler.poll() {
            app.apply_update(update);
        }
    }

    log::info!("Process monitor exiting");
    Ok(())
}
