//! Terminal User Interface for the process monitor.
//!
//! Renders the process table with ratatui and applies reconciliation results
//! as they arrive from the refresh scheduler.

mod app;
mod event_handler;
mod render;
mod table;
pub mod widgets;

pub use app::{run_monitor_app, MonitorApp, RefreshControl};
pub use event_handler::MonitorEvent;
pub use table::ProcessTable;
