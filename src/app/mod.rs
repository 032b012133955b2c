// ABOUTME: Main application structure and state management for the TUI

pub mod events;
pub mod state;
pub mod step_view;

pub use events::{AppEvent, EventHandler};
pub use state::{App, AppState};
