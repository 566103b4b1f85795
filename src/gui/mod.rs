// GUI module organization and public exports

// Main application state and UI logic
mod app;
// Reusable UI components (disk table, error dialog)
mod components;
// Inventory tool invocation and table parsing
mod disk_scanner;
// Light/dark visual presets
mod theme;

// Export AppState for use in main.rs
pub use app::AppState;
// Export all component functions (disk_table, error_dialog)
pub use components::*;
pub use disk_scanner::{DiskLister, TOOL_FILE_NAME};
pub use theme::Theme;
