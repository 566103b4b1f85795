// Main application state and UI rendering logic for the Disk Info Viewer

// Import tool invocation and the reusable widgets
use crate::gui::{DiskLister, Theme, disk_table, error_dialog};
// Import disk row model
use crate::models::DiskRecord;
// Import egui for UI rendering
use eframe::egui;
use tracing::{info, warn};

/// Message shown for every failure, including a successful run with no rows.
pub const NO_DISKS_MESSAGE: &str = "No disks found or failed to fetch disk information.";

/// The two states a window can be observed in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewState {
    /// Table has at least one row
    Populated,
    /// Table is empty and the error dialog was raised at startup
    Empty,
}

/// Main application state for the eframe app.
/// Holds the rows fetched at startup and the active theme.
pub struct AppState {
    /// Rows parsed from the inventory tool, fixed for the lifetime of the window
    disks: Vec<DiskRecord>,

    /// Error dialog message while the dialog is open
    error: Option<String>,

    /// How many times the error dialog has been raised
    errors_raised: usize,

    /// Theme selected from the menu
    theme: Theme,

    /// Theme last pushed into the egui context
    applied_theme: Option<Theme>,
}

impl AppState {
    /// Creates the application state.
    /// Runs the inventory tool once (blocking) and applies the initial theme.
    ///
    /// # Arguments
    /// * `cc` - eframe creation context containing egui context
    /// * `lister` - configured inventory tool
    /// * `theme` - theme to start with
    pub fn new(cc: &eframe::CreationContext<'_>, lister: &DiskLister, theme: Theme) -> Self {
        info!("fetching disks from {}", lister.tool().display());
        let mut s = Self::with_disks(lister.list_disks(), theme);
        s.sync_theme(&cc.egui_ctx);
        info!("window ready: {:?} with {} rows", s.view_state(), s.disks().len());
        s
    }

    /// Builds the state from already parsed rows.
    /// An empty list raises the error dialog.
    pub fn with_disks(disks: Vec<DiskRecord>, theme: Theme) -> Self {
        let mut s = Self {
            disks,
            error: None,
            errors_raised: 0,
            theme,
            applied_theme: None,
        };

        if s.disks.is_empty() {
            s.raise_error(NO_DISKS_MESSAGE);
        }

        s
    }

    fn raise_error(&mut self, message: &str) {
        self.error = Some(message.to_string());
        self.errors_raised += 1;
        warn!("{}", message);
    }

    pub fn view_state(&self) -> ViewState {
        if self.disks.is_empty() {
            ViewState::Empty
        } else {
            ViewState::Populated
        }
    }

    pub fn disks(&self) -> &[DiskRecord] {
        &self.disks
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    #[cfg(test)]
    pub fn errors_raised(&self) -> usize {
        self.errors_raised
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Selects a theme; it takes effect on the next frame.
    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    /// Closes the error dialog. The table stays as it is.
    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    /// Pushes the selected theme into the egui context if it changed.
    fn sync_theme(&mut self, ctx: &egui::Context) {
        if self.applied_theme != Some(self.theme) {
            ctx.set_visuals(self.theme.visuals());
            self.applied_theme = Some(self.theme);
        }
    }

    fn menu_bar(&mut self, ui: &mut egui::Ui) {
        egui::menu::bar(ui, |ui| {
            ui.menu_button("Theme", |ui| {
                for theme in [Theme::Light, Theme::Dark] {
                    if ui.radio(self.theme() == theme, theme.name()).clicked() {
                        self.set_theme(theme);
                        ui.close_menu();
                    }
                }
            });
        });
    }
}

impl eframe::App for AppState {
    /// Main UI update function called every frame.
    /// Renders the menu bar, the disk table and, while open, the error dialog.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.sync_theme(ctx);

        let blocked = self.error().is_some();

        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            ui.add_enabled_ui(!blocked, |ui| self.menu_bar(ui));
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_enabled_ui(!blocked, |ui| disk_table(ui, &self.disks));
        });

        let dismissed = self
            .error()
            .is_some_and(|message| error_dialog(ctx, message));
        if dismissed {
            self.dismiss_error();
        }

        // Theme picked this frame shows up immediately
        self.sync_theme(ctx);
    }
}
