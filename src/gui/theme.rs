// Window-wide visual presets

use eframe::egui;

/// The two visual presets the window can switch between.
/// Owned by `AppState` and pushed into the egui context when it changes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum Theme {
    /// Stock egui light visuals, no custom styling
    Light,
    /// Preloaded dark palette
    #[default]
    Dark,
}

impl Theme {
    pub fn name(&self) -> &'static str {
        match self {
            Theme::Light => "Light Mode",
            Theme::Dark => "Dark Mode",
        }
    }

    /// Builds the egui visuals for this preset.
    pub fn visuals(&self) -> egui::Visuals {
        match self {
            Theme::Light => egui::Visuals::light(),
            Theme::Dark => dark_visuals(),
        }
    }
}

const fn rgb(hex: u32) -> egui::Color32 {
    egui::Color32::from_rgb(
        ((hex >> 16) & 0xFF) as u8,
        ((hex >> 8) & 0xFF) as u8,
        (hex & 0xFF) as u8,
    )
}

const BACKGROUND: egui::Color32 = rgb(0x19232D);
const SURFACE: egui::Color32 = rgb(0x37414F);
const BORDER: egui::Color32 = rgb(0x455364);
const HOVER: egui::Color32 = rgb(0x54687A);
const ACCENT: egui::Color32 = rgb(0x1A72BB);
const ACCENT_LIGHT: egui::Color32 = rgb(0x259AE9);
const TEXT: egui::Color32 = rgb(0xDFE1E2);

// Slate background with a blue selection accent.
fn dark_visuals() -> egui::Visuals {
    let mut v = egui::Visuals::dark();

    v.panel_fill = BACKGROUND;
    v.window_fill = BACKGROUND;
    v.window_stroke = egui::Stroke::new(1.0, BORDER);
    v.extreme_bg_color = rgb(0x101820);
    v.faint_bg_color = rgb(0x1F2B36);
    v.override_text_color = Some(TEXT);
    v.hyperlink_color = ACCENT_LIGHT;

    v.selection.bg_fill = ACCENT;
    v.selection.stroke = egui::Stroke::new(1.0, TEXT);

    v.widgets.noninteractive.bg_fill = BACKGROUND;
    v.widgets.noninteractive.bg_stroke = egui::Stroke::new(1.0, BORDER);
    v.widgets.inactive.bg_fill = SURFACE;
    v.widgets.inactive.weak_bg_fill = SURFACE;
    v.widgets.hovered.bg_fill = HOVER;
    v.widgets.hovered.weak_bg_fill = HOVER;
    v.widgets.hovered.bg_stroke = egui::Stroke::new(1.0, ACCENT_LIGHT);
    v.widgets.active.bg_fill = ACCENT;
    v.widgets.active.weak_bg_fill = ACCENT;

    v
}
